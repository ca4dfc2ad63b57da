//! Implementação x86_64

pub mod ports;

pub use ports::X86Ports;
