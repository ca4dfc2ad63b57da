//! Console de debug: macros `serial_*!`, destino global e renderização.

pub mod console;
#[cfg(feature = "log")]
pub mod logger;
pub mod logging;
pub mod print;
