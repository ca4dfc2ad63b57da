//! CycleCam Debug Library.
//!
//! Console serial de debug com switch em tempo de compilação.
//!
//! Com a feature `debug` desligada (padrão), `serial_begin!`, `serial_print!`
//! e `serial_println!` expandem para blocos vazios: nenhum código é gerado e
//! os argumentos não são avaliados. Com `debug` ligada, cada macro encaminha
//! seus argumentos, sem alteração, para a serial instalada em [`console`].
//!
//! ```text
//! serial_print!(x) ──(debug)──► console::print(&x) ──► SerialSink
//!        └──────(sem debug)──► {}
//! ```

#![cfg_attr(not(test), no_std)]

// --- Hardware ---
pub mod arch; // Port I/O (x86_64)
pub mod drivers; // UARTs e sink de captura

// --- Console de Debug ---
pub mod config; // Switch DEBUG, baud padrão, LineConfig
pub mod debug; // Macros, console global, renderização de valores
pub mod error; // SerialError

pub use config::{LineConfig, DEBUG, DEFAULT_BAUD};
pub use debug::console;
pub use debug::print::{Hex, Print, PrintWith, Radix, BIN, DEC, HEX, OCT};
pub use drivers::serial::SerialSink;
pub use error::SerialError;

#[cfg(feature = "log")]
pub use debug::logger::SerialLogger;
