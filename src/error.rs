//! Erros da console serial.

use core::fmt;

/// Erros reportados pelos drivers e pela console.
///
/// Os macros `serial_*!` descartam estes erros; quem precisar deles chama
/// as funções de [`crate::console`] diretamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// Nenhuma serial instalada na console
    NoSink,
    /// Baud rate não representável pelo divisor da UART
    UnsupportedBaud(u32),
    /// `log::set_logger` já foi chamado
    LoggerAlreadySet,
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialError::NoSink => f.write_str("no serial sink installed"),
            SerialError::UnsupportedBaud(baud) => write!(f, "unsupported baud rate: {}", baud),
            SerialError::LoggerAlreadySet => f.write_str("a logger is already set"),
        }
    }
}
