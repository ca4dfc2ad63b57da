//! Ponte `log` -> console serial (feature `log`).
//!
//! Registros saem como `[LEVEL] target: mensagem\r\n`. Aqui `core::fmt` é
//! inevitável: `log::Record` só expõe `fmt::Arguments`.
//!
//! Sem a feature `debug`, [`init`] instala o logger com nível `Off`; os
//! macros do `log` continuam compilando mas não emitem nada.

use core::fmt::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::config::DEBUG;
use crate::debug::console;
use crate::debug::print::LINE_END;
use crate::error::SerialError;

pub const P_ERROR: &str = "[ERROR] ";
pub const P_WARN: &str = "[WARN] ";
pub const P_INFO: &str = "[INFO] ";
pub const P_DEBUG: &str = "[DEBUG] ";
pub const P_TRACE: &str = "[TRACE] ";

/// Logger global que escreve na serial instalada em [`console`].
pub struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

fn prefix(level: Level) -> &'static str {
    match level {
        Level::Error => P_ERROR,
        Level::Warn => P_WARN,
        Level::Info => P_INFO,
        Level::Debug => P_DEBUG,
        Level::Trace => P_TRACE,
    }
}

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        DEBUG && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        console::with_writer(|w| {
            w.write_str(prefix(record.level()));
            w.write_str(record.target());
            w.write_str(": ");
            let _ = write!(w, "{}", record.args());
            w.write_bytes(LINE_END);
        });
    }

    fn flush(&self) {
        console::flush();
    }
}

/// Registra [`SerialLogger`] no `log` com o nível máximo `level`.
pub fn init(level: LevelFilter) -> Result<(), SerialError> {
    log::set_logger(&LOGGER).map_err(|_| SerialError::LoggerAlreadySet)?;
    log::set_max_level(if DEBUG { level } else { LevelFilter::Off });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::serial::CaptureSink;

    static CAPTURE: CaptureSink<256> = CaptureSink::new();

    // set_logger só pode ser chamado uma vez por processo: um único teste
    #[test]
    fn test_logger_roundtrip() {
        let _lock = console::TEST_LOCK.lock();
        console::install(&CAPTURE);
        CAPTURE.clear();

        assert_eq!(init(LevelFilter::Info), Ok(()));
        assert_eq!(init(LevelFilter::Info), Err(SerialError::LoggerAlreadySet));

        log::info!(target: "cam", "frame {} ok", 3);
        log::debug!(target: "cam", "hidden");
        log::warn!(target: "pir", "motion");
        log::logger().flush();

        if DEBUG {
            assert_eq!(
                CAPTURE.take_string(),
                "[INFO] cam: frame 3 ok\r\n[WARN] pir: motion\r\n"
            );
        } else {
            assert_eq!(log::max_level(), LevelFilter::Off);
            assert!(CAPTURE.is_empty());
        }
        assert_eq!(CAPTURE.flush_count(), 1);

        console::uninstall();
    }
}
