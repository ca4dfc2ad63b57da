// =============================================================================
// CONSOLE DE DEBUG
// =============================================================================
//
// Destino global dos macros serial_*!. Guarda no máximo uma serial instalada.
//
// ARQUITETURA:
// - RwLock apenas para trocar a serial; o envio de bytes usa o lock interno
//   de cada driver
// - Sem serial instalada: begin retorna NoSink, print/println escrevem 0
//   bytes e flush não faz nada
// - print e o CRLF de println são escritas separadas; em SMP linhas de CPUs
//   diferentes podem se intercalar
//
// =============================================================================

use spin::RwLock;

use crate::config::LineConfig;
use crate::debug::print::{Print, PrintWith, Writer, LINE_END};
use crate::drivers::serial::SerialSink;
use crate::error::SerialError;

static SINK: RwLock<Option<&'static dyn SerialSink>> = RwLock::new(None);

/// Serializa testes que mexem na console global.
#[cfg(test)]
pub(crate) static TEST_LOCK: spin::Mutex<()> = spin::Mutex::new(());

/// Instala `sink` como destino. Retorna a serial anterior, se houver.
pub fn install(sink: &'static dyn SerialSink) -> Option<&'static dyn SerialSink> {
    SINK.write().replace(sink)
}

/// Remove a serial instalada.
pub fn uninstall() -> Option<&'static dyn SerialSink> {
    SINK.write().take()
}

/// Verifica se há serial instalada
pub fn is_installed() -> bool {
    SINK.read().is_some()
}

fn current() -> Option<&'static dyn SerialSink> {
    *SINK.read()
}

/// Roda `f` com um escritor sobre a serial atual. Retorna bytes escritos.
pub(crate) fn with_writer(f: impl FnOnce(&mut Writer<'_>)) -> usize {
    match current() {
        Some(sink) => {
            let mut writer = Writer::new(sink);
            f(&mut writer);
            writer.written()
        }
        None => 0,
    }
}

/// `Serial.begin(baud)`: 8N1 no baud pedido.
pub fn begin(baud: u32) -> Result<(), SerialError> {
    begin_with(&LineConfig::new(baud))
}

/// `Serial.begin(baud, config)`
pub fn begin_with(config: &LineConfig) -> Result<(), SerialError> {
    current().ok_or(SerialError::NoSink)?.configure(config)
}

/// `Serial.print(x)`
pub fn print<T: Print + ?Sized>(value: &T) -> usize {
    with_writer(|w| value.print(w))
}

/// `Serial.print(x, fmt)`
pub fn print_with<T: PrintWith<F> + ?Sized, F>(value: &T, format: F) -> usize {
    with_writer(|w| value.print_with(format, w))
}

/// `Serial.println(x)`
pub fn println<T: Print + ?Sized>(value: &T) -> usize {
    with_writer(|w| {
        value.print(w);
        w.write_bytes(LINE_END);
    })
}

/// `Serial.println(x, fmt)`
pub fn println_with<T: PrintWith<F> + ?Sized, F>(value: &T, format: F) -> usize {
    with_writer(|w| {
        value.print_with(format, w);
        w.write_bytes(LINE_END);
    })
}

/// `Serial.println()`
pub fn newline() -> usize {
    with_writer(|w| w.write_bytes(LINE_END))
}

/// `Serial.flush()`
pub fn flush() {
    if let Some(sink) = current() {
        sink.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::print::HEX;
    use crate::drivers::serial::CaptureSink;

    fn capture() -> &'static CaptureSink<256> {
        Box::leak(Box::new(CaptureSink::new()))
    }

    #[test]
    fn test_without_sink() {
        let _lock = TEST_LOCK.lock();
        uninstall();

        assert!(!is_installed());
        assert_eq!(begin(115_200), Err(SerialError::NoSink));
        assert_eq!(print("lost"), 0);
        assert_eq!(println(&1u8), 0);
        assert_eq!(newline(), 0);
        flush();
    }

    #[test]
    fn test_install_returns_previous() {
        let _lock = TEST_LOCK.lock();
        uninstall();

        let first = capture();
        let second = capture();
        assert!(install(first).is_none());
        assert!(install(second).is_some());

        print("x");
        assert!(first.is_empty());
        assert_eq!(second.take_string(), "x");

        assert!(uninstall().is_some());
        assert!(!is_installed());
    }

    #[test]
    fn test_begin_configures_sink() {
        let _lock = TEST_LOCK.lock();
        let sink = capture();
        install(sink);

        assert_eq!(begin(9_600), Ok(()));
        assert_eq!(sink.config(), Some(LineConfig::new(9_600)));
        assert_eq!(begin(0), Err(SerialError::UnsupportedBaud(0)));

        uninstall();
    }

    #[test]
    fn test_print_and_println() {
        let _lock = TEST_LOCK.lock();
        let sink = capture();
        install(sink);

        assert_eq!(print("temp="), 5);
        assert_eq!(println(&21.5f32), 7);
        assert_eq!(print_with(&0xABu8, HEX), 2);
        assert_eq!(println_with(&3.14159f64, 3u8), 7);
        assert_eq!(newline(), 2);
        assert_eq!(sink.take_string(), "temp=21.50\r\nAB3.142\r\n\r\n");

        flush();
        assert_eq!(sink.flush_count(), 1);

        uninstall();
    }
}
