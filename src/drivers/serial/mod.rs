//! Interface comum das portas seriais.
//!
//! A console de debug só conhece [`SerialSink`]. Os drivers fazem a própria
//! exclusão mútua interna, por isso os métodos recebem `&self` e o destino
//! pode viver num `static`.

pub mod capture;
pub mod pl011;
pub mod uart16550;

pub use capture::CaptureSink;
pub use pl011::Pl011;
pub use uart16550::Uart16550;

use crate::config::LineConfig;
use crate::error::SerialError;

/// Destino de bytes da console de debug.
pub trait SerialSink: Sync {
    /// Programa baud rate e moldura. Equivale a `Serial.begin`.
    fn configure(&self, config: &LineConfig) -> Result<(), SerialError>;

    /// Envia bytes na ordem recebida, bloqueando se o FIFO estiver cheio.
    fn write_bytes(&self, bytes: &[u8]);

    /// Espera o transmissor esvaziar.
    fn flush(&self) {}
}
