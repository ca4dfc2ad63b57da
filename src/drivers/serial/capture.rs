//! Capture Sink
//!
//! Buffer circular em RAM que faz papel de porta serial. Guarda os últimos
//! `N` bytes escritos (os mais antigos são descartados) e a última
//! configuração recebida.

use spin::Mutex;

use crate::config::LineConfig;
use crate::drivers::serial::SerialSink;
use crate::error::SerialError;

/// Estado interno do buffer circular
struct Ring<const N: usize> {
    buffer: [u8; N],
    read_pos: usize,
    write_pos: usize,
    count: usize,
    config: Option<LineConfig>,
    flushes: usize,
}

impl<const N: usize> Ring<N> {
    const fn new() -> Self {
        Self {
            buffer: [0; N],
            read_pos: 0,
            write_pos: 0,
            count: 0,
            config: None,
            flushes: 0,
        }
    }

    fn push(&mut self, byte: u8) {
        if N == 0 {
            return;
        }
        self.buffer[self.write_pos] = byte;
        self.write_pos = (self.write_pos + 1) % N;
        if self.count == N {
            // Cheio: sobrescreve o mais antigo
            self.read_pos = (self.read_pos + 1) % N;
        } else {
            self.count += 1;
        }
    }

    fn pop(&mut self) -> Option<u8> {
        if self.count > 0 {
            let byte = self.buffer[self.read_pos];
            self.read_pos = (self.read_pos + 1) % N;
            self.count -= 1;
            Some(byte)
        } else {
            None
        }
    }

    fn peek(&self, index: usize) -> u8 {
        self.buffer[(self.read_pos + index) % N]
    }
}

/// Porta serial em memória.
pub struct CaptureSink<const N: usize> {
    inner: Mutex<Ring<N>>,
}

impl<const N: usize> CaptureSink<N> {
    /// Cria buffer vazio
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Ring::new()),
        }
    }

    /// Número de bytes guardados
    pub fn len(&self) -> usize {
        self.inner.lock().count
    }

    /// Verifica se buffer está vazio
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Última configuração aplicada por `configure`.
    pub fn config(&self) -> Option<LineConfig> {
        self.inner.lock().config
    }

    /// Quantas vezes `flush` foi chamado
    pub fn flush_count(&self) -> usize {
        self.inner.lock().flushes
    }

    /// Copia o conteúdo para `out` sem consumir. Retorna bytes copiados.
    pub fn copy_to(&self, out: &mut [u8]) -> usize {
        let ring = self.inner.lock();
        let n = ring.count.min(out.len());
        for (i, slot) in out.iter_mut().take(n).enumerate() {
            *slot = ring.peek(i);
        }
        n
    }

    /// Remove bytes para `out`. Retorna bytes removidos.
    pub fn drain(&self, out: &mut [u8]) -> usize {
        let mut ring = self.inner.lock();
        let mut n = 0;
        for slot in out.iter_mut() {
            match ring.pop() {
                Some(byte) => {
                    *slot = byte;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }

    /// Esvazia buffer e esquece configuração
    pub fn clear(&self) {
        *self.inner.lock() = Ring::new();
    }

    /// Conteúdo atual como `String` (consome).
    #[cfg(test)]
    pub(crate) fn take_string(&self) -> String {
        let mut out = vec![0u8; N];
        let n = self.drain(&mut out);
        out.truncate(n);
        String::from_utf8(out).expect("capture is not UTF-8")
    }
}

impl<const N: usize> Default for CaptureSink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SerialSink for CaptureSink<N> {
    fn configure(&self, config: &LineConfig) -> Result<(), SerialError> {
        if config.baud == 0 {
            return Err(SerialError::UnsupportedBaud(0));
        }
        self.inner.lock().config = Some(*config);
        Ok(())
    }

    fn write_bytes(&self, bytes: &[u8]) {
        let mut ring = self.inner.lock();
        for &byte in bytes {
            ring.push(byte);
        }
    }

    fn flush(&self) {
        self.inner.lock().flushes += 1;
    }
}
