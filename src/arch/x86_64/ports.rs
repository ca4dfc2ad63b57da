//! Arquivo: x86_64/ports.rs
//!
//! Propósito: instruções de entrada/saída (I/O Ports) legadas do x86, usadas
//! pela UART 16550 (COM1..COM4).
//!
//! Detalhes de Implementação:
//! - Usa `core::arch::asm!` para emitir instruções `in` e `out`.
//! - Todas as funções são marcadas como `#[inline]` para evitar overhead.

use crate::arch::PortIo;

/// Lê um byte de uma porta IO
#[inline]
pub fn inb(port: u16) -> u8 {
    let value: u8;
    // SAFETY: IO ports são operações privilegiadas mas seguras do ponto de vista de memória
    unsafe {
        core::arch::asm!(
            "in al, dx",
            in("dx") port,
            out("al") value,
            options(nomem, nostack, preserves_flags)
        );
    }
    value
}

/// Escreve um byte em uma porta IO
#[inline]
pub fn outb(port: u16, value: u8) {
    // SAFETY: IO ports são operações privilegiadas mas seguras do ponto de vista de memória
    unsafe {
        core::arch::asm!(
            "out dx, al",
            in("dx") port,
            in("al") value,
            options(nomem, nostack, preserves_flags)
        );
    }
}

/// Portas reais da CPU.
///
/// Só funciona em ring 0 (ou com `iopl`); fora disso a CPU gera #GP.
#[derive(Debug, Clone, Copy, Default)]
pub struct X86Ports;

impl PortIo for X86Ports {
    #[inline]
    fn inb(&self, port: u16) -> u8 {
        inb(port)
    }

    #[inline]
    fn outb(&self, port: u16, value: u8) {
        outb(port, value)
    }
}
