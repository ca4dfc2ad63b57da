//! Acesso a hardware de baixo nível.
//!
//! Os drivers de UART não chamam instruções `in`/`out` diretamente: recebem
//! um [`PortIo`]. Em x86_64 a implementação real é [`x86_64::X86Ports`]; nos
//! testes usamos um espaço de portas falso.

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

/// Espaço de I/O ports de 8 bits (estilo x86).
pub trait PortIo: Sync {
    /// Lê um byte de uma porta IO
    fn inb(&self, port: u16) -> u8;

    /// Escreve um byte em uma porta IO
    fn outb(&self, port: u16, value: u8);
}
