// =============================================================================
// UART 16550 - I/O PORTS
// =============================================================================
//
// Driver de Porta Serial (COM1..COM4) para a console de debug.
//
// ARQUITETURA:
// - Acesso às portas via PortIo (X86Ports em hardware, falso nos testes)
// - Spinlock interno: bytes de chamadas concorrentes não se intercalam
// - SEM core::fmt - Apenas bytes
// - SEM interrupções - Transmissão por polling do LSR
//
// CLOCK:
// O divisor é calculado sobre 115200 Hz (1.8432 MHz / 16). Apenas baud rates
// que dividem 115200 exatamente são aceitos (115200, 57600, 38400, ...).
//
// =============================================================================

use bitflags::bitflags;
use spin::Mutex;

use crate::arch::PortIo;
use crate::config::{LineConfig, Parity, StopBits};
use crate::drivers::serial::SerialSink;
use crate::error::SerialError;

/// Porta COM1
pub const COM1: u16 = 0x3F8;
/// Porta COM2
pub const COM2: u16 = 0x2F8;
/// Porta COM3
pub const COM3: u16 = 0x3E8;
/// Porta COM4
pub const COM4: u16 = 0x2E8;

/// Clock de referência do divisor (Hz)
pub const UART_CLOCK: u32 = 115_200;

// Offsets dos registradores
const REG_DATA: u16 = 0; // THR/RBR, DLL com DLAB
const REG_IER: u16 = 1; // IER, DLM com DLAB
const REG_FCR: u16 = 2;
const REG_LCR: u16 = 3;
const REG_MCR: u16 = 4;
const REG_LSR: u16 = 5;

// Enable FIFO, clear them, with 14-byte threshold
const FCR_ENABLE_CLEAR_14: u8 = 0xC7;
// IRQs enabled, RTS/DSR set
const MCR_DTR_RTS_OUT2: u8 = 0x0B;

bitflags! {
    /// Line Control Register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineControl: u8 {
        const WLEN0  = 1 << 0;
        const WLEN1  = 1 << 1;
        const STOP2  = 1 << 2;
        const PARITY = 1 << 3;
        const EVEN   = 1 << 4;
        const STICK  = 1 << 5;
        const BREAK  = 1 << 6;
        const DLAB   = 1 << 7;
    }
}

bitflags! {
    /// Line Status Register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineStatus: u8 {
        const DATA_READY   = 1 << 0;
        const OVERRUN      = 1 << 1;
        const PARITY_ERROR = 1 << 2;
        const FRAME_ERROR  = 1 << 3;
        const BREAK        = 1 << 4;
        const THR_EMPTY    = 1 << 5;
        const TX_IDLE      = 1 << 6;
        const FIFO_ERROR   = 1 << 7;
    }
}

impl LineControl {
    /// Bits de LCR para a moldura pedida (DLAB desligado).
    pub fn from_config(config: &LineConfig) -> Self {
        let mut lcr = Self::from_bits_retain(config.data_bits.wlen());
        if config.stop_bits == StopBits::Two {
            lcr |= Self::STOP2;
        }
        match config.parity {
            Parity::None => {}
            Parity::Odd => lcr |= Self::PARITY,
            Parity::Even => lcr |= Self::PARITY | Self::EVEN,
        }
        lcr
    }
}

/// Divisor de 16 bits para o baud pedido.
pub fn divisor(baud: u32) -> Result<u16, SerialError> {
    if baud == 0 || baud > UART_CLOCK || UART_CLOCK % baud != 0 {
        return Err(SerialError::UnsupportedBaud(baud));
    }
    u16::try_from(UART_CLOCK / baud).map_err(|_| SerialError::UnsupportedBaud(baud))
}

/// UART 16550 em uma base de I/O ports.
pub struct Uart16550<P: PortIo> {
    ports: P,
    base: u16,
    // Serializa configure/write; o bool só registra se a porta foi programada
    state: Mutex<bool>,
}

impl<P: PortIo> Uart16550<P> {
    /// Cria o driver. Nada é escrito no hardware até `configure`.
    pub const fn new(ports: P, base: u16) -> Self {
        Self {
            ports,
            base,
            state: Mutex::new(false),
        }
    }

    /// Porta base
    pub fn base(&self) -> u16 {
        self.base
    }

    /// `true` depois de um `configure` bem-sucedido.
    pub fn is_initialized(&self) -> bool {
        *self.state.lock()
    }

    fn line_status(&self) -> LineStatus {
        LineStatus::from_bits_retain(self.ports.inb(self.base + REG_LSR))
    }

    fn write_byte(&self, byte: u8) {
        // Esperar FIFO estar pronto
        while !self.line_status().contains(LineStatus::THR_EMPTY) {
            core::hint::spin_loop();
        }
        self.ports.outb(self.base + REG_DATA, byte);
    }
}

#[cfg(target_arch = "x86_64")]
impl Uart16550<crate::arch::x86_64::X86Ports> {
    /// COM1 com as portas reais da CPU.
    pub const fn com1() -> Self {
        Self::new(crate::arch::x86_64::X86Ports, COM1)
    }
}

impl<P: PortIo> SerialSink for Uart16550<P> {
    fn configure(&self, config: &LineConfig) -> Result<(), SerialError> {
        let [lo, hi] = divisor(config.baud)?.to_le_bytes();
        let mut initialized = self.state.lock();

        // Desabilitar interrupções
        self.ports.outb(self.base + REG_IER, 0x00);
        // Habilitar DLAB (set baud rate divisor)
        self.ports.outb(self.base + REG_LCR, LineControl::DLAB.bits());
        self.ports.outb(self.base + REG_DATA, lo);
        self.ports.outb(self.base + REG_IER, hi);
        // Moldura (também desliga DLAB)
        self.ports
            .outb(self.base + REG_LCR, LineControl::from_config(config).bits());
        self.ports.outb(self.base + REG_FCR, FCR_ENABLE_CLEAR_14);
        self.ports.outb(self.base + REG_MCR, MCR_DTR_RTS_OUT2);

        *initialized = true;
        Ok(())
    }

    fn write_bytes(&self, bytes: &[u8]) {
        let _guard = self.state.lock();
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    fn flush(&self) {
        let _guard = self.state.lock();
        while !self.line_status().contains(LineStatus::TX_IDLE) {
            core::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SERIAL_7E1, SERIAL_8N1, SERIAL_8N2, SERIAL_8O1};

    /// Espaço de portas falso: registra escritas, LSR sempre pronto.
    struct FakePorts {
        writes: Mutex<Vec<(u16, u8)>>,
    }

    impl FakePorts {
        fn new() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
            }
        }
    }

    impl PortIo for FakePorts {
        fn inb(&self, port: u16) -> u8 {
            if port == COM1 + REG_LSR {
                (LineStatus::THR_EMPTY | LineStatus::TX_IDLE).bits()
            } else {
                0
            }
        }

        fn outb(&self, port: u16, value: u8) {
            self.writes.lock().push((port, value));
        }
    }

    #[test]
    fn test_divisor() {
        assert_eq!(divisor(115_200), Ok(1));
        assert_eq!(divisor(38_400), Ok(3));
        assert_eq!(divisor(9_600), Ok(12));
        assert_eq!(divisor(50), Ok(2304));
    }

    #[test]
    fn test_divisor_rejects_inexact_baud() {
        assert_eq!(divisor(0), Err(SerialError::UnsupportedBaud(0)));
        assert_eq!(divisor(250_000), Err(SerialError::UnsupportedBaud(250_000)));
        assert_eq!(divisor(74_880), Err(SerialError::UnsupportedBaud(74_880)));
    }

    #[test]
    fn test_line_control_bits() {
        assert_eq!(LineControl::from_config(&SERIAL_8N1).bits(), 0x03);
        assert_eq!(LineControl::from_config(&SERIAL_8N2).bits(), 0x07);
        assert_eq!(LineControl::from_config(&SERIAL_8O1).bits(), 0x0B);
        assert_eq!(LineControl::from_config(&SERIAL_7E1).bits(), 0x1A);
    }

    #[test]
    fn test_configure_sequence() {
        let uart = Uart16550::new(FakePorts::new(), COM1);
        assert!(!uart.is_initialized());

        uart.configure(&LineConfig::new(38_400)).unwrap();
        assert!(uart.is_initialized());

        let writes = uart.ports.writes.lock().clone();
        assert_eq!(
            writes,
            vec![
                (COM1 + 1, 0x00),
                (COM1 + 3, 0x80),
                (COM1, 0x03),
                (COM1 + 1, 0x00),
                (COM1 + 3, 0x03),
                (COM1 + 2, 0xC7),
                (COM1 + 4, 0x0B),
            ]
        );
    }

    #[test]
    fn test_configure_bad_baud_touches_nothing() {
        let uart = Uart16550::new(FakePorts::new(), COM1);
        assert_eq!(
            uart.configure(&LineConfig::new(12_345)),
            Err(SerialError::UnsupportedBaud(12_345))
        );
        assert!(!uart.is_initialized());
        assert!(uart.ports.writes.lock().is_empty());
    }

    #[test]
    fn test_write_bytes_goes_to_data_port() {
        let uart = Uart16550::new(FakePorts::new(), COM1);
        uart.write_bytes(b"ok\r\n");
        uart.flush();

        let writes = uart.ports.writes.lock().clone();
        assert_eq!(
            writes,
            vec![(COM1, b'o'), (COM1, b'k'), (COM1, b'\r'), (COM1, b'\n')]
        );
    }
}
