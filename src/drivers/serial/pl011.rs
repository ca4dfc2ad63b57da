//! Driver PL011 (ARM PrimeCell UART) via MMIO.
//!
//! Registradores acessados com `volatile::VolatilePtr`; o compilador não pode
//! fundir nem reordenar escritas no DR.
//!
//! Divisor em unidades de 1/64: `div = 4 * clock / baud` (arredondado).
//! IBRD = `div >> 6` (16 bits, nunca zero), FBRD = `div & 0x3F`.

use core::ptr::NonNull;

use bitflags::bitflags;
use spin::Mutex;
use volatile::VolatilePtr;

use crate::config::{LineConfig, Parity, StopBits};
use crate::drivers::serial::SerialSink;
use crate::error::SerialError;

// Offsets (bytes)
const REG_DR: usize = 0x00;
const REG_FR: usize = 0x18;
const REG_IBRD: usize = 0x24;
const REG_FBRD: usize = 0x28;
const REG_LCR_H: usize = 0x2C;
const REG_CR: usize = 0x30;

/// Tamanho do bloco de registradores usado por este driver (bytes)
pub const REGISTER_SPAN: usize = 0x48;

bitflags! {
    /// Flag Register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u32 {
        const CTS  = 1 << 0;
        const DSR  = 1 << 1;
        const DCD  = 1 << 2;
        const BUSY = 1 << 3;
        const RXFE = 1 << 4;
        const TXFF = 1 << 5;
        const RXFF = 1 << 6;
        const TXFE = 1 << 7;
    }
}

bitflags! {
    /// Line Control Register (LCR_H)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineControl: u32 {
        const BRK   = 1 << 0;
        const PEN   = 1 << 1;
        const EPS   = 1 << 2;
        const STP2  = 1 << 3;
        const FEN   = 1 << 4;
        const WLEN0 = 1 << 5;
        const WLEN1 = 1 << 6;
        const SPS   = 1 << 7;
    }
}

bitflags! {
    /// Control Register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Control: u32 {
        const UARTEN = 1 << 0;
        const TXE    = 1 << 8;
        const RXE    = 1 << 9;
    }
}

impl LineControl {
    /// LCR_H para a moldura pedida, sempre com FIFOs ligados.
    pub fn from_config(config: &LineConfig) -> Self {
        let mut lcr =
            Self::from_bits_retain(u32::from(config.data_bits.wlen()) << 5) | Self::FEN;
        if config.stop_bits == StopBits::Two {
            lcr |= Self::STP2;
        }
        match config.parity {
            Parity::None => {}
            Parity::Odd => lcr |= Self::PEN,
            Parity::Even => lcr |= Self::PEN | Self::EPS,
        }
        lcr
    }
}

/// Par (IBRD, FBRD) para `baud` com a UART alimentada por `clock_hz`.
pub fn divisor(clock_hz: u32, baud: u32) -> Result<(u32, u32), SerialError> {
    if baud == 0 {
        return Err(SerialError::UnsupportedBaud(baud));
    }
    let div = (4 * u64::from(clock_hz) + u64::from(baud) / 2) / u64::from(baud);
    let ibrd = div >> 6;
    if ibrd == 0 || ibrd > 0xFFFF {
        return Err(SerialError::UnsupportedBaud(baud));
    }
    Ok((ibrd as u32, (div & 0x3F) as u32))
}

/// UART PL011 mapeada em memória.
pub struct Pl011 {
    base: NonNull<u32>,
    clock_hz: u32,
    lock: Mutex<()>,
}

// SAFETY: o ponteiro só é usado para MMIO e todo acesso passa por `lock`.
unsafe impl Send for Pl011 {}
unsafe impl Sync for Pl011 {}

impl Pl011 {
    /// Cria o driver sobre o bloco de registradores em `base`.
    ///
    /// # Safety
    /// `base` deve apontar para [`REGISTER_SPAN`] bytes de registradores de
    /// uma PL011 (ou memória equivalente), válidos enquanto o driver viver e
    /// não acessados por nenhum outro caminho.
    pub const unsafe fn new(base: NonNull<u32>, clock_hz: u32) -> Self {
        Self {
            base,
            clock_hz,
            lock: Mutex::new(()),
        }
    }

    /// Clock de referência (Hz)
    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    fn reg(&self, offset: usize) -> VolatilePtr<'_, u32> {
        // SAFETY: `new` garante que offset < REGISTER_SPAN é válido e alinhado.
        unsafe { VolatilePtr::new(NonNull::new_unchecked(self.base.as_ptr().add(offset / 4))) }
    }

    fn flags(&self) -> Flags {
        Flags::from_bits_retain(self.reg(REG_FR).read())
    }

    fn wait_idle(&self) {
        while self.flags().contains(Flags::BUSY) {
            core::hint::spin_loop();
        }
    }
}

impl SerialSink for Pl011 {
    fn configure(&self, config: &LineConfig) -> Result<(), SerialError> {
        let (ibrd, fbrd) = divisor(self.clock_hz, config.baud)?;
        let _guard = self.lock.lock();

        self.wait_idle();
        self.reg(REG_CR).write(0);
        self.reg(REG_IBRD).write(ibrd);
        self.reg(REG_FBRD).write(fbrd);
        // LCR_H precisa vir depois de IBRD/FBRD para o divisor ser carregado
        self.reg(REG_LCR_H)
            .write(LineControl::from_config(config).bits());
        self.reg(REG_CR)
            .write((Control::UARTEN | Control::TXE | Control::RXE).bits());
        Ok(())
    }

    fn write_bytes(&self, bytes: &[u8]) {
        let _guard = self.lock.lock();
        for &byte in bytes {
            while self.flags().contains(Flags::TXFF) {
                core::hint::spin_loop();
            }
            self.reg(REG_DR).write(u32::from(byte));
        }
    }

    fn flush(&self) {
        let _guard = self.lock.lock();
        self.wait_idle();
    }
}
