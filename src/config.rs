//! Configuração da console de debug.
//!
//! O switch principal é a feature `debug` do Cargo. [`DEBUG`] apenas espelha
//! essa escolha para código que precise consultá-la em runtime (ex: banners).

/// Flag de debug: `true` quando compilado com `--features debug`.
pub const DEBUG: bool = cfg!(feature = "debug");

/// Baud rate usado quando nada for especificado.
pub const DEFAULT_BAUD: u32 = 115_200;

/// Bits de dados por caractere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataBits {
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
}

impl DataBits {
    /// Valor do campo WLEN (2 bits) usado por 16550 e PL011.
    pub const fn wlen(self) -> u8 {
        self as u8 - 5
    }
}

/// Paridade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

/// Configuração de linha de uma UART.
///
/// Equivalente ao par `(baud, config)` de `Serial.begin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineConfig {
    pub baud: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl LineConfig {
    /// 8N1 no baud informado.
    pub const fn new(baud: u32) -> Self {
        Self {
            baud,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// Mesma moldura (bits/paridade/stop), outro baud.
    pub const fn with_baud(self, baud: u32) -> Self {
        Self { baud, ..self }
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        SERIAL_8N1
    }
}

// =============================================================================
// PRESETS
// =============================================================================
//
// Nomes iguais aos do Arduino. O baud é substituído pelo primeiro argumento
// de serial_begin!(baud, config).
//

const fn preset(data_bits: DataBits, parity: Parity, stop_bits: StopBits) -> LineConfig {
    LineConfig {
        baud: DEFAULT_BAUD,
        data_bits,
        parity,
        stop_bits,
    }
}

pub const SERIAL_8N1: LineConfig = preset(DataBits::Eight, Parity::None, StopBits::One);
pub const SERIAL_8N2: LineConfig = preset(DataBits::Eight, Parity::None, StopBits::Two);
pub const SERIAL_8E1: LineConfig = preset(DataBits::Eight, Parity::Even, StopBits::One);
pub const SERIAL_8O1: LineConfig = preset(DataBits::Eight, Parity::Odd, StopBits::One);
pub const SERIAL_7E1: LineConfig = preset(DataBits::Seven, Parity::Even, StopBits::One);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag_matches_feature() {
        assert_eq!(DEBUG, cfg!(feature = "debug"));
    }

    #[test]
    fn test_default_is_8n1() {
        let cfg = LineConfig::default();
        assert_eq!(cfg.baud, DEFAULT_BAUD);
        assert_eq!(cfg.data_bits, DataBits::Eight);
        assert_eq!(cfg.parity, Parity::None);
        assert_eq!(cfg.stop_bits, StopBits::One);
    }

    #[test]
    fn test_with_baud_keeps_framing() {
        let cfg = SERIAL_7E1.with_baud(9600);
        assert_eq!(cfg.baud, 9600);
        assert_eq!(cfg.data_bits, DataBits::Seven);
        assert_eq!(cfg.parity, Parity::Even);
    }

    #[test]
    fn test_wlen() {
        assert_eq!(DataBits::Five.wlen(), 0);
        assert_eq!(DataBits::Eight.wlen(), 3);
    }
}
