// =============================================================================
// RENDERIZAÇÃO DE VALORES - SEM core::fmt
// =============================================================================
//
// Converte os valores passados para serial_print!/serial_println! em bytes.
//
// REGRAS:
// - Inteiros: decimal por padrão; BIN/OCT/HEX imprimem o padrão de bits em
//   complemento de dois na largura do próprio tipo (sem prefixo, maiúsculas)
// - Floats: 2 casas por padrão, arredondamento half-up na última casa,
//   "nan", "inf" e "ovf" (|x| > 4294967040) como no Serial do Arduino
// - Strings e bytes: enviados sem alteração
//
// Buffers de dígitos ficam na stack (64 bytes no pior caso, base 2).
//
// =============================================================================

use core::fmt;

use crate::drivers::serial::SerialSink;

/// Terminador de linha de serial_println!
pub const LINE_END: &[u8] = b"\r\n";

/// Limite acima do qual floats viram "ovf"
const FLOAT_OVERFLOW: f64 = 4_294_967_040.0;

/// Casas decimais padrão de floats
const FLOAT_DIGITS: u8 = 2;

/// Escritor que conta bytes enviados a uma serial.
pub struct Writer<'a> {
    sink: &'a dyn SerialSink,
    written: usize,
}

impl<'a> Writer<'a> {
    pub fn new(sink: &'a dyn SerialSink) -> Self {
        Self { sink, written: 0 }
    }

    /// Bytes escritos até agora
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.sink.write_bytes(bytes);
        self.written += bytes.len();
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.write_bytes(&[byte]);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }
}

impl fmt::Write for Writer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Writer::write_str(self, s);
        Ok(())
    }
}

// =============================================================================
// TRAITS
// =============================================================================

/// Valor imprimível com a formatação padrão.
pub trait Print {
    fn print(&self, w: &mut Writer<'_>);
}

/// Valor imprimível com formatação explícita (`Radix` para inteiros,
/// número de casas decimais para floats).
pub trait PrintWith<F> {
    fn print_with(&self, format: F, w: &mut Writer<'_>);
}

impl<T: Print + ?Sized> Print for &T {
    fn print(&self, w: &mut Writer<'_>) {
        (**self).print(w)
    }
}

impl<T: PrintWith<F> + ?Sized, F> PrintWith<F> for &T {
    fn print_with(&self, format: F, w: &mut Writer<'_>) {
        (**self).print_with(format, w)
    }
}

/// Base numérica para inteiros
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Radix {
    Bin = 2,
    Oct = 8,
    Dec = 10,
    Hex = 16,
}

pub const BIN: Radix = Radix::Bin;
pub const OCT: Radix = Radix::Oct;
pub const DEC: Radix = Radix::Dec;
pub const HEX: Radix = Radix::Hex;

// =============================================================================
// TEXTO
// =============================================================================

impl Print for str {
    fn print(&self, w: &mut Writer<'_>) {
        w.write_str(self);
    }
}

impl Print for [u8] {
    fn print(&self, w: &mut Writer<'_>) {
        w.write_bytes(self);
    }
}

impl<const N: usize> Print for [u8; N] {
    fn print(&self, w: &mut Writer<'_>) {
        w.write_bytes(self);
    }
}

impl Print for char {
    fn print(&self, w: &mut Writer<'_>) {
        let mut buf = [0u8; 4];
        w.write_str(self.encode_utf8(&mut buf));
    }
}

impl Print for bool {
    fn print(&self, w: &mut Writer<'_>) {
        w.write_str(if *self { "true" } else { "false" });
    }
}

// =============================================================================
// INTEIROS
// =============================================================================

/// Converte dígito (0-35) para caractere ASCII ('0'-'9', 'A'-'Z').
#[inline(always)]
const fn digit_to_ascii(n: u8) -> u8 {
    if n < 10 {
        b'0' + n
    } else {
        b'A' + (n - 10)
    }
}

fn write_unsigned(w: &mut Writer<'_>, mut value: u64, radix: Radix) {
    let base = radix as u64;
    let mut buf = [0u8; 64];
    let mut pos = buf.len();

    loop {
        pos -= 1;
        buf[pos] = digit_to_ascii((value % base) as u8);
        value /= base;
        if value == 0 {
            break;
        }
    }

    w.write_bytes(&buf[pos..]);
}

macro_rules! impl_print_unsigned {
    ($($t:ty),*) => {$(
        impl Print for $t {
            fn print(&self, w: &mut Writer<'_>) {
                write_unsigned(w, *self as u64, Radix::Dec);
            }
        }

        impl PrintWith<Radix> for $t {
            fn print_with(&self, radix: Radix, w: &mut Writer<'_>) {
                write_unsigned(w, *self as u64, radix);
            }
        }
    )*};
}

macro_rules! impl_print_signed {
    ($($t:ty => $u:ty),*) => {$(
        impl Print for $t {
            fn print(&self, w: &mut Writer<'_>) {
                self.print_with(Radix::Dec, w);
            }
        }

        impl PrintWith<Radix> for $t {
            fn print_with(&self, radix: Radix, w: &mut Writer<'_>) {
                if radix == Radix::Dec && *self < 0 {
                    w.write_byte(b'-');
                    write_unsigned(w, self.unsigned_abs() as u64, radix);
                } else {
                    write_unsigned(w, *self as $u as u64, radix);
                }
            }
        }
    )*};
}

impl_print_unsigned!(u8, u16, u32, u64, usize);
impl_print_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, isize => usize);

/// Valor em hexadecimal de largura fixa.
///
/// Formato de saída: 0x0123456789ABCDEF (sempre 18 caracteres)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hex(pub u64);

impl Print for Hex {
    fn print(&self, w: &mut Writer<'_>) {
        let mut buf = [0u8; 18];
        buf[0] = b'0';
        buf[1] = b'x';
        for (i, slot) in buf[2..].iter_mut().enumerate() {
            let shift = 60 - 4 * i;
            *slot = digit_to_ascii(((self.0 >> shift) & 0xF) as u8);
        }
        w.write_bytes(&buf);
    }
}

// =============================================================================
// FLOATS
// =============================================================================

fn write_float(w: &mut Writer<'_>, value: f64, digits: u8) {
    if value.is_nan() {
        return w.write_str("nan");
    }
    if value.is_infinite() {
        return w.write_str("inf");
    }
    if !(-FLOAT_OVERFLOW..=FLOAT_OVERFLOW).contains(&value) {
        return w.write_str("ovf");
    }

    let mut number = value;
    if number < 0.0 {
        w.write_byte(b'-');
        number = -number;
    }

    // Arredonda na última casa impressa: 1.995 com 2 casas vira 2.00
    let mut rounding = 0.5;
    for _ in 0..digits {
        rounding /= 10.0;
    }
    number += rounding;

    let integer = number as u64;
    let mut remainder = number - integer as f64;
    write_unsigned(w, integer, Radix::Dec);

    if digits > 0 {
        w.write_byte(b'.');
    }
    for _ in 0..digits {
        remainder *= 10.0;
        let digit = (remainder as u8).min(9);
        w.write_byte(b'0' + digit);
        remainder -= f64::from(digit);
    }
}

impl Print for f64 {
    fn print(&self, w: &mut Writer<'_>) {
        write_float(w, *self, FLOAT_DIGITS);
    }
}

impl Print for f32 {
    fn print(&self, w: &mut Writer<'_>) {
        write_float(w, f64::from(*self), FLOAT_DIGITS);
    }
}

impl PrintWith<u8> for f64 {
    fn print_with(&self, digits: u8, w: &mut Writer<'_>) {
        write_float(w, *self, digits);
    }
}

impl PrintWith<u8> for f32 {
    fn print_with(&self, digits: u8, w: &mut Writer<'_>) {
        write_float(w, f64::from(*self), digits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::serial::CaptureSink;

    fn render<T: Print + ?Sized>(value: &T) -> String {
        let sink = CaptureSink::<128>::new();
        let mut w = Writer::new(&sink);
        value.print(&mut w);
        assert_eq!(w.written(), sink.len());
        sink.take_string()
    }

    fn render_with<T: PrintWith<F> + ?Sized, F>(value: &T, format: F) -> String {
        let sink = CaptureSink::<128>::new();
        let mut w = Writer::new(&sink);
        value.print_with(format, &mut w);
        sink.take_string()
    }

    #[test]
    fn test_text() {
        assert_eq!(render("hello"), "hello");
        assert_eq!(render(&"ref"), "ref");
        assert_eq!(render(&'ç'), "ç");
        assert_eq!(render(&true), "true");
        assert_eq!(render(b"raw"), "raw");
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_integers_decimal() {
        assert_eq!(render(&0u8), "0");
        assert_eq!(render(&42u32), "42");
        assert_eq!(render(&u64::MAX), "18446744073709551615");
        assert_eq!(render(&-7i16), "-7");
        assert_eq!(render(&i64::MIN), "-9223372036854775808");
    }

    #[test]
    fn test_integers_radix() {
        assert_eq!(render_with(&255u8, HEX), "FF");
        assert_eq!(render_with(&5u8, BIN), "101");
        assert_eq!(render_with(&8u16, OCT), "10");
        assert_eq!(render_with(&0u32, HEX), "0");
        assert_eq!(render_with(&-1i8, HEX), "FF");
        assert_eq!(render_with(&-2i16, BIN), "1111111111111110");
        assert_eq!(render_with(&-12i32, DEC), "-12");
    }

    #[test]
    fn test_hex_fixed_width() {
        assert_eq!(render(&Hex(0x1000)), "0x0000000000001000");
        assert_eq!(render(&Hex(u64::MAX)), "0xFFFFFFFFFFFFFFFF");
    }

    #[test]
    fn test_floats_default_two_digits() {
        assert_eq!(render(&3.14159f64), "3.14");
        assert_eq!(render(&1.5f32), "1.50");
        assert_eq!(render(&0.125f64), "0.13");
        assert_eq!(render(&0.0f64), "0.00");
        assert_eq!(render(&-2.25f64), "-2.25");
    }

    #[test]
    fn test_floats_precision() {
        assert_eq!(render_with(&2.5f64, 0u8), "3");
        assert_eq!(render_with(&-2.5f64, 1u8), "-2.5");
        assert_eq!(render_with(&1.0f32, 4u8), "1.0000");
    }

    #[test]
    fn test_floats_special() {
        assert_eq!(render(&f64::NAN), "nan");
        assert_eq!(render(&f32::INFINITY), "inf");
        assert_eq!(render(&f64::NEG_INFINITY), "inf");
        assert_eq!(render(&5.0e9f64), "ovf");
        assert_eq!(render(&-5.0e9f64), "ovf");
    }
}
