// =============================================================================
// MACROS DE DEBUG SERIAL - ZERO OVERHEAD
// =============================================================================
//
// ARQUITETURA:
// - Usa a feature "debug" do Cargo para compile-time filtering
// - Sem "debug", TODOS os macros viram blocos vazios: nenhum código gerado e
//   os argumentos nem são avaliados
// - Com "debug", cada macro avalia seus argumentos uma única vez e os
//   encaminha sem alteração para crate::console
// - Erros de begin são descartados (use console::begin para tratá-los)
//
// COMO USAR:
//   serial_begin!(115200);                  // 8N1
//   serial_begin!(9600, SERIAL_7E1);        // moldura explícita
//   serial_print!("frame=");                // texto
//   serial_println!(frame_count);           // valor + CRLF
//   serial_println!(status, HEX);           // inteiro em hexadecimal
//   serial_println!(voltage, 3);            // float com 3 casas
//   serial_println!();                      // apenas CRLF
//   serial_flush!();                        // espera o TX esvaziar
//
// =============================================================================

// =============================================================================
// serial_begin!
// =============================================================================

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! serial_begin {
    ($baud:expr, $config:expr $(,)?) => {{
        let baud: u32 = $baud;
        let config: $crate::LineConfig = $config;
        let _ = $crate::console::begin_with(&config.with_baud(baud));
    }};
    ($baud:expr $(,)?) => {{
        let _ = $crate::console::begin($baud);
    }};
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! serial_begin {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// serial_print!
// =============================================================================

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! serial_print {
    ($value:expr, $format:expr $(,)?) => {{
        let _ = $crate::console::print_with(&$value, $format);
    }};
    ($value:expr $(,)?) => {{
        let _ = $crate::console::print(&$value);
    }};
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! serial_print {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// serial_println!
// =============================================================================

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! serial_println {
    () => {{
        let _ = $crate::console::newline();
    }};
    ($value:expr, $format:expr $(,)?) => {{
        let _ = $crate::console::println_with(&$value, $format);
    }};
    ($value:expr $(,)?) => {{
        let _ = $crate::console::println(&$value);
    }};
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! serial_println {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// serial_flush!
// =============================================================================

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! serial_flush {
    () => {{
        $crate::console::flush();
    }};
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! serial_flush {
    ($($t:tt)*) => {{}};
}
