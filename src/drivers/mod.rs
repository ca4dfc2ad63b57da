//! # Drivers de Saída Serial
//!
//! Tudo que pode ser instalado como destino da console de debug.
//!
//! | Driver      | Arquivo                 | Uso |
//! |-------------|-------------------------|-----|
//! | UART 16550  | `serial/uart16550.rs`   | PCs/QEMU via I/O ports (COM1..COM4) |
//! | PL011       | `serial/pl011.rs`       | SoCs ARM via MMIO |
//! | Captura     | `serial/capture.rs`     | Buffer em RAM (testes, host) |

pub mod serial;
