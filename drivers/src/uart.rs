/*++

Licensed under the Apache-2.0 license.

File Name:

    uart.rs

Abstract:

    File contains API for accessing the TK1 UART

--*/

use crate::memory_layout::{
    UART_RX_DATA, UART_RX_STATUS, UART_STATUS_READY, UART_TX_DATA, UART_TX_STATUS,
};
use crate::{mmio, wait};

/// TK1 UART
#[derive(Debug)]
pub struct Uart {
    _priv: (),
}

impl Uart {
    /// Create an instance of the UART driver
    ///
    /// # Safety
    ///
    /// Only valid on TK1 hardware (or its emulator) where the UART register
    /// block is mapped, and only one instance may exist.
    pub unsafe fn new() -> Self {
        Self { _priv: () }
    }

    /// Block until a byte arrives and return it
    pub fn read_byte(&mut self) -> u8 {
        wait::until_set(UART_RX_STATUS, UART_STATUS_READY);
        unsafe { mmio::read32(UART_RX_DATA) as u8 }
    }

    /// Block until the transmitter is ready, then send `byte`
    ///
    /// # Arguments
    ///
    /// `byte` - Byte to write to UART
    pub fn write_byte(&mut self, byte: u8) {
        wait::until_set(UART_TX_STATUS, UART_STATUS_READY);
        unsafe { mmio::write32(UART_TX_DATA, byte as u32) }
    }
}
