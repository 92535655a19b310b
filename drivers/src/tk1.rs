/*++

Licensed under the Apache-2.0 license.

File Name:

    tk1.rs

Abstract:

    File contains API for the TK1 core registers: version, CDI and LED.

--*/

use zeroize::Zeroize;

use crate::memory_layout::{
    FW_WINDOW_ORG, FW_WINDOW_SIZE, TK1_CDI_FIRST, TK1_LED, TK1_VERSION,
};
use crate::mmio;

/// Size of the Compound Device Identifier in bytes
pub const CDI_SIZE: usize = 32;

/// RGB LED colour, one bit per channel
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Led {
    Off = 0,
    Blue = 1 << 0,
    Green = 1 << 1,
}

pub struct Tk1 {
    _priv: (),
}

impl Tk1 {
    /// # Safety
    ///
    /// Only valid on TK1 hardware (or its emulator) and only one instance
    /// may exist.
    pub unsafe fn new() -> Self {
        Self { _priv: () }
    }

    /// Hardware version, gates the I/O channel layout
    pub fn version(&self) -> u32 {
        unsafe { mmio::read32(TK1_VERSION) }
    }

    /// Read the CDI, the root secret this application derives from.
    pub fn cdi(&self, out: &mut [u8; CDI_SIZE]) {
        for (i, chunk) in out.chunks_exact_mut(4).enumerate() {
            let mut word = unsafe { mmio::read32(TK1_CDI_FIRST + (i as u32) * 4) };
            chunk.copy_from_slice(&word.to_le_bytes());
            word.zeroize();
        }
    }

    pub fn set_led(&mut self, led: Led) {
        unsafe { mmio::write32(TK1_LED, led as u32) }
    }

    /// Loaded firmware, the range covered by GET_FIRMWARE_HASH
    pub fn firmware_window(&self) -> &'static [u8] {
        unsafe {
            core::slice::from_raw_parts(FW_WINDOW_ORG as *const u8, FW_WINDOW_SIZE as usize)
        }
    }
}
