// Licensed under the Apache-2.0 license

use crate::memory_layout::QEMU_DEBUG;
use crate::mmio;

/// QEMU debug console
#[derive(Default, Debug)]
pub struct QemuDebug {}

impl QemuDebug {
    pub fn write(&mut self, str: &str) {
        for byte in str.bytes() {
            match byte {
                0x20..=0x7e | b'\n' | b'\t' => unsafe { mmio::write8(QEMU_DEBUG, byte) },
                _ => unsafe { mmio::write8(QEMU_DEBUG, 0xfe) },
            }
        }
    }
}
