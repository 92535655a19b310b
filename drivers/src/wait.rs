// Licensed under the Apache-2.0 license

//! Busy-wait helpers for the status registers of the TK1 peripherals.

use crate::mmio;

pub(crate) fn until<F>(predicate: F)
where
    F: Fn() -> bool,
{
    while !predicate() {}
}

/// Spin until any bit of `mask` reads as set at `addr`
pub(crate) fn until_set(addr: u32, mask: u32) {
    until(|| unsafe { mmio::read32(addr) } & mask != 0)
}
