// Licensed under the Apache-2.0 license

//! Raw volatile register access. Callers construct the owning driver
//! through an `unsafe fn new()` and thereby vouch for the address map.

#[inline(always)]
pub(crate) unsafe fn read32(addr: u32) -> u32 {
    core::ptr::read_volatile(addr as *const u32)
}

#[inline(always)]
pub(crate) unsafe fn write32(addr: u32, val: u32) {
    core::ptr::write_volatile(addr as *mut u32, val)
}

#[inline(always)]
pub(crate) unsafe fn write8(addr: u32, val: u8) {
    core::ptr::write_volatile(addr as *mut u8, val)
}
