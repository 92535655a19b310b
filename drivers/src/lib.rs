/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the TK1 platform drivers.

--*/

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod crypto;
mod io;
pub mod memory_layout;
mod mmio;
pub mod printer;
mod tk1;
mod touch;
mod uart;
mod wait;

pub use crypto::Crypto;
pub use io::{Io, IoEnd, Tk1Io, CASTOR_VERSION};
pub use tk1::{Led, Tk1, CDI_SIZE};
pub use tkey_luks_error::{TkeyLuksError, TkeyLuksResult};
pub use touch::{Presence, PresenceGate, Touch};
pub use uart::Uart;

cfg_if::cfg_if! {
    if #[cfg(feature = "emu")] {
        mod qemu;

        pub use qemu::QemuDebug;
    }
}
