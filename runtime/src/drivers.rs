// Licensed under the Apache-2.0 license

use tkey_luks_drivers::{Io, PresenceGate};

/// Platform services the application runs against
pub struct Drivers<'a, I: Io, P: PresenceGate> {
    /// Host command channel
    pub io: I,

    /// Physical presence gate
    pub presence: P,

    /// Hardware version register, selects the reply channel
    pub hw_version: u32,

    /// Memory covered by GET_FIRMWARE_HASH
    pub fw_window: &'a [u8],
}

impl<'a, I: Io, P: PresenceGate> Drivers<'a, I, P> {
    pub fn new(io: I, presence: P, hw_version: u32, fw_window: &'a [u8]) -> Self {
        Self {
            io,
            presence,
            hw_version,
            fw_window,
        }
    }
}
