// Licensed under the Apache-2.0 license

use tkey_luks_drivers::cprintln;
use tkey_luks_error::TkeyLuksError;

use crate::Session;

/// Halt after the session reached Failed. Key material is wiped before the
/// core parks; there is no reset.
#[allow(clippy::empty_loop)]
pub fn handle_fatal_error(session: &mut Session, code: TkeyLuksError) -> ! {
    cprintln!("[rt] Fatal Error: 0x{:08X}", u32::from(code));
    session.wipe_all();

    loop {}
}
