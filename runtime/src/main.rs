/*++

Licensed under the Apache-2.0 license.

File Name:

    main.rs

Abstract:

    File contains main entry point for the TKey LUKS device application

--*/
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(not(feature = "std"), no_main)]

use tkey_luks_drivers::{cprintln, Led, Tk1, Tk1Io, Touch, Uart, CDI_SIZE};
use tkey_luks_runtime::{handle_app_commands, handle_fatal_error, Drivers, Session};
use zeroize::Zeroize;

#[cfg(feature = "std")]
pub fn main() {}

#[no_mangle]
pub extern "C" fn entry_point() -> ! {
    let tk1 = unsafe { Tk1::new() };
    let hw_version = tk1.version();
    cprintln!("[rt] tkey-luks starting, hw version 0x{:x}", hw_version);

    let mut cdi = [0u8; CDI_SIZE];
    tk1.cdi(&mut cdi);
    let mut session = Session::new(&cdi);
    cdi.zeroize();

    let fw_window = tk1.firmware_window();
    let io = Tk1Io::new(unsafe { Uart::new() }, hw_version);
    let touch = unsafe { Touch::new(tk1, Led::Blue) };
    let mut drivers = Drivers::new(io, touch, hw_version, fw_window);

    let fault = handle_app_commands(&mut drivers, &mut session);
    handle_fatal_error(&mut session, fault)
}

#[panic_handler]
#[inline(never)]
#[cfg(not(feature = "std"))]
#[allow(clippy::empty_loop)]
fn app_panic(_: &core::panic::PanicInfo) -> ! {
    cprintln!("[rt] Panic!!");

    loop {}
}
