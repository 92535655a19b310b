/*++
Licensed under the Apache-2.0 license.

File Name:

    memory_layout.rs

Abstract:

    The file contains the TK1 memory map used by the application.

--*/

//
// Memory Addresses
//
pub const RAM_ORG: u32 = 0x4000_0000;

//
// Memory Sizes In Bytes
//
pub const RAM_SIZE: u32 = 0x2_0000;

/// Window of loaded firmware that GET_FIRMWARE_HASH may cover
pub const FW_WINDOW_ORG: u32 = RAM_ORG;
pub const FW_WINDOW_SIZE: u32 = 0x2000;

//
// Timer
//
pub const TIMER_CTRL: u32 = 0xC100_0020;
pub const TIMER_STATUS: u32 = 0xC100_0024;
pub const TIMER_PRESCALER: u32 = 0xC100_0028;
pub const TIMER_TIMER: u32 = 0xC100_002C;

pub const TIMER_CTRL_START: u32 = 1 << 0;
pub const TIMER_CTRL_STOP: u32 = 1 << 1;
pub const TIMER_STATUS_RUNNING: u32 = 1 << 0;

//
// UART
//
pub const UART_RX_STATUS: u32 = 0xC300_0080;
pub const UART_RX_DATA: u32 = 0xC300_0084;
pub const UART_TX_STATUS: u32 = 0xC300_0100;
pub const UART_TX_DATA: u32 = 0xC300_0104;
pub const UART_STATUS_READY: u32 = 1 << 0;

//
// Touch sensor
//
pub const TOUCH_STATUS: u32 = 0xC400_0024;
pub const TOUCH_STATUS_EVENT: u32 = 1 << 0;

//
// QEMU debug output
//
pub const QEMU_DEBUG: u32 = 0xFE00_1000;

//
// TK1 core registers
//
pub const TK1_VERSION: u32 = 0xFF00_0008;
pub const TK1_LED: u32 = 0xFF00_0024;
pub const TK1_CDI_FIRST: u32 = 0xFF00_0080;

/// CPU clock, used to prescale the timer to seconds
pub const TK1_CPU_FREQUENCY: u32 = 24_000_000;

#[test]
#[allow(clippy::assertions_on_constants)]
fn mem_layout_test_fw_window() {
    assert!(FW_WINDOW_ORG >= RAM_ORG);
    assert!(FW_WINDOW_ORG + FW_WINDOW_SIZE <= RAM_ORG + RAM_SIZE);
    assert_eq!(
        FW_WINDOW_SIZE as usize,
        tkey_luks_api::proto::MAX_FIRMWARE_HASH_SIZE
    );
}
