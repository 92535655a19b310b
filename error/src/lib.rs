/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains API and macros used by the firmware for error handling

--*/
#![cfg_attr(not(feature = "std"), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// TKey LUKS Error Type
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TkeyLuksError(pub NonZeroU32);

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: TkeyLuksError = TkeyLuksError::new_const($value);
        )*

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(&'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl TkeyLuksError {
    /// Create an error; intended to only be used from const contexts, as we don't want
    /// runtime panics if val is zero. The preferred way to get a TkeyLuksError from a u32 is to
    /// use `TkeyLuksError::try_from()` from the `TryFrom` trait impl.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("TkeyLuksError cannot be 0"),
        }
    }

    define_error_constants![
        (DRIVER_IO_READ_FAILED, 0x00010001, "Driver Error: I/O read failed"),
        (
            DRIVER_IO_MUX_UNKNOWN_MODE,
            0x00010003,
            "Driver Error: USB mux header carried an unknown mode"
        ),
        (
            DRIVER_KDF_INVALID_KEY,
            0x00020001,
            "Driver Error: KDF key rejected by the keyed hash"
        ),
        (
            DRIVER_FW_HASH_OUT_OF_WINDOW,
            0x00020003,
            "Driver Error: firmware hash range exceeds the memory window"
        ),
        (
            API_FRAME_RESERVED_BIT_SET,
            0x00030001,
            "API Error: frame header reserved bit is set"
        ),
        (
            API_FRAME_UNKNOWN_LENGTH,
            0x00030002,
            "API Error: byte count has no matching length class"
        ),
        (
            API_REPLY_LAYOUT_TOO_SMALL,
            0x00030003,
            "API Error: reply buffer is smaller than the reply layout"
        ),
        (
            RUNTIME_FRAME_NOT_FOR_APP,
            0x000E0002,
            "Runtime Error: frame addressed to neither firmware nor the app"
        ),
        (
            RUNTIME_UNEXPECTED_COMMAND,
            0x000E0003,
            "Runtime Error: command not permitted in the current state"
        ),
        (
            RUNTIME_INVALID_CMD_LENGTH,
            0x000E0004,
            "Runtime Error: command frame has the wrong length class"
        ),
        (
            RUNTIME_CHALLENGE_SIZE_OUT_OF_RANGE,
            0x000E0005,
            "Runtime Error: declared challenge size is outside (0, 256]"
        ),
        (
            RUNTIME_CHALLENGE_OVERFLOW,
            0x000E0006,
            "Runtime Error: challenge chunk exceeds the declared size"
        ),
        (
            RUNTIME_FW_HASH_SIZE_OUT_OF_RANGE,
            0x000E0007,
            "Runtime Error: firmware hash length is outside (0, 8192]"
        ),
        (
            RUNTIME_UNKNOWN_RESPONSE,
            0x000E0008,
            "Runtime Error: response code has no reply layout"
        ),
        (
            RUNTIME_SESSION_FAILED,
            0x000E0009,
            "Runtime Error: command received after the session failed"
        ),
    ];
}

impl From<core::num::NonZeroU32> for crate::TkeyLuksError {
    fn from(val: core::num::NonZeroU32) -> Self {
        crate::TkeyLuksError(val)
    }
}

impl From<TkeyLuksError> for core::num::NonZeroU32 {
    fn from(val: TkeyLuksError) -> Self {
        val.0
    }
}

impl From<TkeyLuksError> for u32 {
    fn from(val: TkeyLuksError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for TkeyLuksError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(TkeyLuksError(val)),
            Err(err) => Err(err),
        }
    }
}

pub type TkeyLuksResult<T> = Result<T, TkeyLuksError>;
