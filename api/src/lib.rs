// Licensed under the Apache-2.0 license

#![cfg_attr(not(test), no_std)]

pub mod frame;
pub mod proto;

pub use tkey_luks_error as error;

pub use frame::{encode_frame, CmdLen, Endpoint, FrameHeader, MAX_FRAME_SIZE};
pub use proto::{AppCmd, Request, Response, CMDLEN_MAXBYTES, STATUS_BAD, STATUS_OK};
