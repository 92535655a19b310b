/*++

Licensed under the Apache-2.0 license.

File Name:

    reply.rs

Abstract:

    File contains the reply encoder: one frame per processed command, sized
    by the response code and sent on the channel the hardware version
    selects.

--*/

use tkey_luks_api::{AppCmd, CmdLen, FrameHeader, Response, MAX_FRAME_SIZE};
use tkey_luks_drivers::{Io, IoEnd, PresenceGate, CASTOR_VERSION};
use tkey_luks_error::{TkeyLuksError, TkeyLuksResult};
use zeroize::Zeroize;

use crate::Drivers;

/// Channel replies go out on for a given hardware version
pub fn reply_channel(hw_version: u32) -> IoEnd {
    if hw_version < CASTOR_VERSION {
        IoEnd::Uart
    } else {
        IoEnd::Cdc
    }
}

/// Send a Not OK reply: shortest frame, NOK status, one zero byte.
pub fn appreply_nok<I: Io>(io: &mut I, hw_version: u32, hdr: FrameHeader) -> TkeyLuksResult<()> {
    let buf = [hdr.reply(true, CmdLen::Len1).as_byte(), 0];
    io.write(reply_channel(hw_version), &buf)
}

/// Send `rsp` followed by the first `n - 1` bytes of `payload`, where `n`
/// is the length class of `rsp`.
pub fn appreply<I: Io>(
    io: &mut I,
    hw_version: u32,
    hdr: FrameHeader,
    rsp: AppCmd,
    payload: &[u8],
) -> TkeyLuksResult<()> {
    let len = rsp
        .reply_len()
        .ok_or(TkeyLuksError::RUNTIME_UNKNOWN_RESPONSE)?;
    let nbytes = len.bytes();
    let body = payload
        .get(..nbytes - 1)
        .ok_or(TkeyLuksError::API_REPLY_LAYOUT_TOO_SMALL)?;

    let mut frame = [0u8; MAX_FRAME_SIZE];
    frame[0] = hdr.reply(false, len).as_byte();
    frame[1] = rsp.into();
    frame[2..nbytes + 1].copy_from_slice(body);

    let result = io.write(reply_channel(hw_version), &frame[..nbytes + 1]);
    // Replies may carry key material.
    frame.zeroize();
    result
}

impl<I: Io, P: PresenceGate> Drivers<'_, I, P> {
    /// Reply to the frame with header `hdr` using a typed payload
    pub fn reply<R: Response>(&mut self, hdr: FrameHeader, resp: &R) -> TkeyLuksResult<()> {
        appreply(&mut self.io, self.hw_version, hdr, R::ID, resp.as_bytes())
    }

    pub fn reply_nok(&mut self, hdr: FrameHeader) -> TkeyLuksResult<()> {
        appreply_nok(&mut self.io, self.hw_version, hdr)
    }
}

/// Combine the outcome of a reply with the outcome of the command it
/// answers. A failed command keeps its own error even if the reply also
/// failed.
pub(crate) fn reply_then<T>(
    reply: TkeyLuksResult<()>,
    result: TkeyLuksResult<T>,
) -> TkeyLuksResult<T> {
    match result {
        Ok(val) => reply.map(|_| val),
        Err(e) => Err(e),
    }
}
