/*++

Licensed under the Apache-2.0 license.

File Name:

    load_challenge.rs

Abstract:

    File contains LOAD_CHALLENGE command, which appends one chunk of the
    challenge announced by SET_CHALLENGE.

--*/

use tkey_luks_api::proto::{LoadChallengeReq, LoadChallengeResp, STATUS_BAD, STATUS_OK};
use tkey_luks_drivers::{Io, PresenceGate};
use tkey_luks_error::TkeyLuksResult;
use zerocopy::FromZeros;

use crate::context::Context;
use crate::packet::Frame;
use crate::reply::reply_then;
use crate::{Drivers, SessionState};

pub struct LoadChallengeCmd;

impl LoadChallengeCmd {
    pub(crate) fn execute<I: Io, P: PresenceGate>(
        drivers: &mut Drivers<I, P>,
        ctx: &mut Context,
        frame: &Frame,
    ) -> TkeyLuksResult<SessionState> {
        let result = Self::load(ctx, frame);

        let mut resp = LoadChallengeResp::new_zeroed();
        resp.status = if result.is_ok() { STATUS_OK } else { STATUS_BAD };
        let remaining = reply_then(drivers.reply(frame.hdr, &resp), result)?;

        if remaining == 0 {
            Ok(SessionState::Deriving)
        } else {
            Ok(SessionState::Loading)
        }
    }

    /// # Returns
    ///
    /// * `u32` - Challenge bytes still expected
    fn load(ctx: &mut Context, frame: &Frame) -> TkeyLuksResult<u32> {
        let req = frame.request::<LoadChallengeReq>()?;
        let nbytes = (ctx.challenge.remaining() as usize).min(req.data.len());
        ctx.challenge.append(&req.data[..nbytes])
    }
}
