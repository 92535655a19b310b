/*++

Licensed under the Apache-2.0 license.

File Name:

    set_challenge.rs

Abstract:

    File contains SET_CHALLENGE command, which opens a challenge upload.

--*/

use tkey_luks_api::proto::{SetChallengeReq, SetChallengeResp, STATUS_BAD, STATUS_OK};
use tkey_luks_drivers::{cprintln, Io, PresenceGate};
use tkey_luks_error::TkeyLuksResult;
use zerocopy::FromZeros;

use crate::context::Context;
use crate::packet::Frame;
use crate::reply::reply_then;
use crate::{Drivers, SessionState};

pub struct SetChallengeCmd;

impl SetChallengeCmd {
    pub(crate) fn execute<I: Io, P: PresenceGate>(
        drivers: &mut Drivers<I, P>,
        ctx: &mut Context,
        frame: &Frame,
    ) -> TkeyLuksResult<SessionState> {
        let result = Self::accept(ctx, frame);

        let mut resp = SetChallengeResp::new_zeroed();
        resp.status = if result.is_ok() { STATUS_OK } else { STATUS_BAD };
        reply_then(drivers.reply(frame.hdr, &resp), result)?;

        Ok(SessionState::Loading)
    }

    fn accept(ctx: &mut Context, frame: &Frame) -> TkeyLuksResult<()> {
        let req = frame.request::<SetChallengeReq>()?;
        let size = u32::from_le_bytes(req.size);
        if let Err(e) = ctx.challenge.begin(size) {
            cprintln!("[rt] Challenge size {} rejected", size);
            return Err(e);
        }
        cprintln!("[rt] Expecting {} challenge bytes", size);
        Ok(())
    }
}
