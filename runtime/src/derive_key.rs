/*++

Licensed under the Apache-2.0 license.

File Name:

    derive_key.rs

Abstract:

    File contains DERIVE_KEY command: wait for a touch, then return
    KDF(secret key, challenge).

--*/

use tkey_luks_api::proto::{DeriveKeyReq, DeriveKeyResp, STATUS_BAD, STATUS_OK};
use tkey_luks_drivers::{cprintln, Io, Presence, PresenceGate};
use tkey_luks_error::TkeyLuksResult;
use zerocopy::FromZeros;
use zeroize::Zeroize;

use crate::context::Context;
use crate::packet::Frame;
use crate::reply::reply_then;
use crate::{Drivers, SessionState, TOUCH_TIMEOUT_SECS};

pub struct DeriveKeyCmd;

impl DeriveKeyCmd {
    pub(crate) fn execute<I: Io, P: PresenceGate>(
        drivers: &mut Drivers<I, P>,
        ctx: &mut Context,
        frame: &Frame,
    ) -> TkeyLuksResult<SessionState> {
        if let Err(e) = frame.request::<DeriveKeyReq>() {
            return reply_then(drivers.reply_nok(frame.hdr), Err(e));
        }

        cprintln!("[rt] Waiting for touch");
        let mut resp = DeriveKeyResp::new_zeroed();
        let result = match drivers.presence.await_presence(TOUCH_TIMEOUT_SECS) {
            Presence::Confirmed => match ctx.derive_key() {
                Ok(key) => {
                    resp.status = STATUS_OK;
                    resp.key.copy_from_slice(key);
                    drivers.reply(frame.hdr, &resp)
                }
                Err(e) => {
                    resp.status = STATUS_BAD;
                    reply_then(drivers.reply(frame.hdr, &resp), Err(e))
                }
            },
            Presence::TimedOut => {
                resp.status = STATUS_BAD;
                drivers.reply(frame.hdr, &resp)
            }
        };

        resp.key.zeroize();
        ctx.wipe();
        result.map(|_| SessionState::Started)
    }
}
