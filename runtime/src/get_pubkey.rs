// Licensed under the Apache-2.0 license

use tkey_luks_api::proto::{GetPubkeyReq, PubkeyResp};
use tkey_luks_drivers::{Io, PresenceGate};
use tkey_luks_error::TkeyLuksResult;
use zerocopy::FromZeros;

use crate::context::Context;
use crate::packet::Frame;
use crate::reply::reply_then;
use crate::Drivers;

pub struct GetPubkeyCmd;

impl GetPubkeyCmd {
    pub(crate) fn execute<I: Io, P: PresenceGate>(
        drivers: &mut Drivers<I, P>,
        ctx: &Context,
        frame: &Frame,
    ) -> TkeyLuksResult<()> {
        if let Err(e) = frame.request::<GetPubkeyReq>() {
            return reply_then(drivers.reply_nok(frame.hdr), Err(e));
        }

        let mut resp = PubkeyResp::new_zeroed();
        resp.pubkey = *ctx.identity().public_key();
        drivers.reply(frame.hdr, &resp)
    }
}
