/*++

Licensed under the Apache-2.0 license.

File Name:

    info.rs

Abstract:

    File contains GET_NAMEVERSION command.

--*/

use tkey_luks_api::proto::{GetNameVersionReq, NameVersionResp};
use tkey_luks_drivers::{Io, PresenceGate};
use tkey_luks_error::TkeyLuksResult;
use zerocopy::FromZeros;

use crate::packet::Frame;
use crate::reply::reply_then;
use crate::{Drivers, APP_NAME0, APP_NAME1, APP_VERSION};

pub struct NameVersionCmd;

impl NameVersionCmd {
    pub(crate) fn execute<I: Io, P: PresenceGate>(
        drivers: &mut Drivers<I, P>,
        frame: &Frame,
    ) -> TkeyLuksResult<()> {
        if let Err(e) = frame.request::<GetNameVersionReq>() {
            return reply_then(drivers.reply_nok(frame.hdr), Err(e));
        }

        let mut resp = NameVersionResp::new_zeroed();
        resp.name0 = APP_NAME0;
        resp.name1 = APP_NAME1;
        resp.version = APP_VERSION.to_le_bytes();
        drivers.reply(frame.hdr, &resp)
    }
}
