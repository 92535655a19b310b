/*++

Licensed under the Apache-2.0 license.

File Name:

    firmware_hash.rs

Abstract:

    File contains GET_FIRMWARE_HASH command.

--*/

use tkey_luks_api::proto::{
    FirmwareHashResp, GetFirmwareHashReq, FIRMWARE_DIGEST_SIZE, MAX_FIRMWARE_HASH_SIZE,
    STATUS_BAD, STATUS_OK,
};
use tkey_luks_drivers::{cprintln, Crypto, Io, PresenceGate};
use tkey_luks_error::{TkeyLuksError, TkeyLuksResult};
use zerocopy::FromZeros;

use crate::packet::Frame;
use crate::reply::reply_then;
use crate::Drivers;

pub struct FirmwareHashCmd;

impl FirmwareHashCmd {
    pub(crate) fn execute<I: Io, P: PresenceGate>(
        drivers: &mut Drivers<I, P>,
        frame: &Frame,
    ) -> TkeyLuksResult<()> {
        let mut resp = FirmwareHashResp::new_zeroed();
        let result = Self::hash(drivers.fw_window, frame, &mut resp.digest);
        resp.status = if result.is_ok() { STATUS_OK } else { STATUS_BAD };
        reply_then(drivers.reply(frame.hdr, &resp), result)
    }

    fn hash(
        fw_window: &[u8],
        frame: &Frame,
        digest: &mut [u8; FIRMWARE_DIGEST_SIZE],
    ) -> TkeyLuksResult<()> {
        let req = frame.request::<GetFirmwareHashReq>()?;
        let len = u32::from_le_bytes(req.len) as usize;
        if len == 0 || len > MAX_FIRMWARE_HASH_SIZE {
            cprintln!("[rt] Firmware hash length {} out of range", len);
            return Err(TkeyLuksError::RUNTIME_FW_HASH_SIZE_OUT_OF_RANGE);
        }
        Crypto::firmware_hash(fw_window, len, digest)
    }
}
