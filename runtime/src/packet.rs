/*++

Licensed under the Apache-2.0 license.

File Name:

    packet.rs

Abstract:

    File contains the frame reader: one header byte, then the payload the
    header's length class announces.

--*/

use tkey_luks_api::{AppCmd, CmdLen, Endpoint, FrameHeader, Request, CMDLEN_MAXBYTES};
use tkey_luks_drivers::{cprintln, Io, PresenceGate};
use tkey_luks_error::{TkeyLuksError, TkeyLuksResult};

use crate::Drivers;

/// One command frame from the host
#[derive(Debug, Clone)]
pub struct Frame {
    pub hdr: FrameHeader,
    pub cmd: [u8; CMDLEN_MAXBYTES],
}

impl Frame {
    pub fn cmd_id(&self) -> AppCmd {
        AppCmd(self.cmd[0])
    }

    pub fn len(&self) -> CmdLen {
        self.hdr.len()
    }

    /// True for the probe substituted in place of a firmware-addressed frame
    pub fn is_fw_probe(&self) -> bool {
        self.hdr.endpoint() == Endpoint::Firmware && self.cmd_id() == AppCmd::FW_PROBE
    }

    /// Bytes received after the header
    pub fn payload(&self) -> &[u8] {
        &self.cmd[..self.len().bytes()]
    }

    /// View the payload as request `R`, checking the length class first
    /// and the command code second.
    pub fn request<R: Request>(&self) -> TkeyLuksResult<&R> {
        if self.len() != R::LEN {
            return Err(TkeyLuksError::RUNTIME_INVALID_CMD_LENGTH);
        }
        if self.cmd_id() != R::ID {
            return Err(TkeyLuksError::RUNTIME_UNEXPECTED_COMMAND);
        }
        R::ref_from_bytes(self.payload()).map_err(|_| TkeyLuksError::RUNTIME_INVALID_CMD_LENGTH)
    }
}

/// Read the next frame addressed to the application.
///
/// Frames for the firmware endpoint are answered with NOK here and handed
/// on as a `FW_PROBE` command. Frames for any other endpoint are a framing
/// fault.
pub fn read_frame<I: Io, P: PresenceGate>(
    drivers: &mut Drivers<I, P>,
) -> TkeyLuksResult<Frame> {
    let mut hdr = [0u8; 1];
    drivers.io.read(&mut hdr)?;
    let hdr = FrameHeader::parse(hdr[0])?;

    let mut frame = Frame {
        hdr,
        cmd: [0; CMDLEN_MAXBYTES],
    };
    drivers.io.read(&mut frame.cmd[..hdr.len().bytes()])?;

    match hdr.endpoint() {
        Endpoint::Software => Ok(frame),
        Endpoint::Firmware => {
            drivers.reply_nok(hdr)?;
            frame.cmd = [0; CMDLEN_MAXBYTES];
            frame.cmd[0] = AppCmd::FW_PROBE.into();
            Ok(frame)
        }
        _ => {
            cprintln!("[rt] Frame for endpoint {}", hdr.endpoint_bits());
            Err(TkeyLuksError::RUNTIME_FRAME_NOT_FOR_APP)
        }
    }
}
