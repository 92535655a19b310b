/*++

Licensed under the Apache-2.0 license.

File Name:

    frame.rs

Abstract:

    File contains the one-byte frame header codec shared by the device
    application and host tooling.

--*/

use bitfield::bitfield;
use tkey_luks_error::{TkeyLuksError, TkeyLuksResult};

use crate::proto::CMDLEN_MAXBYTES;

/// Header byte plus the longest payload
pub const MAX_FRAME_SIZE: usize = 1 + CMDLEN_MAXBYTES;

/// Payload length class carried in the two low header bits
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CmdLen {
    Len1 = 0,
    Len4 = 1,
    Len32 = 2,
    Len128 = 3,
}

impl CmdLen {
    /// Number of payload bytes that follow the header
    pub const fn bytes(self) -> usize {
        match self {
            CmdLen::Len1 => 1,
            CmdLen::Len4 => 4,
            CmdLen::Len32 => 32,
            CmdLen::Len128 => 128,
        }
    }

    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => CmdLen::Len1,
            1 => CmdLen::Len4,
            2 => CmdLen::Len32,
            _ => CmdLen::Len128,
        }
    }
}

/// Frame destination
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Endpoint {
    HwIfpga = 0,
    HwAfpga = 1,
    Firmware = 2,
    Software = 3,
}

impl Endpoint {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => Endpoint::HwIfpga,
            1 => Endpoint::HwAfpga,
            2 => Endpoint::Firmware,
            _ => Endpoint::Software,
        }
    }
}

bitfield! {
    /// Frame header
    #[derive(Default, PartialEq, Eq, Clone, Copy)]
    pub struct FrameHeader(u8);
    impl Debug;

    /// Must be zero on the wire
    pub reserved, _: 7;

    /// Frame id, echoed in the reply
    pub u8, id, set_id: 6, 5;

    pub u8, endpoint_bits, set_endpoint_bits: 4, 3;

    /// Set on negative acknowledgements
    pub nok, set_nok: 2;

    pub u8, len_bits, set_len_bits: 1, 0;
}

impl FrameHeader {
    pub fn new(id: u8, endpoint: Endpoint, nok: bool, len: CmdLen) -> Self {
        let mut hdr = FrameHeader(0);
        hdr.set_id(id & 0x3);
        hdr.set_endpoint_bits(endpoint as u8);
        hdr.set_nok(nok);
        hdr.set_len_bits(len as u8);
        hdr
    }

    /// Parse a header byte received from the host
    pub fn parse(byte: u8) -> TkeyLuksResult<Self> {
        let hdr = FrameHeader(byte);
        if hdr.reserved() {
            return Err(TkeyLuksError::API_FRAME_RESERVED_BIT_SET);
        }
        Ok(hdr)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::from_bits(self.endpoint_bits())
    }

    pub fn len(&self) -> CmdLen {
        CmdLen::from_bits(self.len_bits())
    }

    /// Header for a reply to this frame
    pub fn reply(&self, nok: bool, len: CmdLen) -> Self {
        FrameHeader::new(self.id(), self.endpoint(), nok, len)
    }

    pub fn as_byte(&self) -> u8 {
        self.0
    }
}

/// Build `hdr || body`, zero padded to the length class of `hdr`.
///
/// # Returns
///
/// * `usize` - Number of bytes of `out` making up the frame
pub fn encode_frame(
    hdr: FrameHeader,
    body: &[u8],
    out: &mut [u8; MAX_FRAME_SIZE],
) -> TkeyLuksResult<usize> {
    let nbytes = hdr.len().bytes();
    if body.len() > nbytes {
        return Err(TkeyLuksError::API_FRAME_UNKNOWN_LENGTH);
    }
    out.fill(0);
    out[0] = hdr.as_byte();
    out[1..1 + body.len()].copy_from_slice(body);
    Ok(1 + nbytes)
}
