/*++

Licensed under the Apache-2.0 license.

File Name:

    proto.rs

Abstract:

    File contains the application command catalogue and the fixed payload
    layouts of every request and reply.

--*/

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::frame::CmdLen;

/// Longest command or reply payload, including the command/response code
pub const CMDLEN_MAXBYTES: usize = 128;

/// Largest challenge the device accepts
pub const MAX_CHALLENGE_SIZE: usize = 256;

/// Largest firmware range that may be hashed
pub const MAX_FIRMWARE_HASH_SIZE: usize = 8192;

/// Challenge bytes carried by one load-challenge frame
pub const CHALLENGE_CHUNK_SIZE: usize = CMDLEN_MAXBYTES - 1;

pub const PUBKEY_SIZE: usize = 32;
pub const SECRET_KEY_SIZE: usize = 64;
pub const DERIVED_KEY_SIZE: usize = 64;
pub const FIRMWARE_DIGEST_SIZE: usize = 32;

pub const STATUS_OK: u8 = 0;
pub const STATUS_BAD: u8 = 1;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AppCmd(pub u8);

impl AppCmd {
    pub const GET_PUBKEY: Self = Self(0x01);
    pub const RSP_GET_PUBKEY: Self = Self(0x02);
    pub const SET_CHALLENGE: Self = Self(0x03);
    pub const RSP_SET_CHALLENGE: Self = Self(0x04);
    pub const LOAD_CHALLENGE: Self = Self(0x05);
    pub const RSP_LOAD_CHALLENGE: Self = Self(0x06);
    pub const DERIVE_KEY: Self = Self(0x07);
    pub const RSP_DERIVE_KEY: Self = Self(0x08);
    pub const GET_NAMEVERSION: Self = Self(0x09);
    pub const RSP_GET_NAMEVERSION: Self = Self(0x0a);
    pub const GET_FIRMWARE_HASH: Self = Self(0x0b);
    pub const RSP_GET_FIRMWARE_HASH: Self = Self(0x0c);

    /// Substituted by the frame reader for frames addressed to firmware
    pub const FW_PROBE: Self = Self(0xff);

    /// Length class of the reply frame for a response code.
    ///
    /// Returns `None` for command codes and unknown values.
    pub const fn reply_len(self) -> Option<CmdLen> {
        match self {
            Self::RSP_GET_PUBKEY => Some(CmdLen::Len128),
            Self::RSP_SET_CHALLENGE => Some(CmdLen::Len4),
            Self::RSP_LOAD_CHALLENGE => Some(CmdLen::Len4),
            Self::RSP_DERIVE_KEY => Some(CmdLen::Len128),
            Self::RSP_GET_NAMEVERSION => Some(CmdLen::Len32),
            Self::RSP_GET_FIRMWARE_HASH => Some(CmdLen::Len128),
            _ => None,
        }
    }
}

impl From<u8> for AppCmd {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<AppCmd> for u8 {
    fn from(value: AppCmd) -> Self {
        value.0
    }
}

/// A trait implemented by request types. Describes the command code and the
/// length class the frame must carry.
pub trait Request: IntoBytes + FromBytes + Immutable + KnownLayout {
    const ID: AppCmd;
    const LEN: CmdLen;
}

/// A trait implemented by reply payloads (everything after the response code).
pub trait Response: IntoBytes + FromBytes + Immutable + KnownLayout {
    const ID: AppCmd;
}

// GET_NAMEVERSION
#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct GetNameVersionReq {
    pub cmd: u8,
}
impl Request for GetNameVersionReq {
    const ID: AppCmd = AppCmd::GET_NAMEVERSION;
    const LEN: CmdLen = CmdLen::Len1;
}

#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct NameVersionResp {
    pub name0: [u8; 4],
    pub name1: [u8; 4],
    /// Little-endian
    pub version: [u8; 4],
    pub rsvd: [u8; 19],
}
impl Response for NameVersionResp {
    const ID: AppCmd = AppCmd::RSP_GET_NAMEVERSION;
}

// GET_PUBKEY
#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct GetPubkeyReq {
    pub cmd: u8,
}
impl Request for GetPubkeyReq {
    const ID: AppCmd = AppCmd::GET_PUBKEY;
    const LEN: CmdLen = CmdLen::Len1;
}

#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct PubkeyResp {
    pub pubkey: [u8; PUBKEY_SIZE],
    pub rsvd: [u8; 95],
}
impl Response for PubkeyResp {
    const ID: AppCmd = AppCmd::RSP_GET_PUBKEY;
}

// SET_CHALLENGE
#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct SetChallengeReq {
    pub cmd: u8,
    /// Little-endian challenge size
    pub size: [u8; 4],
    pub rsvd: [u8; 27],
}
impl Request for SetChallengeReq {
    const ID: AppCmd = AppCmd::SET_CHALLENGE;
    const LEN: CmdLen = CmdLen::Len32;
}

#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct SetChallengeResp {
    pub status: u8,
    pub rsvd: [u8; 2],
}
impl Response for SetChallengeResp {
    const ID: AppCmd = AppCmd::RSP_SET_CHALLENGE;
}

// LOAD_CHALLENGE
#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct LoadChallengeReq {
    pub cmd: u8,
    pub data: [u8; CHALLENGE_CHUNK_SIZE],
}
impl Request for LoadChallengeReq {
    const ID: AppCmd = AppCmd::LOAD_CHALLENGE;
    const LEN: CmdLen = CmdLen::Len128;
}

#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct LoadChallengeResp {
    pub status: u8,
    pub rsvd: [u8; 2],
}
impl Response for LoadChallengeResp {
    const ID: AppCmd = AppCmd::RSP_LOAD_CHALLENGE;
}

// DERIVE_KEY
#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct DeriveKeyReq {
    pub cmd: u8,
}
impl Request for DeriveKeyReq {
    const ID: AppCmd = AppCmd::DERIVE_KEY;
    const LEN: CmdLen = CmdLen::Len1;
}

#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct DeriveKeyResp {
    pub status: u8,
    pub key: [u8; DERIVED_KEY_SIZE],
    pub rsvd: [u8; 62],
}
impl Response for DeriveKeyResp {
    const ID: AppCmd = AppCmd::RSP_DERIVE_KEY;
}

// GET_FIRMWARE_HASH
#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct GetFirmwareHashReq {
    pub cmd: u8,
    /// Little-endian number of bytes to hash
    pub len: [u8; 4],
    pub rsvd: [u8; 27],
}
impl Request for GetFirmwareHashReq {
    const ID: AppCmd = AppCmd::GET_FIRMWARE_HASH;
    const LEN: CmdLen = CmdLen::Len32;
}

#[repr(C)]
#[derive(Debug, IntoBytes, FromBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct FirmwareHashResp {
    pub status: u8,
    pub digest: [u8; FIRMWARE_DIGEST_SIZE],
    pub rsvd: [u8; 94],
}
impl Response for FirmwareHashResp {
    const ID: AppCmd = AppCmd::RSP_GET_FIRMWARE_HASH;
}
