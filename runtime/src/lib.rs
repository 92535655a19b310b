/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the device application and the protocol state
    machine that drives it.

--*/
#![cfg_attr(not(test), no_std)]

mod context;
mod derive_key;
mod drivers;
mod error_handler;
mod firmware_hash;
mod get_pubkey;
mod info;
mod load_challenge;
pub mod packet;
pub mod reply;
mod set_challenge;

pub use context::{ChallengeBuffer, Context, DeviceIdentity};
pub use drivers::Drivers;
pub use error_handler::handle_fatal_error;
pub use packet::{read_frame, Frame};

use derive_key::DeriveKeyCmd;
use firmware_hash::FirmwareHashCmd;
use get_pubkey::GetPubkeyCmd;
use info::NameVersionCmd;
use load_challenge::LoadChallengeCmd;
use reply::reply_then;
use set_challenge::SetChallengeCmd;

use tkey_luks_api::AppCmd;
use tkey_luks_drivers::{cprintln, Io, PresenceGate, CDI_SIZE};
use tkey_luks_error::{TkeyLuksError, TkeyLuksResult};

/// Application name reported by GET_NAMEVERSION
pub const APP_NAME0: [u8; 4] = *b"tk1 ";
pub const APP_NAME1: [u8; 4] = *b"luks";
pub const APP_VERSION: u32 = 1;

/// How long DERIVE_KEY waits for a touch
pub const TOUCH_TIMEOUT_SECS: u32 = 30;

/// Protocol state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Idle; info commands or SET_CHALLENGE
    Started,
    /// Receiving challenge chunks
    Loading,
    /// Challenge complete; only DERIVE_KEY
    Deriving,
    /// Terminal
    Failed,
}

impl SessionState {
    /// Run `frame` through the handler table of this state.
    ///
    /// Every path emits exactly one reply, except the firmware probe which
    /// the frame reader has already answered.
    fn transition<I: Io, P: PresenceGate>(
        self,
        drivers: &mut Drivers<I, P>,
        ctx: &mut Context,
        frame: &Frame,
    ) -> TkeyLuksResult<SessionState> {
        match self {
            SessionState::Started => started_commands(drivers, ctx, frame),
            SessionState::Loading => loading_commands(drivers, ctx, frame),
            SessionState::Deriving => deriving_commands(drivers, ctx, frame),
            SessionState::Failed => Err(TkeyLuksError::RUNTIME_SESSION_FAILED),
        }
    }
}

fn started_commands<I: Io, P: PresenceGate>(
    drivers: &mut Drivers<I, P>,
    ctx: &mut Context,
    frame: &Frame,
) -> TkeyLuksResult<SessionState> {
    match frame.cmd_id() {
        AppCmd::FW_PROBE if frame.is_fw_probe() => Ok(SessionState::Started),
        AppCmd::GET_NAMEVERSION => {
            NameVersionCmd::execute(drivers, frame).map(|_| SessionState::Started)
        }
        AppCmd::GET_FIRMWARE_HASH => {
            FirmwareHashCmd::execute(drivers, frame).map(|_| SessionState::Started)
        }
        AppCmd::GET_PUBKEY => {
            GetPubkeyCmd::execute(drivers, ctx, frame).map(|_| SessionState::Started)
        }
        AppCmd::SET_CHALLENGE => SetChallengeCmd::execute(drivers, ctx, frame),
        _ => unexpected_command(drivers, frame, SessionState::Started),
    }
}

fn loading_commands<I: Io, P: PresenceGate>(
    drivers: &mut Drivers<I, P>,
    ctx: &mut Context,
    frame: &Frame,
) -> TkeyLuksResult<SessionState> {
    match frame.cmd_id() {
        AppCmd::LOAD_CHALLENGE => LoadChallengeCmd::execute(drivers, ctx, frame),
        _ => unexpected_command(drivers, frame, SessionState::Loading),
    }
}

fn deriving_commands<I: Io, P: PresenceGate>(
    drivers: &mut Drivers<I, P>,
    ctx: &mut Context,
    frame: &Frame,
) -> TkeyLuksResult<SessionState> {
    match frame.cmd_id() {
        AppCmd::DERIVE_KEY => DeriveKeyCmd::execute(drivers, ctx, frame),
        _ => unexpected_command(drivers, frame, SessionState::Deriving),
    }
}

fn unexpected_command<I: Io, P: PresenceGate>(
    drivers: &mut Drivers<I, P>,
    frame: &Frame,
    state: SessionState,
) -> TkeyLuksResult<SessionState> {
    cprintln!(
        "[rt] Command 0x{:x} not allowed in state {}",
        frame.cmd_id().0,
        state as u8
    );
    // The frame reader already answered the probe.
    if frame.is_fw_probe() {
        return Err(TkeyLuksError::RUNTIME_UNEXPECTED_COMMAND);
    }
    reply_then(
        drivers.reply_nok(frame.hdr),
        Err(TkeyLuksError::RUNTIME_UNEXPECTED_COMMAND),
    )
}

/// The single protocol session of the device
pub struct Session {
    state: SessionState,
    ctx: Context,
    fault: Option<TkeyLuksError>,
}

impl Session {
    /// Derive the device identity from `cdi` and start idle.
    pub fn new(cdi: &[u8; CDI_SIZE]) -> Self {
        Self {
            state: SessionState::Started,
            ctx: Context::new(cdi),
            fault: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Error that moved the session to Failed
    pub fn fault(&self) -> Option<TkeyLuksError> {
        self.fault
    }

    /// Process one frame and return the new state.
    pub fn handle<I: Io, P: PresenceGate>(
        &mut self,
        drivers: &mut Drivers<I, P>,
        frame: &Frame,
    ) -> SessionState {
        match self.state.transition(drivers, &mut self.ctx, frame) {
            Ok(next) => {
                if next == SessionState::Started && self.state != SessionState::Started {
                    self.ctx.wipe();
                }
                self.state = next;
            }
            Err(e) => self.fail(e),
        }
        self.state
    }

    /// Enter Failed, recording `err` and wiping the challenge.
    pub fn fail(&mut self, err: TkeyLuksError) {
        cprintln!("[rt] Session failed: 0x{:08X}", u32::from(err));
        self.ctx.wipe();
        if self.fault.is_none() {
            self.fault = Some(err);
        }
        self.state = SessionState::Failed;
    }

    /// Zeroize all key material, identity included.
    pub fn wipe_all(&mut self) {
        self.ctx.wipe_all();
    }
}

/// Serve frames until the session fails.
///
/// # Returns
///
/// * `TkeyLuksError` - The fault that ended the session
pub fn handle_app_commands<I: Io, P: PresenceGate>(
    drivers: &mut Drivers<I, P>,
    session: &mut Session,
) -> TkeyLuksError {
    cprintln!("[rt] Ready for commands");
    loop {
        match read_frame(drivers) {
            Ok(frame) => {
                session.handle(drivers, &frame);
            }
            Err(e) => session.fail(e),
        }
        if session.state() == SessionState::Failed {
            return session
                .fault()
                .unwrap_or(TkeyLuksError::RUNTIME_SESSION_FAILED);
        }
    }
}
