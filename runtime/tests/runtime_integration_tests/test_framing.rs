// Licensed under the Apache-2.0 license

use crate::common::{app_frame, is_nok, run_castor_test, set_challenge_body};
use tkey_luks_api::{AppCmd, CmdLen, Endpoint, FrameHeader};
use tkey_luks_error::TkeyLuksError;
use tkey_luks_runtime::{handle_app_commands, SessionState};

fn frame_for(endpoint: Endpoint, len: CmdLen, body: &[u8]) -> Vec<u8> {
    let hdr = FrameHeader::new(1, endpoint, false, len);
    let mut frame = vec![0u8; 1 + len.bytes()];
    frame[0] = hdr.as_byte();
    frame[1..1 + body.len()].copy_from_slice(body);
    frame
}

#[test]
fn test_firmware_frame_gets_single_nok() {
    let mut model = run_castor_test();

    let writes = model.exchange(&frame_for(Endpoint::Firmware, CmdLen::Len1, &[0x01]));

    assert_eq!(writes.len(), 1);
    let resp = &writes[0].1;
    assert!(is_nok(resp));
    let hdr = FrameHeader::parse(resp[0]).unwrap();
    assert_eq!(hdr.id(), 1);
    assert_eq!(hdr.endpoint(), Endpoint::Firmware);
    assert_eq!(model.session.state(), SessionState::Started);

    // Still serving afterwards.
    let resp = model.execute(CmdLen::Len1, &[AppCmd::GET_NAMEVERSION.into()]);
    assert_eq!(resp[1], u8::from(AppCmd::RSP_GET_NAMEVERSION));
}

#[test]
fn test_firmware_frame_while_loading() {
    let mut model = run_castor_test();
    model.execute(CmdLen::Len32, &set_challenge_body(16));

    let writes = model.exchange(&frame_for(Endpoint::Firmware, CmdLen::Len128, &[0x05]));

    assert_eq!(writes.len(), 1);
    assert!(is_nok(&writes[0].1));
    assert_eq!(model.session.state(), SessionState::Failed);
    assert!(model.session.context().challenge().is_wiped());
}

#[test]
fn test_firmware_frame_while_deriving() {
    let mut model = run_castor_test();
    model.load_challenge(b"pending derivation");

    let writes = model.exchange(&frame_for(Endpoint::Firmware, CmdLen::Len1, &[0x07]));

    assert_eq!(writes.len(), 1);
    assert!(is_nok(&writes[0].1));
    let hdr = FrameHeader::parse(writes[0].1[0]).unwrap();
    assert_eq!(hdr.endpoint(), Endpoint::Firmware);
    assert!(model.drivers.presence.waits.is_empty());
    assert_eq!(model.session.state(), SessionState::Failed);
    assert_eq!(
        model.session.fault(),
        Some(TkeyLuksError::RUNTIME_UNEXPECTED_COMMAND)
    );
    assert!(model.session.context().challenge().is_wiped());
    assert_eq!(model.session.context().derived_key(), &[0u8; 64]);
}

#[test]
fn test_hardware_endpoint_is_framing_fault() {
    let mut model = run_castor_test();

    let writes = model.exchange(&frame_for(Endpoint::HwIfpga, CmdLen::Len1, &[0x01]));

    assert!(writes.is_empty());
    assert_eq!(model.session.state(), SessionState::Failed);
    assert_eq!(
        model.session.fault(),
        Some(TkeyLuksError::RUNTIME_FRAME_NOT_FOR_APP)
    );
}

#[test]
fn test_reserved_header_bit() {
    let mut model = run_castor_test();
    let mut frame = app_frame(0, CmdLen::Len1, &[AppCmd::GET_NAMEVERSION.into()]);
    frame[0] |= 0x80;

    let writes = model.exchange(&frame);

    assert!(writes.is_empty());
    assert_eq!(
        model.session.fault(),
        Some(TkeyLuksError::API_FRAME_RESERVED_BIT_SET)
    );
}

#[test]
fn test_unknown_command() {
    let mut model = run_castor_test();

    let resp = model.execute(CmdLen::Len1, &[0x42]);

    assert!(is_nok(&resp));
    assert_eq!(model.session.state(), SessionState::Failed);
    assert_eq!(
        model.session.fault(),
        Some(TkeyLuksError::RUNTIME_UNEXPECTED_COMMAND)
    );
}

#[test]
fn test_probe_code_from_host_is_not_a_probe() {
    let mut model = run_castor_test();

    let resp = model.execute(CmdLen::Len1, &[AppCmd::FW_PROBE.into()]);

    assert!(is_nok(&resp));
    assert_eq!(model.session.state(), SessionState::Failed);
}

#[test]
fn test_command_loop_stops_at_first_fault() {
    let mut model = run_castor_test();
    model.push_input(&app_frame(0, CmdLen::Len1, &[AppCmd::GET_NAMEVERSION.into()]));
    model.push_input(&app_frame(0, CmdLen::Len1, &[AppCmd::DERIVE_KEY.into()]));
    model.push_input(&app_frame(0, CmdLen::Len1, &[AppCmd::GET_PUBKEY.into()]));

    let fault = handle_app_commands(&mut model.drivers, &mut model.session);

    assert_eq!(fault, TkeyLuksError::RUNTIME_UNEXPECTED_COMMAND);
    let writes = &model.drivers.io.writes;
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].1[1], u8::from(AppCmd::RSP_GET_NAMEVERSION));
    assert!(is_nok(&writes[1].1));
}

#[test]
fn test_command_loop_reports_read_failure() {
    let mut model = run_castor_test();
    model.push_input(&app_frame(0, CmdLen::Len1, &[AppCmd::GET_NAMEVERSION.into()]));
    // Header announces 32 bytes, only two follow.
    model.push_input(&app_frame(0, CmdLen::Len32, &[AppCmd::SET_CHALLENGE.into()])[..3]);

    let fault = handle_app_commands(&mut model.drivers, &mut model.session);

    assert_eq!(fault, TkeyLuksError::DRIVER_IO_READ_FAILED);
    assert_eq!(model.drivers.io.writes.len(), 1);
}

#[test]
fn test_failed_session_wipes_all_on_halt() {
    let mut model = run_castor_test();
    model.execute(CmdLen::Len1, &[0x42]);
    assert_eq!(model.session.state(), SessionState::Failed);

    model.session.wipe_all();

    assert!(model
        .session
        .context()
        .identity()
        .public_key()
        .iter()
        .all(|&b| b == 0));
}
