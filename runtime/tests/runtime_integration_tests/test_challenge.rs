// Licensed under the Apache-2.0 license

use crate::common::{is_nok, load_challenge_body, run_castor_test, set_challenge_body, TestModel};
use tkey_luks_api::{AppCmd, CmdLen, STATUS_BAD, STATUS_OK};
use tkey_luks_error::TkeyLuksError;
use tkey_luks_runtime::SessionState;

fn set_challenge(model: &mut TestModel, size: u32) -> Vec<u8> {
    model.execute(CmdLen::Len32, &set_challenge_body(size))
}

fn assert_status_reply(resp: &[u8], status: u8) {
    assert_eq!(resp.len(), 5);
    assert_eq!(resp[2], status);
    assert_eq!(&resp[3..], &[0, 0]);
}

#[test]
fn test_set_challenge_accepts_size_bounds() {
    for size in [1, 127, 128, 256] {
        let mut model = run_castor_test();

        let resp = set_challenge(&mut model, size);

        assert_eq!(resp[1], u8::from(AppCmd::RSP_SET_CHALLENGE));
        assert_status_reply(&resp, STATUS_OK);
        assert_eq!(model.session.state(), SessionState::Loading);
        let challenge = model.session.context().challenge();
        assert_eq!(challenge.declared_size(), size);
        assert_eq!(challenge.remaining(), size);
        assert_eq!(challenge.write_offset(), 0);
    }
}

#[test]
fn test_set_challenge_rejects_out_of_range() {
    for size in [0, 257, 300, u32::MAX] {
        let mut model = run_castor_test();

        let resp = set_challenge(&mut model, size);

        assert_eq!(resp[1], u8::from(AppCmd::RSP_SET_CHALLENGE));
        assert_status_reply(&resp, STATUS_BAD);
        assert_eq!(model.session.state(), SessionState::Failed);
        assert_eq!(
            model.session.fault(),
            Some(TkeyLuksError::RUNTIME_CHALLENGE_SIZE_OUT_OF_RANGE)
        );
        assert!(model.session.context().challenge().is_wiped());
    }
}

#[test]
fn test_set_challenge_wrong_length() {
    let mut model = run_castor_test();

    // Command code and size fit, the length class is still wrong.
    let resp = model.execute(CmdLen::Len4, &set_challenge_body(16)[..4]);

    assert_eq!(resp[1], u8::from(AppCmd::RSP_SET_CHALLENGE));
    assert_status_reply(&resp, STATUS_BAD);
    assert_eq!(model.session.state(), SessionState::Failed);
    assert_eq!(
        model.session.fault(),
        Some(TkeyLuksError::RUNTIME_INVALID_CMD_LENGTH)
    );
    assert!(model.session.context().challenge().is_wiped());
}

#[test]
fn test_set_challenge_in_long_frame() {
    let mut model = run_castor_test();

    let resp = model.execute(CmdLen::Len128, &set_challenge_body(16));

    assert_status_reply(&resp, STATUS_BAD);
    assert_eq!(model.session.state(), SessionState::Failed);
    assert_eq!(
        model.session.fault(),
        Some(TkeyLuksError::RUNTIME_INVALID_CMD_LENGTH)
    );
}

#[test]
fn test_load_challenge_in_chunks() {
    let mut model = run_castor_test();
    let challenge: Vec<u8> = (0..200u32).map(|i| (i * 3 + 1) as u8).collect();
    set_challenge(&mut model, 200);

    let resp = model.execute(CmdLen::Len128, &load_challenge_body(&challenge[..127]));
    assert_eq!(resp[1], u8::from(AppCmd::RSP_LOAD_CHALLENGE));
    assert_status_reply(&resp, STATUS_OK);
    assert_eq!(model.session.state(), SessionState::Loading);
    assert_eq!(model.session.context().challenge().remaining(), 73);
    assert_eq!(model.session.context().challenge().write_offset(), 127);

    let resp = model.execute(CmdLen::Len128, &load_challenge_body(&challenge[127..]));
    assert_status_reply(&resp, STATUS_OK);
    assert_eq!(model.session.state(), SessionState::Deriving);
    assert_eq!(model.session.context().challenge().as_slice(), &challenge[..]);
}

#[test]
fn test_load_challenge_ignores_bytes_past_declared_size() {
    let mut model = run_castor_test();
    set_challenge(&mut model, 3);

    let resp = model.execute(CmdLen::Len128, &load_challenge_body(&[0xaa; 127]));

    assert_status_reply(&resp, STATUS_OK);
    assert_eq!(model.session.state(), SessionState::Deriving);
    assert_eq!(model.session.context().challenge().as_slice(), &[0xaa; 3]);
}

#[test]
fn test_load_challenge_wrong_length() {
    let mut model = run_castor_test();
    set_challenge(&mut model, 16);

    let resp = model.execute(CmdLen::Len32, &load_challenge_body(&[1; 16]));

    assert_eq!(resp[1], u8::from(AppCmd::RSP_LOAD_CHALLENGE));
    assert_status_reply(&resp, STATUS_BAD);
    assert_eq!(model.session.state(), SessionState::Failed);
    assert!(model.session.context().challenge().is_wiped());
}

#[test]
fn test_load_challenge_before_set_challenge() {
    let mut model = run_castor_test();

    let resp = model.execute(CmdLen::Len128, &load_challenge_body(&[1; 127]));

    assert!(is_nok(&resp));
    assert_eq!(model.session.state(), SessionState::Failed);
}

#[test]
fn test_other_commands_while_loading() {
    for cmd in [AppCmd::GET_PUBKEY, AppCmd::GET_NAMEVERSION, AppCmd::DERIVE_KEY] {
        let mut model = run_castor_test();
        set_challenge(&mut model, 200);
        model.execute(CmdLen::Len128, &load_challenge_body(&[7; 127]));

        let resp = model.execute(CmdLen::Len1, &[cmd.into()]);

        assert!(is_nok(&resp));
        assert_eq!(model.session.state(), SessionState::Failed);
        assert_eq!(
            model.session.fault(),
            Some(TkeyLuksError::RUNTIME_UNEXPECTED_COMMAND)
        );
        assert!(model.session.context().challenge().is_wiped());
    }
}

#[test]
fn test_set_challenge_twice() {
    let mut model = run_castor_test();
    set_challenge(&mut model, 16);

    let resp = set_challenge(&mut model, 16);

    assert!(is_nok(&resp));
    assert_eq!(model.session.state(), SessionState::Failed);
}
