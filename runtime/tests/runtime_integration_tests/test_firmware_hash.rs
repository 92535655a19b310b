// Licensed under the Apache-2.0 license

use crate::common::{run_castor_test, FW_WINDOW};
use blake2::{Blake2s256, Digest};
use tkey_luks_api::{AppCmd, CmdLen, STATUS_BAD, STATUS_OK};
use tkey_luks_error::TkeyLuksError;
use tkey_luks_runtime::SessionState;

fn hash_body(len: u32) -> Vec<u8> {
    let mut body = vec![AppCmd::GET_FIRMWARE_HASH.into()];
    body.extend_from_slice(&len.to_le_bytes());
    body
}

#[test]
fn test_get_firmware_hash() {
    for len in [1u32, 100, 4096, 8192] {
        let mut model = run_castor_test();

        let resp = model.execute(CmdLen::Len32, &hash_body(len));

        let expected = Blake2s256::digest(&FW_WINDOW[..len as usize]);
        assert_eq!(resp.len(), 129);
        assert_eq!(resp[1], u8::from(AppCmd::RSP_GET_FIRMWARE_HASH));
        assert_eq!(resp[2], STATUS_OK);
        assert_eq!(&resp[3..35], expected.as_slice());
        assert!(resp[35..].iter().all(|&b| b == 0));
        assert_eq!(model.session.state(), SessionState::Started);
    }
}

#[test]
fn test_get_firmware_hash_out_of_range() {
    for len in [0u32, 8193, u32::MAX] {
        let mut model = run_castor_test();

        let resp = model.execute(CmdLen::Len32, &hash_body(len));

        assert_eq!(resp[1], u8::from(AppCmd::RSP_GET_FIRMWARE_HASH));
        assert_eq!(resp[2], STATUS_BAD);
        assert!(resp[3..].iter().all(|&b| b == 0));
        assert_eq!(model.session.state(), SessionState::Failed);
        assert_eq!(
            model.session.fault(),
            Some(TkeyLuksError::RUNTIME_FW_HASH_SIZE_OUT_OF_RANGE)
        );
    }
}

#[test]
fn test_get_firmware_hash_wrong_length() {
    let mut model = run_castor_test();

    let resp = model.execute(CmdLen::Len128, &hash_body(32));

    assert_eq!(resp[2], STATUS_BAD);
    assert_eq!(model.session.state(), SessionState::Failed);
    assert_eq!(
        model.session.fault(),
        Some(TkeyLuksError::RUNTIME_INVALID_CMD_LENGTH)
    );
}
