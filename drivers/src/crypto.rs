/*++

Licensed under the Apache-2.0 license.

File Name:

    crypto.rs

Abstract:

    File contains the crypto provider: Ed25519 identity derivation, the
    keyed BLAKE2b KDF and the BLAKE2s firmware digest.

--*/

use blake2::digest::{generic_array::GenericArray, FixedOutput, KeyInit, Update};
use blake2::{Blake2bMac512, Blake2s256, Digest};
use ed25519_dalek::SigningKey;
use tkey_luks_api::proto::{DERIVED_KEY_SIZE, FIRMWARE_DIGEST_SIZE, PUBKEY_SIZE, SECRET_KEY_SIZE};
use tkey_luks_error::{TkeyLuksError, TkeyLuksResult};
use zeroize::Zeroize;

use crate::tk1::CDI_SIZE;

pub enum Crypto {}

impl Crypto {
    /// Derive the device Ed25519 key pair from the CDI.
    ///
    /// # Arguments
    ///
    /// * `cdi` - Root secret, used as the Ed25519 seed
    /// * `secret_key` - Receives `seed || public key`
    /// * `public_key` - Receives the public key
    pub fn ed25519_key_pair(
        cdi: &[u8; CDI_SIZE],
        secret_key: &mut [u8; SECRET_KEY_SIZE],
        public_key: &mut [u8; PUBKEY_SIZE],
    ) {
        let signing_key = SigningKey::from_bytes(cdi);
        let mut keypair = signing_key.to_keypair_bytes();
        secret_key.copy_from_slice(&keypair);
        public_key.copy_from_slice(signing_key.verifying_key().as_bytes());
        keypair.zeroize();
    }

    /// Keyed BLAKE2b with a 64-byte tag.
    ///
    /// # Arguments
    ///
    /// * `key` - Up to 64 bytes of key material
    /// * `msg` - Message bound into the output
    /// * `out` - Receives the derived key
    pub fn blake2b_kdf(
        key: &[u8],
        msg: &[u8],
        out: &mut [u8; DERIVED_KEY_SIZE],
    ) -> TkeyLuksResult<()> {
        let mut mac = <Blake2bMac512 as KeyInit>::new_from_slice(key)
            .map_err(|_| TkeyLuksError::DRIVER_KDF_INVALID_KEY)?;
        Update::update(&mut mac, msg);
        FixedOutput::finalize_into(mac, GenericArray::from_mut_slice(out));
        Ok(())
    }

    /// BLAKE2s-256 over the first `len` bytes of `window`.
    pub fn firmware_hash(
        window: &[u8],
        len: usize,
        out: &mut [u8; FIRMWARE_DIGEST_SIZE],
    ) -> TkeyLuksResult<()> {
        let data = window
            .get(..len)
            .ok_or(TkeyLuksError::DRIVER_FW_HASH_OUT_OF_WINDOW)?;
        let mut hasher = <Blake2s256 as Digest>::new();
        Digest::update(&mut hasher, data);
        Digest::finalize_into(hasher, GenericArray::from_mut_slice(out));
        Ok(())
    }
}
