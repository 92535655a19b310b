/*++

Licensed under the Apache-2.0 license.

File Name:

    context.rs

Abstract:

    File contains the session context: the device identity and the
    challenge being assembled for the next key derivation.

--*/

use tkey_luks_api::proto::{DERIVED_KEY_SIZE, MAX_CHALLENGE_SIZE, PUBKEY_SIZE, SECRET_KEY_SIZE};
use tkey_luks_drivers::{Crypto, CDI_SIZE};
use tkey_luks_error::{TkeyLuksError, TkeyLuksResult};
use zeroize::Zeroize;

/// Device key pair derived from the CDI
#[derive(Zeroize)]
pub struct DeviceIdentity {
    secret_key: [u8; SECRET_KEY_SIZE],
    public_key: [u8; PUBKEY_SIZE],
}

impl DeviceIdentity {
    pub fn derive(cdi: &[u8; CDI_SIZE]) -> Self {
        let mut identity = Self {
            secret_key: [0; SECRET_KEY_SIZE],
            public_key: [0; PUBKEY_SIZE],
        };
        Crypto::ed25519_key_pair(cdi, &mut identity.secret_key, &mut identity.public_key);
        identity
    }

    pub fn public_key(&self) -> &[u8; PUBKEY_SIZE] {
        &self.public_key
    }

    pub(crate) fn secret_key(&self) -> &[u8; SECRET_KEY_SIZE] {
        &self.secret_key
    }
}

/// Fixed-capacity buffer for the host challenge.
///
/// `remaining + write_offset == declared_size` holds after every append.
#[derive(Zeroize)]
pub struct ChallengeBuffer {
    bytes: [u8; MAX_CHALLENGE_SIZE],
    declared_size: u32,
    remaining: u32,
    write_offset: u16,
}

impl Default for ChallengeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChallengeBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; MAX_CHALLENGE_SIZE],
            declared_size: 0,
            remaining: 0,
            write_offset: 0,
        }
    }

    /// Start a new challenge of `size` bytes, discarding any previous one.
    pub fn begin(&mut self, size: u32) -> TkeyLuksResult<()> {
        if size == 0 || size as usize > MAX_CHALLENGE_SIZE {
            return Err(TkeyLuksError::RUNTIME_CHALLENGE_SIZE_OUT_OF_RANGE);
        }
        self.zeroize();
        self.declared_size = size;
        self.remaining = size;
        Ok(())
    }

    /// Append `data`, failing if it exceeds the bytes still expected.
    ///
    /// # Returns
    ///
    /// * `u32` - Bytes still expected after this append
    pub fn append(&mut self, data: &[u8]) -> TkeyLuksResult<u32> {
        if data.len() > self.remaining as usize {
            return Err(TkeyLuksError::RUNTIME_CHALLENGE_OVERFLOW);
        }
        let start = self.write_offset as usize;
        let dst = self
            .bytes
            .get_mut(start..start + data.len())
            .ok_or(TkeyLuksError::RUNTIME_CHALLENGE_OVERFLOW)?;
        dst.copy_from_slice(data);
        self.write_offset += data.len() as u16;
        self.remaining -= data.len() as u32;
        Ok(self.remaining)
    }

    pub fn declared_size(&self) -> u32 {
        self.declared_size
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn write_offset(&self) -> u16 {
        self.write_offset
    }

    /// Loaded challenge bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.write_offset as usize]
    }

    /// True when every byte and every offset is zero
    pub fn is_wiped(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
            && self.declared_size == 0
            && self.remaining == 0
            && self.write_offset == 0
    }
}

/// Everything the application keeps between commands.
///
/// The identity sits in front of the challenge buffer so that an overrun of
/// the buffer cannot reach the secret key.
#[repr(C)]
pub struct Context {
    identity: DeviceIdentity,
    pub(crate) challenge: ChallengeBuffer,
    derived_key: [u8; DERIVED_KEY_SIZE],
}

impl Context {
    pub fn new(cdi: &[u8; CDI_SIZE]) -> Self {
        Self {
            identity: DeviceIdentity::derive(cdi),
            challenge: ChallengeBuffer::new(),
            derived_key: [0; DERIVED_KEY_SIZE],
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn challenge(&self) -> &ChallengeBuffer {
        &self.challenge
    }

    pub fn derived_key(&self) -> &[u8; DERIVED_KEY_SIZE] {
        &self.derived_key
    }

    /// Run the KDF over the loaded challenge into the derived-key slot.
    pub(crate) fn derive_key(&mut self) -> TkeyLuksResult<&[u8; DERIVED_KEY_SIZE]> {
        Crypto::blake2b_kdf(
            self.identity.secret_key(),
            self.challenge.as_slice(),
            &mut self.derived_key,
        )?;
        Ok(&self.derived_key)
    }

    /// Zeroize the challenge and the derived key.
    pub fn wipe(&mut self) {
        self.challenge.zeroize();
        self.derived_key.zeroize();
    }

    /// Zeroize everything, identity included. Only for the fatal halt.
    pub fn wipe_all(&mut self) {
        self.wipe();
        self.identity.zeroize();
    }
}
