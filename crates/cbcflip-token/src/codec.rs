//! Session token mint and decode.
//!
//! A token is `base64(IV || ciphertext)` with a fresh random IV per encode.
//! The key lives only inside [`SessionKey`], is injected into the codec at
//! construction, and never leaves this module.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::Rng;

use crate::cipher::{self, BLOCK_SIZE};
use crate::claims::Claims;
use crate::error::TokenError;

/// Key size in bytes (AES-128).
pub const KEY_SIZE: usize = 16;

/// The process-lifetime session key.
///
/// Generated once and injected into [`TokenCodec`]; the bytes are never
/// serialized, logged, or otherwise exposed.
pub struct SessionKey([u8; KEY_SIZE]);

impl SessionKey {
    /// Generate a fresh key from the operating system's CSPRNG.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        rand::rngs::OsRng.fill(&mut key);
        Self(key)
    }

    /// Build a key from fixed bytes (for deterministic testing).
    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redacted: key material must not reach logs or panic messages.
        f.write_str("SessionKey(..)")
    }
}

/// Encoder/decoder for session tokens under one fixed key.
///
/// Shared read-only across any number of concurrent calls; every operation
/// is side-effect-free apart from IV randomness consumption in `encode`.
pub struct TokenCodec {
    key: SessionKey,
}

impl TokenCodec {
    pub fn new(key: SessionKey) -> Self {
        Self { key }
    }

    /// Codec with a freshly generated key.
    pub fn generate() -> Self {
        Self::new(SessionKey::generate())
    }

    /// Mint a token for the given claims.
    ///
    /// Serializes the claims in their exact given order, pads, encrypts under
    /// a fresh one-block IV, and base64-encodes `IV || ciphertext`. Never
    /// fails; callers validate claim content at their own boundary.
    #[must_use]
    pub fn encode(&self, claims: &Claims) -> String {
        let mut iv = [0u8; BLOCK_SIZE];
        rand::rngs::OsRng.fill(&mut iv);
        self.encode_with_iv(claims, &iv)
    }

    /// Mint a token with a caller-supplied IV (for deterministic testing).
    ///
    /// Reusing an IV across two encodes under the same key is a correctness
    /// violation of the scheme; only tests should pin it.
    #[must_use]
    pub fn encode_with_iv(&self, claims: &Claims, iv: &[u8; BLOCK_SIZE]) -> String {
        let ciphertext = cipher::encrypt(&self.key.0, iv, &claims.to_bytes());

        let mut raw = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
        raw.extend_from_slice(iv);
        raw.extend_from_slice(&ciphertext);
        BASE64.encode(raw)
    }

    /// Decode a token back to its raw plaintext bytes.
    ///
    /// Claim parsing is deliberately a separate step ([`Claims::parse`]):
    /// the padding check here is a distinguishable failure mode, and what the
    /// plaintext *means* is not this layer's concern.
    ///
    /// # Errors
    ///
    /// `MalformedToken` if the token is not base64 or the raw length is not
    /// one IV block plus a positive multiple of [`BLOCK_SIZE`];
    /// `InvalidPadding` if decryption succeeds but the padding does not.
    pub fn decode(&self, token: &str) -> Result<Vec<u8>, TokenError> {
        let raw = BASE64
            .decode(token)
            .map_err(|_| TokenError::MalformedToken)?;
        if raw.len() < 2 * BLOCK_SIZE || !raw.len().is_multiple_of(BLOCK_SIZE) {
            return Err(TokenError::MalformedToken);
        }

        let iv: [u8; BLOCK_SIZE] = raw[..BLOCK_SIZE]
            .try_into()
            .expect("length checked above");
        cipher::decrypt(&self.key.0, &iv, &raw[BLOCK_SIZE..])
    }

    /// Decode a token and parse its claims in one step.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        Ok(Claims::parse(&self.decode(token)?))
    }
}
