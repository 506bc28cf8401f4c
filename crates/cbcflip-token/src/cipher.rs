//! AES-128-CBC encryption for session tokens.
//!
//! PKCS#7 padding is handled here via [`crate::pkcs7`], with the block mode
//! itself running unpadded. The IV is passed explicitly and is **not**
//! prepended to the ciphertext — the codec layer owns the token layout.
//!
//! The scheme is fixed to exactly one cipher and one block size. There is no
//! cipher agility and no integrity check anywhere in this crate.

extern crate alloc;
use alloc::vec::Vec;

use aes::Aes128;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::TokenError;
use crate::pkcs7;

/// Cipher block size in bytes. Every offset computation in the companion
/// attack crate is relative to this constant.
pub const BLOCK_SIZE: usize = 16;

type Cbc128Enc = cbc::Encryptor<Aes128>;
type Cbc128Dec = cbc::Decryptor<Aes128>;

/// Encrypt `plaintext` under `key` and `iv`, padding it first.
///
/// The returned ciphertext is always a positive multiple of [`BLOCK_SIZE`]
/// and does not include the IV.
#[must_use]
pub fn encrypt(key: &[u8; 16], iv: &[u8; BLOCK_SIZE], plaintext: &[u8]) -> Vec<u8> {
    let padded = pkcs7::pad(plaintext, BLOCK_SIZE);
    let mut out = alloc::vec![0u8; padded.len()];
    Cbc128Enc::new(key.into(), iv.into())
        .encrypt_padded_b2b_mut::<NoPadding>(&padded, &mut out)
        .expect("output buffer is block-aligned and same size as padded input");
    out
}

/// Decrypt `ciphertext` under `key` and `iv` and strip the padding.
///
/// # Errors
///
/// `MalformedToken` if the ciphertext is empty or not block-aligned,
/// `InvalidPadding` if the decrypted trailer violates the PKCS#7 invariant.
pub fn decrypt(
    key: &[u8; 16],
    iv: &[u8; BLOCK_SIZE],
    ciphertext: &[u8],
) -> Result<Vec<u8>, TokenError> {
    if ciphertext.is_empty() || !ciphertext.len().is_multiple_of(BLOCK_SIZE) {
        return Err(TokenError::MalformedToken);
    }

    let mut buf = ciphertext.to_vec();
    let decrypted = Cbc128Dec::new(key.into(), iv.into())
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| TokenError::MalformedToken)?;

    let unpadded = pkcs7::unpad(decrypted, BLOCK_SIZE)?;
    Ok(unpadded.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    // NIST SP 800-38A, CBC-AES128.Encrypt.
    const KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
    const IV: &str = "000102030405060708090a0b0c0d0e0f";
    const PLAINTEXT: &str = "6bc1bee22e409f96e93d7e117393172a\
                             ae2d8a571e03ac9c9eb76fac45af8e51\
                             30c81c46a35ce411e5fbc1191a0a52ef\
                             f69f2445df4f9b17ad2b417be66c3710";
    const CIPHERTEXT: &str = "7649abac8119b246cee98e9b12e9197d\
                              5086cb9b507219ee95db113a917678b2\
                              73bed6b8e3c1743b7116e69e22229516\
                              3ff1caa1681fac09120eca307586e1a7";

    fn key() -> [u8; 16] {
        hex::decode(KEY).unwrap().try_into().unwrap()
    }

    fn iv() -> [u8; 16] {
        hex::decode(IV).unwrap().try_into().unwrap()
    }

    #[test]
    fn encrypt_matches_nist_vector() {
        let plaintext = hex::decode(PLAINTEXT).unwrap();
        let ciphertext = encrypt(&key(), &iv(), &plaintext);

        // The block-aligned input gains a full pad block on top of the
        // vector's four ciphertext blocks.
        assert_eq!(ciphertext.len(), 80);
        assert_eq!(hex::encode(&ciphertext[..64]), CIPHERTEXT);
    }

    #[test]
    fn roundtrip_various_sizes() {
        let key = [0x42u8; 16];
        let iv = [0x24u8; 16];

        for size in [0usize, 1, 15, 16, 17, 31, 32, 51, 100] {
            let data: Vec<u8> = (0..size).map(|i| i as u8).collect();
            let ciphertext = encrypt(&key, &iv, &data);
            assert_eq!(ciphertext.len() % BLOCK_SIZE, 0);
            assert!(!ciphertext.is_empty());

            let recovered = decrypt(&key, &iv, &ciphertext).unwrap();
            assert_eq!(recovered, data, "roundtrip mismatch for size {size}");
        }
    }

    #[test]
    fn decrypt_rejects_misaligned_ciphertext() {
        let key = [0x42u8; 16];
        let iv = [0x24u8; 16];

        for len in [1usize, 15, 17, 33] {
            assert_eq!(
                decrypt(&key, &iv, &alloc::vec![0u8; len]),
                Err(TokenError::MalformedToken),
                "len {len}"
            );
        }
        assert_eq!(decrypt(&key, &iv, &[]), Err(TokenError::MalformedToken));
    }

    #[test]
    fn flips_in_final_block_trip_the_padding_check() {
        let key = [0x42u8; 16];
        let iv = [0x24u8; 16];
        let ciphertext = encrypt(&key, &iv, b"bitflip test data");
        let final_block = ciphertext.len() - BLOCK_SIZE;

        // Flipping inside the final ciphertext block garbles the whole final
        // plaintext block, so the padding check trips for all but a sliver of
        // flips (a garbled block ends in valid padding with probability on
        // the order of 1/255). Exercise every single-bit flip in the block.
        let mut invalid = 0usize;
        for byte in 0..BLOCK_SIZE {
            for bit in 0..8 {
                let mut tampered = ciphertext.clone();
                tampered[final_block + byte] ^= 1 << bit;
                if decrypt(&key, &iv, &tampered) == Err(TokenError::InvalidPadding) {
                    invalid += 1;
                }
            }
        }
        assert!(invalid >= 120, "only {invalid} of 128 flips were caught");
    }
}
