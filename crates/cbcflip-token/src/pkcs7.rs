//! PKCS#7 padding for the fixed-block-size session cipher.
//!
//! Padding is always applied: a plaintext already on a block boundary gains a
//! full extra block. Unpadding validates the complete invariant and collapses
//! every violation into the single [`TokenError::InvalidPadding`] kind.

extern crate alloc;
use alloc::vec::Vec;

use crate::error::TokenError;

/// Pad `data` to a multiple of `block_size` with PKCS#7 bytes.
///
/// # Panics
///
/// Panics if `block_size` is 0 or greater than 255: the pad length must fit
/// in a single byte, so anything else cannot produce valid padding.
#[must_use]
pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    assert!(
        (1..=255).contains(&block_size),
        "PKCS#7 block_size must be in 1..=255, got {block_size}"
    );

    let pad_len = block_size - data.len() % block_size;
    let mut out = Vec::with_capacity(data.len() + pad_len);
    out.extend_from_slice(data);
    out.resize(data.len() + pad_len, pad_len as u8);
    out
}

/// Strip and validate PKCS#7 padding.
///
/// The final byte names the pad length `n`; `n` must be in `1..=block_size`,
/// no longer than the data, and all `n` trailing bytes must equal `n`.
pub fn unpad(data: &[u8], block_size: usize) -> Result<&[u8], TokenError> {
    let Some(&pad_byte) = data.last() else {
        return Err(TokenError::InvalidPadding);
    };

    let pad_len = pad_byte as usize;
    if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
        return Err(TokenError::InvalidPadding);
    }

    let (content, padding) = data.split_at(data.len() - pad_len);
    if padding.iter().any(|&b| b != pad_byte) {
        return Err(TokenError::InvalidPadding);
    }
    Ok(content)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn pad_unpad_roundtrip(
            data in proptest::collection::vec(any::<u8>(), 0..256),
            block_size in 1..=255usize,
        ) {
            let padded = pad(&data, block_size);
            prop_assert_eq!(padded.len() % block_size, 0);
            prop_assert!(padded.len() > data.len());
            prop_assert!(padded.len() <= data.len() + block_size);
            prop_assert_eq!(unpad(&padded, block_size).unwrap(), &data[..]);
        }
    }
}
