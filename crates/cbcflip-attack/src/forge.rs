//! The CBC malleability edit.
//!
//! Flipping bits in ciphertext block `k-1` flips the same bit positions in
//! plaintext block `k` after decryption, at the cost of turning block `k-1`'s
//! own recovered plaintext into garbage. With the IV transmitted as the
//! leading raw block, "the block ahead of plaintext block `k`" is simply raw
//! block `k` — editing the IV itself covers the `k == 0` case.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use cbcflip_token::BLOCK_SIZE;

use crate::error::{AlignmentError, ForgeError};
use crate::offset::TargetLocation;

/// Rewrite `original` to `target` inside plaintext block `block_index` of a
/// token, by editing ciphertext alone.
///
/// `byte_offset` is where the substring starts within that block. The edit is
/// a pure function of its inputs: same token in, same token out, and applying
/// the inverse edit (swap `original` and `target`) restores the input
/// exactly. The caller must not rely on the decoded content of block
/// `block_index - 1` afterwards (or of block 0 when the IV was edited) —
/// that block decrypts to garbage.
///
/// # Errors
///
/// `MalformedToken` if the token is not base64 of one IV block plus a
/// positive multiple of [`BLOCK_SIZE`]; an [`AlignmentError`] kind if the
/// substrings differ in length, the edit would straddle a block boundary, or
/// the block index is out of range. No partial edit is ever produced.
pub fn forge(
    token: &str,
    block_index: usize,
    byte_offset: usize,
    original: &[u8],
    target: &[u8],
) -> Result<String, ForgeError> {
    if original.len() != target.len() {
        return Err(AlignmentError::LengthMismatch {
            original: original.len(),
            target: target.len(),
        }
        .into());
    }
    if byte_offset + target.len() > BLOCK_SIZE {
        return Err(AlignmentError::BlockStraddle {
            byte_offset,
            edit_len: target.len(),
        }
        .into());
    }

    let mut raw = BASE64
        .decode(token)
        .map_err(|_| ForgeError::MalformedToken)?;
    if raw.len() < 2 * BLOCK_SIZE || raw.len() % BLOCK_SIZE != 0 {
        return Err(ForgeError::MalformedToken);
    }

    // Raw block 0 is the IV, so the token carries one raw block per
    // plaintext block plus one; plaintext block k chains against raw block k.
    let blocks = raw.len() / BLOCK_SIZE - 1;
    if block_index >= blocks {
        return Err(AlignmentError::BlockOutOfRange {
            block_index,
            blocks,
        }
        .into());
    }

    let edit_at = block_index * BLOCK_SIZE + byte_offset;
    for (i, (&from, &to)) in original.iter().zip(target).enumerate() {
        raw[edit_at + i] ^= from ^ to;
    }

    Ok(BASE64.encode(raw))
}

/// [`forge`] with the position supplied as a [`TargetLocation`].
pub fn forge_at(
    token: &str,
    location: TargetLocation,
    original: &[u8],
    target: &[u8],
) -> Result<String, ForgeError> {
    forge(
        token,
        location.block_index,
        location.byte_offset,
        original,
        target,
    )
}
