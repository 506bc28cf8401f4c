//! Locating the target substring in the plaintext stream.
//!
//! The session plaintext is `prefix || field || mid || target || ...` where
//! only the field is attacker-controlled and length-variable. Everything the
//! forger needs is the absolute byte offset of the target, split into a block
//! index and an in-block offset.

use cbcflip_token::BLOCK_SIZE;

/// Position of the target substring in the plaintext stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetLocation {
    /// Index of the plaintext block holding the first target byte.
    pub block_index: usize,
    /// Byte offset of the target within that block.
    pub byte_offset: usize,
}

/// Known constant byte lengths around the attacker-controlled field.
///
/// The near-duplicate services all share this shape and differ only in the
/// constants, so one descriptor covers them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Bytes before the attacker-controlled field.
    pub prefix_len: usize,
    /// Bytes between the field and the target substring.
    pub mid_len: usize,
}

impl FieldLayout {
    /// Layout of the canonical session plaintext
    /// `user=<name>;admin=false;...`: prefix `user=`, mid `;admin=`.
    pub const fn session() -> Self {
        Self {
            prefix_len: 5,
            mid_len: 7,
        }
    }

    /// Where the target lands for a field of the given length.
    pub fn locate(&self, field_len: usize) -> TargetLocation {
        locate_target(self.prefix_len, field_len, self.mid_len)
    }
}

/// Compute the target's block index and in-block offset from the layout.
pub fn locate_target(prefix_len: usize, field_len: usize, mid_len: usize) -> TargetLocation {
    let absolute = prefix_len + field_len + mid_len;
    TargetLocation {
        block_index: absolute / BLOCK_SIZE,
        byte_offset: absolute % BLOCK_SIZE,
    }
}
