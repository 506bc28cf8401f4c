//! Bit-flip forging against malleable CBC session tokens.
//!
//! The companion `cbcflip-token` crate mints `base64(IV || ciphertext)`
//! session tokens with no integrity protection. This crate implements the
//! adversary side: computing where the `admin` flag lands in the plaintext
//! stream from the known field layout, then XOR-editing the ciphertext block
//! ahead of it so the flag decrypts to `true` — all without the key.
//!
//! The forger only ever sees the public token. The [`scenario`] module wires
//! codec and forger together into a deterministic end-to-end demonstration.

pub mod error;
pub mod forge;
pub mod logging;
pub mod offset;
pub mod scenario;

pub use error::{AlignmentError, ForgeError, ScenarioError};
pub use forge::{forge, forge_at};
pub use offset::{locate_target, FieldLayout, TargetLocation};
pub use scenario::ForgeOutcome;
