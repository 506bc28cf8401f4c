//! Error types for the forger and the attack scenario.

use std::fmt;

use cbcflip_token::{InvalidName, TokenError};

/// A forge precondition on offsets or lengths was not met.
///
/// These are planning errors on the attacker's side, not token failures: the
/// caller picked an edit the chaining mode cannot express and must choose a
/// different field length instead of retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentError {
    /// Original and target substrings differ in length. A XOR edit can only
    /// substitute bytes in place, never insert or delete.
    LengthMismatch { original: usize, target: usize },
    /// The edit would cross a block boundary. A single-block ciphertext edit
    /// only perturbs one downstream plaintext block deterministically.
    BlockStraddle { byte_offset: usize, edit_len: usize },
    /// The named plaintext block does not exist in this token.
    BlockOutOfRange { block_index: usize, blocks: usize },
}

impl fmt::Display for AlignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentError::LengthMismatch { original, target } => {
                write!(
                    f,
                    "substring lengths differ: original {original}, target {target}"
                )
            }
            AlignmentError::BlockStraddle {
                byte_offset,
                edit_len,
            } => {
                write!(
                    f,
                    "edit of {edit_len} bytes at offset {byte_offset} straddles a block boundary; \
                     choose a field length that keeps the target inside one block"
                )
            }
            AlignmentError::BlockOutOfRange {
                block_index,
                blocks,
            } => {
                write!(
                    f,
                    "plaintext block {block_index} out of range: token has {blocks} blocks"
                )
            }
        }
    }
}

impl std::error::Error for AlignmentError {}

/// Failure modes of [`forge`](crate::forge::forge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgeError {
    /// The input token is not base64, or its raw length is not one IV block
    /// plus a positive multiple of the cipher block size.
    MalformedToken,
    /// A forge precondition was violated; the token was not touched.
    Alignment(AlignmentError),
}

impl fmt::Display for ForgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForgeError::MalformedToken => write!(f, "malformed token"),
            ForgeError::Alignment(e) => write!(f, "alignment error: {e}"),
        }
    }
}

impl From<AlignmentError> for ForgeError {
    fn from(e: AlignmentError) -> Self {
        ForgeError::Alignment(e)
    }
}

impl std::error::Error for ForgeError {}

/// Failure modes of the end-to-end escalation scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioError {
    InvalidName(InvalidName),
    Token(TokenError),
    Forge(ForgeError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::InvalidName(e) => write!(f, "registration rejected: {e}"),
            ScenarioError::Token(e) => write!(f, "token error: {e}"),
            ScenarioError::Forge(e) => write!(f, "forge error: {e}"),
        }
    }
}

impl From<InvalidName> for ScenarioError {
    fn from(e: InvalidName) -> Self {
        ScenarioError::InvalidName(e)
    }
}

impl From<TokenError> for ScenarioError {
    fn from(e: TokenError) -> Self {
        ScenarioError::Token(e)
    }
}

impl From<ForgeError> for ScenarioError {
    fn from(e: ForgeError) -> Self {
        ScenarioError::Forge(e)
    }
}

impl std::error::Error for ScenarioError {}
