use core::fmt;

/// Failure modes of token decoding.
///
/// `InvalidPadding` is deliberately a distinct kind from `MalformedToken`:
/// the studied scheme exposes its padding check as an observable oracle and
/// the attack tests depend on that distinction. The display text carries no
/// pad byte value or position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The token is not valid base64, or the decoded bytes are not one IV
    /// block followed by a positive multiple of the cipher block size.
    MalformedToken,
    /// Decryption produced bytes whose trailing PKCS#7 padding is invalid.
    InvalidPadding,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::MalformedToken => write!(f, "malformed token"),
            TokenError::InvalidPadding => write!(f, "invalid padding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TokenError {}
