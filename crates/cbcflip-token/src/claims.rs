//! Ordered session claims and their delimited wire form.
//!
//! Claims serialize as `name=value` pairs joined by a `;` delimiter, in
//! exactly the order they were pushed. Ordering is a first-class property
//! here, not an accident of the container: the byte offset of every field in
//! the serialized plaintext depends on it, and the attack crate's offset
//! arithmetic would be meaningless without it.

extern crate alloc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// Delimiter byte between serialized claims.
pub const DELIMITER: u8 = b';';

/// Expiry value stamped into every freshly minted session.
pub const SESSION_EXPIRES: &str = "2099-12-31";

/// An ordered sequence of `name`/`value` claim pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Claims {
    pairs: Vec<(String, String)>,
}

impl Claims {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a claim. Duplicate names are kept in place; lookup resolves to
    /// the last one, dict-style.
    pub fn push(&mut self, name: &str, value: &str) {
        self.pairs.push((name.to_string(), value.to_string()));
    }

    /// Value of the last claim with the given name.
    ///
    /// Last wins so that a claim repeated later in the plaintext overrides an
    /// earlier one. A forge garbles the block ahead of the real `admin`
    /// claim; should that garbage happen to parse as `admin=<junk>`, the
    /// genuine claim still decides the lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serialize to the delimited wire form.
    ///
    /// A claim with an empty value serializes as the bare name, without `=`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push(DELIMITER);
            }
            out.extend_from_slice(name.as_bytes());
            if !value.is_empty() {
                out.push(b'=');
                out.extend_from_slice(value.as_bytes());
            }
        }
        out
    }

    /// Parse a decrypted plaintext back into claims. Never fails.
    ///
    /// Splits on [`DELIMITER`], then on the first `=` of each chunk; a chunk
    /// without `=` becomes a claim with an empty value, and empty chunks are
    /// skipped. Non-UTF-8 bytes are replaced rather than rejected: a forged
    /// token garbles one plaintext block, and the surviving claims must still
    /// come out the other side.
    pub fn parse(plaintext: &[u8]) -> Self {
        let mut claims = Claims::new();
        for chunk in plaintext.split(|&b| b == DELIMITER) {
            if chunk.is_empty() {
                continue;
            }
            let (name, value) = match chunk.iter().position(|&b| b == b'=') {
                Some(eq) => (&chunk[..eq], &chunk[eq + 1..]),
                None => (chunk, &chunk[..0]),
            };
            claims.pairs.push((
                String::from_utf8_lossy(name).into_owned(),
                String::from_utf8_lossy(value).into_owned(),
            ));
        }
        claims
    }
}

/// Build the canonical session claim set for a user:
/// `user=<name>;admin=false;expires=2099-12-31`.
pub fn session_claims(name: &str) -> Claims {
    let mut claims = Claims::new();
    claims.push("user", name);
    claims.push("admin", "false");
    claims.push("expires", SESSION_EXPIRES);
    claims
}

/// A user name rejected at the registration boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidName;

impl fmt::Display for InvalidName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name must be 3-50 ASCII letters or digits")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidName {}

/// Validate a user name before minting a session for it.
///
/// Enforces the registration pattern `^[A-Za-z0-9]{3,50}$`, which keeps the
/// delimiter and `=` out of the attacker-controlled field and bounds the
/// serialized plaintext length. `TokenCodec::encode` itself never fails;
/// this is the boundary where bad input gets rejected.
pub fn validate_name(name: &str) -> Result<(), InvalidName> {
    let ok = (3..=50).contains(&name.len()) && name.bytes().all(|b| b.is_ascii_alphanumeric());
    if ok {
        Ok(())
    } else {
        Err(InvalidName)
    }
}
