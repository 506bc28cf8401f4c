//! Deliberately malleable CBC session tokens.
//!
//! This crate implements the session-token scheme under study: an ordered set
//! of `name=value` claims is serialized with a `;` delimiter, PKCS#7-padded,
//! encrypted under AES-128-CBC, and shipped as `base64(IV || ciphertext)`.
//! There is **no** integrity protection — that omission is the point. The
//! companion `cbcflip-attack` crate forges the `admin` claim by editing
//! ciphertext alone.
//!
//! Do not use this for anything that needs to be secure.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod cipher;
pub mod claims;
pub mod codec;
pub mod error;
pub mod pkcs7;

pub use cipher::BLOCK_SIZE;
pub use claims::{session_claims, validate_name, Claims, InvalidName, DELIMITER};
pub use codec::{SessionKey, TokenCodec, KEY_SIZE};
pub use error::TokenError;
