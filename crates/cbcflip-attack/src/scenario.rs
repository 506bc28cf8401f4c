//! Deterministic end-to-end privilege escalation scenario.
//!
//! Plays both sides: the service mints a legitimate session for a chosen
//! name, then the adversary — using only the public token and the known
//! field layout — flips `admin=false` to `admin=true` and hands the forged
//! token back for decoding.

use cbcflip_token::{session_claims, validate_name, Claims, TokenCodec};

use crate::error::ScenarioError;
use crate::forge::forge_at;
use crate::offset::FieldLayout;

/// The flag value as minted by the service.
pub const ORIGINAL_FLAG: &[u8] = b"false";

/// The replacement. The trailing delimiter keeps the lengths equal and
/// cleanly terminates the claim: `admin=true;` followed by the stray `e`'s
/// old delimiter parses as an empty chunk.
pub const TARGET_FLAG: &[u8] = b"true;";

/// What the escalation produced.
#[derive(Debug)]
pub struct ForgeOutcome {
    /// Token as issued by the service.
    pub issued_token: String,
    /// Token after the ciphertext edit.
    pub forged_token: String,
    /// Claims parsed from the forged token.
    pub claims: Claims,
    /// Whether the forged token now carries `admin=true`.
    pub admin: bool,
    /// The `user` claim after forging. The edit garbles the plaintext block
    /// ahead of the flag, which is where the name lives, so this is noise —
    /// or absent entirely when the garbage swallowed the field name.
    pub user: Option<String>,
}

/// Run the scenario: register `name`, forge the admin flag, decode.
///
/// The name length controls where the flag lands; lengths that leave
/// `false` straddling a block boundary are reported as an alignment error,
/// exactly as a real attacker would have to re-register with a better one.
pub fn run(codec: &TokenCodec, name: &str) -> Result<ForgeOutcome, ScenarioError> {
    validate_name(name)?;

    let issued_token = codec.encode(&session_claims(name));
    tracing::info!(name, "session issued");

    let location = FieldLayout::session().locate(name.len());
    tracing::debug!(
        block_index = location.block_index,
        byte_offset = location.byte_offset,
        "located admin flag"
    );

    let forged_token = forge_at(&issued_token, location, ORIGINAL_FLAG, TARGET_FLAG)?;
    let claims = codec.decode_claims(&forged_token)?;

    let admin = claims.get("admin") == Some("true");
    let user = claims.get("user").map(str::to_owned);
    tracing::info!(admin, ?user, "forged token decoded");

    Ok(ForgeOutcome {
        issued_token,
        forged_token,
        claims,
        admin,
        user,
    })
}
