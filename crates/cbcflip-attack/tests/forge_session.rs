//! End-to-end forging against real tokens from `cbcflip-token`.

use cbcflip_attack::{forge_at, logging, scenario, FieldLayout};
use cbcflip_token::{session_claims, SessionKey, TokenCodec, BLOCK_SIZE};

const NAME: &str = "AAAAAAAAAAAAAAA"; // 15 chars: "false" lands at (block 1, offset 11)

fn fixed_codec() -> TokenCodec {
    TokenCodec::new(SessionKey::from_bytes([0x42; 16]))
}

#[test]
fn forged_flag_flips_and_user_block_is_sacrificed() {
    logging::init_for_tests();

    let codec = fixed_codec();
    let claims = session_claims(NAME);
    let token = codec.encode_with_iv(&claims, &[0x24; BLOCK_SIZE]);

    let location = FieldLayout::session().locate(NAME.len());
    assert_eq!((location.block_index, location.byte_offset), (1, 11));

    let forged = forge_at(&token, location, b"false", b"true;").unwrap();
    let plaintext = codec.decode(&forged).unwrap();

    // Plaintext block 1 took the targeted flip: its tail of the name, then
    // the admin claim rewritten in place.
    assert_eq!(&plaintext[BLOCK_SIZE..2 * BLOCK_SIZE], b"AAAA;admin=true;");
    // Everything past the edited block is untouched.
    assert_eq!(&plaintext[2 * BLOCK_SIZE..], b";expires=2099-12-31");
    // Block 0 paid for the edit: its ciphertext was modified, so its
    // recovered plaintext is garbage. The IV itself was never touched.
    assert_ne!(&plaintext[..BLOCK_SIZE], b"user=AAAAAAAAAAA");

    let parsed = codec.decode_claims(&forged).unwrap();
    assert_eq!(parsed.get("admin"), Some("true"));
    assert_eq!(parsed.get("expires"), Some("2099-12-31"));
    assert_ne!(parsed.get("user"), Some(NAME));
}

#[test]
fn forge_leaves_the_iv_alone_when_the_target_is_past_block_zero() {
    let codec = fixed_codec();
    let token = codec.encode_with_iv(&session_claims(NAME), &[0x24; BLOCK_SIZE]);
    let location = FieldLayout::session().locate(NAME.len());

    let forged = forge_at(&token, location, b"false", b"true;").unwrap();

    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    let raw_before = BASE64.decode(&token).unwrap();
    let raw_after = BASE64.decode(&forged).unwrap();
    assert_eq!(&raw_after[..BLOCK_SIZE], &raw_before[..BLOCK_SIZE]);
    assert_ne!(
        &raw_after[BLOCK_SIZE..2 * BLOCK_SIZE],
        &raw_before[BLOCK_SIZE..2 * BLOCK_SIZE]
    );
    assert_eq!(&raw_after[2 * BLOCK_SIZE..], &raw_before[2 * BLOCK_SIZE..]);
}

#[test]
fn inverse_forge_restores_the_issued_token() {
    let codec = fixed_codec();
    let token = codec.encode_with_iv(&session_claims(NAME), &[0x24; BLOCK_SIZE]);
    let location = FieldLayout::session().locate(NAME.len());

    let forged = forge_at(&token, location, b"false", b"true;").unwrap();
    let restored = forge_at(&forged, location, b"true;", b"false").unwrap();
    assert_eq!(restored, token);
    assert_eq!(
        codec.decode_claims(&restored).unwrap().get("admin"),
        Some("false")
    );
}

#[test]
fn scenario_runs_under_a_random_key() {
    logging::init_for_tests();

    let codec = TokenCodec::generate();
    let outcome = scenario::run(&codec, NAME).unwrap();
    assert!(outcome.admin);
    assert_ne!(outcome.user.as_deref(), Some(NAME));
}

#[test]
fn binary_escalates_with_the_default_alignment() {
    let bin = env!("CARGO_BIN_EXE_cbcflip-attack");
    let output = std::process::Command::new(bin)
        .output()
        .expect("failed to run cbcflip-attack");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("admin flag flipped"), "stdout: {stdout}");
}

#[test]
fn binary_reports_straddling_name_lengths() {
    let bin = env!("CARGO_BIN_EXE_cbcflip-attack");
    let output = std::process::Command::new(bin)
        .args(["--name-length", "16"])
        .output()
        .expect("failed to run cbcflip-attack");

    assert_eq!(output.status.code(), Some(1));
}
