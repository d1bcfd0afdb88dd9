use secure_serializer::*;
use serde_json::{json, Value};

const ENCRYPT_KEY: &str = "somesecretkey";
const VALIDATE_KEY: &str = "anothersecretstring";

const B64URL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const ALNUM: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const HEX: &[u8] = b"0123456789abcdef";

fn serializer() -> SecureSerializer {
    SecureSerializer::new(ENCRYPT_KEY, VALIDATE_KEY)
}

/// Replace the character at `pos` with the next one in `alphabet`.
fn substitute(token: &str, pos: usize, alphabet: &[u8]) -> String {
    let mut bytes = token.as_bytes().to_vec();
    let current = bytes[pos].to_ascii_lowercase();
    let idx = alphabet
        .iter()
        .position(|&c| c == bytes[pos] || (alphabet == HEX && c == current))
        .unwrap_or(0);
    bytes[pos] = alphabet[(idx + 1) % alphabet.len()];
    String::from_utf8(bytes).unwrap()
}

fn assert_rejected(s: &SecureSerializer, token: &str) {
    match s.decode::<Value>(token) {
        Err(e) => assert!(e.is_rejected_token(), "unexpected error {e:?}"),
        Ok(v) => panic!("tampered token decoded to {v}"),
    }
}

// ============================================================================
// Tamper detection
// ============================================================================

#[test]
fn test_every_digest_character_is_protected() {
    let s = serializer();
    let token = s.encode(&json!({"foo": "bar"})).unwrap();
    for pos in 0..28 {
        assert_rejected(&s, &substitute(&token, pos, B64URL));
    }
}

#[test]
fn test_every_nonce_character_is_protected() {
    let s = serializer();
    let token = s.encode(&json!({"foo": "bar"})).unwrap();
    for pos in 28..36 {
        assert_rejected(&s, &substitute(&token, pos, ALNUM));
    }
}

#[test]
fn test_every_ciphertext_character_is_protected() {
    let s = serializer();
    let token = s.encode(&json!({"user": 7, "admin": false})).unwrap();
    for pos in 36..token.len() {
        assert_rejected(&s, &substitute(&token, pos, HEX));
    }
}

#[test]
fn test_digest_case_change_rejected() {
    let s = serializer();
    let token = s.encode(&json!({"foo": "bar"})).unwrap();
    let flipped: String = token[..28]
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect::<String>()
        + &token[28..];
    assert_ne!(flipped, token);
    assert_rejected(&s, &flipped);
}

#[test]
fn test_truncated_ciphertext_rejected() {
    let s = serializer();
    let token = s.encode(&json!({"foo": "bar"})).unwrap();
    // Drop whole blocks, half blocks, and single bytes.
    for cut in [2, 16, 32, token.len() - 36] {
        assert_rejected(&s, &token[..token.len() - cut]);
    }
}

#[test]
fn test_extended_ciphertext_rejected() {
    let s = serializer();
    let token = s.encode(&json!({"foo": "bar"})).unwrap();
    assert_rejected(&s, &format!("{token}00"));
    assert_rejected(&s, &format!("{token}{}", "00".repeat(16)));
}

#[test]
fn test_spliced_tokens_rejected() {
    let s = serializer();
    let a = s.encode(&json!({"role": "user"})).unwrap();
    let b = s.encode(&json!({"role": "admin"})).unwrap();
    // Digest and nonce from one token, ciphertext from another.
    let spliced = format!("{}{}", &a[..36], &b[36..]);
    assert_rejected(&s, &spliced);
}

// ============================================================================
// Key sensitivity
// ============================================================================

#[test]
fn test_wrong_validate_key() {
    let token = serializer().encode(&json!({"foo": "bar"})).unwrap();
    let other = SecureSerializer::new(ENCRYPT_KEY, "wrongvalidatekey");
    assert_eq!(other.decode::<Value>(&token), Err(CodecError::Authentication));
}

#[test]
fn test_wrong_encrypt_key() {
    let token = serializer().encode(&json!({"foo": "bar"})).unwrap();
    let other = SecureSerializer::new("wrongencryptkey", VALIDATE_KEY);
    assert_rejected(&other, &token);
}

#[test]
fn test_swapped_keys() {
    let token = serializer().encode(&json!({"foo": "bar"})).unwrap();
    let swapped = SecureSerializer::new(VALIDATE_KEY, ENCRYPT_KEY);
    assert_rejected(&swapped, &token);
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_short_inputs_are_malformed() {
    let s = serializer();
    for len in 0..36 {
        let input = "A".repeat(len);
        assert_eq!(
            s.decode::<Value>(&input),
            Err(CodecError::MalformedToken("token too short"))
        );
    }
}

#[test]
fn test_minimum_length_token_is_malformed() {
    let s = serializer();
    let token = s.encode(&json!(1)).unwrap();
    assert!(matches!(
        s.decode::<Value>(&token[..36]),
        Err(CodecError::MalformedToken(_))
    ));
}

#[test]
fn test_odd_hex_is_malformed() {
    let s = serializer();
    let token = s.encode(&json!(1)).unwrap();
    assert_eq!(
        s.decode::<Value>(&token[..token.len() - 1]),
        Err(CodecError::MalformedToken("ciphertext is not valid hex"))
    );
}

#[test]
fn test_garbage_inputs_never_panic() {
    let s = serializer();
    let inputs = [
        "=".repeat(100),
        "🦀".repeat(30),
        format!("{}{}{}", "A".repeat(27), "=", "00000000ff"),
        format!("{}{}", "A".repeat(36), "zz"),
        format!("{}{}", "-".repeat(36), "00".repeat(16)),
    ];
    for input in &inputs {
        assert!(s.decode::<Value>(input).is_err());
    }
}

#[test]
fn test_public_code_hides_failure_kind() {
    let s = serializer();
    let token = s.encode(&json!({"foo": "bar"})).unwrap();
    let short = s.decode::<Value>("short").unwrap_err();
    let forged = SecureSerializer::new(ENCRYPT_KEY, "x")
        .decode::<Value>(&token)
        .unwrap_err();
    assert_ne!(short, forged);
    assert_eq!(short.public_code(), forged.public_code());
}
