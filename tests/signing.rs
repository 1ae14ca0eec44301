// self
use alipay_oauth::{
	error::{Error, KeyError},
	sign::{self, KeyKind, ParameterSet, RsaVerifier},
};

const PRIVATE_PEM: &str = include_str!("fixtures/rsa_private_key.pem");
const PRIVATE_PKCS8_PEM: &str = include_str!("fixtures/rsa_private_key_pkcs8.pem");
const PUBLIC_PEM: &str = include_str!("fixtures/rsa_public_key.pem");
// `openssl dgst -sha256 -sign` over the serialized `token_params()`.
const TOKEN_SIGNATURE: &str = "BKPgUYFgVjmPpAUsKXBDk0++YKXgWRkfSdsmzkCgvDvzy+vwtmKbKv8iF7mdj53qSwQYBIrK+fMlzHppdkSH+lCgndsHIe/xf+71jf31u28knZ6IGVivoR0ca/Q2ZX6aQkN6XhugwMporwSlMmE5FAqlpdVTXigkejMrJ5WHW7l4tpBMYVEEHYzSeRKlOMyioINlqDWXAA4hB0Exo7bQDzzd+Ex6bIRHAHtjlxly9XGGBcyZ+dFCrQBlj3t/TmVerrk4Qn1U8jYTXY9n5LzHgppCoCWgBZ0X3T1TtY8lU0TtS53VZP5EVjdJVqvicdQY3ikwO4XCFFx7bDFxgbcWOQ==";

// Inserted out of order on purpose; serialization sorts by key.
fn token_params() -> ParameterSet {
	ParameterSet::new()
		.with("version", "1.0")
		.with("timestamp", "2024-05-01 12:30:45")
		.with("sign_type", "RSA2")
		.with("method", "alipay.system.oauth.token")
		.with("grant_type", "authorization_code")
		.with("format", "JSON")
		.with("code", "auth-code-1")
		.with("charset", "utf-8")
		.with("app_id", "2021000000000000")
}

fn single_line_body(pem: &str) -> String {
	pem.lines().filter(|line| !line.starts_with("-----")).collect()
}

#[test]
fn pasted_key_shapes_produce_the_same_signature() {
	let params = token_params();

	for key in [
		PRIVATE_PEM.to_owned(),
		single_line_body(PRIVATE_PEM),
		single_line_body(PRIVATE_PKCS8_PEM),
		PRIVATE_PEM.replace('\n', "\r\n"),
	] {
		assert_eq!(sign::sign(&params, &key).expect("Signing should succeed."), TOKEN_SIGNATURE);
	}
}

#[test]
fn signatures_verify_against_the_public_key() {
	let params = token_params().with("empty", "").with("flag", false);
	let signature = sign::sign(&params, PRIVATE_PEM).expect("Signing should succeed.");
	let verifier = RsaVerifier::from_key_text(&single_line_body(PUBLIC_PEM))
		.expect("Bare public key should load.");

	verifier
		.verify(&params.to_query_string(), &signature)
		.expect("Signature should verify over the full parameter set.");
}

#[test]
fn missing_keys_are_reported_as_key_errors() {
	let err = sign::sign(&token_params(), "\n\n").expect_err("Empty key should fail.");

	assert!(matches!(err, Error::CryptoKey(KeyError::Empty { kind: KeyKind::Private })));
}
