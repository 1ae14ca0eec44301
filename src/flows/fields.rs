//! Signed parameter sets for each gateway call.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::AlipayProvider,
	gateway::TransportErrorMapper,
	http::GatewayHttpClient,
	request::{GatewayRequest, TokenRequest, UserInfoRequest},
	sign::ParameterSet,
};

impl<C, M> AlipayProvider<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Signed parameters for `alipay.system.oauth.token`, stamped with the current time.
	pub fn token_fields(&self, code: &str) -> Result<ParameterSet> {
		self.token_fields_at(code, OffsetDateTime::now_utc())
	}

	/// Same as [`token_fields`](Self::token_fields) with an explicit timestamp.
	pub fn token_fields_at(&self, code: &str, at: OffsetDateTime) -> Result<ParameterSet> {
		let request =
			TokenRequest::new(&self.credentials.app_id, &self.descriptor.fields, code, at)?;

		self.signed(&request)
	}

	/// Signed parameters for `alipay.user.info.share`, stamped with the current time.
	///
	/// Falsy values are dropped after signing, so the signature always covers the full set.
	pub fn user_info_fields(&self, token: &AccessToken) -> Result<ParameterSet> {
		self.user_info_fields_at(token, OffsetDateTime::now_utc())
	}

	/// Same as [`user_info_fields`](Self::user_info_fields) with an explicit timestamp.
	pub fn user_info_fields_at(
		&self,
		token: &AccessToken,
		at: OffsetDateTime,
	) -> Result<ParameterSet> {
		let request = UserInfoRequest::new(
			&self.credentials.app_id,
			&self.descriptor.fields,
			token.token(),
			at,
		)?;

		Ok(self.signed(&request)?.without_falsy())
	}

	/// Signs the canonical serialization of `params` with the application private key.
	pub fn sign(&self, params: &ParameterSet) -> Result<String> {
		Ok(self.signer()?.sign(&params.to_query_string())?)
	}

	fn signed(&self, request: &impl GatewayRequest) -> Result<ParameterSet> {
		let mut params = request.to_params();
		let signature = self.sign(&params)?;

		params.insert("sign", signature);

		Ok(params)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::{
		auth::{AppId, Credentials},
		error::{ConfigError, KeyError},
		flows::fake::{self, FakeGateway},
		sign::{KeyKind, RsaVerifier},
	};

	const AT: OffsetDateTime = datetime!(2024-05-01 04:30:45 UTC);
	// `openssl dgst -sha256 -sign` over the canonical token parameters below.
	const TOKEN_SIGNATURE: &str = "BKPgUYFgVjmPpAUsKXBDk0++YKXgWRkfSdsmzkCgvDvzy+vwtmKbKv8iF7mdj53qSwQYBIrK+fMlzHppdkSH+lCgndsHIe/xf+71jf31u28knZ6IGVivoR0ca/Q2ZX6aQkN6XhugwMporwSlMmE5FAqlpdVTXigkejMrJ5WHW7l4tpBMYVEEHYzSeRKlOMyioINlqDWXAA4hB0Exo7bQDzzd+Ex6bIRHAHtjlxly9XGGBcyZ+dFCrQBlj3t/TmVerrk4Qn1U8jYTXY9n5LzHgppCoCWgBZ0X3T1TtY8lU0TtS53VZP5EVjdJVqvicdQY3ikwO4XCFFx7bDFxgbcWOQ==";

	#[test]
	fn token_fields_are_complete_and_signed() {
		let provider = fake::provider(FakeGateway::default());
		let mut params =
			provider.token_fields_at("auth-code-1", AT).expect("Token fields should build.");

		assert_eq!(params.get_text("timestamp"), Some("2024-05-01 12:30:45"));
		assert_eq!(params.get_text("grant_type"), Some("authorization_code"));
		assert_eq!(params.get_text("sign"), Some(TOKEN_SIGNATURE));

		params.remove("sign");

		assert_eq!(
			params.to_query_string(),
			"app_id=2021000000000000&charset=utf-8&code=auth-code-1&format=JSON\
			 &grant_type=authorization_code&method=alipay.system.oauth.token&sign_type=RSA2\
			 &timestamp=2024-05-01+12%3A30%3A45&version=1.0"
		);
	}

	#[test]
	fn token_fields_reject_empty_codes() {
		let provider = fake::provider(FakeGateway::default());

		assert!(matches!(
			provider.token_fields_at("", AT),
			Err(Error::Config(ConfigError::EmptyAuthorizationCode))
		));
	}

	#[test]
	fn token_fields_reject_timestamps_the_gateway_zone_cannot_hold() {
		let provider = fake::provider(FakeGateway::default());

		assert!(matches!(
			provider.token_fields_at("code", datetime!(9999-12-31 20:00:00 UTC)),
			Err(Error::Config(ConfigError::TimestampOutOfRange))
		));
	}

	#[test]
	fn user_info_fields_sign_before_dropping_falsy_values() {
		let provider = fake::provider(FakeGateway::default());
		let verifier = RsaVerifier::from_key_text(fake::PUBLIC_PEM).expect("Fixture key should load.");
		let params = provider
			.user_info_fields_at(&AccessToken::new(""), AT)
			.expect("User info fields should build.");
		let sign = params.get_text("sign").expect("Fields should be signed.").to_owned();

		assert!(!params.contains_key("auth_token"));

		let mut signed = params.with("auth_token", "");

		signed.remove("sign");
		verifier
			.verify(&signed.to_query_string(), &sign)
			.expect("Signature should cover the empty auth_token.");
	}

	#[test]
	fn user_info_fields_carry_the_token() {
		let provider = fake::provider(FakeGateway::default());
		let params = provider
			.user_info_fields_at(&AccessToken::new("abc123"), AT)
			.expect("User info fields should build.");

		assert_eq!(params.get_text("auth_token"), Some("abc123"));
		assert_eq!(params.get_text("method"), Some("alipay.user.info.share"));
		assert!(!params.contains_key("grant_type"));
		assert_eq!(params.len(), 9);
	}

	#[test]
	fn unusable_keys_surface_as_key_errors() {
		let app_id = AppId::new(fake::APP_ID).expect("App id fixture should be valid.");
		let provider = fake::provider_with(
			FakeGateway::default(),
			Credentials::new(app_id.clone(), "   "),
		);

		assert!(matches!(
			provider.token_fields_at("code", AT),
			Err(Error::CryptoKey(KeyError::Empty { kind: KeyKind::Private }))
		));

		let provider =
			fake::provider_with(FakeGateway::default(), Credentials::new(app_id, "bm90IGEga2V5"));

		assert!(matches!(
			provider.token_fields_at("code", AT),
			Err(Error::CryptoKey(KeyError::Parse { kind: KeyKind::Private, .. }))
		));
	}
}
