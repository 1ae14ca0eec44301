//! Gateway dispatch: signed `GET`s, transport error mapping, and envelope extraction.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError,
	http::{Method, Request, header::ACCEPT},
};
use serde_json::value::RawValue;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, RemoteAuthError, SignError, TransportError},
	http::{GatewayHttpClient, GatewayResponse},
	provider::{ERROR_RESPONSE_KEY, GatewayMethod},
	sign::RsaVerifier,
};

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(&self, method: GatewayMethod, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		method: GatewayMethod,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) if inner.is_builder() => ConfigError::from(*inner).into(),
			HttpClientError::Reqwest(inner) => TransportError::from(*inner).into(),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => TransportError::Other { message }.into(),
			_ => TransportError::Other { message: format!("unrecognized failure during {method}") }
				.into(),
		}
	}
}

/// Issues a `GET` for `url` and returns the status and raw body.
pub(crate) async fn get<C, M>(
	http_client: &C,
	mapper: &M,
	method: GatewayMethod,
	url: &Url,
	accept_json: bool,
) -> Result<GatewayResponse>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let mut builder = Request::builder().method(Method::GET).uri(url.as_str());

	if accept_json {
		builder = builder.header(ACCEPT, "application/json");
	}

	let request = builder.body(Vec::new()).map_err(ConfigError::from)?;
	let handle = http_client.handle();
	let response =
		handle.call(request).await.map_err(|err| mapper.map_transport_error(method, err))?;
	let status = response.status().as_u16();
	let body = String::from_utf8_lossy(response.body()).into_owned();

	Ok(GatewayResponse { status, body })
}

/// Gateway response split into its method envelope and bookkeeping.
#[derive(Debug)]
pub struct Envelope {
	/// Method the response belongs to.
	pub method: GatewayMethod,
	/// Response status and raw body.
	pub response: GatewayResponse,
	/// Fields of the method envelope, when present and an object.
	pub payload: Option<JsonMap<String, JsonValue>>,
	/// Fields of a top-level `error_response`, when present.
	pub error_response: Option<JsonMap<String, JsonValue>>,
	raw_payload: Option<Box<RawValue>>,
	sign: Option<String>,
}
impl Envelope {
	/// Splits `response` for `method`. A body that is not a JSON object yields an envelope
	/// without payload.
	pub fn parse(method: GatewayMethod, response: GatewayResponse) -> Self {
		let mut root: BTreeMap<String, Box<RawValue>> =
			serde_json::from_str(&response.body).unwrap_or_default();
		let raw_payload = root.remove(method.response_key());
		let payload = raw_payload.as_deref().and_then(object_of);
		let error_response = root.get(ERROR_RESPONSE_KEY).and_then(|raw| object_of(raw));
		let sign = root.get("sign").and_then(|raw| serde_json::from_str::<String>(raw.get()).ok());

		Self { method, response, payload, error_response, raw_payload, sign }
	}

	/// Verifies the top-level `sign` over the exact envelope text.
	///
	/// Responses without a method envelope are left to the caller's failure handling.
	pub fn verify(&self, verifier: &RsaVerifier) -> Result<(), SignError> {
		let Some(raw) = self.raw_payload.as_deref() else {
			return Ok(());
		};
		let sign = self
			.sign
			.as_deref()
			.ok_or(SignError::MissingResponseSignature { method: self.method })?;

		verifier.verify(raw.get(), sign)
	}

	/// Builds the failure for this response, copying platform error details when available.
	pub fn failure(&self) -> RemoteAuthError {
		let err =
			RemoteAuthError::new(self.method, Some(self.response.status), &self.response.body);

		match self.payload.as_ref().or(self.error_response.as_ref()) {
			Some(details) => err.with_details(details),
			None => err,
		}
	}

	/// Consumes the envelope, returning the payload or the failure.
	pub fn into_payload(self) -> Result<JsonMap<String, JsonValue>, RemoteAuthError> {
		let failure = self.failure();

		self.payload.ok_or(failure)
	}
}

fn object_of(raw: &RawValue) -> Option<JsonMap<String, JsonValue>> {
	serde_json::from_str(raw.get()).ok()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(body: &str) -> GatewayResponse {
		GatewayResponse { status: 200, body: body.into() }
	}

	#[test]
	fn extracts_method_envelope() {
		let envelope = Envelope::parse(
			GatewayMethod::SystemOauthToken,
			response(r#"{"alipay_system_oauth_token_response":{"access_token":"abc123"},"sign":"xyz"}"#),
		);
		let payload = envelope.into_payload().expect("Envelope should carry a payload.");

		assert_eq!(payload["access_token"], "abc123");
	}

	#[test]
	fn failures_carry_body_and_error_response_details() {
		let body = r#"{"error_response":{"code":"40002","msg":"Invalid Arguments","sub_code":"isv.code-invalid"}}"#;
		let err = Envelope::parse(GatewayMethod::SystemOauthToken, response(body))
			.into_payload()
			.expect_err("Missing envelopes should fail.");

		assert_eq!(err.body, body);
		assert_eq!(err.status, Some(200));
		assert_eq!(err.code.as_deref(), Some("40002"));
		assert_eq!(err.sub_code.as_deref(), Some("isv.code-invalid"));
	}

	#[test]
	fn non_json_and_non_object_payloads_fail() {
		for body in ["<html>502</html>", "[]", r#"{"alipay_user_info_share_response":"oops"}"#] {
			let err = Envelope::parse(GatewayMethod::UserInfoShare, response(body))
				.into_payload()
				.expect_err("Malformed bodies should fail.");

			assert_eq!(err.body, body);
		}
	}

	#[test]
	fn verification_requires_a_signature() {
		let verifier = RsaVerifier::from_key_text(include_str!(
			"../tests/fixtures/rsa_public_key.pem"
		))
		.expect("Fixture key should load.");
		let envelope = Envelope::parse(
			GatewayMethod::UserInfoShare,
			response(r#"{"alipay_user_info_share_response":{"code":"10000"}}"#),
		);

		assert!(matches!(
			envelope.verify(&verifier),
			Err(SignError::MissingResponseSignature { method: GatewayMethod::UserInfoShare })
		));

		let unsigned_failure =
			Envelope::parse(GatewayMethod::UserInfoShare, response(r#"{"error_response":{}}"#));

		assert!(unsigned_failure.verify(&verifier).is_ok());
	}
}
