//! Provider-level error types shared across signing, transport, and response handling.

// self
use crate::{_prelude::*, provider::GatewayMethod, sign::KeyKind};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or input problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Signing or verification key is empty or cannot be parsed.
	#[error(transparent)]
	CryptoKey(#[from] KeyError),
	/// The signing or verification operation itself failed.
	#[error(transparent)]
	CryptoSign(#[from] SignError),
	/// Gateway answered, but the envelope reports an unsuccessful call.
	#[error(transparent)]
	RemoteAuth(#[from] RemoteAuthError),
	/// Transport failure (DNS, TCP, TLS) raised by the HTTP collaborator.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

impl From<crate::auth::AppIdError> for Error {
	fn from(e: crate::auth::AppIdError) -> Self {
		ConfigError::from(e).into()
	}
}
impl From<crate::provider::GatewayDescriptorError> for Error {
	fn from(e: crate::provider::GatewayDescriptorError) -> Self {
		ConfigError::from(e).into()
	}
}

/// Configuration and input validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Descriptor validation failed.
	#[error(transparent)]
	Descriptor(#[from] crate::provider::GatewayDescriptorError),
	/// App identifier failed validation.
	#[error(transparent)]
	AppId(#[from] crate::auth::AppIdError),
	/// Authorization code passed to the token exchange is empty.
	#[error("Authorization code must not be empty.")]
	EmptyAuthorizationCode,
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Timestamp could not be rendered with the gateway format.
	#[error("Request timestamp could not be formatted.")]
	Timestamp(#[from] time::error::Format),
	/// Timestamp cannot be shifted into the gateway offset.
	#[error("Request timestamp is out of range for the gateway offset.")]
	TimestampOutOfRange,
	/// Returned `state` does not match the one issued with the authorize URL.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// The stored key material cannot be used.
#[derive(Debug, ThisError)]
pub enum KeyError {
	/// No key material was supplied.
	#[error("The {kind} key is empty.")]
	Empty {
		/// Which key failed.
		kind: KeyKind,
	},
	/// The normalized PEM block could not be decoded into an RSA key.
	#[error("The {kind} key could not be parsed.")]
	Parse {
		/// Which key failed.
		kind: KeyKind,
		/// Underlying decoder failure.
		#[source]
		source: BoxError,
	},
}

/// Signing or verification failed after a usable key was loaded.
#[derive(Debug, ThisError)]
pub enum SignError {
	/// RSA-SHA256 signing failed.
	#[error("RSA-SHA256 signing failed.")]
	Sign {
		/// Underlying signature failure.
		#[source]
		source: rsa::signature::Error,
	},
	/// A signature could not be decoded from base64.
	#[error("Signature is not valid base64.")]
	Decode {
		/// Underlying decoder failure.
		#[source]
		source: base64::DecodeError,
	},
	/// A signature did not verify against the platform public key.
	#[error("Signature does not match the signed content.")]
	Mismatch {
		/// Underlying verifier failure.
		#[source]
		source: rsa::signature::Error,
	},
	/// The gateway response lacks a `sign` field while verification is enabled.
	#[error("Gateway response for {method} is not signed.")]
	MissingResponseSignature {
		/// Gateway method whose response was unsigned.
		method: GatewayMethod,
	},
}

/// Well-formed HTTP exchange whose envelope reports failure.
///
/// The raw body is always retained so callers can log or inspect what the gateway sent.
#[derive(Debug, ThisError)]
#[error("{method}:{body}")]
pub struct RemoteAuthError {
	/// Gateway method that failed.
	pub method: GatewayMethod,
	/// HTTP status code, when available.
	pub status: Option<u16>,
	/// Platform result code (`10000` means success).
	pub code: Option<String>,
	/// Platform result message.
	pub msg: Option<String>,
	/// Detailed platform error code, e.g. `isv.code-invalid`.
	pub sub_code: Option<String>,
	/// Detailed platform error message.
	pub sub_msg: Option<String>,
	/// Raw response body as received.
	pub body: String,
}
impl RemoteAuthError {
	/// Creates an error carrying only the method, status, and raw body.
	pub fn new(method: GatewayMethod, status: Option<u16>, body: impl Into<String>) -> Self {
		Self { method, status, code: None, msg: None, sub_code: None, sub_msg: None, body: body.into() }
	}

	/// Copies the platform `code`/`msg`/`sub_code`/`sub_msg` fields out of an envelope object.
	pub fn with_details(mut self, details: &JsonMap<String, JsonValue>) -> Self {
		self.code = json_text(details.get("code"));
		self.msg = json_text(details.get("msg"));
		self.sub_code = json_text(details.get("sub_code"));
		self.sub_msg = json_text(details.get("sub_msg"));

		self
	}

	/// Renders the method, status, and platform codes without the raw body.
	///
	/// The body may echo tokens back, so this is the form meant for logs.
	pub fn summary(&self) -> String {
		let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".into());
		let status = self.status.map_or_else(|| "-".into(), |status| status.to_string());

		format!(
			"{} rejected: status={status} code={} sub_code={}",
			self.method,
			field(&self.code),
			field(&self.sub_code)
		)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the gateway.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the gateway.")]
	Io(#[from] std::io::Error),
	/// The transport failed without a structured error value.
	#[error("HTTP client error occurred while calling the gateway: {message}.")]
	Other {
		/// Message reported by the transport.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

fn json_text(value: Option<&JsonValue>) -> Option<String> {
	match value? {
		JsonValue::String(text) => Some(text.clone()),
		JsonValue::Null => None,
		other => Some(other.to_string()),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn remote_auth_error_keeps_body_and_details() {
		let details = serde_json::json!({
			"code": "40002",
			"msg": "Invalid Arguments",
			"sub_code": "isv.code-invalid",
			"sub_msg": "授权码code无效",
		});
		let details = details.as_object().expect("Fixture should be a JSON object.");
		let err = RemoteAuthError::new(GatewayMethod::UserInfoShare, Some(200), "{\"raw\":true}")
			.with_details(details);

		assert_eq!(err.code.as_deref(), Some("40002"));
		assert_eq!(err.sub_code.as_deref(), Some("isv.code-invalid"));
		assert_eq!(err.body, "{\"raw\":true}");
		assert_eq!(err.to_string(), "alipay.user.info.share:{\"raw\":true}");
	}

	#[test]
	fn summary_leaves_out_the_body() {
		let body = r#"{"alipay_system_oauth_token_response":{"access_token":"abc123","refresh_token":"refresh-1","expires_in":"soon"}}"#;
		let err = RemoteAuthError::new(GatewayMethod::SystemOauthToken, Some(200), body);
		let summary = err.summary();

		assert_eq!(summary, "alipay.system.oauth.token rejected: status=200 code=- sub_code=-");
		assert!(!summary.contains("abc123"));
		assert!(!summary.contains("refresh-1"));
	}

	#[test]
	fn numeric_codes_render_as_text() {
		let details = serde_json::json!({ "code": 20000, "msg": null });
		let details = details.as_object().expect("Fixture should be a JSON object.");
		let err =
			RemoteAuthError::new(GatewayMethod::SystemOauthToken, None, "").with_details(details);

		assert_eq!(err.code.as_deref(), Some("20000"));
		assert_eq!(err.msg, None);
	}
}
