//! Access token returned by `alipay.system.oauth.token`.

// crates.io
use serde::{Deserializer, de::Error as _};
// self
use crate::{_prelude::*, auth::Secret};

/// Failure raised while reading a token payload out of a response envelope.
pub type TokenPayloadError = serde_path_to_error::Error<serde_json::Error>;

/// Access token plus the auxiliary fields the gateway returned with it.
///
/// The component consumes tokens but never stores or refreshes them.
#[derive(Clone)]
pub struct AccessToken {
	/// Access token secret (`access_token`); callers must avoid logging it.
	pub access_token: Secret,
	/// Refresh token secret, when issued.
	pub refresh_token: Option<Secret>,
	/// Access token lifetime.
	pub expires_in: Option<Duration>,
	/// Refresh token lifetime.
	pub re_expires_in: Option<Duration>,
	/// Platform user identifier bound to the token.
	pub user_id: Option<String>,
	/// Per-application open identifier bound to the token.
	pub open_id: Option<String>,
	/// Every other field of the envelope, kept verbatim.
	pub extra: JsonMap<String, JsonValue>,
}
impl AccessToken {
	/// Wraps a bare token string, e.g. one restored from the caller's own storage.
	pub fn new(token: impl Into<Secret>) -> Self {
		Self {
			access_token: token.into(),
			refresh_token: None,
			expires_in: None,
			re_expires_in: None,
			user_id: None,
			open_id: None,
			extra: JsonMap::new(),
		}
	}

	/// Parses the fields of a token response envelope.
	pub fn from_fields(fields: JsonMap<String, JsonValue>) -> Result<Self, TokenPayloadError> {
		let payload: TokenPayload =
			serde_path_to_error::deserialize(JsonValue::Object(fields.clone()))?;
		let mut extra = fields;

		for known in TokenPayload::KNOWN_FIELDS {
			extra.remove(*known);
		}

		Ok(Self {
			access_token: Secret::new(payload.access_token),
			refresh_token: payload.refresh_token.map(Secret::new),
			expires_in: payload.expires_in,
			re_expires_in: payload.re_expires_in,
			user_id: payload.user_id,
			open_id: payload.open_id,
			extra,
		})
	}

	/// Returns the token string sent as `auth_token`.
	pub fn token(&self) -> &str {
		self.access_token.expose()
	}

	/// Computes the expiry instant relative to when the token was issued.
	///
	/// Returns `None` when no lifetime was issued or the instant is not representable.
	pub fn expires_at(&self, issued_at: OffsetDateTime) -> Option<OffsetDateTime> {
		issued_at.checked_add(self.expires_in?)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("expires_in", &self.expires_in)
			.field("re_expires_in", &self.re_expires_in)
			.field("user_id", &self.user_id)
			.field("open_id", &self.open_id)
			.field("extra", &self.extra)
			.finish()
	}
}

#[derive(Deserialize)]
struct TokenPayload {
	access_token: String,
	#[serde(default)]
	refresh_token: Option<String>,
	#[serde(default, deserialize_with = "de_seconds")]
	expires_in: Option<Duration>,
	#[serde(default, deserialize_with = "de_seconds")]
	re_expires_in: Option<Duration>,
	#[serde(default, deserialize_with = "de_text")]
	user_id: Option<String>,
	#[serde(default, deserialize_with = "de_text")]
	open_id: Option<String>,
}
impl TokenPayload {
	const KNOWN_FIELDS: &'static [&'static str] = &[
		"access_token",
		"refresh_token",
		"expires_in",
		"re_expires_in",
		"user_id",
		"open_id",
	];
}

// The gateway sends lifetimes either as JSON numbers or as numeric strings.
fn de_seconds<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
	D: Deserializer<'de>,
{
	let secs = match Option::<JsonValue>::deserialize(deserializer)? {
		None | Some(JsonValue::Null) => return Ok(None),
		Some(JsonValue::Number(n)) =>
			n.as_i64().ok_or_else(|| D::Error::custom("lifetime must be an integer"))?,
		Some(JsonValue::String(s)) if s.is_empty() => return Ok(None),
		Some(JsonValue::String(s)) =>
			s.trim().parse::<i64>().map_err(|_| D::Error::custom("lifetime must be numeric"))?,
		Some(_) => return Err(D::Error::custom("lifetime must be a number or string")),
	};

	Ok(Some(Duration::seconds(secs)))
}

fn de_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<JsonValue>::deserialize(deserializer)? {
		None | Some(JsonValue::Null) => Ok(None),
		Some(JsonValue::String(s)) => Ok(Some(s)),
		Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
		Some(_) => Err(D::Error::custom("identifier must be a string or number")),
	}
}
