//! Raw and normalized user profiles.

// self
use crate::_prelude::*;

/// Profile fields exactly as returned inside the user-info envelope (minus `code`/`msg`).
pub type RawProfile = JsonMap<String, JsonValue>;

/// Provider-neutral user profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Platform user identifier (`user_id`).
	pub id: Option<String>,
	/// Display name; the platform only exposes `nick_name`.
	pub name: Option<String>,
	/// Nickname (`nick_name`).
	pub nickname: Option<String>,
	/// Avatar URL (`avatar`).
	pub avatar: Option<String>,
	/// Always `None`: the user-info API does not return an email address.
	pub email: Option<String>,
	/// Source fields the profile was mapped from.
	#[serde(default)]
	pub raw: RawProfile,
}
impl UserProfile {
	/// Maps a raw profile into normalized fields. Missing fields become `None`.
	pub fn from_raw(raw: RawProfile) -> Self {
		let nick_name = item(&raw, "nick_name");

		Self {
			id: item(&raw, "user_id"),
			name: nick_name.clone(),
			nickname: nick_name,
			avatar: item(&raw, "avatar"),
			email: None,
			raw,
		}
	}
}

/// Reads a scalar field as text; `null`, arrays, and objects read as absent.
fn item(raw: &RawProfile, key: &str) -> Option<String> {
	match raw.get(key)? {
		JsonValue::String(text) => Some(text.clone()),
		JsonValue::Number(n) => Some(n.to_string()),
		JsonValue::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}
