//! Immutable application credentials supplied at construction.

// self
use crate::{
	_prelude::*,
	auth::{AppId, Secret},
};

/// App identifier plus the RSA key material used to sign gateway requests.
///
/// The private key is kept exactly as supplied (with or without PEM armor and line
/// breaks); normalization happens when a request is signed. When the platform public key
/// is present, gateway responses are verified before they are parsed.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
	/// Registered application identifier (`app_id`).
	pub app_id: AppId,
	/// Application RSA private key.
	pub private_key: Secret,
	/// Platform RSA public key used to verify response signatures.
	#[serde(default)]
	pub platform_public_key: Option<Secret>,
}
impl Credentials {
	/// Creates credentials without response verification.
	pub fn new(app_id: AppId, private_key: impl Into<Secret>) -> Self {
		Self { app_id, private_key: private_key.into(), platform_public_key: None }
	}

	/// Enables response signature verification with the platform public key.
	pub fn with_platform_public_key(mut self, key: impl Into<Secret>) -> Self {
		self.platform_public_key = Some(key.into());

		self
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("app_id", &self.app_id)
			.field("private_key", &"<redacted>")
			.field("platform_public_key_set", &self.platform_public_key.is_some())
			.finish()
	}
}
