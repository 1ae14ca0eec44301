//! Gateway methods, response envelope keys, and the enums stamped onto requests.

// self
use crate::_prelude::*;

/// Gateway methods; the `method` parameter disambiguates calls to the single gateway URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GatewayMethod {
	/// `alipay.system.oauth.token`: exchanges an authorization code for an access token.
	SystemOauthToken,
	/// `alipay.user.info.share`: reads the profile bound to an access token.
	UserInfoShare,
}
impl GatewayMethod {
	/// Returns the method name sent in the `method` parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			GatewayMethod::SystemOauthToken => "alipay.system.oauth.token",
			GatewayMethod::UserInfoShare => "alipay.user.info.share",
		}
	}

	/// Returns the key of the envelope object the gateway answers with.
	pub const fn response_key(self) -> &'static str {
		match self {
			GatewayMethod::SystemOauthToken => "alipay_system_oauth_token_response",
			GatewayMethod::UserInfoShare => "alipay_user_info_share_response",
		}
	}
}
impl Display for GatewayMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Envelope key used by the gateway for failures it cannot attribute to a method.
pub const ERROR_RESPONSE_KEY: &str = "error_response";

/// Result code reported by successful business calls.
pub const SUCCESS_CODE: &str = "10000";

/// Signature algorithms accepted by the gateway.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignType {
	/// RSA with SHA-256 (PKCS#1 v1.5).
	#[default]
	#[serde(rename = "RSA2")]
	Rsa2,
}
impl SignType {
	/// Returns the `sign_type` tag.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignType::Rsa2 => "RSA2",
		}
	}
}
impl Display for SignType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Scopes requested on the authorize page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScope {
	/// Silent authorization; yields the user identifier only.
	AuthBase,
	/// Explicit authorization; allows reading the shared profile.
	#[default]
	AuthUser,
}
impl AuthScope {
	/// Returns the scope string used in the authorize URL.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthScope::AuthBase => "auth_base",
			AuthScope::AuthUser => "auth_user",
		}
	}
}
impl Display for AuthScope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
