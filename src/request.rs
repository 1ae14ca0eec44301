//! Strongly typed gateway requests with explicit serialization into [`ParameterSet`].
//!
//! Each request writes its fields under fixed keys, so a misspelled parameter is a compile
//! error rather than a silently rejected signature.

// crates.io
use time::{format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{
	_prelude::*,
	auth::AppId,
	error::ConfigError,
	provider::{GatewayMethod, PlatformFields, SignType},
	sign::ParameterSet,
};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";

/// Request that can be serialized for a signed gateway call.
pub trait GatewayRequest {
	/// Gateway method the request targets.
	fn method(&self) -> GatewayMethod;

	/// Serializes every field, unsigned, in canonical key order.
	fn to_params(&self) -> ParameterSet;
}

/// Fields shared by every gateway call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonFields {
	/// `app_id`
	pub app_id: AppId,
	/// `method`
	pub method: GatewayMethod,
	/// `format`
	pub format: String,
	/// `charset`
	pub charset: String,
	/// `sign_type`
	pub sign_type: SignType,
	/// `timestamp`, already rendered as `YYYY-MM-DD HH:MM:SS`.
	pub timestamp: String,
	/// `version`
	pub version: String,
}
impl CommonFields {
	/// Stamps the platform fields for `method` at instant `at`.
	pub fn new(
		app_id: &AppId,
		method: GatewayMethod,
		fields: &PlatformFields,
		at: OffsetDateTime,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			app_id: app_id.clone(),
			method,
			format: fields.format.clone(),
			charset: fields.charset.clone(),
			sign_type: fields.sign_type,
			timestamp: format_timestamp(at, fields.timestamp_offset)?,
			version: fields.version.clone(),
		})
	}

	fn write_to(&self, params: &mut ParameterSet) {
		params.insert("app_id", &*self.app_id);
		params.insert("method", self.method.as_str());
		params.insert("format", self.format.as_str());
		params.insert("charset", self.charset.as_str());
		params.insert("sign_type", self.sign_type.as_str());
		params.insert("timestamp", self.timestamp.as_str());
		params.insert("version", self.version.as_str());
	}
}

/// `alipay.system.oauth.token` with the authorization-code grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRequest {
	/// Shared platform fields.
	pub common: CommonFields,
	/// Authorization code from the redirect callback.
	pub code: String,
}
impl TokenRequest {
	/// Builds the request; `code` must already be validated as non-empty.
	pub fn new(
		app_id: &AppId,
		fields: &PlatformFields,
		code: impl Into<String>,
		at: OffsetDateTime,
	) -> Result<Self, ConfigError> {
		let code = code.into();

		if code.is_empty() {
			return Err(ConfigError::EmptyAuthorizationCode);
		}

		let common = CommonFields::new(app_id, GatewayMethod::SystemOauthToken, fields, at)?;

		Ok(Self { common, code })
	}
}
impl GatewayRequest for TokenRequest {
	fn method(&self) -> GatewayMethod {
		self.common.method
	}

	fn to_params(&self) -> ParameterSet {
		let mut params = ParameterSet::new();

		self.common.write_to(&mut params);
		params.insert("grant_type", AUTHORIZATION_CODE_GRANT);
		params.insert("code", self.code.as_str());

		params
	}
}

/// `alipay.user.info.share` for a previously issued access token.
#[derive(Clone, PartialEq, Eq)]
pub struct UserInfoRequest {
	/// Shared platform fields.
	pub common: CommonFields,
	/// Access token sent as `auth_token`.
	pub auth_token: String,
}
impl UserInfoRequest {
	/// Builds the request for `auth_token`.
	pub fn new(
		app_id: &AppId,
		fields: &PlatformFields,
		auth_token: impl Into<String>,
		at: OffsetDateTime,
	) -> Result<Self, ConfigError> {
		let common = CommonFields::new(app_id, GatewayMethod::UserInfoShare, fields, at)?;

		Ok(Self { common, auth_token: auth_token.into() })
	}
}
impl GatewayRequest for UserInfoRequest {
	fn method(&self) -> GatewayMethod {
		self.common.method
	}

	fn to_params(&self) -> ParameterSet {
		let mut params = ParameterSet::new();

		self.common.write_to(&mut params);
		params.insert("auth_token", self.auth_token.as_str());

		params
	}
}
impl Debug for UserInfoRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UserInfoRequest")
			.field("common", &self.common)
			.field("auth_token", &"<redacted>")
			.finish()
	}
}

/// Renders `at` as `YYYY-MM-DD HH:MM:SS` in `offset`.
pub fn format_timestamp(at: OffsetDateTime, offset: UtcOffset) -> Result<String, ConfigError> {
	let local = at.checked_to_offset(offset).ok_or(ConfigError::TimestampOutOfRange)?;

	Ok(local.format(TIMESTAMP_FORMAT)?)
}
