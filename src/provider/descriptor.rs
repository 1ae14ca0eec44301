//! Gateway descriptor data structures shared by all flows.
//!
//! A descriptor pins the endpoints and the fixed platform fields (`format`, `charset`,
//! `sign_type`, `version`, timestamp zone) so callers can point the same provider at the
//! production gateway, the sandbox, or a mock server.

/// Builder API for assembling gateway descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, provider::SignType};

const PRODUCTION_GATEWAY: &str = "https://openapi.alipay.com/gateway.do";
const PRODUCTION_AUTHORIZE: &str = "https://openauth.alipay.com/oauth2/publicAppAuthorize.htm";
const SANDBOX_GATEWAY: &str = "https://openapi-sandbox.dl.alipaydev.com/gateway.do";
const SANDBOX_AUTHORIZE: &str =
	"https://openauth-sandbox.dl.alipaydev.com/oauth2/publicAppAuthorize.htm";

/// Endpoint set declared by a descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayEndpoints {
	/// Single gateway URL used for every signed call.
	pub gateway: Url,
	/// Authorize page users are redirected to.
	pub authorize: Url,
}

/// Fixed platform fields stamped onto every signed request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformFields {
	/// Response format (`format`).
	pub format: String,
	/// Request charset (`charset`).
	pub charset: String,
	/// Signature algorithm tag (`sign_type`).
	pub sign_type: SignType,
	/// Protocol version (`version`).
	pub version: String,
	/// Zone used to render the `timestamp` field.
	pub timestamp_offset: UtcOffset,
}
impl PlatformFields {
	/// The gateway interprets timestamps in China Standard Time.
	pub const DEFAULT_TIMESTAMP_OFFSET: UtcOffset = time::macros::offset!(+8);
}
impl Default for PlatformFields {
	fn default() -> Self {
		Self {
			format: "JSON".into(),
			charset: "utf-8".into(),
			sign_type: SignType::Rsa2,
			version: "1.0".into(),
			timestamp_offset: Self::DEFAULT_TIMESTAMP_OFFSET,
		}
	}
}

/// Immutable gateway descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayDescriptor {
	/// Endpoint definitions.
	pub endpoints: GatewayEndpoints,
	/// Fixed platform fields.
	pub fields: PlatformFields,
}
impl GatewayDescriptor {
	/// Creates a new builder.
	pub fn builder() -> GatewayDescriptorBuilder {
		GatewayDescriptorBuilder::new()
	}

	/// Descriptor for the production open platform.
	pub fn production() -> Result<Self, GatewayDescriptorError> {
		Self::with_endpoints(PRODUCTION_GATEWAY, PRODUCTION_AUTHORIZE)
	}

	/// Descriptor for the sandbox environment.
	pub fn sandbox() -> Result<Self, GatewayDescriptorError> {
		Self::with_endpoints(SANDBOX_GATEWAY, SANDBOX_AUTHORIZE)
	}

	fn with_endpoints(gateway: &str, authorize: &str) -> Result<Self, GatewayDescriptorError> {
		let parse = |endpoint: &'static str, raw: &str| {
			Url::parse(raw).map_err(|source| GatewayDescriptorError::InvalidUrl { endpoint, source })
		};

		Self::builder()
			.gateway_endpoint(parse("gateway", gateway)?)
			.authorize_endpoint(parse("authorize", authorize)?)
			.build()
	}
}
