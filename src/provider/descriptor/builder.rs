// self
use crate::{
	_prelude::*,
	provider::{GatewayDescriptor, GatewayEndpoints, PlatformFields},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum GatewayDescriptorError {
	/// Gateway endpoint is mandatory.
	#[error("Missing gateway endpoint.")]
	MissingGatewayEndpoint,
	/// Authorize endpoint is mandatory.
	#[error("Missing authorize endpoint.")]
	MissingAuthorizeEndpoint,
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// An endpoint string could not be parsed.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A fixed platform field is blank.
	#[error("Platform field `{field}` must not be empty.")]
	EmptyField {
		/// Name of the blank field.
		field: &'static str,
	},
}

/// Builder for [`GatewayDescriptor`] values.
#[derive(Debug, Default)]
pub struct GatewayDescriptorBuilder {
	/// Gateway endpoint used for signed calls.
	pub gateway_endpoint: Option<Url>,
	/// Authorize page endpoint.
	pub authorize_endpoint: Option<Url>,
	/// Fixed platform fields.
	pub fields: PlatformFields,
}
impl GatewayDescriptorBuilder {
	/// Creates a builder seeded with the platform's default fields.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the gateway endpoint.
	pub fn gateway_endpoint(mut self, url: Url) -> Self {
		self.gateway_endpoint = Some(url);

		self
	}

	/// Sets the authorize endpoint.
	pub fn authorize_endpoint(mut self, url: Url) -> Self {
		self.authorize_endpoint = Some(url);

		self
	}

	/// Overrides the protocol version (`version`).
	pub fn version(mut self, version: impl Into<String>) -> Self {
		self.fields.version = version.into();

		self
	}

	/// Overrides the request charset (`charset`).
	pub fn charset(mut self, charset: impl Into<String>) -> Self {
		self.fields.charset = charset.into();

		self
	}

	/// Overrides the zone used to render timestamps.
	pub fn timestamp_offset(mut self, offset: UtcOffset) -> Self {
		self.fields.timestamp_offset = offset;

		self
	}

	/// Overrides every platform field at once.
	pub fn fields(mut self, fields: PlatformFields) -> Self {
		self.fields = fields;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<GatewayDescriptor, GatewayDescriptorError> {
		let gateway =
			self.gateway_endpoint.ok_or(GatewayDescriptorError::MissingGatewayEndpoint)?;
		let authorize =
			self.authorize_endpoint.ok_or(GatewayDescriptorError::MissingAuthorizeEndpoint)?;
		let descriptor =
			GatewayDescriptor { endpoints: GatewayEndpoints { gateway, authorize }, fields: self.fields };

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl GatewayDescriptor {
	/// Validates invariants for the descriptor.
	pub fn validate(&self) -> Result<(), GatewayDescriptorError> {
		validate_endpoint("gateway", &self.endpoints.gateway)?;
		validate_endpoint("authorize", &self.endpoints.authorize)?;
		validate_field("format", &self.fields.format)?;
		validate_field("charset", &self.fields.charset)?;
		validate_field("version", &self.fields.version)?;

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), GatewayDescriptorError> {
	if url.scheme() != "https" {
		Err(GatewayDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}

fn validate_field(name: &'static str, value: &str) -> Result<(), GatewayDescriptorError> {
	if value.trim().is_empty() {
		Err(GatewayDescriptorError::EmptyField { field: name })
	} else {
		Ok(())
	}
}
