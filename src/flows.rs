//! Gateway flows powered by [`AlipayProvider`].

pub mod authorize;

mod common;
mod fields;
mod token_exchange;
mod user_info;

pub use authorize::*;
pub use user_info::LoginOutcome;

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	gateway::TransportErrorMapper,
	http::GatewayHttpClient,
	provider::GatewayDescriptor,
	sign::{RsaSigner, RsaVerifier},
};
#[cfg(feature = "reqwest")]
use crate::{gateway::ReqwestTransportErrorMapper, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Provider specialized for the crate's default reqwest transport stack.
pub type ReqwestAlipayProvider = AlipayProvider<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Signs, sends, and interprets gateway calls for one registered application.
///
/// The provider holds no per-call state: each operation builds a fresh parameter set,
/// loads the key it needs, signs, performs at most one round-trip, and returns. Concurrent
/// use is safe whenever the transport is.
#[derive(Clone)]
pub struct AlipayProvider<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every gateway call.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Endpoints and fixed platform fields.
	pub descriptor: GatewayDescriptor,
	credentials: Credentials,
}
impl<C, M> AlipayProvider<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a provider that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: GatewayDescriptor,
		credentials: Credentials,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			descriptor,
			credentials,
		}
	}

	/// App identifier and key material the provider signs with.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	pub(crate) fn signer(&self) -> Result<RsaSigner> {
		Ok(RsaSigner::from_key_text(self.credentials.private_key.expose())?)
	}

	/// Returns the platform verifier, or `None` when no platform public key is configured.
	pub(crate) fn verifier(&self) -> Result<Option<RsaVerifier>> {
		self.credentials
			.platform_public_key
			.as_ref()
			.map(|key| RsaVerifier::from_key_text(key.expose()))
			.transpose()
			.map_err(Error::from)
	}
}
#[cfg(feature = "reqwest")]
impl AlipayProvider<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a provider backed by a default reqwest transport.
	pub fn new(descriptor: GatewayDescriptor, credentials: Credentials) -> Self {
		Self::with_http_client(
			descriptor,
			credentials,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Debug for AlipayProvider<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AlipayProvider")
			.field("descriptor", &self.descriptor)
			.field("credentials", &self.credentials)
			.finish()
	}
}

#[cfg(test)]
pub(crate) mod fake;
