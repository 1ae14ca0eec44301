//! Authorize-page URLs and the `state` round-trip.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	flows::AlipayProvider,
	gateway::TransportErrorMapper,
	http::GatewayHttpClient,
	provider::AuthScope,
};

const STATE_LEN: usize = 32;

/// Authorize-page handshake returned by [`AlipayProvider::start_authorization`].
#[derive(Clone, Debug)]
pub struct AuthorizationSession {
	/// Requested scope.
	pub scope: AuthScope,
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Redirect URI registered for the application.
	pub redirect_uri: Url,
	/// Fully-formed authorize URL that callers should send end-users to.
	pub authorize_url: Url,
}
impl AuthorizationSession {
	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state {
			Ok(())
		} else {
			Err(ConfigError::StateMismatch.into())
		}
	}
}

impl<C, M> AlipayProvider<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the authorize URL the end-user visits to obtain an authorization code.
	pub fn start_authorization(
		&self,
		redirect_uri: &str,
		scope: AuthScope,
	) -> Result<AuthorizationSession> {
		let redirect_uri =
			Url::parse(redirect_uri).map_err(|source| ConfigError::InvalidRedirect { source })?;
		let state = random_state();
		let mut authorize_url = self.descriptor.endpoints.authorize.clone();

		authorize_url
			.query_pairs_mut()
			.append_pair("app_id", &self.credentials.app_id)
			.append_pair("scope", scope.as_str())
			.append_pair("redirect_uri", redirect_uri.as_str())
			.append_pair("state", &state);

		Ok(AuthorizationSession { scope, state, redirect_uri, authorize_url })
	}
}

fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}
