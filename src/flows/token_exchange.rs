//! Authorization-code exchange via `alipay.system.oauth.token`.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::AlipayProvider,
	gateway::{Envelope, TransportErrorMapper},
	http::GatewayHttpClient,
	obs::{self, CallOutcome, CallSpan},
	provider::GatewayMethod,
};

impl<C, M> AlipayProvider<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges an authorization code for an access token.
	///
	/// Performs one signed `GET` against the gateway with `Accept: application/json`. Any
	/// response without a non-null `access_token` inside the token envelope fails with a
	/// [`RemoteAuthError`](crate::error::RemoteAuthError) carrying the raw body.
	pub async fn get_access_token(&self, code: &str) -> Result<AccessToken> {
		const METHOD: GatewayMethod = GatewayMethod::SystemOauthToken;

		let span = CallSpan::new(METHOD, "get_access_token");

		obs::record_call_outcome(METHOD, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let params = self.token_fields(code)?;
				let envelope = self.dispatch(METHOD, &params, true).await?;

				token_from(envelope)
			})
			.await;

		if let Err(err) = &result {
			span.record_failure(err);
		}

		obs::record_call_outcome(METHOD, CallOutcome::of(&result));

		result
	}
}

fn token_from(envelope: Envelope) -> Result<AccessToken> {
	let issued = envelope
		.payload
		.as_ref()
		.and_then(|payload| payload.get("access_token"))
		.is_some_and(|token| !token.is_null());
	let failure = envelope.failure();

	if !issued {
		return Err(failure.into());
	}

	let payload = envelope.into_payload()?;

	AccessToken::from_fields(payload).map_err(|_| failure.into())
}
