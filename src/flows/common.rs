//! Shared dispatch for signed gateway calls.

// self
use crate::{
	_prelude::*,
	flows::AlipayProvider,
	gateway::{self, Envelope, TransportErrorMapper},
	http::GatewayHttpClient,
	provider::GatewayMethod,
	sign::ParameterSet,
};

impl<C, M> AlipayProvider<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Gateway endpoint with `params` appended as the query string.
	pub(crate) fn request_url(&self, params: &ParameterSet) -> Url {
		let mut url = self.descriptor.endpoints.gateway.clone();

		params.apply_to(&mut url);

		url
	}

	/// Performs the single round-trip for `method` and splits the response envelope.
	///
	/// When a platform public key is configured the envelope must verify before any of it
	/// is interpreted.
	pub(crate) async fn dispatch(
		&self,
		method: GatewayMethod,
		params: &ParameterSet,
		accept_json: bool,
	) -> Result<Envelope> {
		let verifier = self.verifier()?;
		let url = self.request_url(params);
		let response = gateway::get(
			self.http_client.as_ref(),
			self.transport_mapper.as_ref(),
			method,
			&url,
			accept_json,
		)
		.await?;
		let envelope = Envelope::parse(method, response);

		if let Some(verifier) = verifier {
			envelope.verify(&verifier)?;
		}

		Ok(envelope)
	}
}
