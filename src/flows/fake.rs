//! In-process gateway double for flow unit tests.

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
use parking_lot::Mutex;
// self
use crate::{
	_prelude::*,
	auth::{AppId, Credentials},
	error::TransportError,
	flows::AlipayProvider,
	gateway::TransportErrorMapper,
	http::GatewayHttpClient,
	provider::{GatewayDescriptor, GatewayMethod},
};

pub(crate) const PRIVATE_PEM: &str = include_str!("../../tests/fixtures/rsa_private_key.pem");
pub(crate) const PUBLIC_PEM: &str = include_str!("../../tests/fixtures/rsa_public_key.pem");
pub(crate) const APP_ID: &str = "2021000000000000";

#[derive(Debug)]
pub(crate) struct FakeTransportError;
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Connection refused.")
	}
}
impl StdError for FakeTransportError {}

/// Serves one canned response (or a transport failure) and records request URIs.
#[derive(Clone, Default)]
pub(crate) struct FakeGateway {
	status: u16,
	body: String,
	refuse: bool,
	requests: Arc<Mutex<Vec<(String, Option<String>)>>>,
}
impl FakeGateway {
	pub(crate) fn responding(body: &str) -> Self {
		Self { status: 200, body: body.into(), ..Default::default() }
	}

	pub(crate) fn refusing() -> Self {
		Self { refuse: true, ..Default::default() }
	}

	/// Returns `(uri, accept header)` for each request seen so far.
	pub(crate) fn requests(&self) -> Vec<(String, Option<String>)> {
		self.requests.lock().clone()
	}
}
impl GatewayHttpClient for FakeGateway {
	type Handle = FakeGateway;
	type TransportError = FakeTransportError;

	fn handle(&self) -> Self::Handle {
		self.clone()
	}
}
impl<'c> AsyncHttpClient<'c> for FakeGateway {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let accept = request
			.headers()
			.get("accept")
			.and_then(|value| value.to_str().ok())
			.map(str::to_owned);

		self.requests.lock().push((request.uri().to_string(), accept));

		Box::pin(async move {
			if self.refuse {
				return Err(HttpClientError::Reqwest(Box::new(FakeTransportError)));
			}

			let mut response = HttpResponse::new(self.body.clone().into_bytes());

			*response.status_mut() = oauth2::http::StatusCode::from_u16(self.status)
				.expect("Fake status should be a valid HTTP status.");

			Ok(response)
		})
	}
}

#[derive(Default)]
pub(crate) struct FakeMapper;
impl TransportErrorMapper<FakeTransportError> for FakeMapper {
	fn map_transport_error(
		&self,
		_method: GatewayMethod,
		err: HttpClientError<FakeTransportError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
			other => TransportError::Other { message: other.to_string() }.into(),
		}
	}
}

pub(crate) type FakeProvider = AlipayProvider<FakeGateway, FakeMapper>;

pub(crate) fn credentials() -> Credentials {
	Credentials::new(AppId::new(APP_ID).expect("App id fixture should be valid."), PRIVATE_PEM)
}

pub(crate) fn provider(gateway: FakeGateway) -> FakeProvider {
	provider_with(gateway, credentials())
}

pub(crate) fn provider_with(gateway: FakeGateway, credentials: Credentials) -> FakeProvider {
	let descriptor =
		GatewayDescriptor::production().expect("Production descriptor should build.");

	AlipayProvider::with_http_client(descriptor, credentials, gateway, FakeMapper)
}
