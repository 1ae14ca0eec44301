//! Helpers shared by the reqwest-backed integration tests.

// crates.io
use httpmock::MockServer;
// self
use alipay_oauth::{
	auth::{AppId, Credentials},
	flows::ReqwestAlipayProvider,
	gateway::ReqwestTransportErrorMapper,
	http::ReqwestHttpClient,
	provider::GatewayDescriptor,
	reqwest::Client,
	url::Url,
};

pub const APP_ID: &str = "2021000000000000";
pub const PRIVATE_PEM: &str = include_str!("../fixtures/rsa_private_key.pem");
pub const PUBLIC_PEM: &str = include_str!("../fixtures/rsa_public_key.pem");

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Descriptor whose gateway and authorize endpoints live on the mock server.
pub fn mock_descriptor(server: &MockServer) -> GatewayDescriptor {
	descriptor_at(&server.url("/gateway.do"), &server.url("/oauth2/publicAppAuthorize.htm"))
}

pub fn descriptor_at(gateway: &str, authorize: &str) -> GatewayDescriptor {
	GatewayDescriptor::builder()
		.gateway_endpoint(Url::parse(gateway).expect("Mock gateway endpoint should parse."))
		.authorize_endpoint(Url::parse(authorize).expect("Mock authorize endpoint should parse."))
		.build()
		.expect("Gateway descriptor should build successfully.")
}

pub fn credentials() -> Credentials {
	Credentials::new(AppId::new(APP_ID).expect("App id fixture should be valid."), PRIVATE_PEM)
}

pub fn build_reqwest_test_provider(
	descriptor: GatewayDescriptor,
	credentials: Credentials,
) -> ReqwestAlipayProvider {
	ReqwestAlipayProvider::with_http_client(
		descriptor,
		credentials,
		test_reqwest_http_client(),
		ReqwestTransportErrorMapper,
	)
}
