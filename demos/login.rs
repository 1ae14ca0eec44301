//! Completes an Alipay login from the command line.
//!
//! Run without arguments to print an authorize URL, then run again with the `auth_code`
//! from the redirect to exchange it and print the mapped profile.
//!
//! ```sh
//! ALIPAY_APP_ID=2021000000000000 ALIPAY_PRIVATE_KEY_PATH=app_private_key.pem \
//!     cargo run --example login -- <auth_code>
//! ```

// std
use std::{env, fs};
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use alipay_oauth::{
	auth::{AppId, Credentials},
	flows::ReqwestAlipayProvider,
	provider::{AuthScope, GatewayDescriptor},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let app_id = AppId::new(env::var("ALIPAY_APP_ID")?)?;
	let private_key = fs::read_to_string(env::var("ALIPAY_PRIVATE_KEY_PATH")?)?;
	let mut credentials = Credentials::new(app_id, private_key);

	if let Ok(path) = env::var("ALIPAY_PUBLIC_KEY_PATH") {
		credentials = credentials.with_platform_public_key(fs::read_to_string(path)?);
	}

	let descriptor = match env::var("ALIPAY_SANDBOX") {
		Ok(_) => GatewayDescriptor::sandbox()?,
		Err(_) => GatewayDescriptor::production()?,
	};
	let provider = ReqwestAlipayProvider::new(descriptor, credentials);
	let Some(code) = env::args().nth(1) else {
		let redirect_uri = env::var("ALIPAY_REDIRECT_URI")
			.map_err(|_| eyre!("Set ALIPAY_REDIRECT_URI to print an authorize URL."))?;
		let session = provider.start_authorization(&redirect_uri, AuthScope::AuthUser)?;

		println!("Send your user to {}.", session.authorize_url);
		println!("Keep state `{}` to validate the redirect.", session.state);

		return Ok(());
	};
	let outcome = provider.user(&code).await?;

	println!("Token expires in {:?}.", outcome.token.expires_in);
	println!("{:#?}", outcome.profile);

	Ok(())
}
