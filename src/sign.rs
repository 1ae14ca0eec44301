//! Request signing: canonical parameter sets, key normalization, and RSA2 signatures.
//!
//! A gateway request is signed by sorting its parameters by key (byte-wise), serializing
//! them as a form-encoded query string (`+` for spaces, no trailing separator), and
//! signing that string with RSA-SHA256 (PKCS#1 v1.5). The signature travels base64-encoded
//! under the `sign` parameter.

pub mod key;
pub mod params;
pub mod signer;

pub use key::*;
pub use params::*;
pub use signer::*;

// self
use crate::_prelude::*;

/// Signs the canonical serialization of `params` with the raw private key text.
pub fn sign(params: &ParameterSet, private_key: &str) -> Result<String> {
	let signer = RsaSigner::from_key_text(private_key)?;

	Ok(signer.sign(&params.to_query_string())?)
}
