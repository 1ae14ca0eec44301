//! RSA-SHA256 (PKCS#1 v1.5) signing and verification with base64 transport encoding.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rsa::{
	pkcs1v15::{Signature, SigningKey, VerifyingKey},
	signature::{SignatureEncoding, Signer, Verifier},
};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	error::{KeyError, SignError},
	sign::key,
};

/// Signs content with the application private key.
pub struct RsaSigner(SigningKey<Sha256>);
impl RsaSigner {
	/// Normalizes and loads the private key text supplied by the caller.
	pub fn from_key_text(raw: &str) -> Result<Self, KeyError> {
		Ok(Self(SigningKey::new(key::load_private_key(raw)?)))
	}

	/// Signs `content` and returns the base64-encoded signature.
	///
	/// PKCS#1 v1.5 signatures are deterministic, so equal content yields equal output.
	pub fn sign(&self, content: &str) -> Result<String, SignError> {
		let signature: Signature =
			self.0.try_sign(content.as_bytes()).map_err(|source| SignError::Sign { source })?;

		Ok(STANDARD.encode(signature.to_bytes()))
	}
}
impl Debug for RsaSigner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RsaSigner(..)")
	}
}

/// Verifies platform signatures with the platform public key.
pub struct RsaVerifier(VerifyingKey<Sha256>);
impl RsaVerifier {
	/// Normalizes and loads the public key text supplied by the caller.
	pub fn from_key_text(raw: &str) -> Result<Self, KeyError> {
		Ok(Self(VerifyingKey::new(key::load_public_key(raw)?)))
	}

	/// Checks a base64-encoded signature over `content`.
	pub fn verify(&self, content: &str, signature: &str) -> Result<(), SignError> {
		let raw = STANDARD.decode(signature.trim()).map_err(|source| SignError::Decode { source })?;
		let signature = Signature::try_from(raw.as_slice())
			.map_err(|source| SignError::Mismatch { source })?;

		self.0
			.verify(content.as_bytes(), &signature)
			.map_err(|source| SignError::Mismatch { source })
	}
}
impl Debug for RsaVerifier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RsaVerifier(..)")
	}
}
