//! Profile lookup via `alipay.user.info.share` and the combined login call.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, RawProfile, UserProfile},
	flows::AlipayProvider,
	gateway::{Envelope, TransportErrorMapper},
	http::GatewayHttpClient,
	obs::{self, CallOutcome, CallSpan},
	provider::{GatewayMethod, SUCCESS_CODE},
};

/// Token and profile produced by [`AlipayProvider::user`].
#[derive(Clone, Debug)]
pub struct LoginOutcome {
	/// Access token issued for the authorization code.
	pub token: AccessToken,
	/// Profile mapped from the user-info envelope.
	pub profile: UserProfile,
}

impl<C, M> AlipayProvider<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the raw profile for `token`.
	///
	/// Succeeds only when the user-info envelope reports code `10000`; `code` and `msg` are
	/// stripped from the returned fields. Any other response fails with a
	/// [`RemoteAuthError`](crate::error::RemoteAuthError) carrying the raw body.
	pub async fn get_user_by_token(&self, token: &AccessToken) -> Result<RawProfile> {
		const METHOD: GatewayMethod = GatewayMethod::UserInfoShare;

		let span = CallSpan::new(METHOD, "get_user_by_token");

		obs::record_call_outcome(METHOD, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let params = self.user_info_fields(token)?;
				let envelope = self.dispatch(METHOD, &params, false).await?;

				profile_from(envelope)
			})
			.await;

		if let Err(err) = &result {
			span.record_failure(err);
		}

		obs::record_call_outcome(METHOD, CallOutcome::of(&result));

		result
	}

	/// Maps raw profile fields onto the provider-neutral [`UserProfile`].
	pub fn map_user_to_object(&self, raw: RawProfile) -> UserProfile {
		UserProfile::from_raw(raw)
	}

	/// Runs the whole login: code exchange, profile lookup, and mapping.
	pub async fn user(&self, code: &str) -> Result<LoginOutcome> {
		let token = self.get_access_token(code).await?;
		let raw = self.get_user_by_token(&token).await?;

		Ok(LoginOutcome { profile: self.map_user_to_object(raw), token })
	}
}

fn profile_from(envelope: Envelope) -> Result<RawProfile> {
	let succeeded = envelope
		.payload
		.as_ref()
		.and_then(|payload| payload.get("code"))
		.is_some_and(is_success_code);

	if !succeeded {
		return Err(envelope.failure().into());
	}

	let mut profile = envelope.into_payload()?;

	profile.remove("code");
	profile.remove("msg");

	Ok(profile)
}

// The gateway sends `code` as a string; a bare number is accepted as the same value.
fn is_success_code(code: &JsonValue) -> bool {
	match code {
		JsonValue::String(text) => text == SUCCESS_CODE,
		JsonValue::Number(n) => n.to_string() == SUCCESS_CODE,
		_ => false,
	}
}
