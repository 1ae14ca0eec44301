//! Validated application identifier issued by the open platform.

// std
use std::{borrow::Borrow, ops::Deref, str::FromStr};
// self
use crate::_prelude::*;

const APP_ID_MAX_LEN: usize = 64;

/// Error returned when app identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum AppIdError {
	/// The identifier was empty.
	#[error("App identifier cannot be empty.")]
	Empty,
	/// The identifier contains characters other than ASCII letters and digits.
	#[error("App identifier must be ASCII alphanumeric.")]
	InvalidCharacter,
	/// The identifier exceeded the allowed character count.
	#[error("App identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Registered application identifier, sent as `app_id` on every gateway call.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppId(String);
impl AppId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, AppIdError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for AppId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for AppId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for AppId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<AppId> for String {
	fn from(value: AppId) -> Self {
		value.0
	}
}
impl TryFrom<String> for AppId {
	type Error = AppIdError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for AppId {
	type Err = AppIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for AppId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "AppId({})", self.0)
	}
}
impl Display for AppId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_view(view: &str) -> Result<(), AppIdError> {
	if view.is_empty() {
		return Err(AppIdError::Empty);
	}
	if !view.chars().all(|c| c.is_ascii_alphanumeric()) {
		return Err(AppIdError::InvalidCharacter);
	}
	if view.len() > APP_ID_MAX_LEN {
		return Err(AppIdError::TooLong { max: APP_ID_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn app_ids_validate() {
		assert_eq!(AppId::new(""), Err(AppIdError::Empty));
		assert_eq!(AppId::new(" 2021000000000000"), Err(AppIdError::InvalidCharacter));
		assert_eq!(AppId::new("2021-0000"), Err(AppIdError::InvalidCharacter));

		let app_id = AppId::new("2021000000000000").expect("App id fixture should be valid.");

		assert_eq!(app_id.as_ref(), "2021000000000000");
		assert_eq!(format!("{app_id:?}"), "AppId(2021000000000000)");
	}

	#[test]
	fn serde_enforces_validation_and_length() {
		let app_id: AppId = serde_json::from_str("\"2021000000000000\"")
			.expect("App id should deserialize successfully.");

		assert_eq!(&*app_id, "2021000000000000");
		assert!(serde_json::from_str::<AppId>("\"with space\"").is_err());

		AppId::new("1".repeat(APP_ID_MAX_LEN)).expect("Exact length should succeed.");

		assert_eq!(
			AppId::new("1".repeat(APP_ID_MAX_LEN + 1)),
			Err(AppIdError::TooLong { max: APP_ID_MAX_LEN })
		);
	}
}
