//! Ordered parameter sets and their canonical query serialization.

// std
use std::borrow::Cow;
// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
// self
use crate::_prelude::*;

// Legacy form encoding leaves only ASCII alphanumerics and `-`, `.`, `_` as-is; `*` and `~`
// are escaped and spaces become `+`.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// A single parameter value.
///
/// Values follow legacy form-encoding rules when serialized: `Null` entries are skipped,
/// booleans render as `1`/`0`, and integers in decimal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
	/// Text value.
	Text(String),
	/// Integer value.
	Integer(i64),
	/// Boolean value.
	Bool(bool),
	/// Explicitly absent value.
	Null,
}
impl ParamValue {
	/// Returns `true` for empty text, `Null`, and `false`.
	///
	/// `Integer(0)` and `Text("0")` are not falsy.
	pub fn is_falsy(&self) -> bool {
		match self {
			Self::Text(text) => text.is_empty(),
			Self::Null | Self::Bool(false) => true,
			Self::Integer(_) | Self::Bool(true) => false,
		}
	}

	/// Renders the value as it appears in a query string, or `None` for `Null`.
	pub fn as_query_value(&self) -> Option<Cow<'_, str>> {
		match self {
			Self::Text(text) => Some(Cow::Borrowed(text)),
			Self::Integer(n) => Some(Cow::Owned(n.to_string())),
			Self::Bool(true) => Some(Cow::Borrowed("1")),
			Self::Bool(false) => Some(Cow::Borrowed("0")),
			Self::Null => None,
		}
	}
}
impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}
impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl<T> From<Option<T>> for ParamValue
where
	T: Into<ParamValue>,
{
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

/// Parameter mapping kept sorted by key in byte-wise order.
///
/// The ordering is part of the signature contract: iteration, serialization, and the
/// query attached to the outgoing URL all follow it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet(BTreeMap<String, ParamValue>);
impl ParameterSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces a parameter, returning the previous value.
	pub fn insert(
		&mut self,
		key: impl Into<String>,
		value: impl Into<ParamValue>,
	) -> Option<ParamValue> {
		self.0.insert(key.into(), value.into())
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.insert(key, value);

		self
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.0.get(key)
	}

	/// Returns the text stored under `key`, if it holds text.
	pub fn get_text(&self, key: &str) -> Option<&str> {
		match self.0.get(key)? {
			ParamValue::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Removes and returns the value stored under `key`.
	pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
		self.0.remove(key)
	}

	/// Returns `true` when `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when the set holds no parameters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates parameters in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Iterates the `(key, value)` pairs that end up on the wire, in key order.
	pub fn query_pairs(&self) -> impl Iterator<Item = (&str, Cow<'_, str>)> {
		self.0.iter().filter_map(|(key, value)| Some((key.as_str(), value.as_query_value()?)))
	}

	/// Drops every falsy value (see [`ParamValue::is_falsy`]).
	pub fn without_falsy(mut self) -> Self {
		self.0.retain(|_, value| !value.is_falsy());

		self
	}

	/// Serializes the set as `k1=v1&k2=v2` with legacy form encoding (space as `+`, `*` as
	/// `%2A`).
	pub fn to_query_string(&self) -> String {
		self.query_pairs()
			.map(|(key, value)| format!("{}={}", form_encode(key), form_encode(&value)))
			.collect::<Vec<_>>()
			.join("&")
	}

	/// Appends the wire pairs, encoded exactly as signed, to the query of `url`.
	pub fn apply_to(&self, url: &mut Url) {
		let encoded = self.to_query_string();

		if encoded.is_empty() {
			return;
		}

		let query = match url.query() {
			Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
			_ => encoded,
		};

		url.set_query(Some(&query));
	}
}
fn form_encode(raw: &str) -> String {
	// `%` itself is escaped, so `%20` in the output can only come from a space.
	utf8_percent_encode(raw, FORM_ENCODE_SET).to_string().replace("%20", "+")
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}
