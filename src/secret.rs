//! Signing secret wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Redacted signing secret keeping key material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Vec<u8>);
impl Secret {
	/// Wraps a new secret.
	pub fn new(value: impl Into<Vec<u8>>) -> Self {
		Self(value.into())
	}

	/// Returns the raw key bytes. Callers must avoid logging them.
	pub fn expose(&self) -> &[u8] {
		&self.0
	}
}
impl AsRef<[u8]> for Secret {
	fn as_ref(&self) -> &[u8] {
		self.expose()
	}
}
impl From<&str> for Secret {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for Secret {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}
impl From<&[u8]> for Secret {
	fn from(value: &[u8]) -> Self {
		Self::new(value)
	}
}
impl From<Vec<u8>> for Secret {
	fn from(value: Vec<u8>) -> Self {
		Self(value)
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
