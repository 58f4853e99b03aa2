//! Engine-level error types shared across configuration, signing, and crypto providers.

// self
use crate::{_prelude::*, crypto::CryptoError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
///
/// [`SignatureEngine::verify`](crate::signer::SignatureEngine::verify) never surfaces these;
/// every verification failure collapses into `false`.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Validity window input could not be resolved into an epoch.
	#[error(transparent)]
	InvalidConfiguration(#[from] ConfigError),
	/// Signing was asked to use a timestamp that is not numeric.
	#[error("Timestamp `{value}` must be an integer.")]
	InvalidInput {
		/// Offending timestamp text.
		value: String,
	},
	/// Transmitted token does not follow the wire format.
	#[error("Token is malformed: {reason}.")]
	MalformedToken {
		/// Structural defect that was detected.
		reason: &'static str,
	},
	/// Random source or keyed hash failed.
	#[error(transparent)]
	Crypto(#[from] CryptoError),
	/// Canonical signing record could not be encoded.
	#[error("Signing record could not be serialized.")]
	Encode(#[from] serde_json::Error),
}

/// Configuration failures raised while resolving a validity window.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// Relative expression is empty or made of whitespace.
	#[error("Validity window expression cannot be empty.")]
	EmptyExpression,
	/// Relative expression does not follow the supported grammar.
	#[error("Validity window expression `{expression}` cannot be parsed.")]
	UnparseableExpression {
		/// Expression supplied by the caller.
		expression: String,
	},
	/// Relative expression names a unit outside the supported set.
	#[error("Validity window unit `{unit}` is not supported.")]
	UnsupportedUnit {
		/// Unit token supplied by the caller.
		unit: String,
	},
	/// Resolved window does not fit into the epoch range.
	#[error("Validity window is outside the supported time range.")]
	OutOfRange,
}
