//! Optional observability helpers for token issuance and verification.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `csrf_signature.op` with the `op` field and
//!   `debug` events describing why a token was rejected.
//! - Enable `metrics` to increment the `csrf_signature_op_total` counter for every issuance and
//!   verification, labeled by `op` + `outcome`, and to record the age of every decoded token in
//!   the `csrf_signature_token_age_seconds` histogram, labeled by `outcome`.
//!
//! Rejection reasons only ever reach logs and metrics; callers of
//! [`SignatureEngine::verify`](crate::signer::SignatureEngine::verify) always see a plain `false`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Engine operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Token issuance.
	Issue,
	/// Token verification.
	Verify,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::Issue => "issue",
			OpKind::Verify => "verify",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Token issued or accepted.
	Success,
	/// Token payload was structurally invalid.
	Malformed,
	/// Token was issued before the validity window floor.
	Expired,
	/// Recomputed signature differs from the presented one.
	Mismatch,
	/// Crypto provider or encoder failed.
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Success => "success",
			OpOutcome::Malformed => "malformed",
			OpOutcome::Expired => "expired",
			OpOutcome::Mismatch => "mismatch",
			OpOutcome::Failure => "failure",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
