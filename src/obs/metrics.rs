// self
use crate::obs::{OpKind, OpOutcome};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_op_outcome(kind: OpKind, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"csrf_signature_op_total",
			"op" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records how old a presented token was when it was verified (when enabled).
///
/// Only tokens that decode reach this point. Future-dated tokens are recorded with age zero.
pub fn record_token_age(outcome: OpOutcome, age_seconds: i64) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!("csrf_signature_token_age_seconds", "outcome" => outcome.as_str())
			.record(age_seconds.max(0) as f64);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (outcome, age_seconds);
	}
}
