// self
use crate::{
	_prelude::*,
	obs::{OpKind, OpOutcome},
};

/// A span builder used by engine operations.
#[derive(Clone, Debug)]
pub struct OpSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OpSpan {
	/// Creates a new span tagged with the provided operation kind.
	pub fn new(kind: OpKind) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("csrf_signature.op", op = kind.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = kind;

			Self {}
		}
	}

	/// Enters the span for the remainder of the operation.
	pub fn entered(self) -> OpSpanGuard {
		#[cfg(feature = "tracing")]
		{
			OpSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			OpSpanGuard {}
		}
	}
}

/// RAII guard returned by [`OpSpan::entered`].
pub struct OpSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for OpSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("OpSpanGuard(..)")
	}
}

/// Logs a verification rejection at `debug` level (when enabled).
pub fn log_rejection(outcome: OpOutcome, detail: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(outcome = outcome.as_str(), %detail, "token rejected");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (outcome, detail);
	}
}
