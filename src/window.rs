//! Validity window inputs and their resolution into an absolute epoch floor.
//!
//! A window is the earliest issuance instant a verifier still accepts. Callers describe it as
//! an absolute epoch, a relative expression such as `"-1 hour"` or `"30 minutes ago"`, or a
//! concrete point in time; the engine stores the resolved epoch only.

// crates.io
use time::{Time, format_description::well_known::Rfc3339};
// self
use crate::{_prelude::*, error::ConfigError};

/// Validity window description accepted by
/// [`SignatureEngine::set_validity_window`](crate::signer::SignatureEngine::set_validity_window).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WindowRepr", into = "WindowRepr")]
pub enum ValidityWindow {
	/// Absolute epoch seconds.
	Epoch(i64),
	/// Relative expression evaluated against the current time.
	Relative(String),
	/// Explicit point in time.
	At(OffsetDateTime),
}
impl ValidityWindow {
	/// Expression used when no window is configured.
	pub const DEFAULT_EXPRESSION: &'static str = "-1 hour";

	/// Resolves the window against `now`, returning epoch seconds.
	pub fn resolve(&self, now: OffsetDateTime) -> Result<i64, ConfigError> {
		match self {
			ValidityWindow::Epoch(epoch) => Ok(*epoch),
			ValidityWindow::Relative(expression) => parse_expression(expression, now),
			ValidityWindow::At(at) => Ok(at.unix_timestamp()),
		}
	}
}
impl Default for ValidityWindow {
	fn default() -> Self {
		Self::Relative(Self::DEFAULT_EXPRESSION.into())
	}
}
impl From<i64> for ValidityWindow {
	fn from(value: i64) -> Self {
		Self::Epoch(value)
	}
}
impl From<&str> for ValidityWindow {
	fn from(value: &str) -> Self {
		Self::Relative(value.to_owned())
	}
}
impl From<String> for ValidityWindow {
	fn from(value: String) -> Self {
		Self::Relative(value)
	}
}
impl From<OffsetDateTime> for ValidityWindow {
	fn from(value: OffsetDateTime) -> Self {
		Self::At(value)
	}
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WindowRepr {
	Epoch(i64),
	Relative(String),
	At {
		#[serde(with = "time::serde::rfc3339")]
		at: OffsetDateTime,
	},
}
impl From<WindowRepr> for ValidityWindow {
	fn from(value: WindowRepr) -> Self {
		match value {
			WindowRepr::Epoch(epoch) => Self::Epoch(epoch),
			WindowRepr::Relative(expression) => Self::Relative(expression),
			WindowRepr::At { at } => Self::At(at),
		}
	}
}
impl From<ValidityWindow> for WindowRepr {
	fn from(value: ValidityWindow) -> Self {
		match value {
			ValidityWindow::Epoch(epoch) => Self::Epoch(epoch),
			ValidityWindow::Relative(expression) => Self::Relative(expression),
			ValidityWindow::At(at) => Self::At { at },
		}
	}
}

fn parse_expression(expression: &str, now: OffsetDateTime) -> Result<i64, ConfigError> {
	let trimmed = expression.trim();

	if trimmed.is_empty() {
		return Err(ConfigError::EmptyExpression);
	}
	if let Some(epoch) = trimmed.strip_prefix('@') {
		return epoch.parse::<i64>().map_err(|_| unparseable(expression));
	}
	if let Ok(at) = OffsetDateTime::parse(trimmed, &Rfc3339) {
		return Ok(at.unix_timestamp());
	}

	let lowered = trimmed.to_ascii_lowercase();
	let mut tokens = lowered.split_whitespace().peekable();
	let mut base = now;
	let mut offset = Duration::ZERO;
	let mut negate = false;

	while let Some(token) = tokens.next() {
		match token {
			"now" => {},
			"today" | "midnight" => base = base.replace_time(Time::MIDNIGHT),
			"yesterday" => base = shift(base.replace_time(Time::MIDNIGHT), -Duration::DAY)?,
			"tomorrow" => base = shift(base.replace_time(Time::MIDNIGHT), Duration::DAY)?,
			"ago" if tokens.peek().is_none() => negate = true,
			_ => {
				let (amount, unit) = split_term(token).ok_or_else(|| unparseable(expression))?;
				let unit = match unit {
					"" => tokens.next().ok_or_else(|| unparseable(expression))?,
					unit => unit,
				};
				let step = unit_duration(unit)?;
				let term = step.checked_mul(amount).ok_or(ConfigError::OutOfRange)?;

				offset = offset.checked_add(term).ok_or(ConfigError::OutOfRange)?;
			},
		}
	}

	if negate {
		offset = -offset;
	}

	Ok(shift(base, offset)?.unix_timestamp())
}

// Splits `-1`, `+2hours`, or `3` into the signed amount and any attached unit.
fn split_term(token: &str) -> Option<(i32, &str)> {
	let digits_end = token
		.char_indices()
		.find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '+' || c == '-'))))
		.map_or(token.len(), |(i, _)| i);
	let (amount, unit) = token.split_at(digits_end);

	if !amount.bytes().any(|b| b.is_ascii_digit()) {
		return None;
	}

	amount.parse().ok().map(|amount| (amount, unit))
}

fn unit_duration(unit: &str) -> Result<Duration, ConfigError> {
	let duration = match unit {
		"sec" | "secs" | "second" | "seconds" => Duration::SECOND,
		"min" | "mins" | "minute" | "minutes" => Duration::MINUTE,
		"hour" | "hours" => Duration::HOUR,
		"day" | "days" => Duration::DAY,
		"week" | "weeks" => Duration::WEEK,
		_ => return Err(ConfigError::UnsupportedUnit { unit: unit.to_owned() }),
	};

	Ok(duration)
}

fn shift(at: OffsetDateTime, by: Duration) -> Result<OffsetDateTime, ConfigError> {
	at.checked_add(by).ok_or(ConfigError::OutOfRange)
}

fn unparseable(expression: &str) -> ConfigError {
	ConfigError::UnparseableExpression { expression: expression.to_owned() }
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	const NOW: OffsetDateTime = macros::datetime!(2025-11-10 12:30 UTC);

	fn resolve(expression: &str) -> Result<i64, ConfigError> {
		ValidityWindow::from(expression).resolve(NOW)
	}

	#[test]
	fn default_window_is_one_hour_back() {
		let floor = ValidityWindow::default()
			.resolve(NOW)
			.expect("Default window expression should resolve.");

		assert_eq!(floor, NOW.unix_timestamp() - 3_600);
	}

	#[test]
	fn relative_terms_accumulate() {
		assert_eq!(resolve("-1 hour"), Ok(NOW.unix_timestamp() - 3_600));
		assert_eq!(resolve("+2 days"), Ok(NOW.unix_timestamp() + 2 * 86_400));
		assert_eq!(resolve("-1 hour -30 minutes"), Ok(NOW.unix_timestamp() - 5_400));
		assert_eq!(resolve("-90sec"), Ok(NOW.unix_timestamp() - 90));
		assert_eq!(resolve("1 Week"), Ok(NOW.unix_timestamp() + 604_800));
	}

	#[test]
	fn ago_negates_every_term() {
		assert_eq!(resolve("1 hour ago"), Ok(NOW.unix_timestamp() - 3_600));
		assert_eq!(resolve("1 hour 15 minutes ago"), Ok(NOW.unix_timestamp() - 4_500));
		assert!(resolve("ago 1 hour").is_err());
	}

	#[test]
	fn keywords_anchor_to_midnight() {
		let midnight = macros::datetime!(2025-11-10 00:00 UTC).unix_timestamp();

		assert_eq!(resolve("now"), Ok(NOW.unix_timestamp()));
		assert_eq!(resolve("today"), Ok(midnight));
		assert_eq!(resolve("midnight"), Ok(midnight));
		assert_eq!(resolve("yesterday"), Ok(midnight - 86_400));
		assert_eq!(resolve("tomorrow -1 hour"), Ok(midnight + 86_400 - 3_600));
	}

	#[test]
	fn absolute_forms_are_accepted() {
		assert_eq!(resolve("@1700000000"), Ok(1_700_000_000));
		assert_eq!(resolve("2023-11-14T22:13:20Z"), Ok(1_700_000_000));
		assert_eq!(ValidityWindow::from(1_700_000_000_i64).resolve(NOW), Ok(1_700_000_000));
		assert_eq!(
			ValidityWindow::from(macros::datetime!(2023-11-14 22:13:20 UTC)).resolve(NOW),
			Ok(1_700_000_000)
		);
	}

	#[test]
	fn malformed_expressions_are_rejected() {
		assert_eq!(resolve("   "), Err(ConfigError::EmptyExpression));
		assert!(matches!(resolve("soon"), Err(ConfigError::UnparseableExpression { .. })));
		assert!(matches!(resolve("-1"), Err(ConfigError::UnparseableExpression { .. })));
		assert!(matches!(resolve("@later"), Err(ConfigError::UnparseableExpression { .. })));
		assert_eq!(
			resolve("-1 month"),
			Err(ConfigError::UnsupportedUnit { unit: "month".into() })
		);
	}

	#[test]
	fn overflowing_expressions_are_out_of_range() {
		assert_eq!(resolve("2000000000 weeks"), Err(ConfigError::OutOfRange));
	}

	#[test]
	fn serde_accepts_all_three_forms() {
		let epoch: ValidityWindow =
			serde_json::from_str("1700000000").expect("Integer window should deserialize.");
		let relative: ValidityWindow =
			serde_json::from_str("\"-1 hour\"").expect("String window should deserialize.");
		let at: ValidityWindow = serde_json::from_str("{\"at\":\"2023-11-14T22:13:20Z\"}")
			.expect("Point-in-time window should deserialize.");

		assert_eq!(epoch, ValidityWindow::Epoch(1_700_000_000));
		assert_eq!(relative, ValidityWindow::Relative("-1 hour".into()));
		assert_eq!(at, ValidityWindow::At(macros::datetime!(2023-11-14 22:13:20 UTC)));
		assert!(serde_json::from_str::<ValidityWindow>("true").is_err());
	}
}
