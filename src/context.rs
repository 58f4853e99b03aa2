//! Context values bound into every signature.
//!
//! Context data holds two disjoint parts: positional values (identified only by insertion
//! order, never deduplicated) and keyed values (unique per key, last write wins). Both parts
//! are canonicalized before signing, so callers only need to reproduce the same set of values
//! on the verifying side, not the same insertion order.
//!
//! Keys written as canonical decimal integers (`"0"`, `"42"`, `"-7"`, but not `"007"` or `"-0"`)
//! address a positional slot instead of the keyed part, the same way an associative array with
//! integer keys behaves. Appended values take the slot after the highest one used so far.

// crates.io
use serde::Serializer;
// self
use crate::_prelude::*;

/// Scalar value carried by a context entry.
///
/// Values are totally ordered: null, then booleans, then numbers, then the remaining strings in
/// byte order. Strings that spell a decimal number (`"10"`, `" 2.5"`, `"1e3"`) rank with the
/// numbers and compare by value; equal values fall back to the variant (integer, float, string)
/// and then to their exact representation.
#[derive(Clone, Debug)]
pub enum ContextValue {
	/// Explicit null.
	Null,
	/// Boolean flag.
	Bool(bool),
	/// Signed integer.
	Int(i64),
	/// Floating point number.
	Float(f64),
	/// UTF-8 text.
	Str(String),
}
impl ContextValue {
	fn number(&self) -> Option<Numeric> {
		match self {
			ContextValue::Int(v) => Some(Numeric::Int(*v)),
			ContextValue::Float(v) => Some(Numeric::Float(*v)),
			ContextValue::Str(v) => parse_numeric(v),
			_ => None,
		}
	}

	fn class(&self, numeric: bool) -> u8 {
		match self {
			ContextValue::Null => 0,
			ContextValue::Bool(_) => 1,
			_ if numeric => 2,
			_ => 3,
		}
	}

	fn variant(&self) -> u8 {
		match self {
			ContextValue::Null => 0,
			ContextValue::Bool(_) => 1,
			ContextValue::Int(_) => 2,
			ContextValue::Float(_) => 3,
			ContextValue::Str(_) => 4,
		}
	}
}
impl PartialEq for ContextValue {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}
impl Eq for ContextValue {}
impl PartialOrd for ContextValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
impl Ord for ContextValue {
	fn cmp(&self, other: &Self) -> Ordering {
		let (lhs, rhs) = (self.number(), other.number());
		let by_number = match (lhs, rhs) {
			(Some(a), Some(b)) => a.compare(b),
			_ => Ordering::Equal,
		};

		self.class(lhs.is_some())
			.cmp(&other.class(rhs.is_some()))
			.then(by_number)
			.then_with(|| self.variant().cmp(&other.variant()))
			.then_with(|| match (self, other) {
				(ContextValue::Bool(a), ContextValue::Bool(b)) => a.cmp(b),
				(ContextValue::Int(a), ContextValue::Int(b)) => a.cmp(b),
				(ContextValue::Float(a), ContextValue::Float(b)) => a.total_cmp(b),
				(ContextValue::Str(a), ContextValue::Str(b)) => a.as_bytes().cmp(b.as_bytes()),
				_ => Ordering::Equal,
			})
	}
}
impl Display for ContextValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			ContextValue::Null => f.write_str("null"),
			ContextValue::Bool(v) => Display::fmt(v, f),
			ContextValue::Int(v) => Display::fmt(v, f),
			ContextValue::Float(v) => Display::fmt(v, f),
			ContextValue::Str(v) => f.write_str(v),
		}
	}
}
impl Serialize for ContextValue {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			ContextValue::Null => serializer.serialize_unit(),
			ContextValue::Bool(v) => serializer.serialize_bool(*v),
			ContextValue::Int(v) => serializer.serialize_i64(*v),
			ContextValue::Float(v) => serializer.serialize_f64(*v),
			ContextValue::Str(v) => serializer.serialize_str(v),
		}
	}
}
impl From<bool> for ContextValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl From<f32> for ContextValue {
	fn from(value: f32) -> Self {
		Self::Float(value.into())
	}
}
impl From<f64> for ContextValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}
impl From<&str> for ContextValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}
impl From<String> for ContextValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}
impl From<&String> for ContextValue {
	fn from(value: &String) -> Self {
		Self::Str(value.clone())
	}
}
impl<T> From<Option<T>> for ContextValue
where
	T: Into<ContextValue>,
{
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

macro_rules! impl_from_int {
	($($ty:ty),+) => {
		$(
			impl From<$ty> for ContextValue {
				fn from(value: $ty) -> Self {
					Self::Int(value.into())
				}
			}
		)+
	};
}
impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Single context entry as accepted by [`ContextData::from_iter`] and
/// [`SignatureEngine::set_data`](crate::signer::SignatureEngine::set_data).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextEntry {
	/// Value identified only by its position.
	Positional(ContextValue),
	/// Value stored under an explicit key.
	Keyed(String, ContextValue),
}
impl ContextEntry {
	/// Builds a positional entry.
	pub fn positional(value: impl Into<ContextValue>) -> Self {
		Self::Positional(value.into())
	}

	/// Builds a keyed entry.
	pub fn keyed(key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
		Self::Keyed(key.into(), value.into())
	}
}

/// Accumulated context data owned by a signature engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextData {
	positional: Vec<ContextValue>,
	// Slot of each positional value, parallel to `positional`.
	slots: Vec<i64>,
	next_slot: Option<i64>,
	keyed: BTreeMap<String, ContextValue>,
}
impl ContextData {
	/// Appends a positional value.
	///
	/// Once slot `i64::MAX` is taken, further appended values are ignored.
	pub fn push(&mut self, value: impl Into<ContextValue>) {
		let slot = self.next_slot.unwrap_or(0);

		if slot == i64::MAX && self.position(slot).is_some() {
			return;
		}

		self.assign(slot, value.into());
	}

	/// Inserts or overwrites a keyed value.
	///
	/// Canonical integer keys overwrite (or create) the positional value in that slot.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
		let key = key.into();

		match integer_key(&key) {
			Some(slot) => self.assign(slot, value.into()),
			None => {
				self.keyed.insert(key, value.into());
			},
		}
	}

	/// Applies a single entry.
	pub fn apply(&mut self, entry: ContextEntry) {
		match entry {
			ContextEntry::Positional(value) => self.push(value),
			ContextEntry::Keyed(key, value) => self.insert(key, value),
		}
	}

	/// Positional values in insertion order.
	pub fn positional(&self) -> &[ContextValue] {
		&self.positional
	}

	/// Keyed values ordered by key bytes.
	pub fn keyed(&self) -> &BTreeMap<String, ContextValue> {
		&self.keyed
	}

	/// Looks up a value by key; canonical integer keys address positional slots.
	pub fn get(&self, key: &str) -> Option<&ContextValue> {
		match integer_key(key) {
			Some(slot) => self.position(slot).map(|at| &self.positional[at]),
			None => self.keyed.get(key),
		}
	}

	/// Total number of entries across both parts.
	pub fn len(&self) -> usize {
		self.positional.len() + self.keyed.len()
	}

	/// Returns true when no entries have been added.
	pub fn is_empty(&self) -> bool {
		self.positional.is_empty() && self.keyed.is_empty()
	}

	/// Removes every entry and restarts slot numbering.
	pub fn clear(&mut self) {
		self.positional.clear();
		self.slots.clear();
		self.next_slot = None;
		self.keyed.clear();
	}

	/// Positional values sorted by their natural order.
	pub(crate) fn sorted_positional(&self) -> Vec<&ContextValue> {
		let mut values = self.positional.iter().collect::<Vec<_>>();

		values.sort();

		values
	}

	/// Keyed values sorted by key; numeric keys compare by value before the rest.
	pub(crate) fn sorted_keyed(&self) -> Vec<(&str, &ContextValue)> {
		let mut entries = self.keyed.iter().map(|(k, v)| (k.as_str(), v)).collect::<Vec<_>>();

		entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));

		entries
	}

	fn position(&self, slot: i64) -> Option<usize> {
		self.slots.iter().position(|&s| s == slot)
	}

	fn assign(&mut self, slot: i64, value: ContextValue) {
		match self.position(slot) {
			Some(at) => self.positional[at] = value,
			None => {
				self.positional.push(value);
				self.slots.push(slot);
			},
		}

		let next = slot.saturating_add(1);

		if self.next_slot.is_none_or(|current| next > current) {
			self.next_slot = Some(next);
		}
	}
}
impl FromIterator<ContextEntry> for ContextData {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = ContextEntry>,
	{
		let mut data = Self::default();

		data.extend(iter);

		data
	}
}
impl Extend<ContextEntry> for ContextData {
	fn extend<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = ContextEntry>,
	{
		for entry in iter {
			self.apply(entry);
		}
	}
}

/// Number read from a value or from decimal text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Numeric {
	Int(i64),
	Float(f64),
}
impl Numeric {
	/// Exact comparison across integers and floats; NaN sorts above every other number.
	fn compare(self, other: Self) -> Ordering {
		match (self, other) {
			(Numeric::Int(a), Numeric::Int(b)) => a.cmp(&b),
			(Numeric::Float(a), Numeric::Float(b)) => compare_floats(a, b),
			(Numeric::Int(a), Numeric::Float(b)) => compare_mixed(a, b),
			(Numeric::Float(a), Numeric::Int(b)) => compare_mixed(b, a).reverse(),
		}
	}
}

/// Parses decimal text the way loosely typed runtimes recognize numeric strings.
///
/// Surrounding ASCII whitespace is allowed, as are a sign, a fraction, and an exponent. Hex,
/// `inf`, and `nan` are not numbers. Integers that overflow `i64` become floats.
pub(crate) fn parse_numeric(text: &str) -> Option<Numeric> {
	let trimmed = text.trim_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
	let body = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
	let (mantissa, exponent) = match body.find(['e', 'E']) {
		Some(at) => (&body[..at], Some(&body[at + 1..])),
		None => (body, None),
	};
	let (whole, fraction) = match mantissa.split_once('.') {
		Some((whole, fraction)) => (whole, Some(fraction)),
		None => (mantissa, None),
	};
	let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

	if !digits(whole)
		|| !fraction.is_none_or(digits)
		|| (whole.is_empty() && fraction.is_none_or(str::is_empty))
	{
		return None;
	}
	if let Some(exponent) = exponent {
		let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);

		if exponent.is_empty() || !digits(exponent) {
			return None;
		}
	}
	let integral = fraction.is_none() && exponent.is_none();

	match trimmed.parse::<i64>() {
		Ok(value) if integral => Some(Numeric::Int(value)),
		_ => trimmed.parse::<f64>().ok().map(Numeric::Float),
	}
}

fn compare_floats(a: f64, b: f64) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
	}
}

fn compare_mixed(int: i64, float: f64) -> Ordering {
	// 2^63, the first float above every i64.
	const BOUND: f64 = 9_223_372_036_854_775_808.0;

	if float.is_nan() || float >= BOUND {
		return Ordering::Less;
	}
	if float < -BOUND {
		return Ordering::Greater;
	}

	let whole = float.trunc();

	int.cmp(&(whole as i64))
		.then_with(|| 0.0_f64.partial_cmp(&(float - whole)).unwrap_or(Ordering::Equal))
}

fn compare_keys(a: &str, b: &str) -> Ordering {
	match (parse_numeric(a), parse_numeric(b)) {
		(Some(x), Some(y)) => x.compare(y).then_with(|| a.as_bytes().cmp(b.as_bytes())),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => a.as_bytes().cmp(b.as_bytes()),
	}
}

/// Returns the slot addressed by `key` when it is a canonical decimal integer.
fn integer_key(key: &str) -> Option<i64> {
	let unsigned = key.strip_prefix('-').unwrap_or(key);
	let canonical = match unsigned.as_bytes() {
		[b'0'] => unsigned.len() == key.len(),
		[b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
		_ => false,
	};

	if canonical { key.parse().ok() } else { None }
}
