//! Canonical signing record and its byte-stable JSON encoding.
//!
//! The record is compact JSON with the field order `timestamp`, `token`, `array`, `object`.
//! Existing verifiers expect `/` escaped as `\/`, every non-ASCII character escaped as UTF-16
//! `\uXXXX` units, and an empty keyed part encoded as `[]`.

// std
use std::io::{Result as IoResult, Write};
// crates.io
use serde::{Serializer, ser::SerializeMap};
use serde_json::ser::Formatter as JsonFormatter;
// self
use crate::{
	_prelude::*,
	context::{ContextData, ContextValue},
};

#[derive(Serialize)]
struct SigningRecord<'a> {
	timestamp: i64,
	token: &'a str,
	array: Vec<&'a ContextValue>,
	object: ObjectPart<'a>,
}

struct ObjectPart<'a>(Vec<(&'a str, &'a ContextValue)>);
impl Serialize for ObjectPart<'_> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		if self.0.is_empty() {
			return serializer.collect_seq(std::iter::empty::<()>());
		}

		let mut map = serializer.serialize_map(Some(self.0.len()))?;

		for (key, value) in &self.0 {
			map.serialize_entry(key, value)?;
		}

		map.end()
	}
}

#[derive(Clone, Copy, Debug, Default)]
struct CanonicalFormatter;
impl JsonFormatter for CanonicalFormatter {
	fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> IoResult<()>
	where
		W: ?Sized + Write,
	{
		let mut start = 0;

		for (i, c) in fragment.char_indices() {
			if c != '/' && c.is_ascii() {
				continue;
			}

			writer.write_all(&fragment.as_bytes()[start..i])?;

			if c == '/' {
				writer.write_all(b"\\/")?;
			} else {
				let mut units = [0_u16; 2];

				for unit in c.encode_utf16(&mut units) {
					write!(writer, "\\u{unit:04x}")?;
				}
			}

			start = i + c.len_utf8();
		}

		writer.write_all(&fragment.as_bytes()[start..])
	}
}

/// Encodes the signing record for `issued_at`, `nonce`, and the canonicalized `data`.
pub(super) fn encode(issued_at: i64, nonce: &str, data: &ContextData) -> Result<Vec<u8>> {
	let record = SigningRecord {
		timestamp: issued_at,
		token: nonce,
		array: data.sorted_positional(),
		object: ObjectPart(data.sorted_keyed()),
	};
	let mut out = Vec::with_capacity(256);
	let mut serializer = serde_json::Serializer::with_formatter(&mut out, CanonicalFormatter);

	record.serialize(&mut serializer)?;

	Ok(out)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::context::ContextEntry;

	fn encode_str(issued_at: i64, nonce: &str, data: &ContextData) -> String {
		String::from_utf8(encode(issued_at, nonce, data).expect("Record should encode."))
			.expect("Canonical JSON should be UTF-8.")
	}

	#[test]
	fn empty_data_uses_empty_arrays() {
		assert_eq!(
			encode_str(1, "n", &ContextData::default()),
			r#"{"timestamp":1,"token":"n","array":[],"object":[]}"#
		);
	}

	#[test]
	fn parts_are_sorted_before_encoding() {
		let data = ContextData::from_iter([
			ContextEntry::keyed("z", 1),
			ContextEntry::positional("b"),
			ContextEntry::keyed("a", true),
			ContextEntry::positional(2),
			ContextEntry::positional("a"),
			ContextEntry::positional(1),
		]);

		assert_eq!(
			encode_str(7, "n", &data),
			r#"{"timestamp":7,"token":"n","array":[1,2,"a","b"],"object":{"a":true,"z":1}}"#
		);
	}

	#[test]
	fn numeric_strings_sort_with_numbers() {
		let data = ContextData::from_iter([
			ContextEntry::positional("10"),
			ContextEntry::positional("9"),
			ContextEntry::positional(10),
		]);

		assert_eq!(
			encode_str(1, "n", &data),
			r#"{"timestamp":1,"token":"n","array":["9",10,"10"],"object":[]}"#
		);
	}

	#[test]
	fn integer_keys_join_the_array_part() {
		let data = ContextData::from_iter([
			ContextEntry::keyed("5", "five"),
			ContextEntry::keyed("05", "padded"),
			ContextEntry::positional("abc"),
		]);

		assert_eq!(
			encode_str(1, "n", &data),
			r#"{"timestamp":1,"token":"n","array":["abc","five"],"object":{"05":"padded"}}"#
		);
	}

	#[test]
	fn slashes_and_non_ascii_are_escaped() {
		let data = ContextData::from_iter([
			ContextEntry::keyed("path", "x/y"),
			ContextEntry::keyed("name", "é😀"),
			ContextEntry::positional("line\nbreak \"quoted\""),
		]);

		assert_eq!(
			encode_str(0, "ab/+=", &data),
			r#"{"timestamp":0,"token":"ab\/+=","array":["line\nbreak \"quoted\""],"object":{"name":"\u00e9\ud83d\ude00","path":"x\/y"}}"#
		);
	}

	#[test]
	fn scalars_keep_their_json_types() {
		let data = ContextData::from_iter([
			ContextEntry::positional(None::<i64>),
			ContextEntry::positional(1.5),
			ContextEntry::positional(false),
		]);

		assert_eq!(
			encode_str(-3, "", &data),
			r#"{"timestamp":-3,"token":"","array":[null,false,1.5],"object":[]}"#
		);
	}
}
