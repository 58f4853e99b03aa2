//! Token wire codec.
//!
//! A token travels as standard base64 of `"{issued_at}:{nonce}:{signature}"`. The nonce and
//! signature are themselves base64, so none of the three fields can contain the `:` delimiter.

// crates.io
use base64::{
	Engine as _,
	alphabet,
	engine::{
		DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::STANDARD,
	},
};
// self
use crate::{
	_prelude::*,
	context::{self, Numeric},
	crypto::CryptoError,
};

const DELIMITER: char = ':';
// Transports that strip `=` padding still decode.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
	&alphabet::STANDARD,
	GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoded anti-forgery token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
	/// Issuance instant in epoch seconds.
	pub issued_at: i64,
	/// Base64 nonce bound into the signature.
	pub nonce: String,
	/// Base64 HMAC over the canonical signing record.
	pub signature: String,
}
impl Token {
	/// Encodes the token into its transmitted form.
	pub fn encode(&self) -> String {
		STANDARD.encode(format!(
			"{}{DELIMITER}{}{DELIMITER}{}",
			self.issued_at, self.nonce, self.signature
		))
	}

	/// Decodes a transmitted token.
	///
	/// The payload must split into exactly three fields and the first must be numeric; values
	/// with a fraction or exponent are truncated toward zero.
	pub fn decode(wire: &str) -> Result<Self> {
		let bytes = LENIENT.decode(wire.trim()).map_err(|_| malformed("payload is not base64"))?;
		let payload = String::from_utf8(bytes).map_err(|_| malformed("payload is not UTF-8"))?;
		let fields = payload.split(DELIMITER).collect::<Vec<_>>();
		let [issued_at, nonce, signature] = fields.as_slice() else {
			return Err(malformed("payload does not have exactly three fields"));
		};

		Ok(Self {
			issued_at: parse_timestamp(issued_at)?,
			nonce: (*nonce).to_owned(),
			signature: (*signature).to_owned(),
		})
	}
}
impl Display for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.encode())
	}
}
impl FromStr for Token {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::decode(s)
	}
}

/// Decodes a hex string into bytes and re-encodes them as padded standard base64.
pub fn hex_to_base64(digest: &str) -> Result<String, CryptoError> {
	Ok(STANDARD.encode(hex::decode(digest)?))
}

/// Parses numeric timestamp text into epoch seconds.
pub(crate) fn parse_timestamp(text: &str) -> Result<i64> {
	match context::parse_numeric(text) {
		Some(Numeric::Int(value)) => Ok(value),
		Some(Numeric::Float(value)) if value.is_finite() => Ok(value.trunc() as i64),
		_ => Err(Error::InvalidInput { value: text.to_owned() }),
	}
}

fn malformed(reason: &'static str) -> Error {
	Error::MalformedToken { reason }
}
