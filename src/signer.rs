//! Signature engine that issues and verifies context-bound tokens.
//!
//! An engine owns a secret, a validity window floor, and the context data every signature is
//! bound to. Issuing draws a fresh nonce from the [`CryptoProvider`], signs the canonical record
//! of `(issued_at, nonce, context)` and returns the wire form of the [`Token`]. Verifying decodes
//! a presented token, enforces the window floor, and recomputes the signature against the
//! engine's current context.
//!
//! Tokens are not single use; they stay valid for as long as their issuance instant is at or
//! above the floor. No upper bound is enforced, so tokens stamped in the future are accepted.

mod builder;
mod canonical;

pub use builder::*;

// crates.io
use subtle::ConstantTimeEq;
// self
use crate::{
	_prelude::*,
	context::{ContextData, ContextEntry, ContextValue},
	crypto::{CryptoProvider, DefaultCryptoProvider},
	obs::{self, OpKind, OpOutcome, OpSpan},
	secret::Secret,
	token::{self, Token},
	window::ValidityWindow,
};

/// Hex characters requested from the provider per nonce (64 random bytes).
pub const NONCE_HEX_LEN: usize = 128;

/// Issues and verifies anti-forgery tokens bound to a secret and context data.
///
/// Mutating the context takes `&mut self` while issuing and verifying take `&self`, so a single
/// instance can be shared for verification but never mutated concurrently.
pub struct SignatureEngine {
	secret: Secret,
	window_floor: i64,
	data: ContextData,
	crypto: Arc<dyn CryptoProvider>,
}
impl SignatureEngine {
	/// Creates an engine with the default provider and a floor of one hour before now.
	pub fn new(secret: impl Into<Secret>) -> Self {
		Self::with_crypto(secret, Arc::new(DefaultCryptoProvider))
	}

	/// Creates an engine backed by a custom provider and a floor of one hour before now.
	pub fn with_crypto(secret: impl Into<Secret>, crypto: Arc<dyn CryptoProvider>) -> Self {
		Self {
			secret: secret.into(),
			window_floor: default_floor(OffsetDateTime::now_utc()),
			data: ContextData::default(),
			crypto,
		}
	}

	/// Starts a [`SignatureEngineBuilder`] seeded with the provided secret.
	pub fn builder(secret: impl Into<Secret>) -> SignatureEngineBuilder {
		SignatureEngineBuilder::new(secret)
	}

	/// Resolves `window` against the current time and stores it as the new floor.
	///
	/// On failure the previous floor is kept.
	pub fn set_validity_window(&mut self, window: impl Into<ValidityWindow>) -> Result<()> {
		self.window_floor = window.into().resolve(OffsetDateTime::now_utc())?;

		Ok(())
	}

	/// Earliest accepted issuance instant, in epoch seconds.
	pub fn validity_window(&self) -> i64 {
		self.window_floor
	}

	/// Appends a positional context value.
	pub fn add_value(&mut self, value: impl Into<ContextValue>) {
		self.data.push(value);
	}

	/// Inserts or overwrites a keyed context value.
	///
	/// Canonical integer keys such as `"5"` address positional slot `5` instead; see
	/// [`ContextData::insert`].
	pub fn add_key_value(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
		self.data.insert(key, value);
	}

	/// Replaces the entire context with `entries`.
	pub fn set_data<I>(&mut self, entries: I)
	where
		I: IntoIterator<Item = ContextEntry>,
	{
		self.data = entries.into_iter().collect();
	}

	/// Context data currently bound into signatures.
	pub fn context(&self) -> &ContextData {
		&self.data
	}

	/// Issues a token stamped with the current time.
	pub fn issue(&self) -> Result<String> {
		self.issue_at(OffsetDateTime::now_utc())
	}

	/// Issues a token stamped with `now`.
	pub fn issue_at(&self, now: OffsetDateTime) -> Result<String> {
		let _guard = OpSpan::new(OpKind::Issue).entered();
		let result = self.mint(now.unix_timestamp());
		let outcome = if result.is_ok() { OpOutcome::Success } else { OpOutcome::Failure };

		obs::record_op_outcome(OpKind::Issue, outcome);

		result
	}

	/// Returns `true` when `token` was issued by an engine sharing this secret and context, at or
	/// after the validity window floor.
	///
	/// Every failure (undecodable, wrong field count, non-numeric timestamp, expired, signature
	/// mismatch, provider failure) yields `false`.
	pub fn verify(&self, token: &str) -> bool {
		let _guard = OpSpan::new(OpKind::Verify).entered();
		let outcome = self.check(token);

		obs::record_op_outcome(OpKind::Verify, outcome);

		outcome == OpOutcome::Success
	}

	fn mint(&self, issued_at: i64) -> Result<String> {
		let nonce = token::hex_to_base64(&self.crypto.random_hex(NONCE_HEX_LEN)?)?;
		let signature = self.sign(issued_at, &nonce)?;

		Ok(Token { issued_at, nonce, signature }.encode())
	}

	fn check(&self, wire: &str) -> OpOutcome {
		let token = match Token::decode(wire) {
			Ok(token) => token,
			Err(e) => return reject(OpOutcome::Malformed, &e),
		};
		let outcome = self.check_token(&token);
		let age = OffsetDateTime::now_utc().unix_timestamp().saturating_sub(token.issued_at);

		obs::record_token_age(outcome, age);

		outcome
	}

	fn check_token(&self, token: &Token) -> OpOutcome {
		if token.issued_at < self.window_floor {
			return reject(OpOutcome::Expired, &token.issued_at);
		}

		let expected = match self.sign(token.issued_at, &token.nonce) {
			Ok(signature) => signature,
			Err(e) => return reject(OpOutcome::Failure, &e),
		};

		if bool::from(expected.as_bytes().ct_eq(token.signature.as_bytes())) {
			OpOutcome::Success
		} else {
			reject(OpOutcome::Mismatch, &"signature differs")
		}
	}

	/// Signs the canonical record for `issued_at` and `nonce` under the current context.
	fn sign(&self, issued_at: i64, nonce: &str) -> Result<String> {
		let payload = canonical::encode(issued_at, nonce, &self.data)?;
		let digest = self.crypto.hash(&payload, self.secret.expose())?;

		Ok(token::hex_to_base64(&digest)?)
	}
}
impl Debug for SignatureEngine {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignatureEngine")
			.field("secret", &self.secret)
			.field("window_floor", &self.window_floor)
			.field("data", &self.data)
			.finish_non_exhaustive()
	}
}

fn default_floor(now: OffsetDateTime) -> i64 {
	now.unix_timestamp() - Duration::HOUR.whole_seconds()
}

fn reject(outcome: OpOutcome, detail: &dyn Display) -> OpOutcome {
	obs::log_rejection(outcome, detail);

	outcome
}
