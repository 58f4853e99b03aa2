//! Randomness and keyed-hash capabilities consumed by the signature engine.

// crates.io
use hmac::{Hmac, Mac};
use rand::{TryRngCore, rngs::OsRng};
use sha2::Sha512;
// self
use crate::_prelude::*;

type HmacSha512 = Hmac<Sha512>;

/// Failures raised by a [`CryptoProvider`].
#[derive(Debug, ThisError)]
pub enum CryptoError {
	/// Hex output was requested with an odd number of characters.
	#[error("Random hex length must be even, got {length}.")]
	OddLength {
		/// Requested character count.
		length: usize,
	},
	/// Operating system entropy source failed.
	#[error("Secure random source failed.")]
	Entropy(#[from] rand::rand_core::OsError),
	/// MAC could not be keyed with the supplied secret.
	#[error("Keyed hash rejected the secret.")]
	InvalidKey(#[from] hmac::digest::InvalidLength),
	/// Provider returned a digest that is not valid hex.
	#[error("Digest is not valid hex.")]
	InvalidHex(#[from] hex::FromHexError),
}

/// Supplies secure random hex strings and a keyed hash.
///
/// Implementations must be stateless from the caller's point of view; one instance is shared
/// across engines and threads. Swapping providers never changes the token format.
pub trait CryptoProvider
where
	Self: Send + Sync,
{
	/// Returns exactly `length` hex characters drawn from a cryptographically secure source.
	fn random_hex(&self, length: usize) -> Result<String, CryptoError>;

	/// Returns the hex digest of `data` keyed by `secret`.
	fn hash(&self, data: &[u8], secret: &[u8]) -> Result<String, CryptoError>;
}

/// OS randomness plus HMAC-SHA512.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultCryptoProvider;
impl CryptoProvider for DefaultCryptoProvider {
	fn random_hex(&self, length: usize) -> Result<String, CryptoError> {
		if length % 2 != 0 {
			return Err(CryptoError::OddLength { length });
		}

		let mut bytes = vec![0_u8; length / 2];

		OsRng.try_fill_bytes(&mut bytes)?;

		Ok(hex::encode(bytes))
	}

	fn hash(&self, data: &[u8], secret: &[u8]) -> Result<String, CryptoError> {
		let mut mac = HmacSha512::new_from_slice(secret)?;

		mac.update(data);

		Ok(hex::encode(mac.finalize().into_bytes()))
	}
}
