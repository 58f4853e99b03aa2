// self
use csrf_signature::{CryptoError, CryptoProvider, DefaultCryptoProvider};

/// Deterministic provider that fills every "random" byte with one value while delegating
/// hashing to [`DefaultCryptoProvider`], so issued tokens are reproducible.
#[derive(Clone, Copy, Debug)]
pub struct FixedCryptoProvider {
	pub fill: u8,
}
impl FixedCryptoProvider {
	pub const fn new(fill: u8) -> Self {
		Self { fill }
	}
}
impl CryptoProvider for FixedCryptoProvider {
	fn random_hex(&self, length: usize) -> Result<String, CryptoError> {
		if length % 2 != 0 {
			return Err(CryptoError::OddLength { length });
		}

		Ok(hex::encode(vec![self.fill; length / 2]))
	}

	fn hash(&self, data: &[u8], secret: &[u8]) -> Result<String, CryptoError> {
		DefaultCryptoProvider.hash(data, secret)
	}
}
