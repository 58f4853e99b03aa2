// self
use crate::{
	_prelude::*,
	context::{ContextData, ContextEntry},
	crypto::{CryptoProvider, DefaultCryptoProvider},
	secret::Secret,
	signer::SignatureEngine,
	window::ValidityWindow,
};

/// Builder for [`SignatureEngine`] values.
pub struct SignatureEngineBuilder {
	/// Secret every signature is keyed with.
	pub secret: Secret,
	/// Provider override; [`DefaultCryptoProvider`] when unset.
	pub crypto: Option<Arc<dyn CryptoProvider>>,
	/// Validity window resolved when the engine is built.
	pub window: ValidityWindow,
	/// Initial context data.
	pub data: ContextData,
}
impl SignatureEngineBuilder {
	/// Creates a new builder seeded with the provided secret.
	pub fn new(secret: impl Into<Secret>) -> Self {
		Self {
			secret: secret.into(),
			crypto: None,
			window: ValidityWindow::default(),
			data: ContextData::default(),
		}
	}

	/// Overrides the crypto provider.
	pub fn crypto(mut self, crypto: Arc<dyn CryptoProvider>) -> Self {
		self.crypto = Some(crypto);

		self
	}

	/// Sets the validity window.
	pub fn validity_window(mut self, window: impl Into<ValidityWindow>) -> Self {
		self.window = window.into();

		self
	}

	/// Seeds the context data.
	pub fn data<I>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = ContextEntry>,
	{
		self.data = entries.into_iter().collect();

		self
	}

	/// Resolves the window against the current time and builds the engine.
	pub fn build(self) -> Result<SignatureEngine> {
		self.build_at(OffsetDateTime::now_utc())
	}

	/// Resolves the window against `now` and builds the engine.
	pub fn build_at(self, now: OffsetDateTime) -> Result<SignatureEngine> {
		let window_floor = self.window.resolve(now)?;
		let crypto = self.crypto.unwrap_or_else(|| Arc::new(DefaultCryptoProvider));

		Ok(SignatureEngine { secret: self.secret, window_floor, data: self.data, crypto })
	}
}
impl Debug for SignatureEngineBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignatureEngineBuilder")
			.field("secret", &self.secret)
			.field("custom_crypto", &self.crypto.is_some())
			.field("window", &self.window)
			.field("data", &self.data)
			.finish()
	}
}
