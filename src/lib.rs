//! Context-bound anti-forgery tokens—HMAC-SHA512 signatures over canonicalized form data,
//! bounded by a validity window and encoded in a compact, delimiter-safe wire format.
//!
//! ```
//! use csrf_signature::SignatureEngine;
//!
//! let mut engine = SignatureEngine::new("s3cr3t");
//!
//! engine.add_key_value("user", 42);
//! engine.add_value("ctx");
//!
//! let token = engine.issue().expect("Issuing with the default provider should succeed.");
//!
//! assert!(engine.verify(&token));
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod context;
pub mod crypto;
pub mod error;
pub mod obs;
pub mod secret;
pub mod signer;
pub mod token;
pub mod window;

mod _prelude {
	pub use std::{
		cmp::Ordering,
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};

	pub use crate::error::{Error, Result};
}

pub use context::{ContextData, ContextEntry, ContextValue};
pub use crypto::{CryptoError, CryptoProvider, DefaultCryptoProvider};
pub use error::{ConfigError, Error, Result};
pub use secret::Secret;
pub use signer::{SignatureEngine, SignatureEngineBuilder};
pub use token::{Token, hex_to_base64};
pub use window::ValidityWindow;
#[cfg(test)] use color_eyre as _;
