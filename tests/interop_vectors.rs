mod common;

// std
use std::sync::Arc;
// crates.io
use time::{OffsetDateTime, macros};
// self
use common::FixedCryptoProvider;
use csrf_signature::{ContextEntry, SignatureEngine, Token};

const ISSUED_AT: OffsetDateTime = macros::datetime!(2023-11-14 22:13:20 UTC);
// 64 bytes of 0xff, base64 encoded.
const NONCE: &str =
	"/////////////////////////////////////////////////////////////////////////////////////w==";

// Every nonce byte is 0xff, so the nonce is made of `/` characters and exercises slash escaping.
fn build_fixed_engine(secret: &str) -> SignatureEngine {
	SignatureEngine::builder(secret)
		.crypto(Arc::new(FixedCryptoProvider::new(0xff)))
		.build()
		.expect("Fixed engine should build with the default window.")
}

fn signature_for(entries: Vec<ContextEntry>) -> String {
	let mut engine = build_fixed_engine("s3cr3t");

	engine.set_data(entries);

	let wire = engine.issue_at(ISSUED_AT).expect("Fixed engine should issue.");
	let token = Token::decode(&wire).expect("Issued token should decode.");

	assert_eq!(token.issued_at, 1_700_000_000);
	assert_eq!(token.nonce, NONCE);

	token.signature
}

#[test]
fn keyed_and_positional_vector() {
	let mut engine = build_fixed_engine("s3cr3t");

	engine.add_key_value("user", 42);
	engine.add_value("ctx");

	let wire = engine.issue_at(ISSUED_AT).expect("Fixed engine should issue.");

	assert_eq!(
		wire,
		"MTcwMDAwMDAwMDovLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vLy8vdz09Okh1aFgrMnB1a2VGUDlreGlwUTNMSkVXbmFNYUVMNGxNeVdvSzZUVjJoVFBpNlZFWEJtZG9ZU05keGhrQ1IzT0pHVG5CQ0QrZ1hZcFRwUUo1OE5yNU9BPT0="
	);
}

#[test]
fn empty_context_vector() {
	assert_eq!(
		signature_for(Vec::new()),
		"Px1QdGwJIWTY63xl6QAL1CtGVG4ef3KZpRaowsGyM/UrziT94I1odOZ2LhWZjP0MBowso2OFbtw4sjonm072/w=="
	);
}

#[test]
fn mixed_values_and_escaping_vector() {
	let entries = vec![
		ContextEntry::keyed("z", "é"),
		ContextEntry::positional("b"),
		ContextEntry::positional(2),
		ContextEntry::keyed("a", "x/y"),
		ContextEntry::positional("a"),
		ContextEntry::positional(1),
	];

	assert_eq!(
		signature_for(entries),
		"XTyX7mANM6/iMniJAx4yOw6VWqGUBUo+wf6hVwDz17SGNm6hdd7QDAXLlVikEsAqThL+b7J9LDHnBScVFq9Nzw=="
	);
}

#[test]
fn numeric_strings_and_integer_keys_vector() {
	let entries = vec![
		ContextEntry::positional("10"),
		ContextEntry::keyed("k", "v"),
		ContextEntry::positional("9"),
		ContextEntry::positional(11),
		ContextEntry::keyed("5", "five"),
		ContextEntry::positional("8.5"),
		ContextEntry::positional("abc"),
	];

	assert_eq!(
		signature_for(entries),
		"7kKns7gI8FIDMbYEJ34uE+B3shWfnR6q33K/YT8dqnOwzrrD+Z1RWcjrCTx95X2ifj+Pz51hQIljb8/URKgdFA=="
	);
}
