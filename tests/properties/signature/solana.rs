use crate::properties::strategies::message_strategy;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{Signer, SigningKey};
use proptest::{prelude::*, test_runner::Config};
use wallet_verifier::services::signature::SolanaSignatureVerifier;

const SIGNING_CASES: u32 = 64;

fn address_of(key: &SigningKey) -> String {
	bs58::encode(key.verifying_key().as_bytes()).into_string()
}

proptest! {
	#![proptest_config(Config {
		cases: SIGNING_CASES,
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_signature_round_trip(secret in any::<[u8; 32]>(), message in message_strategy()) {
		let key = SigningKey::from_bytes(&secret);
		let signature = STANDARD.encode(key.sign(&message).to_bytes());

		prop_assert!(SolanaSignatureVerifier::new()
			.verify_signature(&address_of(&key), &message, &signature)
			.unwrap());
	}

	#[test]
	fn test_flipped_bit_is_rejected(
		secret in any::<[u8; 32]>(),
		message in prop::collection::vec(any::<u8>(), 1..128),
		position in any::<prop::sample::Index>(),
		bit in 0u8..8
	) {
		let key = SigningKey::from_bytes(&secret);
		let signature = STANDARD.encode(key.sign(&message).to_bytes());

		let mut tampered = message.clone();
		tampered[position.index(message.len())] ^= 1 << bit;
		prop_assert!(!SolanaSignatureVerifier::new()
			.verify_signature(&address_of(&key), &tampered, &signature)
			.unwrap());
	}

	#[test]
	fn test_multi_signature_requires_every_signer(
		secrets in prop::collection::vec(any::<[u8; 32]>(), 1..5),
		message in message_strategy()
	) {
		let keys: Vec<SigningKey> = secrets.iter().map(SigningKey::from_bytes).collect();
		let addresses: Vec<String> = keys.iter().map(address_of).collect();
		let mut signatures: Vec<String> = keys
			.iter()
			.map(|key| STANDARD.encode(key.sign(&message).to_bytes()))
			.collect();
		let verifier = SolanaSignatureVerifier::new();

		prop_assert!(verifier
			.verify_multi_signature(&addresses, &message, &signatures)
			.unwrap());

		let mut forged = message.clone();
		forged.push(0);
		let last = signatures.len() - 1;
		signatures[last] = STANDARD.encode(keys[last].sign(&forged).to_bytes());
		prop_assert!(!verifier
			.verify_multi_signature(&addresses, &message, &signatures)
			.unwrap());
	}
}
