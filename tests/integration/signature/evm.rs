use alloy::signers::{local::PrivateKeySigner, SignerSync};
use chrono::Utc;

use wallet_verifier::{
	services::signature::{ChallengeGenerator, EvmSignatureVerifier, SignatureError},
	utils::tests::builders::typed_data::TypedDataBuilder,
};

fn personal_sign(signer: &PrivateKeySigner, message: &str) -> String {
	let signature = signer.sign_message_sync(message.as_bytes()).unwrap();
	format!("0x{}", hex::encode(signature.as_bytes()))
}

#[test]
fn test_personal_sign_login() {
	let signer_a = PrivateKeySigner::random();
	let signer_b = PrivateKeySigner::random();
	let address_a = signer_a.address().to_string();
	let address_b = signer_b.address().to_string();
	let signature = personal_sign(&signer_a, "login:nonce-123");
	let verifier = EvmSignatureVerifier::new();

	let result = verifier
		.verify_personal_sign(&address_a, "login:nonce-123", &signature)
		.unwrap();
	assert!(result.verified);
	assert_eq!(result.recovered_address, Some(signer_a.address()));

	let result = verifier
		.verify_personal_sign(&address_b, "login:nonce-123", &signature)
		.unwrap();
	assert!(!result.verified);
	assert_eq!(result.recovered_address, Some(signer_a.address()));
}

#[test]
fn test_lowercase_address_is_accepted() {
	let signer = PrivateKeySigner::random();
	let signature = personal_sign(&signer, "hello");
	let lowercase = signer.address().to_string().to_lowercase();

	assert!(EvmSignatureVerifier::new()
		.verify_personal_sign(&lowercase, "hello", &signature)
		.unwrap()
		.verified);
}

#[test]
fn test_signature_without_prefix() {
	let signer = PrivateKeySigner::random();
	let signature = personal_sign(&signer, "hello");
	let bare = signature.trim_start_matches("0x");

	assert!(EvmSignatureVerifier::new()
		.verify_personal_sign(&signer.address().to_string(), "hello", bare)
		.unwrap()
		.verified);
}

#[test]
fn test_tampered_message_is_rejected() {
	let signer = PrivateKeySigner::random();
	let signature = personal_sign(&signer, "transfer 1 token");

	let result = EvmSignatureVerifier::new()
		.verify_personal_sign(&signer.address().to_string(), "transfer 9 token", &signature)
		.unwrap();
	assert!(!result.verified);
	assert_ne!(result.recovered_address, Some(signer.address()));
}

#[test]
fn test_malformed_input() {
	let signer = PrivateKeySigner::random();
	let address = signer.address().to_string();
	let verifier = EvmSignatureVerifier::new();

	assert!(matches!(
		verifier.verify_personal_sign(&address, "m", "0x1234"),
		Err(SignatureError::InvalidSignatureLength {
			expected: 65,
			actual: 2
		})
	));
	assert!(matches!(
		verifier.verify_personal_sign(&address, "m", "0xzz"),
		Err(SignatureError::InvalidEncoding(_))
	));
	assert!(matches!(
		verifier.verify_personal_sign("0x1234", "m", &personal_sign(&signer, "m")),
		Err(SignatureError::InvalidAddress(_))
	));

	let mut bad_v = hex::decode(personal_sign(&signer, "m").trim_start_matches("0x")).unwrap();
	bad_v[64] = 5;
	assert!(matches!(
		verifier.verify_personal_sign(&address, "m", &hex::encode(bad_v)),
		Err(SignatureError::InvalidRecoveryId(5))
	));
}

#[test]
fn test_typed_data_signature() {
	let signer = PrivateKeySigner::random();
	let typed_data = TypedDataBuilder::permit()
		.field("owner", signer.address().to_string())
		.build();

	let digest = wallet_verifier::services::signature::hash_typed_data(&typed_data).unwrap();
	let signature = signer.sign_hash_sync(&digest).unwrap();
	let signature = format!("0x{}", hex::encode(signature.as_bytes()));
	let verifier = EvmSignatureVerifier::new();

	assert!(verifier
		.verify_typed_data(&signer.address().to_string(), &typed_data, &signature)
		.unwrap()
		.verified);

	let altered = TypedDataBuilder::permit()
		.field("owner", signer.address().to_string())
		.field("value", "1000000000000000001")
		.build();
	assert!(!verifier
		.verify_typed_data(&signer.address().to_string(), &altered, &signature)
		.unwrap()
		.verified);
}

#[test]
fn test_challenge_round_trip() {
	let signer = PrivateKeySigner::random();
	let address = signer.address().to_string();
	let challenge = ChallengeGenerator::default().generate(&address);

	assert!(!challenge.is_expired(Utc::now()));
	assert!(challenge.message.contains(&address));

	let signature = personal_sign(&signer, &challenge.message);
	assert!(EvmSignatureVerifier::new()
		.verify_personal_sign(&address, &challenge.message, &signature)
		.unwrap()
		.verified);
}
