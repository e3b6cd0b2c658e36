use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{Signer, SigningKey};

use wallet_verifier::{
	services::signature::{
		pda::{associated_token_address, decode_pubkey, find_program_address, metadata_address},
		ChallengeGenerator, SignatureError, SolanaSignatureVerifier, OFFCHAIN_MESSAGE_PREFIX,
	},
	utils::constants::{METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID},
};

fn wallet() -> (SigningKey, String) {
	let key = SigningKey::from_bytes(&rand::random::<[u8; 32]>());
	let address = bs58::encode(key.verifying_key().as_bytes()).into_string();
	(key, address)
}

fn sign(key: &SigningKey, message: &[u8]) -> String {
	STANDARD.encode(key.sign(message).to_bytes())
}

#[test]
fn test_challenge_signed_by_wallet() {
	let (key, address) = wallet();
	let (_, other) = wallet();
	let challenge = ChallengeGenerator::default().generate(&address);
	let signature = sign(&key, challenge.message.as_bytes());
	let verifier = SolanaSignatureVerifier::new();

	assert!(verifier
		.verify_message(&address, &challenge.message, &signature)
		.unwrap());
	assert!(!verifier
		.verify_message(&other, &challenge.message, &signature)
		.unwrap());
}

#[test]
fn test_offchain_message() {
	let (key, address) = wallet();
	let mut signed = OFFCHAIN_MESSAGE_PREFIX.as_bytes().to_vec();
	signed.extend_from_slice(b"approve listing");
	let signature = sign(&key, &signed);

	assert!(SolanaSignatureVerifier::new()
		.verify_offchain_message(&address, "approve listing", &signature)
		.unwrap());
}

#[test]
fn test_multi_signature_all_must_verify() {
	let signers: Vec<(SigningKey, String)> = (0..3).map(|_| wallet()).collect();
	let message = b"2-of-3? no, 3-of-3";
	let addresses: Vec<&str> = signers.iter().map(|(_, a)| a.as_str()).collect();
	let mut signatures: Vec<String> = signers.iter().map(|(k, _)| sign(k, message)).collect();
	let verifier = SolanaSignatureVerifier::new();

	assert!(verifier
		.verify_multi_signature(&addresses, message, &signatures)
		.unwrap());

	signatures[2] = sign(&signers[2].0, b"something else");
	assert!(!verifier
		.verify_multi_signature(&addresses, message, &signatures)
		.unwrap());

	assert!(matches!(
		verifier.verify_multi_signature(&addresses[..2], message, &signatures),
		Err(SignatureError::ArityMismatch {
			addresses: 2,
			signatures: 3
		})
	));
}

#[test]
fn test_associated_token_account() {
	let (_, owner) = wallet();
	let (_, mint) = wallet();
	let verifier = SolanaSignatureVerifier::new();

	let ata = verifier.derive_token_account_address(&owner, &mint).unwrap();
	assert_eq!(ata, associated_token_address(&owner, &mint).unwrap());
	assert!(SolanaSignatureVerifier::is_valid_address(&ata));
	assert!(verifier.verify_token_account(&ata, &owner, &mint).unwrap());

	let (_, someone_else) = wallet();
	assert!(!verifier
		.verify_token_account(&ata, &someone_else, &mint)
		.unwrap());
}

#[test]
fn test_metadata_pda_round_trip() {
	let (_, mint) = wallet();
	let program = decode_pubkey(METADATA_PROGRAM_ID).unwrap();
	let mint_key = decode_pubkey(&mint).unwrap();

	let seeds = [b"metadata".as_slice(), program.as_ref(), mint_key.as_ref()];
	let (expected, _) = find_program_address(&seeds, &program).unwrap();
	assert_eq!(metadata_address(&mint).unwrap(), expected.to_string());

	let verifier = SolanaSignatureVerifier::new();
	assert!(verifier
		.verify_pda(&expected.to_string(), &seeds, METADATA_PROGRAM_ID)
		.unwrap());
	assert!(!verifier
		.verify_pda(&expected.to_string(), &seeds, TOKEN_PROGRAM_ID)
		.unwrap());
}

const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

#[test]
fn test_known_mainnet_addresses() {
	assert_eq!(
		metadata_address(USDC_MINT).unwrap(),
		"5x38Kp4hvdomTCnCrAny4UtMUt5rQBdB6px2K1Ui45Wq"
	);
	assert_eq!(
		associated_token_address("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM", USDC_MINT)
			.unwrap(),
		"FGETo8T8wMcN2wCjav8VK6eh3dLk63evNDPxzLSJra8B"
	);
}

#[test]
fn test_verify_pda_takes_seeds_without_bump() {
	let verifier = SolanaSignatureVerifier::new();
	let vault = "AispKP3Ls5d2m6t411kMtP1xkPemdZPGPJUvemsBqmXA";

	assert!(verifier
		.verify_pda(vault, &[b"vault".as_slice()], TOKEN_PROGRAM_ID)
		.unwrap());
	assert!(!verifier
		.verify_pda(vault, &[b"vault".as_slice(), &[254u8][..]], TOKEN_PROGRAM_ID)
		.unwrap());

	let program = decode_pubkey(TOKEN_PROGRAM_ID).unwrap();
	let (_, bump) = find_program_address(&[b"vault".as_slice()], &program).unwrap();
	assert_eq!(bump, 254);
}
