//! Solana signature verification.
//!
//! Addresses are base58 ed25519 public keys and signatures are base64. A
//! signature that does not verify is a plain `false`; only undecodable input
//! or a wrong signature length is reported as an error.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::services::signature::{
	pda::{associated_token_address, decode_pubkey, find_program_address},
	SignatureError,
};

/// Length of an ed25519 signature
pub const SOLANA_SIGNATURE_LENGTH: usize = 64;

/// Prepended to off-chain messages before signing
pub const OFFCHAIN_MESSAGE_PREFIX: &str = "solana offchain message:";

/// Verifies ed25519 signatures and derived Solana addresses
#[derive(Debug, Clone, Copy, Default)]
pub struct SolanaSignatureVerifier;

impl SolanaSignatureVerifier {
	pub fn new() -> Self {
		Self
	}

	/// Base58 string decoding to exactly 32 bytes
	pub fn is_valid_address(address: &str) -> bool {
		bs58::decode(address)
			.into_vec()
			.map(|bytes| bytes.len() == 32)
			.unwrap_or(false)
	}

	/// Decodes a base64 signature and checks its length
	pub fn decode_signature(signature: &str) -> Result<[u8; 64], SignatureError> {
		let bytes = STANDARD
			.decode(signature)
			.map_err(|e| SignatureError::invalid_encoding(format!("signature: {}", e)))?;
		<[u8; 64]>::try_from(bytes.as_slice())
			.map_err(|_| SignatureError::invalid_length(SOLANA_SIGNATURE_LENGTH, bytes.len()))
	}

	fn verify_bytes(
		&self,
		address: &str,
		message: &[u8],
		signature: &str,
	) -> Result<bool, SignatureError> {
		let public_key = decode_pubkey(address)?;
		let signature = Signature::from_bytes(&Self::decode_signature(signature)?);

		let key = match VerifyingKey::from_bytes(&public_key.to_bytes()) {
			Ok(key) => key,
			Err(_) => {
				tracing::warn!(address = %address, "Address is not an ed25519 public key");
				return Ok(false);
			}
		};

		let verified = key.verify(message, &signature).is_ok();
		if !verified {
			tracing::warn!(address = %address, "Solana signature does not match address");
		}
		Ok(verified)
	}

	/// Verifies `signature` over the raw message bytes
	pub fn verify_signature(
		&self,
		address: &str,
		message: impl AsRef<[u8]>,
		signature: &str,
	) -> Result<bool, SignatureError> {
		self.verify_bytes(address, message.as_ref(), signature)
	}

	pub fn verify_message(
		&self,
		address: &str,
		message: impl AsRef<[u8]>,
		signature: &str,
	) -> Result<bool, SignatureError> {
		self.verify_signature(address, message, signature)
	}

	/// Verifies a signature over `OFFCHAIN_MESSAGE_PREFIX || message`
	pub fn verify_offchain_message(
		&self,
		address: &str,
		message: impl AsRef<[u8]>,
		signature: &str,
	) -> Result<bool, SignatureError> {
		let mut prefixed = OFFCHAIN_MESSAGE_PREFIX.as_bytes().to_vec();
		prefixed.extend_from_slice(message.as_ref());
		self.verify_bytes(address, &prefixed, signature)
	}

	/// Verifies a signature over a serialized transaction message
	pub fn verify_transaction(
		&self,
		address: &str,
		transaction_message: &[u8],
		signature: &str,
	) -> Result<bool, SignatureError> {
		self.verify_bytes(address, transaction_message, signature)
	}

	/// Every `(address, signature)` pair must verify over the same message.
	///
	/// An empty set verifies nothing and yields `false`.
	pub fn verify_multi_signature<A, S>(
		&self,
		addresses: &[A],
		message: impl AsRef<[u8]>,
		signatures: &[S],
	) -> Result<bool, SignatureError>
	where
		A: AsRef<str>,
		S: AsRef<str>,
	{
		if addresses.len() != signatures.len() {
			let error = SignatureError::ArityMismatch {
				addresses: addresses.len(),
				signatures: signatures.len(),
			};
			log::error!("{}", error);
			return Err(error);
		}
		if addresses.is_empty() {
			tracing::warn!("Multi-signature check called without signers");
			return Ok(false);
		}

		let message = message.as_ref();
		for (address, signature) in addresses.iter().zip(signatures) {
			if !self.verify_bytes(address.as_ref(), message, signature.as_ref())? {
				return Ok(false);
			}
		}
		Ok(true)
	}

	/// Associated token account of `wallet` for `mint`
	pub fn derive_token_account_address(
		&self,
		wallet: &str,
		mint: &str,
	) -> Result<String, SignatureError> {
		associated_token_address(wallet, mint)
	}

	/// Whether `token_account` is the associated token account of `wallet` for `mint`
	pub fn verify_token_account(
		&self,
		token_account: &str,
		wallet: &str,
		mint: &str,
	) -> Result<bool, SignatureError> {
		decode_pubkey(token_account)?;
		Ok(associated_token_address(wallet, mint)? == token_account)
	}

	/// Whether `pda_address` is the program address found for `seeds`.
	///
	/// `seeds` are the logical seeds without a bump; the bump is searched the
	/// same way the owning program derives it.
	pub fn verify_pda(
		&self,
		pda_address: &str,
		seeds: &[&[u8]],
		program_id: &str,
	) -> Result<bool, SignatureError> {
		let expected = decode_pubkey(pda_address)?;
		let program = decode_pubkey(program_id)?;

		let (derived, bump) = find_program_address(seeds, &program)?;
		if derived != expected {
			tracing::debug!(pda = %expected, derived = %derived, bump, "PDA does not match seeds");
			return Ok(false);
		}
		Ok(true)
	}
}
