//! EVM signature verification.
//!
//! Recovers the signer of a 65-byte `r || s || v` secp256k1 signature and
//! compares it with the claimed address. Personal-sign messages are hashed with
//! the EIP-191 prefix; typed data goes through [`TypedDataEncoder`].

use std::str::FromStr;

use alloy::primitives::{eip191_hash_message, Address, Signature, B256, U256};

use crate::{
	models::{TypedData, VerificationResult},
	services::signature::{SignatureError, TypedDataEncoder},
};

/// Length of an `r || s || v` signature
pub const EVM_SIGNATURE_LENGTH: usize = 65;

/// Verifies EVM personal-sign and typed-data signatures
#[derive(Debug, Clone, Copy, Default)]
pub struct EvmSignatureVerifier;

impl EvmSignatureVerifier {
	pub fn new() -> Self {
		Self
	}

	/// `0x` followed by 40 hex characters. Mixed-case input must carry a valid
	/// EIP-55 checksum.
	pub fn is_valid_address(address: &str) -> bool {
		let Some(hex) = address.strip_prefix("0x") else {
			return false;
		};
		if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
			return false;
		}

		let has_lower = hex.bytes().any(|b| b.is_ascii_lowercase());
		let has_upper = hex.bytes().any(|b| b.is_ascii_uppercase());
		if has_lower && has_upper {
			return Address::parse_checksummed(address, None).is_ok();
		}
		true
	}

	/// Parses a claimed address
	pub fn parse_address(address: &str) -> Result<Address, SignatureError> {
		if !Self::is_valid_address(address) {
			return Err(SignatureError::invalid_address(address));
		}
		Address::from_str(address).map_err(|_| SignatureError::invalid_address(address))
	}

	/// Decodes a hex signature, with or without `0x`
	pub fn decode_signature(signature: &str) -> Result<Vec<u8>, SignatureError> {
		hex::decode(signature.strip_prefix("0x").unwrap_or(signature))
			.map_err(|e| SignatureError::invalid_encoding(format!("signature: {}", e)))
	}

	/// Recovers the signer of `digest`.
	///
	/// Returns `Ok(None)` when the signature is well formed but no key can be
	/// recovered from it.
	pub fn recover(digest: &B256, signature: &[u8]) -> Result<Option<Address>, SignatureError> {
		if signature.len() != EVM_SIGNATURE_LENGTH {
			return Err(SignatureError::invalid_length(
				EVM_SIGNATURE_LENGTH,
				signature.len(),
			));
		}

		let y_parity = match signature[64] {
			0 | 27 => false,
			1 | 28 => true,
			v => {
				let error = SignatureError::InvalidRecoveryId(v);
				log::error!("{}", error);
				return Err(error);
			}
		};
		let r = U256::from_be_slice(&signature[..32]);
		let s = U256::from_be_slice(&signature[32..64]);

		match Signature::new(r, s, y_parity).recover_address_from_prehash(digest) {
			Ok(address) => Ok(Some(address)),
			Err(e) => {
				tracing::debug!(error = %e, "Signature recovery failed");
				Ok(None)
			}
		}
	}

	/// Checks that `signature` over `digest` was produced by `address`
	pub fn verify_digest(
		&self,
		address: &str,
		digest: &B256,
		signature: &[u8],
	) -> Result<VerificationResult, SignatureError> {
		let claimed = Self::parse_address(address)?;
		let recovered = Self::recover(digest, signature)?;

		match recovered {
			Some(signer) if signer == claimed => Ok(VerificationResult::verified(Some(signer))),
			other => {
				tracing::warn!(
					claimed = %claimed,
					recovered = ?other,
					"EVM signature does not match claimed address"
				);
				Ok(VerificationResult::rejected(other))
			}
		}
	}

	/// Verifies an EIP-191 personal-sign signature given as hex
	pub fn verify_personal_sign(
		&self,
		address: &str,
		message: impl AsRef<[u8]>,
		signature: &str,
	) -> Result<VerificationResult, SignatureError> {
		let signature = Self::decode_signature(signature)?;
		let digest = eip191_hash_message(message);
		self.verify_digest(address, &digest, &signature)
	}

	/// Verifies a typed-data signature given as hex
	pub fn verify_typed_data(
		&self,
		address: &str,
		typed_data: &TypedData,
		signature: &str,
	) -> Result<VerificationResult, SignatureError> {
		let signature = Self::decode_signature(signature)?;
		let digest = TypedDataEncoder::new(typed_data).hash()?;
		self.verify_digest(address, &digest, &signature)
	}
}
