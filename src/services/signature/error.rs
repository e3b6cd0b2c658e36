//! Signature verification error types.
//!
//! Only malformed input ends up here. A well-formed signature that does not
//! belong to the claimed address is a normal negative result, not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignatureError {
	/// Address is not a valid EVM or Solana address
	#[error("Invalid address: {0}")]
	InvalidAddress(String),

	#[error("Invalid signature length: expected {expected} bytes, got {actual}")]
	InvalidSignatureLength { expected: usize, actual: usize },

	/// EVM recovery byte outside {0, 1, 27, 28}
	#[error("Invalid recovery id: {0}")]
	InvalidRecoveryId(u8),

	/// Hex, base58 or base64 decoding failed
	#[error("Invalid encoding: {0}")]
	InvalidEncoding(String),

	#[error("Arity mismatch: {addresses} addresses, {signatures} signatures")]
	ArityMismatch { addresses: usize, signatures: usize },

	#[error("Malformed typed data: {0}")]
	MalformedTypedData(String),

	#[error("Unsupported type: {0}")]
	UnsupportedType(String),

	/// Seeds cannot produce a program derived address
	#[error("Invalid seeds: {0}")]
	InvalidSeeds(String),
}

impl SignatureError {
	pub fn invalid_address(address: impl Into<String>) -> Self {
		let error = Self::InvalidAddress(address.into());
		log::error!("{}", error);
		error
	}

	pub fn invalid_length(expected: usize, actual: usize) -> Self {
		let error = Self::InvalidSignatureLength { expected, actual };
		log::error!("{}", error);
		error
	}

	pub fn invalid_encoding(msg: impl Into<String>) -> Self {
		let error = Self::InvalidEncoding(msg.into());
		log::error!("{}", error);
		error
	}

	pub fn malformed(msg: impl Into<String>) -> Self {
		let error = Self::MalformedTypedData(msg.into());
		log::error!("{}", error);
		error
	}

	pub fn unsupported(type_name: impl Into<String>) -> Self {
		let error = Self::UnsupportedType(type_name.into());
		log::error!("{}", error);
		error
	}
}
