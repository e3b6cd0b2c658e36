//! Signature verification services.
//!
//! - `eip712`: typed structured data hashing
//! - `evm`: secp256k1 signer recovery for personal-sign and typed data
//! - `solana`: ed25519 verification and derived address checks
//! - `pda`: program derived address computation
//! - `challenge`: login challenge generation

mod challenge;
mod eip712;
mod error;
mod evm;
pub mod pda;
mod solana;

pub use challenge::ChallengeGenerator;
pub use eip712::{hash_typed_data, TypedDataEncoder};
pub use error::SignatureError;
pub use evm::{EvmSignatureVerifier, EVM_SIGNATURE_LENGTH};
pub use solana::{SolanaSignatureVerifier, OFFCHAIN_MESSAGE_PREFIX, SOLANA_SIGNATURE_LENGTH};
