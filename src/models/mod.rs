//! Domain models and data structures for wallet and asset verification.
//!
//! This module contains all the core data structures used throughout the crate:
//!
//! - `blockchain`: Chain-family specific shapes (EVM typed data, Solana token and metadata)
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (ChainConfig, gas snapshots, queued transactions)

mod blockchain;
mod config;
mod core;

// Re-export blockchain types
pub use blockchain::{AssetRef, ChainFamily, TokenStandard};

pub use blockchain::evm::{
	TypedData, TypedDataDomain, TypedDataField, TypedDataTypes, EIP712_DOMAIN_TYPE,
};

pub use blockchain::solana::{
	MetadataAccount, MetadataAttribute, MetadataCollection, MetadataCreator, MetadataFile,
	MetadataProperties, MetaplexMetadata, OnChainCollection, OnChainCreator, TokenAccount,
};

// Re-export core types
pub use core::{
	ChainConfig, Challenge, GasPriceLevel, GasPriceSnapshot, GasTier, NativeCurrency,
	QueuedTransaction, TransactionStatus, VerificationResult,
};

// Re-export config types
pub use config::{ConfigError, ConfigLoader};
