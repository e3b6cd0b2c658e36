//! Solana specific data structures.
//!
//! Token accounts as returned by the SPL token program, and the two halves of
//! Metaplex NFT metadata: the on-chain metadata account and the off-chain JSON
//! document it points to.

mod metadata;
mod token;

pub use metadata::{
	MetadataAccount, MetadataAttribute, MetadataCollection, MetadataCreator, MetadataFile,
	MetadataProperties, MetaplexMetadata, OnChainCollection, OnChainCreator,
};
pub use token::TokenAccount;
