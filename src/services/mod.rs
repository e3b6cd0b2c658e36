//! Core services implementing the verification engine.
//!
//! - `blockchain`: Chain transports, clients and the client manager
//! - `signature`: EVM and Solana signature verification
//! - `nft`: NFT ownership and metadata verification
//! - `gas`: Gas price monitoring and the transaction queue

pub mod blockchain;
pub mod gas;
pub mod nft;
pub mod signature;
