//! Wallet and asset verification engine.
//!
//! Answers two questions for a user known only by a blockchain address: did the
//! holder of this address sign this message, and does this address hold this
//! NFT. Both EVM chains and Solana are supported.
//!
//! # Architecture
//! - Models: Chain configuration, typed data, token and metadata shapes
//! - Repositories: The chain registry
//! - Services: Chain clients, signature verification, NFT ownership, gas monitoring
//! - Utils: Logging, HTTP client construction, test builders
//!
//! # Flow
//! 1. Build a `ChainRegistry` and hand it to a `ChainClientManager`
//! 2. `add_chain` every chain the host needs
//! 3. Verify signatures with `EvmSignatureVerifier` / `SolanaSignatureVerifier`
//! 4. Check holdings with `NftOwnershipVerifier` and `MetaplexVerifier`
//! 5. Optionally run a `GasPriceMonitor` per EVM chain for fee estimates

pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
