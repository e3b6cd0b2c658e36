//! NFT ownership and metadata verification.
//!
//! - `cache`: the verification cache seam and an in-memory implementation
//! - `ownership`: ERC-721, ERC-1155 and SPL token ownership checks
//! - `metaplex`: Solana metadata, creator and collection checks

pub mod cache;
mod error;
mod metaplex;
mod ownership;

pub use cache::{InMemoryCache, VerificationCache};
pub use error::NftError;
pub use metaplex::{resolve_uri, MetaplexVerifier};
pub use ownership::NftOwnershipVerifier;
