//! Constants shared across services.

use std::time::Duration;

/// Interval between gas price polls
pub const DEFAULT_GAS_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Lifetime of a login challenge
pub const DEFAULT_CHALLENGE_TTL: Duration = Duration::from_secs(3600);

/// HTTPS gateway substituted for `ar://` URIs
pub const ARWEAVE_GATEWAY: &str = "https://arweave.net/";

/// HTTPS gateway substituted for `ipfs://` URIs
pub const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// SPL token program id
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Associated token account program id
pub const ASSOCIATED_TOKEN_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

/// Metaplex token metadata program id
pub const METADATA_PROGRAM_ID: &str = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s";

/// Default number of live entries in a transaction queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Default number of finished transactions a queue keeps for lookup
pub const DEFAULT_QUEUE_HISTORY: usize = 1_000;
