//! Core domain models for the verification engine.
//!
//! This module contains the fundamental data structures that represent:
//! - Chains: Supported chain definitions and connection details
//! - Gas: Gas price snapshots and derived price tiers
//! - Transactions: Entries of the fee-aware transaction queue
//! - Verification: Signature verification results and login challenges

mod chain;
mod gas;
mod transaction;
mod verification;

pub use chain::{ChainConfig, NativeCurrency};
pub use gas::{GasPriceLevel, GasPriceSnapshot, GasTier};
pub use transaction::{QueuedTransaction, TransactionStatus};
pub use verification::{Challenge, VerificationResult};
