//! Gas price monitoring and transaction queueing.
//!
//! - `monitor`: background gas price polling per EVM chain
//! - `queue`: bounded FIFO of transactions with status tracking

mod error;
mod monitor;
mod queue;

pub use error::GasError;
pub use monitor::GasPriceMonitor;
pub use queue::TransactionQueue;
