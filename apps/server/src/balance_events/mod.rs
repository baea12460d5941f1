//! Queued balance publishing for the web server.
//!
//! Services hand balance observations to [`QueuedBalancePublisher`], which
//! forwards them over a channel to a background worker that appends them to
//! the balance ledger. Requests never wait on the ledger.

mod publisher;
mod queue_worker;

pub use publisher::QueuedBalancePublisher;
