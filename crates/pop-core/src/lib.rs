//! Pop Core - shared client logic for the Manhattan Pop! dashboard
//!
//! Target-independent building blocks used by the WebAssembly UI:
//!
//! - **Domain model** (`model`): entity records and wire DTOs exchanged
//!   with the remote REST API.
//! - **Cache ledger** (`cache`): single-flight bookkeeping, generation
//!   counters and invalidation semantics for the keyed request cache.
//! - **List state** (`listing`): pagination math and the single-armed
//!   delete-confirmation scalar.
//! - **Validation** (`validate`): declarative field rules, including the
//!   CPF check-digit algorithm.
//! - **Reports** (`report`): the paginated report document model with
//!   two-pass total-page substitution.
//! - **Formatting** (`format`): BRL currency, phone masks and date
//!   conversions for display.
//!
//! Nothing in this crate touches the browser; everything is exercised by
//! plain `cargo test`.

pub mod cache;
pub mod format;
pub mod lines;
pub mod listing;
pub mod model;
pub mod report;
pub mod validate;
