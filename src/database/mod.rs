//! Oracle access
//!
//! One connection, one statement, one full fetch. The fetch returns an
//! explicit [`FetchOutcome`] so the orchestrator can report a query failure
//! and exit cleanly instead of unwinding.

mod executor;

pub use executor::{load_query, FetchOutcome, QueryExecutor};
