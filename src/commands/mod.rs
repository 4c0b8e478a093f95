//! Terminal command handlers (I/O boundary).

pub mod session;

pub use session::{run_session, SessionOutcome};
