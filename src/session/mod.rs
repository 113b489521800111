//! Line-oriented console front end over the query engine.

pub mod prompt;
pub mod session;

pub use prompt::{Console, SessionError};
pub use session::{OutputFormat, Session, EXIT_TOKEN};
