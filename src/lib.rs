pub mod best_effort;
pub mod cli;
pub mod error;
pub mod hints;
pub mod logging;
pub mod pty;
pub mod responder;
pub mod response;

pub use error::AutorespondError;
