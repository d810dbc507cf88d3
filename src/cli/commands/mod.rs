//! Command implementations.
//!
//! Each command has an `Args` struct parsed by clap and a `run` function.

pub mod convert;
pub mod detect;
pub mod explain;
pub mod score;

pub use convert::ConvertArgs;
pub use detect::DetectArgs;
pub use explain::ExplainArgs;
pub use score::ScoreArgs;
