// ABOUTME: Security validator - pure accept/reject checks for paths, commands,
// ABOUTME: regex patterns, SQL statements, URLs, and tool risk classification.

mod commands;
mod paths;
mod patterns;
mod risk;
mod sql;
mod urls;

pub use commands::*;
pub use paths::*;
pub use patterns::*;
pub use risk::*;
pub use sql::*;
pub use urls::*;
