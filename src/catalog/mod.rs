// ABOUTME: Skill catalog - metadata block format and directory-backed storage
// ABOUTME: of skill source files.

mod meta;
mod store;

pub use meta::*;
pub use store::*;
