// ABOUTME: Tool module - the dispatch unit, its result type, the registry,
// ABOUTME: and the adapter that exposes a skill as a tool.

mod registry;
mod result;
mod skill_tool;
mod traits;

pub use registry::*;
pub use result::*;
pub use skill_tool::*;
pub use traits::*;

#[cfg(test)]
mod registry_test;
