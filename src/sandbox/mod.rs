// ABOUTME: Sandboxed execution engine - compiles skill source into a
// ABOUTME: CompiledSkill and runs it against a wall-clock deadline.

mod capabilities;
mod engine;
mod loader;

pub use capabilities::*;
pub use engine::*;
pub use loader::*;
