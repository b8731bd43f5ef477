// ABOUTME: Approval gate - the contract for suspending high-risk tool
// ABOUTME: invocations until an operator confirms or denies.

mod handler;

pub use handler::*;
