// ABOUTME: Root module for skillet - sandboxed skill execution for coding agents.
// ABOUTME: Re-exports all public types from submodules.

pub mod approval;
pub mod catalog;
pub mod config;
pub mod error;
pub mod host;
pub mod prelude;
pub mod sandbox;
pub mod security;
pub mod tool;
pub mod tools;

pub use error::SkilletError;
