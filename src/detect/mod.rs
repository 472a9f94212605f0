//! Completion detection — phrase matching and resolution against pending tasks.

pub mod matcher;
pub mod resolver;

pub use matcher::CompletionMatcher;
pub use resolver::{Resolution, resolve};
