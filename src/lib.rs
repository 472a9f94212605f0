//! Task Tracker — reminder completion tracking.
//!
//! Detects "done" phrases in chat messages (Spanish and English) and walks
//! reminder tasks through a pending → completed lifecycle with escalating
//! follow-ups for anything left sitting too long.

pub mod activity;
pub mod config;
pub mod detect;
pub mod error;
pub mod store;
pub mod tasks;
pub mod tracker;
