//! Command-line translation client for the MyMemory API, with a bounded
//! translation history and optional speech playback.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;
