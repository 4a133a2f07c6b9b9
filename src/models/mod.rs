//! API data models
//!
//! This module contains data structures for the relay's own HTTP surface
//! and for the OpenRouter chat-completion wire format.

pub mod draft;
pub mod openrouter;
