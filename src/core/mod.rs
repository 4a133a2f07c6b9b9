//! Core application modules
//!
//! This module contains configuration, constants, logging, and the upstream
//! relay client.

pub mod config;
pub mod constants;
pub mod logging;
pub mod relay;
