//! Constants shared across the relay

/// Message role constants
pub mod role {
    /// User role identifier
    pub const USER: &str = "user";
}

/// Fixed sampling temperature sent with every completion request
pub const SAMPLING_TEMPERATURE: f32 = 0.7;
