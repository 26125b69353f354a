//! Utility functions and helpers.
//!
//! Encoding helpers shared by the client and the data types.

pub mod encoding;

// Re-export commonly used utilities
pub use encoding::{decode_content, encode_component};
