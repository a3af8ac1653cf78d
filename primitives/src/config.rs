//! Guest configuration.

use crate::types::DEFAULT_MAX_LIST_LEN;

/// What a vector export writes when its inputs are rejected.
///
/// Rejections are empty inputs, mismatched lengths, null pointers with a
/// non-zero length, and lists above `GuestConfig::max_list_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidInputPolicy {
    /// Write `[null, 0]` into the return-area. Releasing it is a no-op.
    #[default]
    EmptyResult,

    /// Leave the return-area as the previous call left it.
    ///
    /// The caller must not read or release the record after a rejected call.
    LeaveUntouched,
}

/// Configuration for the WASM guest boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestConfig {
    /// Return-area handling for rejected vector inputs.
    pub invalid_input: InvalidInputPolicy,

    /// Maximum number of elements accepted in a single list argument.
    /// Default: the largest count whose byte size forms a valid layout.
    pub max_list_len: usize,
}

impl GuestConfig {
    pub fn with_invalid_input(mut self, policy: InvalidInputPolicy) -> Self {
        self.invalid_input = policy;
        self
    }

    pub fn with_max_list_len(mut self, max: usize) -> Self {
        self.max_list_len = max.min(DEFAULT_MAX_LIST_LEN);
        self
    }
}

impl Default for GuestConfig {
    fn default() -> Self {
        Self {
            invalid_input: InvalidInputPolicy::EmptyResult,
            max_list_len: DEFAULT_MAX_LIST_LEN,
        }
    }
}
