//! Error types for the checked lane entry points
//!
//! The vector algebra itself never fails at run time. These errors only come
//! out of the `try_*` forms that validate caller-supplied slices, lane
//! indices and offsets before touching them.

use thiserror::Error;

/// Result type for checked lane operations
pub type Result<T> = std::result::Result<T, LaneError>;

/// Errors reported by the checked (`try_*`) lane operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LaneError {
    /// Slice holds fewer elements than the vector has lanes
    #[error("Slice too short: expected at least {expected} elements, got {actual}")]
    SliceTooShort {
        /// Lanes required
        expected: usize,
        /// Elements available
        actual: usize,
    },

    /// Lane index past the end of the vector or mask
    #[error("Lane {index} out of range for {lanes} lanes")]
    LaneOutOfRange {
        /// Requested lane
        index: usize,
        /// Lane count of the vector
        lanes: usize,
    },

    /// Address not aligned for an aligned load or store
    #[error("Address {address:#x} is not aligned to {alignment} bytes")]
    Misaligned {
        /// Offending address
        address: usize,
        /// Alignment the vector requires
        alignment: usize,
    },

    /// Gather/scatter offset past the end of the base slice
    #[error("Lane {lane} offset {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Lane carrying the offset
        lane: usize,
        /// Element offset held by that lane
        index: usize,
        /// Length of the base slice
        len: usize,
    },
}
