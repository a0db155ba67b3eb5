// error.rs - Error types for the grid engine and simulation clock

use thiserror::Error;

/// Errors raised by [`GridEngine`](crate::GridEngine) operations.
///
/// Both kinds are caller errors; the grid is left untouched when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimension { width: usize, height: usize },

    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("tick interval must be at least one millisecond")]
    ZeroInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = GridError::OutOfBounds { row: 100, col: 3, width: 100, height: 100 };
        assert_eq!(err.to_string(), "cell (100, 3) is outside the 100x100 grid");

        let err = GridError::InvalidDimension { width: 0, height: 5 };
        assert!(err.to_string().contains("0x5"));
    }
}
