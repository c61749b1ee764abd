//! Strategies for combining a field present in several tables

use crate::{MergeError, Result};

/// Return the maximum value
pub fn max<T: Ord + Copy>(values: &[T]) -> Result<T> {
    values.iter().max().copied().ok_or(MergeError::NoFonts)
}

/// Return the minimum value
pub fn min<T: Ord + Copy>(values: &[T]) -> Result<T> {
    values.iter().min().copied().ok_or(MergeError::NoFonts)
}

/// Bitwise OR of all present values, `None` if no value is present
pub fn union(values: impl IntoIterator<Item = Option<u32>>) -> Option<u32> {
    values.into_iter().flatten().reduce(|a, b| a | b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_min() {
        assert_eq!(max(&[1, 5, 3]).unwrap(), 5);
        assert_eq!(min(&[1, 5, 3]).unwrap(), 1);
        assert!(max::<i16>(&[]).is_err());
    }

    #[test]
    fn test_union() {
        assert_eq!(union([Some(0b01), None, Some(0b10)]), Some(0b11));
        assert_eq!(union([None, None]), None);
    }
}
