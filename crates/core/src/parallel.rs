//! Parallel batch processing.

use anyhow::{Result, bail};
use log::error;
use rayon::prelude::*;

/// Result of a parallel batch operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn ok_or_bail(&self, operation: &str) -> Result<()> {
        if self.failed > 0 {
            bail!("{operation} failed: {} succeeded, {} failed", self.succeeded, self.failed);
        }
        Ok(())
    }
}

/// Process items in parallel; one failing item does not stop the others.
pub fn process_parallel_iter<T, R, F>(
    label: &str,
    items: impl IntoIterator<Item = T>,
    op: F,
) -> BatchResult
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R> + Sync,
{
    let items: Vec<T> = items.into_iter().collect();
    let results: Vec<Result<R>> = items.into_par_iter().map(&op).collect();

    let mut result = BatchResult::default();
    for r in &results {
        if let Err(e) = r {
            error!("{e:?}");
            eprintln!("Error: {e:#}");
            result.failed += 1;
        } else {
            result.succeeded += 1;
        }
    }

    println!("{label}: {} succeeded, {} failed", result.succeeded, result.failed);
    result
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_failures_do_not_stop_batch() {
        let result = process_parallel_iter("Test", 0..10, |i| {
            if i % 3 == 0 { Err(anyhow!("item {i} failed")) } else { Ok(i) }
        });
        assert_eq!(result, BatchResult { succeeded: 6, failed: 4 });
        assert_eq!(result.total(), 10);
        assert!(!result.all_succeeded());
        assert!(result.ok_or_bail("Test").is_err());
    }

    #[test]
    fn test_all_succeeded() {
        let result = process_parallel_iter("Test", vec!["a", "b"], |s| Ok(s.len()));
        assert!(result.all_succeeded());
        assert!(result.ok_or_bail("Test").is_ok());
    }

    #[test]
    fn test_empty_batch() {
        let result = process_parallel_iter("Test", Vec::<u8>::new(), |_| Ok(()));
        assert_eq!(result.total(), 0);
        assert!(result.all_succeeded());
    }
}
