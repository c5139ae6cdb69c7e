//! Execution mode control for tokenization
//!
//! Sequential and parallel execution produce identical streams; the mode only
//! decides how much of the machine a call uses.

/// Represents the execution mode for segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExecutionMode {
    /// Single-threaded sequential processing
    Sequential,
    /// Multi-threaded parallel processing with optional thread count
    Parallel { threads: Option<usize> },
    /// Sequential below the parallel threshold, parallel above it
    #[default]
    Adaptive,
}

impl ExecutionMode {
    /// Determines the number of chunks to cut a text of `text_len` bytes into
    pub fn determine_thread_count(
        &self,
        text_len: usize,
        parallel_threshold: usize,
        chunk_size: usize,
    ) -> usize {
        match self {
            ExecutionMode::Sequential => 1,
            ExecutionMode::Parallel { threads: Some(n) } => (*n).max(1),
            ExecutionMode::Parallel { threads: None } => {
                Self::calculate_optimal_threads(text_len, chunk_size)
            }
            ExecutionMode::Adaptive => {
                if text_len < parallel_threshold {
                    1
                } else {
                    Self::calculate_optimal_threads(text_len, chunk_size)
                }
            }
        }
    }

    /// One thread per chunk, capped by available parallelism
    fn calculate_optimal_threads(text_len: usize, chunk_size: usize) -> usize {
        let available_parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        let size_based_threads = text_len.div_ceil(chunk_size.max(1)).max(1);
        size_based_threads.min(available_parallelism)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_mode() {
        let mode = ExecutionMode::Sequential;
        assert_eq!(mode.determine_thread_count(1_000_000, 100, 10), 1);
    }

    #[test]
    fn test_parallel_mode_with_threads() {
        let mode = ExecutionMode::Parallel { threads: Some(4) };
        assert_eq!(mode.determine_thread_count(10, 100_000, 50_000), 4);
    }

    #[test]
    fn test_adaptive_mode_small_text() {
        let mode = ExecutionMode::Adaptive;
        assert_eq!(mode.determine_thread_count(99_999, 100_000, 50_000), 1);
    }

    #[test]
    fn test_adaptive_mode_large_text() {
        let mode = ExecutionMode::Adaptive;
        let thread_count = mode.determine_thread_count(10_000_000, 100_000, 50_000);
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(thread_count, available.min(200));
    }
}
