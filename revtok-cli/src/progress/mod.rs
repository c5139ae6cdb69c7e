//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for multi-input commands
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize a progress bar over `total` inputs
    ///
    /// Single inputs get no bar.
    pub fn init(&mut self, total: u64, unit: &str) {
        if self.quiet || total < 2 {
            return;
        }

        let template = format!("[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {unit} {{msg}}");
        let style = match ProgressStyle::default_bar().template(&template) {
            Ok(style) => style.progress_chars("##-"),
            Err(e) => {
                log::debug!("progress template rejected: {e}");
                ProgressStyle::default_bar()
            }
        };

        let pb = ProgressBar::new(total);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a completed input
    pub fn completed(&self, name: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Processed: {name}"));
            pb.inc(1);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_has_no_bar() {
        let mut reporter = ProgressReporter::new(true);
        reporter.init(10, "files");
        assert!(reporter.progress_bar.is_none());
        reporter.completed("a.txt");
        reporter.finish();
    }

    #[test]
    fn test_single_input_has_no_bar() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init(1, "files");
        assert!(reporter.progress_bar.is_none());
    }

    #[test]
    fn test_bar_counts() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init(3, "files");
        reporter.completed("a");
        reporter.completed("b");
        assert_eq!(reporter.progress_bar.as_ref().unwrap().position(), 2);
        reporter.finish();
    }
}
