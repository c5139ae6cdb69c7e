//! Reversible preprocessing
//!
//! Case folding and special-character dropping are lossy. Whitespace and
//! letter-run handling record every run they shorten, so a result that only
//! used those two can be restored exactly.

use crate::error::{Error, Result};
use std::iter::Peekable;
use std::ops::Range;
use std::str::Chars;

/// How whitespace runs are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WhitespaceMode {
    /// Leave whitespace untouched
    #[default]
    Preserve,
    /// Replace each run with one space and trim both ends (lossy)
    Collapse,
    /// Replace each run with one space and record the original run
    RunAware,
}

/// Caller-selected preprocessing steps
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PreprocessOptions {
    /// Fold to lowercase
    pub lowercase: bool,
    /// Replace each character that is neither alphanumeric nor whitespace
    /// with a space
    pub drop_specials: bool,
    /// Whitespace handling
    pub whitespace: WhitespaceMode,
    /// Shorten runs of one repeated ASCII letter to at most this many
    pub max_letter_repeat: Option<usize>,
}

impl PreprocessOptions {
    /// True when no step is enabled
    pub fn is_identity(&self) -> bool {
        !self.lowercase
            && !self.drop_specials
            && self.whitespace == WhitespaceMode::Preserve
            && matches!(self.max_letter_repeat, None | Some(0))
    }
}

/// A lossy step that changed the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LossyStep {
    Lowercase,
    DropSpecials,
    CollapseWhitespace,
}

/// A shortened run: `output` in the processed text stood for `original`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollapsedRun {
    pub output: Range<usize>,
    pub original: String,
}

impl CollapsedRun {
    /// Length of the original run in characters
    pub fn original_len(&self) -> usize {
        self.original.chars().count()
    }
}

/// Result of preprocessing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Preprocessed {
    /// Processed text, the input to segmentation
    pub text: String,
    /// Recorded runs in output order
    pub runs: Vec<CollapsedRun>,
    /// Lossy steps that altered the text
    pub lossy: Vec<LossyStep>,
}

impl Preprocessed {
    pub fn is_reversible(&self) -> bool {
        self.lossy.is_empty()
    }

    /// Rebuilds the text that was preprocessed
    pub fn restore(&self) -> Result<String> {
        if let Some(step) = self.lossy.first() {
            return Err(Error::NotReversible {
                reason: format!("{step:?} altered the input"),
            });
        }

        let mut restored = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for run in &self.runs {
            let prefix = self
                .text
                .get(cursor..run.output.start)
                .ok_or_else(|| Error::mismatch("collapsed run out of order"))?;
            restored.push_str(prefix);
            restored.push_str(&run.original);
            cursor = run.output.end;
        }
        let tail = self
            .text
            .get(cursor..)
            .ok_or_else(|| Error::mismatch("collapsed run past end of text"))?;
        restored.push_str(tail);

        Ok(restored)
    }
}

/// Applies the enabled steps in order: case folding, special dropping, then
/// whitespace and letter-run handling in a single pass
pub fn preprocess(text: &str, options: &PreprocessOptions) -> Preprocessed {
    let mut lossy = Vec::new();
    let mut current = text.to_string();

    if options.lowercase {
        let folded = current.to_lowercase();
        if folded != current {
            lossy.push(LossyStep::Lowercase);
        }
        current = folded;
    }

    if options.drop_specials {
        let dropped: String = current
            .chars()
            .map(|ch| {
                if ch.is_alphanumeric() || ch.is_whitespace() {
                    ch
                } else {
                    ' '
                }
            })
            .collect();
        if dropped != current {
            lossy.push(LossyStep::DropSpecials);
        }
        current = dropped;
    }

    let max_repeat = options.max_letter_repeat.filter(|&m| m > 0);
    let mut out = String::with_capacity(current.len());
    let mut runs = Vec::new();
    let mut chars = current.chars().peekable();
    let mut collapsed_lossy = false;

    while let Some(ch) = chars.next() {
        if ch.is_whitespace() && options.whitespace != WhitespaceMode::Preserve {
            let run = take_run(ch, &mut chars, char::is_whitespace);
            match options.whitespace {
                WhitespaceMode::Collapse => {
                    let at_edge = out.is_empty() || chars.peek().is_none();
                    if at_edge || run != " " {
                        collapsed_lossy = true;
                    }
                    if !at_edge {
                        out.push(' ');
                    }
                }
                WhitespaceMode::RunAware => {
                    if run != " " {
                        runs.push(CollapsedRun {
                            output: out.len()..out.len() + 1,
                            original: run,
                        });
                    }
                    out.push(' ');
                }
                WhitespaceMode::Preserve => out.push_str(&run),
            }
        } else if let (Some(max), true) = (max_repeat, ch.is_ascii_alphabetic()) {
            let run = take_run(ch, &mut chars, |c| c == ch);
            let keep = run.len().min(max);
            let start = out.len();
            out.extend(std::iter::repeat(ch).take(keep));
            if keep < run.len() {
                runs.push(CollapsedRun {
                    output: start..start + keep,
                    original: run,
                });
            }
        } else {
            out.push(ch);
        }
    }

    if collapsed_lossy {
        lossy.push(LossyStep::CollapseWhitespace);
    }

    Preprocessed {
        text: out,
        runs,
        lossy,
    }
}

fn take_run<F>(first: char, chars: &mut Peekable<Chars<'_>>, same: F) -> String
where
    F: Fn(char) -> bool,
{
    let mut run = String::from(first);
    while let Some(ch) = chars.next_if(|&c| same(c)) {
        run.push(ch);
    }
    run
}
