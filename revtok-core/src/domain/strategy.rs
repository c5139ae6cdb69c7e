//! Segmentation strategies
//!
//! The set of strategies is closed: every variant has exactly one segmenter
//! and one chunk-boundary rule, both dispatched through [`Strategy`].

use crate::domain::classifier::CharClass;
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// A named segmentation algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Maximal whitespace and non-whitespace runs
    Space,
    /// Maximal word runs, every other character on its own
    Word,
    /// One token per code point
    Char,
    /// Maximal word, punctuation and whitespace runs
    Grammar,
    /// Word runs cut into fixed-width pieces
    SubwordFixed,
    /// Word runs merged pairwise by in-run pair frequency
    SubwordBpe,
    /// Word runs cut after vowels
    SubwordSyllable,
    /// Word runs cut around their most repeated substrings
    SubwordFrequency,
    /// One token per raw byte
    Byte,
}

impl Strategy {
    /// Every strategy in declaration order
    pub const ALL: [Strategy; 9] = [
        Strategy::Space,
        Strategy::Word,
        Strategy::Char,
        Strategy::Grammar,
        Strategy::SubwordFixed,
        Strategy::SubwordBpe,
        Strategy::SubwordSyllable,
        Strategy::SubwordFrequency,
        Strategy::Byte,
    ];

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Space => "space",
            Strategy::Word => "word",
            Strategy::Char => "char",
            Strategy::Grammar => "grammar",
            Strategy::SubwordFixed => "subword_fixed",
            Strategy::SubwordBpe => "subword_bpe",
            Strategy::SubwordSyllable => "subword_syllable",
            Strategy::SubwordFrequency => "subword_frequency",
            Strategy::Byte => "byte",
        }
    }

    /// Stable one-byte tag mixed into content hashes
    pub fn tag(self) -> u8 {
        match self {
            Strategy::Space => 1,
            Strategy::Word => 2,
            Strategy::Char => 3,
            Strategy::Grammar => 4,
            Strategy::SubwordFixed => 5,
            Strategy::SubwordBpe => 6,
            Strategy::SubwordSyllable => 7,
            Strategy::SubwordFrequency => 8,
            Strategy::Byte => 9,
        }
    }

    /// Prime base used for compatibility digits
    pub fn prime_base(self) -> u64 {
        match self {
            Strategy::Space => 3,
            Strategy::Grammar => 5,
            Strategy::Word => 7,
            Strategy::Char => 11,
            Strategy::Byte => 13,
            Strategy::SubwordFixed => 17,
            Strategy::SubwordBpe => 19,
            Strategy::SubwordSyllable => 23,
            Strategy::SubwordFrequency => 29,
        }
    }

    /// Whether this strategy operates on raw bytes rather than decoded text
    pub fn is_byte_level(self) -> bool {
        matches!(self, Strategy::Byte)
    }

    /// Whether this strategy splits word runs into subword pieces
    pub fn is_subword(self) -> bool {
        matches!(
            self,
            Strategy::SubwordFixed
                | Strategy::SubwordBpe
                | Strategy::SubwordSyllable
                | Strategy::SubwordFrequency
        )
    }

    /// Returns true when a token boundary between `before` and `after` is
    /// forced by the two characters alone.
    ///
    /// A chunk cut placed at such a position yields the same tokens on both
    /// sides as a single pass over the whole text would.
    pub fn is_safe_cut(self, before: char, after: char) -> bool {
        let (a, b) = (CharClass::of(before), CharClass::of(after));
        match self {
            Strategy::Char | Strategy::Byte => true,
            Strategy::Space => (a == CharClass::Space) != (b == CharClass::Space),
            Strategy::Word => !(a == CharClass::Word && b == CharClass::Word),
            Strategy::Grammar => a != b,
            Strategy::SubwordFixed
            | Strategy::SubwordBpe
            | Strategy::SubwordSyllable
            | Strategy::SubwordFrequency => (a == CharClass::Word) != (b == CharClass::Word),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let strategy = match normalized.as_str() {
            "space" | "whitespace" => Strategy::Space,
            "word" => Strategy::Word,
            "char" | "character" => Strategy::Char,
            "grammar" => Strategy::Grammar,
            "subword" | "subword_fixed" | "fixed" => Strategy::SubwordFixed,
            "subword_bpe" | "bpe" => Strategy::SubwordBpe,
            "subword_syllable" | "syllable" => Strategy::SubwordSyllable,
            "subword_frequency" | "frequency" => Strategy::SubwordFrequency,
            "byte" => Strategy::Byte,
            _ => {
                return Err(Error::UnknownStrategy {
                    name: s.to_string(),
                })
            }
        };
        Ok(strategy)
    }
}
