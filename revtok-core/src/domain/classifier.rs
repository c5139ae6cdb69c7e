//! Character classification and script detection

/// Coarse class of a single character
///
/// Every segmenter and every chunk-boundary rule is expressed in terms of
/// these three classes, so they must stay in agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Alphanumeric in any script
    Word,
    /// Unicode whitespace
    Space,
    /// Everything else: punctuation, symbols, controls
    Punctuation,
}

impl CharClass {
    /// Classifies a character
    #[inline]
    pub fn of(ch: char) -> Self {
        if ch.is_alphanumeric() {
            CharClass::Word
        } else if ch.is_whitespace() {
            CharClass::Space
        } else {
            CharClass::Punctuation
        }
    }
}

/// Returns true for alphanumeric characters of any script
#[inline]
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

/// Dominant writing system of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Script {
    Latin,
    Cjk,
    Arabic,
    Cyrillic,
    Hebrew,
    Thai,
    Devanagari,
    /// Letters from a script not listed above
    Other,
    /// No letters at all
    Unknown,
}

impl Script {
    const COUNTED: [Script; 8] = [
        Script::Latin,
        Script::Cjk,
        Script::Arabic,
        Script::Cyrillic,
        Script::Hebrew,
        Script::Thai,
        Script::Devanagari,
        Script::Other,
    ];

    /// Script of a single character, if it is a letter
    pub fn of(ch: char) -> Option<Script> {
        if !ch.is_alphabetic() {
            return None;
        }
        let c = ch as u32;
        let script = match c {
            0x41..=0x5A | 0x61..=0x7A | 0xC0..=0x24F | 0x1E00..=0x1EFF => Script::Latin,
            0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x20000..=0x2A6DF
            | 0x3040..=0x309F
            | 0x30A0..=0x30FF
            | 0xAC00..=0xD7AF => Script::Cjk,
            0x0600..=0x06FF | 0x0750..=0x077F => Script::Arabic,
            0x0400..=0x052F => Script::Cyrillic,
            0x0590..=0x05FF => Script::Hebrew,
            0x0E00..=0x0E7F => Script::Thai,
            0x0900..=0x097F => Script::Devanagari,
            _ => Script::Other,
        };
        Some(script)
    }

    /// Detects the script with the most letters; ties go to the earlier
    /// script in declaration order.
    pub fn detect(text: &str) -> Script {
        let mut counts = [0usize; 8];
        for ch in text.chars() {
            if let Some(script) = Script::of(ch) {
                if let Some(slot) = Script::COUNTED.iter().position(|s| *s == script) {
                    counts[slot] += 1;
                }
            }
        }

        let mut best: Option<(usize, usize)> = None;
        for (slot, &count) in counts.iter().enumerate() {
            let better = match best {
                Some((_, current)) => count > current,
                None => count > 0,
            };
            if better {
                best = Some((slot, count));
            }
        }

        best.map_or(Script::Unknown, |(slot, _)| Script::COUNTED[slot])
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Cjk => "cjk",
            Script::Arabic => "arabic",
            Script::Cyrillic => "cyrillic",
            Script::Hebrew => "hebrew",
            Script::Thai => "thai",
            Script::Devanagari => "devanagari",
            Script::Other => "other",
            Script::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_classes() {
        assert_eq!(CharClass::of('a'), CharClass::Word);
        assert_eq!(CharClass::of('7'), CharClass::Word);
        assert_eq!(CharClass::of('世'), CharClass::Word);
        assert_eq!(CharClass::of('ж'), CharClass::Word);
        assert_eq!(CharClass::of('\t'), CharClass::Space);
        assert_eq!(CharClass::of('\u{3000}'), CharClass::Space);
        assert_eq!(CharClass::of('!'), CharClass::Punctuation);
        assert_eq!(CharClass::of('。'), CharClass::Punctuation);
        assert_eq!(CharClass::of('\0'), CharClass::Punctuation);
    }

    #[test]
    fn test_detect_script() {
        assert_eq!(Script::detect(""), Script::Unknown);
        assert_eq!(Script::detect("   !!"), Script::Unknown);
        assert_eq!(Script::detect("Hello, world"), Script::Latin);
        assert_eq!(Script::detect("こんにちは世界 hi"), Script::Cjk);
        assert_eq!(Script::detect("Привет мир"), Script::Cyrillic);
        assert_eq!(Script::detect("مرحبا"), Script::Arabic);
        assert_eq!(Script::detect("שלום"), Script::Hebrew);
        assert_eq!(Script::detect("สวัสดี"), Script::Thai);
        assert_eq!(Script::detect("नमस्ते"), Script::Devanagari);
        assert_eq!(Script::detect("Γειά"), Script::Other);
    }

    #[test]
    fn test_detect_tie_prefers_earlier_script() {
        assert_eq!(Script::detect("ab世界"), Script::Latin);
    }
}
