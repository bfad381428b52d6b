use crate::error::{HeroError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORDS: [&str; 5] = ["create", "design", "develop", "innovate", "collaborate"];

/// Separator placed between words and between tiles.
pub const SEPARATOR: &str = " • ";

/// The words scrolling behind the hero, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MarqueeVocabulary {
    words: Vec<String>,
}

impl Default for MarqueeVocabulary {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for MarqueeVocabulary {
    type Error = HeroError;

    fn try_from(words: Vec<String>) -> Result<Self> {
        Self::new(words)
    }
}

impl From<MarqueeVocabulary> for Vec<String> {
    fn from(vocabulary: MarqueeVocabulary) -> Self {
        vocabulary.words
    }
}

impl MarqueeVocabulary {
    /// Validate a word list: at least one word, none blank, no repeats.
    /// Distinct words keep rows with different rotations distinct.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(HeroError::Content(
                "marquee vocabulary must contain at least one word".to_string(),
            ));
        }
        if let Some(blank) = words.iter().position(|w| w.trim().is_empty()) {
            return Err(HeroError::Content(format!(
                "marquee word #{blank} is blank"
            )));
        }
        for (index, word) in words.iter().enumerate() {
            if let Some(first) = words[..index].iter().position(|w| w.trim() == word.trim()) {
                return Err(HeroError::Content(format!(
                    "marquee word #{index} repeats word #{first} ({:?})",
                    word.trim()
                )));
            }
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Rotation applied to row `index`.
    pub fn rotation_offset(&self, index: usize) -> usize {
        index % self.words.len()
    }

    /// Words cyclically rotated left by `offset`.
    pub fn rotated(&self, offset: usize) -> Vec<&str> {
        let offset = offset % self.words.len();
        self.words[offset..]
            .iter()
            .chain(&self.words[..offset])
            .map(String::as_str)
            .collect()
    }

    /// Display text of one tile for row `index`.
    pub fn row_text(&self, index: usize) -> String {
        self.rotated(self.rotation_offset(index)).join(SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_row_two_rotation() {
        let vocabulary = MarqueeVocabulary::default();
        assert_eq!(
            vocabulary.rotated(2),
            vec!["develop", "innovate", "collaborate", "create", "design"]
        );
    }

    #[rstest]
    #[case(0, 5)]
    #[case(1, 6)]
    #[case(3, 13)]
    fn test_congruent_rows_match(#[case] i: usize, #[case] j: usize) {
        let vocabulary = MarqueeVocabulary::default();
        assert_eq!(vocabulary.row_text(i), vocabulary.row_text(j));
    }

    #[test]
    fn test_distinct_rows_differ() {
        let vocabulary = MarqueeVocabulary::default();
        for i in 0..5 {
            for j in 0..5 {
                if i != j {
                    assert_ne!(vocabulary.row_text(i), vocabulary.row_text(j));
                }
            }
        }
    }

    #[test]
    fn test_row_text_joins_with_bullets() {
        let vocabulary = MarqueeVocabulary::new(["a", "b", "c"]).unwrap();
        assert_eq!(vocabulary.row_text(1), "b • c • a");
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert!(matches!(
            MarqueeVocabulary::new(Vec::<String>::new()),
            Err(HeroError::Content(_))
        ));
        assert!(MarqueeVocabulary::new(["ok", "  "]).is_err());
    }

    #[rstest]
    #[case(&["ship", "build", "ship"])]
    #[case(&["ship", " ship "])]
    fn test_rejects_repeated_words(#[case] words: &[&str]) {
        let err = MarqueeVocabulary::new(words.iter().copied()).unwrap_err();
        assert!(err.to_string().contains("repeats"), "{err}");
    }

    #[test]
    fn test_distinct_custom_rows_differ() {
        let vocabulary = MarqueeVocabulary::new(["a", "b", "a b"]).unwrap();
        assert_ne!(vocabulary.row_text(0), vocabulary.row_text(1));
        assert_ne!(vocabulary.row_text(1), vocabulary.row_text(2));
        assert_eq!(vocabulary.row_text(0), vocabulary.row_text(3));
    }

    #[test]
    fn test_deserialize_validates() {
        let parsed: MarqueeVocabulary = serde_json::from_str(r#"["x","y"]"#).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(serde_json::from_str::<MarqueeVocabulary>("[]").is_err());
        assert!(serde_json::from_str::<MarqueeVocabulary>(r#"["x","x"]"#).is_err());
    }
}
