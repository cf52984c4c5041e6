//! Ordered character sets used for insertion and substitution edits.

use std::fmt;
use std::str::FromStr;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellGraphError};
use crate::table::{ENTRY_SEPARATOR, KEY_SEPARATOR};

/// The reference alphabet: lowercase ASCII letters.
pub const ALPHABET_EN: &str = "abcdefghijklmnopqrstuvwxyz";

/// An ordered sequence of distinct characters.
///
/// The order matters: candidates produced by insertion and substitution are
/// generated in alphabet order, which fixes the neighbor order written to the
/// tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    /// Create an alphabet from the characters of `letters`, in order.
    ///
    /// Fails when `letters` is empty, repeats a character, or contains one of
    /// the table separators (`^`, `;`), which are never escaped on output.
    pub fn new(letters: &str) -> Result<Self> {
        if letters.is_empty() {
            return Err(SpellGraphError::invalid_alphabet("alphabet is empty"));
        }

        let mut seen = AHashSet::with_capacity(letters.len());
        let mut chars = Vec::with_capacity(letters.len());
        for c in letters.chars() {
            if c == KEY_SEPARATOR || c == ENTRY_SEPARATOR {
                return Err(SpellGraphError::invalid_alphabet(format!(
                    "separator character '{c}' is not allowed"
                )));
            }
            if !seen.insert(c) {
                return Err(SpellGraphError::invalid_alphabet(format!(
                    "duplicate character '{c}'"
                )));
            }
            chars.push(c);
        }

        Ok(Alphabet { letters: chars })
    }

    /// The lowercase English alphabet `a`..=`z`.
    pub fn english() -> Self {
        Alphabet {
            letters: ALPHABET_EN.chars().collect(),
        }
    }

    /// Letters in generation order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.letters.contains(&c)
    }

    /// Whether every character of `word` belongs to this alphabet.
    pub fn covers(&self, word: &str) -> bool {
        word.chars().all(|c| self.contains(c))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.letters {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Alphabet {
    type Err = SpellGraphError;

    fn from_str(s: &str) -> Result<Self> {
        Alphabet::new(s)
    }
}

impl TryFrom<String> for Alphabet {
    type Error = SpellGraphError;

    fn try_from(value: String) -> Result<Self> {
        Alphabet::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_alphabet() {
        let alphabet = Alphabet::english();
        assert_eq!(alphabet.len(), 26);
        assert_eq!(alphabet.letters()[0], 'a');
        assert_eq!(alphabet.letters()[25], 'z');
        assert_eq!(alphabet.to_string(), ALPHABET_EN);
        assert_eq!(Alphabet::default(), alphabet);
    }

    #[test]
    fn test_custom_alphabet_keeps_order() {
        let alphabet: Alphabet = "zyx".parse().unwrap();
        assert_eq!(alphabet.letters(), &['z', 'y', 'x']);
        assert!(alphabet.covers("xyzzy"));
        assert!(!alphabet.covers("abc"));
    }

    #[test]
    fn test_non_ascii_alphabet() {
        let alphabet = Alphabet::new("äöü").unwrap();
        assert_eq!(alphabet.len(), 3);
        assert!(alphabet.contains('ö'));
    }

    #[test]
    fn test_invalid_alphabets() {
        assert!(matches!(
            Alphabet::new(""),
            Err(SpellGraphError::InvalidAlphabet(_))
        ));
        assert!(matches!(
            Alphabet::new("aba"),
            Err(SpellGraphError::InvalidAlphabet(_))
        ));
        assert!(matches!(
            Alphabet::new("ab^"),
            Err(SpellGraphError::InvalidAlphabet(_))
        ));
        assert!(matches!(
            Alphabet::new("a;b"),
            Err(SpellGraphError::InvalidAlphabet(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let alphabet = Alphabet::new("abc").unwrap();
        let json = serde_json::to_string(&alphabet).unwrap();
        assert_eq!(json, "\"abc\"");

        let parsed: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, alphabet);

        assert!(serde_json::from_str::<Alphabet>("\"aa\"").is_err());
    }
}
