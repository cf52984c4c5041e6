//! One-edit neighbor generation.
//!
//! For a source word the generator enumerates every string reachable by a
//! single deletion, substitution, adjacent transposition or insertion, with
//! insertions and substitutions drawn from an [`Alphabet`]. Edits operate on
//! characters, not bytes.
//!
//! Candidates come out in a fixed order: positions ascending, and at each
//! position the deletion, the substitutions (alphabet order), the
//! transposition with the next character, then the insertions (alphabet
//! order). Duplicates and the source word itself are dropped.

use ahash::AHashSet;

use crate::alphabet::Alphabet;
use crate::vocabulary::WordSet;

/// Generates edit-distance-1 candidates for single words.
#[derive(Debug, Clone, Default)]
pub struct NeighborGenerator {
    alphabet: Alphabet,
}

impl NeighborGenerator {
    /// Create a generator over the given alphabet.
    pub fn new(alphabet: Alphabet) -> Self {
        NeighborGenerator { alphabet }
    }

    /// The alphabet used for insertions and substitutions.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// One-edit neighbors of `word`.
    ///
    /// With `find_all` every distinct candidate is returned; otherwise only
    /// candidates contained in `vocabulary`.
    pub fn neighbors<V>(&self, word: &str, vocabulary: &V, find_all: bool) -> Vec<String>
    where
        V: WordSet + ?Sized,
    {
        if find_all {
            self.generate(word, |_| true)
        } else {
            self.generate(word, |candidate| vocabulary.contains_word(candidate))
        }
    }

    /// The full one-edit closure of `word`, regardless of any vocabulary.
    pub fn closure(&self, word: &str) -> Vec<String> {
        self.generate(word, |_| true)
    }

    /// One-edit neighbors of `word` that are members of `vocabulary`.
    pub fn known_neighbors<V>(&self, word: &str, vocabulary: &V) -> Vec<String>
    where
        V: WordSet + ?Sized,
    {
        self.neighbors(word, vocabulary, false)
    }

    fn generate<F>(&self, word: &str, mut keep: F) -> Vec<String>
    where
        F: FnMut(&str) -> bool,
    {
        // Byte offsets of every char boundary, including the end of the word.
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(word.len()))
            .collect();
        let len = bounds.len() - 1;
        let letters = self.alphabet.letters();

        let mut seen: AHashSet<String> = AHashSet::with_capacity((len + 1) * letters.len() * 2);
        let mut result = Vec::new();

        let mut offer = |candidate: String| {
            if candidate == word || seen.contains(&candidate) {
                return;
            }
            if keep(&candidate) {
                seen.insert(candidate.clone());
                result.push(candidate);
            }
        };

        for pos in 0..=len {
            let head = &word[..bounds[pos]];

            if pos < len {
                let current = &word[bounds[pos]..bounds[pos + 1]];
                let tail = &word[bounds[pos + 1]..];

                // deletes; a single-char word would collapse to ""
                if len > 1 {
                    offer(join(head, "", tail));
                }

                // replaces
                for &c in letters {
                    if current.starts_with(c) {
                        continue;
                    }
                    offer(join_char(head, c, tail));
                }

                // transposes
                if pos + 2 <= len {
                    let next = &word[bounds[pos + 1]..bounds[pos + 2]];
                    let rest = &word[bounds[pos + 2]..];
                    let mut swapped = String::with_capacity(word.len());
                    swapped.push_str(head);
                    swapped.push_str(next);
                    swapped.push_str(current);
                    swapped.push_str(rest);
                    offer(swapped);
                }
            }

            // inserts
            let tail = &word[bounds[pos]..];
            for &c in letters {
                offer(join_char(head, c, tail));
            }
        }

        result
    }
}

#[inline]
fn join(head: &str, middle: &str, tail: &str) -> String {
    let mut s = String::with_capacity(head.len() + middle.len() + tail.len());
    s.push_str(head);
    s.push_str(middle);
    s.push_str(tail);
    s
}

#[inline]
fn join_char(head: &str, c: char, tail: &str) -> String {
    let mut s = String::with_capacity(head.len() + c.len_utf8() + tail.len());
    s.push_str(head);
    s.push(c);
    s.push_str(tail);
    s
}
