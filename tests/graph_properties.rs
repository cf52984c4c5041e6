use std::io::Cursor;

use spellgraph::alphabet::Alphabet;
use spellgraph::graph::{GraphBuilder, GraphConfig, GraphMode};
use spellgraph::neighbor::NeighborGenerator;
use spellgraph::table::{SuggestionTable, TableWriter};
use spellgraph::vocabulary::Vocabulary;

fn sample_vocabulary() -> Vocabulary {
    Vocabulary::from_words([
        "a", "an", "and", "ant", "at", "ate", "bat", "bats", "cat", "cats", "coat", "cot", "eat",
        "tab", "tan", "tea",
    ])
}

fn builder(find_all: bool) -> GraphBuilder {
    GraphBuilder::new(
        Alphabet::english(),
        GraphConfig::default()
            .with_find_all(find_all)
            .with_threads(3),
    )
    .unwrap()
}

#[test]
fn test_vocabulary_neighbors_are_symmetric() {
    let vocabulary = sample_vocabulary();
    let map = builder(false).build_forward(&vocabulary);

    for (word, neighbors) in map.iter() {
        for neighbor in neighbors {
            let back = map
                .get(neighbor)
                .unwrap_or_else(|| panic!("{neighbor} has no entry but neighbors {word}"));
            assert!(
                back.iter().any(|w| w == word),
                "{word} -> {neighbor} is not mirrored"
            );
        }
    }
}

#[test]
fn test_no_word_is_its_own_neighbor() {
    let generator = NeighborGenerator::default();
    for word in ["a", "aa", "book", "letter", "mississippi"] {
        let closure = generator.closure(word);
        assert!(!closure.iter().any(|c| c == word), "{word} in its own closure");
    }
}

#[test]
fn test_closure_has_no_duplicates() {
    let generator = NeighborGenerator::default();
    for word in ["aa", "book", "letter"] {
        let closure = generator.closure(word);
        let mut unique = closure.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), closure.len(), "duplicates for {word}");
    }
}

#[test]
fn test_single_letter_words_never_become_empty() {
    let generator = NeighborGenerator::default();
    let closure = generator.closure("a");

    assert!(!closure.iter().any(String::is_empty));
    // 25 substitutions and 26 insertions on each side, minus "aa" counted twice
    assert_eq!(closure.len(), 25 + 26 + 26 - 1);
}

#[test]
fn test_transposition_of_two_letter_word() {
    let generator = NeighborGenerator::new(Alphabet::new("ab").unwrap());
    let closure = generator.closure("ab");

    assert!(closure.iter().any(|c| c == "ba"));
    assert!(closure.iter().any(|c| c == "a"));
    assert!(closure.iter().any(|c| c == "b"));
}

#[test]
fn test_closure_size_bound() {
    let generator = NeighborGenerator::default();
    let alphabet_len = generator.alphabet().len();

    for word in ["a", "at", "cat", "abcdefgh", "zzzzzz"] {
        let len = word.chars().count();
        let bound = (len + 1) * alphabet_len * 2 + len + len.saturating_sub(1);
        let size = generator.closure(word).len();
        assert!(size <= bound, "{word}: {size} > {bound}");
    }
}

#[test]
fn test_reverse_map_is_complete() {
    let vocabulary = sample_vocabulary();
    let builder = builder(true);
    let reverse = builder.build_reverse(&vocabulary);

    for word in vocabulary.iter() {
        for candidate in builder.generator().closure(word) {
            let words = reverse
                .get(&candidate)
                .unwrap_or_else(|| panic!("{candidate} missing from reverse map"));
            assert!(words.iter().any(|w| w == word));
        }
    }
}

#[test]
fn test_reverse_edges_match_forward_edges() {
    let vocabulary = sample_vocabulary();
    let builder = builder(true);

    let forward = builder.build(&vocabulary, GraphMode::Forward);
    let reverse = builder.build(&vocabulary, GraphMode::Reverse);

    assert_eq!(forward.edge_count(), reverse.edge_count());
}

#[test]
fn test_written_table_reads_back() {
    let vocabulary = sample_vocabulary();
    let map = builder(false).build_forward(&vocabulary);

    let mut writer = TableWriter::new(Vec::new());
    writer.write_forward(&map).unwrap();
    let bytes = writer.finish().unwrap();

    let table = SuggestionTable::load(Cursor::new(bytes)).unwrap();
    assert_eq!(table.len(), map.len());
    assert_eq!(table.malformed(), 0);
    for (word, neighbors) in map.iter() {
        assert_eq!(table.lookup(word), neighbors);
    }
}
