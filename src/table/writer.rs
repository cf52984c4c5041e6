//! Writing adjacency maps as text tables.

use std::io::Write;

use crate::error::Result;
use crate::graph::{AdjacencyMap, ForwardMap, ReverseMap};
use crate::table::{ENTRY_SEPARATOR, KEY_SEPARATOR};

/// Serializes adjacency maps line by line into any writer.
pub struct TableWriter<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        TableWriter { writer, lines: 0 }
    }

    /// Write whichever map `map` holds. Returns the number of lines written.
    pub fn write_map(&mut self, map: &AdjacencyMap) -> Result<usize> {
        match map {
            AdjacencyMap::Forward(map) => self.write_forward(map),
            AdjacencyMap::Reverse(map) => self.write_reverse(map),
        }
    }

    /// Write `word^n1;n2;...;` lines in map order.
    pub fn write_forward(&mut self, map: &ForwardMap) -> Result<usize> {
        let mut written = 0;
        for (word, neighbors) in map.iter() {
            self.write_line(word, neighbors, true)?;
            written += 1;
        }
        Ok(written)
    }

    /// Write `candidate^w1;w2;...` lines sorted by candidate.
    pub fn write_reverse(&mut self, map: &ReverseMap) -> Result<usize> {
        let mut written = 0;
        for (candidate, words) in map.sorted_entries() {
            self.write_line(candidate, words, false)?;
            written += 1;
        }
        Ok(written)
    }

    /// Write a single entry. Entries with an empty list are not written.
    pub fn write_line<S: AsRef<str>>(
        &mut self,
        key: &str,
        values: &[S],
        trailing_separator: bool,
    ) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        write!(self.writer, "{key}{KEY_SEPARATOR}")?;
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                write!(self.writer, "{ENTRY_SEPARATOR}")?;
            }
            self.writer.write_all(value.as_ref().as_bytes())?;
        }
        if trailing_separator {
            write!(self.writer, "{ENTRY_SEPARATOR}")?;
        }
        writeln!(self.writer)?;

        self.lines += 1;
        Ok(())
    }

    /// Total lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_forward_format_has_trailing_separator() {
        let mut map = ForwardMap::new();
        map.push("cat".to_string(), strings(&["bat", "cot", "cats"]));
        map.push("bat".to_string(), strings(&["cat"]));

        let mut writer = TableWriter::new(Vec::new());
        assert_eq!(writer.write_forward(&map).unwrap(), 2);
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();

        assert_eq!(output, "cat^bat;cot;cats;\nbat^cat;\n");
    }

    #[test]
    fn test_reverse_format_is_sorted_without_trailing_separator() {
        let mut map = ReverseMap::new();
        map.insert("cot".to_string(), "cat");
        map.insert("bat".to_string(), "cat");
        map.insert("bat".to_string(), "bot");

        let mut writer = TableWriter::new(Vec::new());
        assert_eq!(writer.write_map(&AdjacencyMap::Reverse(map)).unwrap(), 2);
        assert_eq!(writer.lines(), 2);
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();

        assert_eq!(output, "bat^cat;bot\ncot^cat\n");
    }

    #[test]
    fn test_empty_maps_write_nothing() {
        let mut writer = TableWriter::new(Vec::new());
        assert_eq!(writer.write_forward(&ForwardMap::new()).unwrap(), 0);
        assert_eq!(writer.write_reverse(&ReverseMap::new()).unwrap(), 0);
        assert!(writer.finish().unwrap().is_empty());
    }

    #[test]
    fn test_write_line_skips_empty_values() {
        let mut writer = TableWriter::new(Vec::new());
        writer.write_line::<&str>("lonely", &[], true).unwrap();
        assert_eq!(writer.lines(), 0);
    }
}
