//! Line tokenization of raw OCR text.

use tracing::trace;

/// Non-empty, trimmed lines of OCR text in their original order.
///
/// Adjacency matters: a label line is usually followed by its value line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence<'a> {
    lines: Vec<&'a str>,
}

impl<'a> LineSequence<'a> {
    /// Split text on line breaks, trim each line and drop empty ones.
    pub fn from_text(text: &'a str) -> Self {
        let lines: Vec<&str> = text
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        trace!("Detected {} lines", lines.len());
        for (index, line) in lines.iter().enumerate() {
            trace!("  {}: {:?}", index, line);
        }

        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.lines.iter().copied()
    }

    /// Index of the first line matching the predicate.
    pub fn position(&self, mut predicate: impl FnMut(&str) -> bool) -> Option<usize> {
        self.lines.iter().position(|l| predicate(l))
    }

    /// The line right after the first line matching the predicate.
    pub fn after(&self, predicate: impl FnMut(&str) -> bool) -> Option<(usize, &'a str)> {
        let index = self.position(predicate)?;
        self.get(index + 1).map(|line| (index, line))
    }
}

/// Raw OCR text together with its line sequence.
///
/// Built once per extraction call and shared by every field rule.
#[derive(Debug, Clone)]
pub struct DocumentText<'a> {
    raw: &'a str,
    lines: LineSequence<'a>,
}

impl<'a> DocumentText<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lines: LineSequence::from_text(raw),
        }
    }

    /// The unprocessed text, for layout-tolerant regex scans.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The line sequence, for label-adjacency rules.
    pub fn lines(&self) -> &LineSequence<'a> {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_trims_and_drops_empty() {
        let lines = LineSequence::from_text("  Apellido / Surname \r\n\n   \nGONZALEZ\n");
        assert_eq!(lines.iter().collect::<Vec<_>>(), vec!["Apellido / Surname", "GONZALEZ"]);
    }

    #[test]
    fn test_empty_text() {
        let lines = LineSequence::from_text("");
        assert!(lines.is_empty());
        assert_eq!(lines.get(0), None);
    }

    #[test]
    fn test_after_returns_next_line() {
        let lines = LineSequence::from_text("a\nb\nc");
        assert_eq!(lines.after(|l| l == "b"), Some((1, "c")));
        assert_eq!(lines.after(|l| l == "c"), None);
        assert_eq!(lines.after(|l| l == "z"), None);
    }
}
