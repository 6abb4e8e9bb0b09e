//! Inline rich-text markers understood by the proposal renderer.
//!
//! The tags are matched verbatim downstream: `{b}…{/b}`, `{i}…{/i}`, `{u}…{/u}`.
//! Nothing here validates nesting or balance; the model is only instructed to
//! use them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Bold,
    Italic,
    Underline,
}

impl Marker {
    pub fn open(self) -> &'static str {
        match self {
            Marker::Bold => "{b}",
            Marker::Italic => "{i}",
            Marker::Underline => "{u}",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Marker::Bold => "{/b}",
            Marker::Italic => "{/i}",
            Marker::Underline => "{/u}",
        }
    }

    /// Wraps `text` in this marker's open/close pair.
    pub fn wrap(self, text: &str) -> String {
        format!("{}{}{}", self.open(), text, self.close())
    }
}

/// Opening-tag counts per marker kind found in a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerUsage {
    pub bold: usize,
    pub italic: usize,
    pub underline: usize,
}

impl MarkerUsage {
    pub fn scan(text: &str) -> Self {
        Self {
            bold: text.matches(Marker::Bold.open()).count(),
            italic: text.matches(Marker::Italic.open()).count(),
            underline: text.matches(Marker::Underline.open()).count(),
        }
    }

    pub fn total(&self) -> usize {
        self.bold + self.italic + self.underline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_tag_spellings() {
        assert_eq!(Marker::Bold.wrap("x"), "{b}x{/b}");
        assert_eq!(Marker::Italic.wrap("x"), "{i}x{/i}");
        assert_eq!(Marker::Underline.wrap("x"), "{u}x{/u}");
    }

    #[test]
    fn test_scan_counts_opening_tags_only() {
        let usage = MarkerUsage::scan("{b}R$ 10{/b} e {i}prazo{/i}, {b}entrega{/b} {u}hoje{/u}");
        assert_eq!(
            usage,
            MarkerUsage {
                bold: 2,
                italic: 1,
                underline: 1
            }
        );
        assert_eq!(usage.total(), 4);
    }

    #[test]
    fn test_scan_plain_text() {
        assert_eq!(MarkerUsage::scan("sem formatação").total(), 0);
    }
}
