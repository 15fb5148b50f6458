//! Bounded log of recent chat messages used to build prompts.

use std::collections::VecDeque;

use crate::config::ContextLimits;

/// One buffered chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    pub author: String,
    pub text: String,
}

impl ContextEntry {
    fn line(&self) -> String {
        format!("{}: {}", self.author, self.text)
    }
}

/// Ordered, bounded sequence of the most recent messages of one chat.
///
/// Appending past `max_entries` evicts the oldest entry. Rendering stops
/// before the entry that would push the output over `max_chars`, so the
/// rendered prompt never exceeds the cap no matter how large single
/// messages are.
#[derive(Debug, Clone)]
pub struct ContextBuffer {
    entries: VecDeque<ContextEntry>,
    limits: ContextLimits,
}

impl ContextBuffer {
    #[must_use]
    pub fn new(limits: ContextLimits) -> Self {
        Self {
            entries: VecDeque::with_capacity(limits.max_entries + 1),
            limits,
        }
    }

    pub fn append(&mut self, author: impl Into<String>, text: impl Into<String>) {
        self.entries.push_back(ContextEntry {
            author: author.into(),
            text: text.into(),
        });
        while self.entries.len() > self.limits.max_entries {
            self.entries.pop_front();
        }
    }

    /// Render entries oldest-first as `author: text` lines joined by `\n`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = String::new();
        let mut rendered_chars = 0_usize;

        for entry in &self.entries {
            let line = entry.line();
            let separator = usize::from(!rendered.is_empty());
            let line_chars = line.chars().count();
            if rendered_chars + separator + line_chars > self.limits.max_chars {
                break;
            }
            if separator == 1 {
                rendered.push('\n');
            }
            rendered.push_str(&line);
            rendered_chars += separator + line_chars;
        }

        rendered
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ContextEntry> {
        self.entries.iter()
    }
}

impl Default for ContextBuffer {
    fn default() -> Self {
        Self::new(ContextLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_past_ten_entries() {
        let mut buffer = ContextBuffer::default();
        for i in 0..25 {
            buffer.append("ana", format!("mensaje {i}"));
            assert!(buffer.len() <= 10);
        }

        let texts: Vec<_> = buffer.entries().map(|e| e.text.as_str()).collect();
        assert_eq!(texts.first(), Some(&"mensaje 15"));
        assert_eq!(texts.last(), Some(&"mensaje 24"));
    }

    #[test]
    fn renders_author_prefixed_lines() {
        let mut buffer = ContextBuffer::default();
        buffer.append("Ana", "hola");
        buffer.append("Luis", "qué tal");

        assert_eq!(buffer.render(), "Ana: hola\nLuis: qué tal");
    }

    #[test]
    fn render_never_exceeds_char_cap() {
        let mut buffer = ContextBuffer::default();
        for i in 0..10 {
            buffer.append(format!("user{i}"), "x".repeat(150 + i * 7));
        }

        let rendered = buffer.render();
        assert!(rendered.chars().count() <= 1000);
        assert!(rendered.starts_with("user0: "));
    }

    #[test]
    fn render_counts_characters_not_bytes() {
        let mut buffer = ContextBuffer::new(ContextLimits {
            max_entries: 10,
            max_chars: 12,
        });
        buffer.append("ñ", "ñandú ñu");

        assert_eq!(buffer.render(), "ñ: ñandú ñu");
    }

    #[test]
    fn oversized_first_entry_renders_empty() {
        let mut buffer = ContextBuffer::default();
        buffer.append("ana", "y".repeat(2000));
        buffer.append("luis", "corto");

        assert_eq!(buffer.render(), "");
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = ContextBuffer::default();
        buffer.append("ana", "hola");
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.render(), "");
    }
}
