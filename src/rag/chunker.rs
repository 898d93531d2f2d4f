//! Overlapping text chunking for document ingestion.
//!
//! Splits source text into chunks of at most `chunk_size` characters, each
//! chunk after the first starting exactly `chunk_overlap` characters before
//! the end of its predecessor. Trimming the overlap and concatenating the
//! chunks reconstructs the input.

/// Candidate split points, tried in order of preference before a hard cut.
#[derive(Debug, Clone, Copy)]
enum Boundary {
    Paragraph,
    Sentence,
    Word,
}

impl Boundary {
    /// Whether position `at` (a split happens before `chars[at]`) lands on
    /// this kind of boundary.
    fn matches(&self, chars: &[char], at: usize) -> bool {
        match self {
            Boundary::Paragraph => at >= 2 && chars[at - 1] == '\n' && chars[at - 2] == '\n',
            Boundary::Sentence => {
                chars[at - 1] == '\n'
                    || (at >= 2
                        && matches!(chars[at - 2], '.' | '!' | '?')
                        && chars[at - 1].is_whitespace())
            }
            Boundary::Word => {
                chars[at - 1].is_whitespace()
                    || chars.get(at).is_some_and(|c| c.is_whitespace())
            }
        }
    }
}

pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Panics if `chunk_overlap >= chunk_size` or `chunk_size` is zero.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be positive");
        assert!(
            chunk_overlap < chunk_size,
            "chunk_overlap must be smaller than chunk_size"
        );
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Split `text` into overlapping chunks. Empty input yields no chunks;
    /// input of at most `chunk_size` characters yields a single chunk equal
    /// to the input. Deterministic, and operates on `char` boundaries.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }
        if chars.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;
        loop {
            let hard_end = usize::min(start + self.chunk_size, chars.len());
            let end = if hard_end == chars.len() {
                hard_end
            } else {
                self.break_point(&chars, start, hard_end)
            };
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start = end - self.chunk_overlap;
        }
        chunks
    }

    /// Find the latest natural break in `(start + overlap, hard_end]`,
    /// preferring paragraph, then sentence, then word boundaries. The lower
    /// bound keeps the next start strictly past the current one. Falls back
    /// to the hard character cut.
    fn break_point(&self, chars: &[char], start: usize, hard_end: usize) -> usize {
        let min_end = start + self.chunk_overlap + 1;
        for boundary in [Boundary::Paragraph, Boundary::Sentence, Boundary::Word] {
            let mut at = hard_end;
            while at >= min_end {
                if boundary.matches(chars, at) {
                    return at;
                }
                at -= 1;
            }
        }
        hard_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Undo the overlap and rebuild the original text.
    fn reassemble(chunks: &[String], overlap: usize) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(chunk);
            } else {
                out.extend(chunk.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunker = TextChunker::new(512, 100);
        assert!(chunker.split("").is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunker = TextChunker::new(512, 100);
        let chunks = chunker.split("The offside rule.");
        assert_eq!(chunks, vec!["The offside rule.".to_string()]);
    }

    #[test]
    fn test_chunks_respect_max_length() {
        let chunker = TextChunker::new(50, 10);
        let text = "word ".repeat(200);
        for chunk in chunker.split(&text) {
            assert!(chunk.chars().count() <= 50);
        }
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let chunker = TextChunker::new(50, 10);
        let text = "The ball is round. The game lasts ninety minutes. ".repeat(10);
        let chunks = chunker.split(&text);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].chars().collect();
            let next: Vec<char> = pair[1].chars().collect();
            let suffix: String = prev[prev.len() - 10..].iter().collect();
            let prefix: String = next[..10].iter().collect();
            assert_eq!(suffix, prefix);
        }
    }

    #[test]
    fn test_overlap_trimmed_concatenation_reconstructs_input() {
        let chunker = TextChunker::new(64, 16);
        let text = "Football, also called soccer, is a team sport played between two \
                    teams of eleven players. It is the world's most popular sport.\n\n\
                    The game is played on a rectangular pitch with a goal at each end. \
                    Nearly 250 million players play football in over 200 countries.";
        let chunks = chunker.split(text);
        assert!(chunks.len() > 1);
        assert_eq!(reassemble(&chunks, 16), text);
    }

    #[test]
    fn test_hard_cut_on_unbroken_text() {
        let chunker = TextChunker::new(20, 5);
        let text = "x".repeat(100);
        let chunks = chunker.split(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 20);
        }
        assert_eq!(reassemble(&chunks, 5), text);
    }

    #[test]
    fn test_split_is_deterministic() {
        let chunker = TextChunker::new(40, 8);
        let text = "Corner kicks are awarded when the ball crosses the goal line. ".repeat(5);
        assert_eq!(chunker.split(&text), chunker.split(&text));
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let chunker = TextChunker::new(10, 2);
        let text = "gól ".repeat(20);
        let chunks = chunker.split(&text);
        assert!(chunks.len() > 1);
        assert_eq!(reassemble(&chunks, 2), text);
    }

    #[test]
    fn test_prefers_natural_boundary_over_hard_cut() {
        let chunker = TextChunker::new(20, 5);
        let text = "Football is a sport. Teams compete to score goals.";
        let chunks = chunker.split(text);
        assert!(chunks.len() >= 2);
        // The first cut lands at the word boundary, not mid-"Teams".
        assert_eq!(chunks[0], "Football is a sport.");
    }
}
