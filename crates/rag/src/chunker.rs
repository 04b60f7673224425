//! Text chunking at word boundaries with a configurable size bound.

use webrag_core::{AppError, AppResult};

/// Split text into chunks of at most `max_size` characters.
///
/// Words are accumulated greedily, joined by single spaces; when the
/// next word would push the running chunk past `max_size` the chunk is
/// flushed and the word starts a new one. A single word longer than
/// `max_size` is emitted verbatim as its own chunk; words are never
/// split mid-way.
///
/// Joining the output with single spaces reproduces the word sequence
/// of the input.
pub fn chunk_text(text: &str, max_size: usize) -> AppResult<Vec<String>> {
    if max_size == 0 {
        return Err(AppError::InvalidInput(
            "chunk size must be positive".to_string(),
        ));
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars > max_size {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        } else {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_is_invalid() {
        let err = chunk_text("some text", 0).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(chunk_text("", 100).unwrap().is_empty());
        assert!(chunk_text("   ", 100).unwrap().is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = chunk_text("one two three", 100).unwrap();
        assert_eq!(chunks, vec!["one two three"]);
    }

    #[test]
    fn test_chunks_respect_size_bound() {
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let chunks = chunk_text(text, 12).unwrap();

        for chunk in &chunks {
            assert!(
                chunk.chars().count() <= 12,
                "chunk '{}' exceeds bound",
                chunk
            );
        }
    }

    #[test]
    fn test_joining_reproduces_word_sequence() {
        let text = "the quick  brown   fox jumps\nover the lazy dog";
        for size in [1, 5, 10, 17, 1000] {
            let chunks = chunk_text(text, size).unwrap();
            let rejoined = chunks.join(" ");
            let expected: Vec<&str> = text.split_whitespace().collect();
            let actual: Vec<&str> = rejoined.split_whitespace().collect();
            assert_eq!(actual, expected, "word sequence broken at size {}", size);
        }
    }

    #[test]
    fn test_oversized_word_stands_alone() {
        let chunks = chunk_text("a pneumonoultramicroscopic b", 5).unwrap();
        assert_eq!(chunks, vec!["a", "pneumonoultramicroscopic", "b"]);
    }

    #[test]
    fn test_flush_happens_before_overflow() {
        // "aa bb" fits in 5; adding "cc" would need 8
        let chunks = chunk_text("aa bb cc", 5).unwrap();
        assert_eq!(chunks, vec!["aa bb", "cc"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "repeatable output for identical input";
        assert_eq!(
            chunk_text(text, 9).unwrap(),
            chunk_text(text, 9).unwrap()
        );
    }

    #[test]
    fn test_multibyte_characters_counted_as_chars() {
        // Four two-byte chars per word; byte length would overflow a
        // bound of 9, char count must not.
        let chunks = chunk_text("éééé øøøø", 9).unwrap();
        assert_eq!(chunks, vec!["éééé øøøø"]);
    }
}
