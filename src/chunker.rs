//! Splits document text into overlapping windows sized for a model context
//! budget. Each window after the first repeats the tail of its predecessor so
//! a statement straddling a boundary is still seen whole by at least one
//! request.

/// Maximum characters per chunk sent to the model.
pub const DEFAULT_CHUNK_SIZE: usize = 15_000;

/// Characters of the previous chunk repeated at the start of the next one.
pub const DEFAULT_CHUNK_OVERLAP: usize = 1_000;

/// Splits `text` into ordered chunks of at most `max_size` characters, each
/// chunk after the first starting `overlap` characters before the end of the
/// previous one. Pure function of its inputs; sizes are in characters, so
/// multi-byte input never splits mid-character.
///
/// Degenerate arguments are clamped: a zero `max_size` behaves as 1, and an
/// `overlap` of `max_size` or more is reduced so the windows still advance.
pub fn chunk_text(text: &str, max_size: usize, overlap: usize) -> Vec<String> {
    let max_size = max_size.max(1);
    let overlap = overlap.min(max_size - 1);

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + max_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start = end - overlap;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(chunks: &[String], overlap: usize) -> String {
        let mut text: String = chunks.first().cloned().unwrap_or_default();
        for chunk in &chunks[1..] {
            text.extend(chunk.chars().skip(overlap));
        }
        text
    }

    #[test]
    fn test_single_chunk_when_input_fits() {
        let text = "short document";
        let chunks = chunk_text(text, 100, 10);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn test_chunks_cover_input_with_overlap() {
        let text: String = ('a'..='z').cycle().take(1000).collect();
        let chunks = chunk_text(&text, 128, 32);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 128));
        assert_eq!(reassemble(&chunks, 32), text);
    }

    #[test]
    fn test_each_chunk_repeats_previous_tail() {
        let text: String = ('0'..='9').cycle().take(300).collect();
        let chunks = chunk_text(&text, 100, 20);

        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].chars().collect();
            let tail: String = prev[prev.len() - 20..].iter().collect();
            assert!(pair[1].starts_with(&tail));
        }
    }

    #[test]
    fn test_multibyte_input_does_not_split_characters() {
        let text: String = "数字と円記号¥".chars().cycle().take(500).collect();
        let chunks = chunk_text(&text, 64, 8);
        assert_eq!(reassemble(&chunks, 8), text);
    }

    #[test]
    fn test_degenerate_overlap_still_terminates() {
        let text = "abcdefghij";
        let chunks = chunk_text(text, 4, 10);
        assert!(chunks.len() >= 3);
        assert_eq!(reassemble(&chunks, 3), text);
    }

    #[test]
    fn test_empty_input_yields_one_empty_chunk() {
        assert_eq!(chunk_text("", 50, 5), vec![String::new()]);
    }
}
