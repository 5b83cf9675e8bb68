//! Answer chunking for the Telegram message-length limit.

/// Telegram rejects messages longer than this many characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Splits `text` into chunks of at most `limit` characters.
///
/// Splits prefer line boundaries; a single line longer than the limit is
/// hard-split at character boundaries.
pub fn chunk_message(text: &str, limit: usize) -> Vec<String> {
    if limit == 0 || text.is_empty() {
        return vec![text.to_string()];
    }
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if count + line_len > limit && count > 0 {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        if line_len > limit {
            let mut buf = String::new();
            let mut n = 0usize;
            for ch in line.chars() {
                if n == limit {
                    chunks.push(std::mem::take(&mut buf));
                    n = 0;
                }
                buf.push(ch);
                n += 1;
            }
            current = buf;
            count = n;
        } else {
            current.push_str(line);
            count += line_len;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: text within the limit passes through as one chunk.
    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_message("hello", 10), vec!["hello".to_string()]);
    }

    /// **Scenario**: multi-line text splits at line boundaries under the limit.
    #[test]
    fn splits_at_line_boundaries() {
        let text = "aaaa\nbbbb\ncccc";
        let chunks = chunk_message(text, 10);
        assert_eq!(chunks, vec!["aaaa\nbbbb\n".to_string(), "cccc".to_string()]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
    }

    /// **Scenario**: one overlong line is hard-split at character boundaries
    /// and nothing is lost.
    #[test]
    fn hard_splits_overlong_line() {
        let text = "x".repeat(10_000);
        let chunks = chunk_message(&text, TELEGRAM_MESSAGE_LIMIT);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= TELEGRAM_MESSAGE_LIMIT));
        assert_eq!(chunks.concat(), text);
    }

    /// **Scenario**: multi-byte characters split on char boundaries, not bytes.
    #[test]
    fn multibyte_chars_split_safely() {
        let text = "é".repeat(20);
        let chunks = chunk_message(&text, 8);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.concat(), text);
    }
}
