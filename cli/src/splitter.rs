//! Fixed-size text splitter with overlap.
//!
//! Chunks are measured in characters. Overlap keeps context that straddles
//! a chunk boundary retrievable from either side.

/// Splits `text` into chunks of at most `chunk_size` characters, each chunk
/// sharing its first `overlap` characters with the end of the previous one.
///
/// An `overlap >= chunk_size` is treated as no overlap. Whitespace-only
/// chunks are dropped.
pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if chunk_size == 0 || text.is_empty() {
        return Vec::new();
    }
    let overlap = if overlap >= chunk_size { 0 } else { overlap };
    let step = chunk_size - overlap;

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        if !chunk.trim().is_empty() {
            chunks.push(chunk);
        }
        if end == chars.len() {
            break;
        }
        start += step;
    }
    chunks
}
