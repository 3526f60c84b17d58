//! Text/binary sniffing.
//! Only a prefix of the file is inspected; callers read at most `SNIFF_LEN` bytes
//! before deciding whether to read the rest.

use content_inspector::inspect;

/// Number of leading bytes used to classify a file.
pub const SNIFF_LEN: usize = 1024;

/// True if `prefix` plausibly starts a text file (UTF-8/UTF-16/UTF-32, BOM or not).
pub fn looks_like_text(prefix: &[u8]) -> bool {
    let end = prefix.len().min(SNIFF_LEN);
    inspect(&prefix[..end]).is_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii_is_text() {
        assert!(looks_like_text(b"where are we?\n"));
        assert!(looks_like_text(b""));
    }

    #[test]
    fn nul_bytes_are_binary() {
        assert!(!looks_like_text(b"wh\x00\x01\x02\xff\xfe\x00"));
    }

    #[test]
    fn only_prefix_is_considered() {
        let mut data = vec![b'a'; SNIFF_LEN];
        data.extend_from_slice(b"\x00\x00\x00");
        assert!(looks_like_text(&data));
    }
}
