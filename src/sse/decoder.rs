//! Incremental UTF-8 decoding for chunked response bodies.
//!
//! Network chunks can split a multi-byte character. The decoder holds the
//! incomplete tail back until the next chunk completes it. Bytes that can
//! never form a valid character are replaced with U+FFFD instead of
//! failing the stream.

/// Stateful bytes-to-text decoder.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode as much of `chunk` (plus any held-back bytes) as possible.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut out = String::with_capacity(self.pending.len());
        let mut consumed = 0;

        loop {
            let rest = &self.pending[consumed..];
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    consumed = self.pending.len();
                    break;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&rest[..valid_up_to]));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            consumed += valid_up_to + len;
                        }
                        None => {
                            // Incomplete sequence at the end, wait for more
                            consumed += valid_up_to;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..consumed);
        out
    }

    /// Flush held-back bytes at end of input.
    pub fn finish(&mut self) -> String {
        let tail = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ascii() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"hello"), "hello");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_decode_split_multibyte() {
        let bytes = "héllo 🌍".as_bytes();
        let mut decoder = Utf8Decoder::new();
        let mut out = String::new();
        for b in bytes {
            out.push_str(&decoder.decode(std::slice::from_ref(b)));
        }
        out.push_str(&decoder.finish());
        assert_eq!(out, "héllo 🌍");
    }

    #[test]
    fn test_decode_holds_incomplete_tail() {
        let euro = "€".as_bytes();
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(&euro[..2]), "");
        assert_eq!(decoder.decode(&euro[2..]), "€");
    }

    #[test]
    fn test_decode_invalid_bytes_replaced() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"a\xffb"), "a\u{FFFD}b");
    }

    #[test]
    fn test_finish_flushes_truncated_sequence() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(&"€".as_bytes()[..1]), "");
        assert_eq!(decoder.finish(), "\u{FFFD}");
        assert_eq!(decoder.finish(), "");
    }
}
