//! Fixed-window stream reading
//!
//! A [`Chunker`] wraps a byte stream and exposes the two read primitives the
//! delta algorithm needs: block-aligned reads of up to `window_size` bytes
//! and single-byte reads for resynchronisation. Clean end of stream is
//! reported as [`Error::EndOfStream`], distinct from any other I/O failure.

use crate::error::{Error, Result};
use std::io::{ErrorKind, Read};

/// A stateful, forward-only cursor over one underlying byte stream.
///
/// Each stream is consumed exactly once; there is no seeking or rewinding.
/// The chunker is therefore passed by value to the component that owns the
/// scan.
pub struct Chunker<R> {
    reader: R,
    window_size: usize,
}

impl<R: Read> Chunker<R> {
    /// Wrap a reader with the given block/window length
    pub fn new(reader: R, window_size: usize) -> Self {
        Self {
            reader,
            window_size,
        }
    }

    /// The fixed block length this chunker reads in
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Read the next block of up to `window_size` bytes.
    ///
    /// A short-but-nonzero read happens only at end of stream and is not an
    /// error: the partial buffer is returned. Zero remaining bytes yield
    /// `EndOfStream`.
    pub fn next_block(&mut self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; self.window_size];
        let filled = self.fill(&mut buf)?;
        if filled == 0 {
            return Err(Error::EndOfStream);
        }
        buf.truncate(filled);
        Ok(buf)
    }

    /// Read exactly one byte, or `EndOfStream` if none remain
    pub fn next_byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        if self.fill(&mut buf)? == 0 {
            return Err(Error::EndOfStream);
        }
        Ok(buf[0])
    }

    /// Fill `buf` as far as the stream allows, returning the byte count.
    /// Stops early only at end of stream; `Interrupted` reads are retried.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io("reading stream", e)),
            }
        }
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Read};

    #[test]
    fn test_block_boundaries() {
        // (input, window_size, expected blocks)
        let golden: &[(&str, usize, &[&[u8]])] = &[
            ("a", 1, &[b"a"]),
            ("ab", 2, &[b"ab"]),
            ("abcd", 4, &[b"abcd"]),
            ("abcdef", 2, &[b"ab", b"cd", b"ef"]),
            ("abcabc", 3, &[b"abc", b"abc"]),
            ("abcdefabc", 3, &[b"abc", b"def", b"abc"]),
        ];

        for (input, window, blocks) in golden {
            let mut data = input.to_string();
            data.push('x');
            let mut chunker = Chunker::new(data.as_bytes(), *window);
            for expected in *blocks {
                assert_eq!(chunker.next_block().unwrap(), *expected);
            }
            assert_eq!(chunker.next_byte().unwrap(), b'x');
            assert!(chunker.next_block().unwrap_err().is_end_of_stream());
        }
    }

    #[test]
    fn test_short_final_block() {
        let mut chunker = Chunker::new(&b"abcde"[..], 2);
        assert_eq!(chunker.next_block().unwrap(), b"ab");
        assert_eq!(chunker.next_block().unwrap(), b"cd");
        assert_eq!(chunker.next_block().unwrap(), b"e");
        assert!(chunker.next_block().unwrap_err().is_end_of_stream());
    }

    #[test]
    fn test_empty_stream() {
        let mut chunker = Chunker::new(&b""[..], 4);
        assert!(chunker.next_block().unwrap_err().is_end_of_stream());
        assert!(chunker.next_byte().unwrap_err().is_end_of_stream());
    }

    #[test]
    fn test_next_byte_sequence() {
        let mut chunker = Chunker::new(&b"xyz"[..], 8);
        assert_eq!(chunker.next_byte().unwrap(), b'x');
        assert_eq!(chunker.next_byte().unwrap(), b'y');
        assert_eq!(chunker.next_byte().unwrap(), b'z');
        assert!(chunker.next_byte().unwrap_err().is_end_of_stream());
    }

    /// Reader that fails after a few bytes
    struct FailingReader {
        remaining: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "device error"));
            }
            let n = self.remaining.min(buf.len());
            buf[..n].fill(0xAA);
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_io_error_is_not_eof() {
        let mut chunker = Chunker::new(FailingReader { remaining: 3 }, 8);
        let err = chunker.next_block().unwrap_err();
        assert!(!err.is_end_of_stream());
        assert!(matches!(err, Error::Io { .. }));
    }
}
