use std::io::Cursor;

use bytes::Bytes;

use crate::cursor::{ReadCursor, WriteCursor};
use crate::decode::remainder::Remainder;
use crate::decode::state::DecodeState;
use crate::decode::transition::{write_fast_path_bytes, FAST_PATH_MIN_BYTES};
use crate::decode::{check_buffer_size, DEFAULT_DECODE_BUFFER_SIZE};
use crate::error::PackingResult;
use crate::Transform;

/// Streaming decoder from packed chunks to word-aligned chunks.
///
/// After [`set`](Transform::set) installs a packed chunk, each
/// [`next`](Transform::next) call unpacks as much as fits in the decoder's
/// buffer. Once `next` returns `None`, either `set` another chunk or, after
/// the last one, call [`flush`](Transform::flush) until it returns `None`.
///
/// Every returned slice is overwritten by the following call.
#[derive(Debug)]
pub struct Unpacker {
    buffer: Box<[u8]>,
    packed: Cursor<Bytes>,
    remainder: Remainder,
    state: DecodeState,
}

impl Unpacker {
    /// Creates a decoder with a `buffer_size` byte output buffer.
    ///
    /// The size must be a non-zero multiple of 8.
    pub fn new(buffer_size: usize) -> PackingResult<Unpacker> {
        check_buffer_size(buffer_size)?;
        Ok(Unpacker::with_len(buffer_size))
    }

    fn with_len(buffer_size: usize) -> Unpacker {
        Unpacker {
            buffer: vec![0; buffer_size].into_boxed_slice(),
            packed: Cursor::new(Bytes::new()),
            remainder: Remainder::new(),
            state: DecodeState::Start,
        }
    }

    /// Current state of the decoder.
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// True when no packed bytes are held back and no range is in flight.
    pub fn is_quiescent(&self) -> bool {
        self.remainder.is_flushed(self.state)
    }

    /// Unpacks into the buffer and returns the number of bytes produced, or
    /// `None` once the installed chunk is exhausted.
    fn advance(&mut self) -> Option<usize> {
        if self.packed.remaining() == 0 {
            return None;
        }
        let mut unpacked = Cursor::new(&mut self.buffer[..]);

        while !self.remainder.is_synced() {
            match self
                .remainder
                .sync(self.state, &mut self.packed, &mut unpacked)
            {
                Some(state) => self.state = state,
                // The chunk went into the remainder without completing a word.
                None => return Some(unpacked.written()),
            }
            if unpacked.space() == 0 {
                // Held ranges can unpack to more than the buffer holds.
                return Some(unpacked.written());
            }
        }

        while self.packed.remaining() >= FAST_PATH_MIN_BYTES && unpacked.space() > 0 {
            self.state = write_fast_path_bytes(self.state, &mut self.packed, &mut unpacked);
        }
        if self.packed.remaining() < FAST_PATH_MIN_BYTES {
            self.remainder.intern(&mut self.packed);
        }
        Some(unpacked.written())
    }

    /// Unpacks held bytes after the last chunk, returning the number of bytes
    /// produced.
    fn drain(&mut self) -> PackingResult<usize> {
        let mut unpacked = Cursor::new(&mut self.buffer[..]);
        while !self.remainder.is_flushed(self.state) && unpacked.space() > 0 {
            self.state = self.remainder.flush(self.state, &mut unpacked)?;
        }
        Ok(unpacked.written())
    }
}

impl Default for Unpacker {
    fn default() -> Self {
        Unpacker::with_len(DEFAULT_DECODE_BUFFER_SIZE)
    }
}

impl Transform for Unpacker {
    /// Installs the next packed chunk. Any size is accepted, including empty.
    fn set(&mut self, chunk: Bytes) -> PackingResult<()> {
        debug_assert_eq!(self.packed.remaining(), 0, "previous chunk not exhausted");
        self.packed = Cursor::new(chunk);
        Ok(())
    }

    fn next(&mut self) -> Option<&[u8]> {
        let written = self.advance()?;
        Some(&self.buffer[..written])
    }

    /// Fails with [`MalformedStream`](crate::PackingError::MalformedStream) if
    /// the packed data ended inside a tagged word or a verbatim range. The
    /// decoder must not be used after an error.
    fn flush(&mut self) -> PackingResult<Option<&[u8]>> {
        let written = self.drain()?;
        Ok((written > 0).then_some(&self.buffer[..written]))
    }
}
