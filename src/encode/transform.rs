use std::io::Cursor;

use bytes::Bytes;

use crate::cursor::{ReadCursor, WriteCursor};
use crate::encode::state::{
    begin_verbatim_range, continue_verbatim_range, write_tagged_word, write_verbatim_range,
    write_zero_range, Continuation, EncodeState,
};
use crate::encode::{DEFAULT_ENCODE_BUFFER_SIZE, ENCODE_MIN_BUFFER_SIZE};
use crate::error::{PackingError, PackingResult};
use crate::word::{VERBATIM, WORD_BYTES, ZERO};
use crate::Transform;

/// Packed bytes a word from [`EncodeState::Start`] may need: its tag, eight
/// payload bytes and a count byte.
const WORD_STEP_BYTES: usize = 2 + WORD_BYTES;

/// Streaming encoder from word-aligned chunks to packed chunks.
///
/// Output chunks concatenate to the same packed stream however the input is
/// split. A verbatim range that reaches the end of a chunk is held until its
/// end is seen, so `next` may return `None` before all of a chunk's words
/// have been emitted; they follow in later chunks or from
/// [`flush`](Transform::flush).
#[derive(Debug)]
pub struct Packer {
    buffer: Box<[u8]>,
    unpacked: Cursor<Bytes>,
    continuation: Option<Continuation>,
    state: EncodeState,
}

impl Packer {
    /// Creates an encoder with a `buffer_size` byte output buffer of at least
    /// [`ENCODE_MIN_BUFFER_SIZE`] bytes.
    pub fn new(buffer_size: usize) -> PackingResult<Packer> {
        if buffer_size < ENCODE_MIN_BUFFER_SIZE {
            return Err(PackingError::EncodeBufferTooSmall(buffer_size));
        }
        Ok(Packer::with_len(buffer_size))
    }

    fn with_len(buffer_size: usize) -> Packer {
        Packer {
            buffer: vec![0; buffer_size].into_boxed_slice(),
            unpacked: Cursor::new(Bytes::new()),
            continuation: None,
            state: EncodeState::Start,
        }
    }

    pub fn state(&self) -> EncodeState {
        self.state
    }

    pub fn continuation(&self) -> Option<Continuation> {
        self.continuation
    }

    /// True when no range is open and nothing is held for a continuation.
    pub fn is_quiescent(&self) -> bool {
        self.continuation.is_none() && self.state == EncodeState::Start
    }

    /// Packs into the buffer and returns the number of bytes produced, or
    /// `None` when the chunk is exhausted or a continuation is still pending.
    fn advance(&mut self) -> Option<usize> {
        let mut packed = Cursor::new(&mut self.buffer[..]);

        if let Some(continuation) = self.continuation {
            self.continuation = match continuation {
                Continuation::VerbatimRangeInitializing => {
                    packed.set_written(1);
                    packed.write_slice(self.unpacked.read_slice(self.unpacked.remaining()));
                    Some(Continuation::VerbatimRangeContinuing {
                        end: packed.written(),
                    })
                }
                Continuation::VerbatimRangeContinuing { end } => {
                    packed.set_written(end);
                    continue_verbatim_range(&mut self.unpacked, &mut packed)
                }
            };
            if self.continuation.is_some() {
                return None;
            }
        }

        while self.unpacked.remaining() > 0 {
            if packed.space() < WORD_STEP_BYTES {
                return Some(packed.written());
            }
            match self.state {
                EncodeState::Start => {
                    let word = self.unpacked.read_word();
                    let tag = write_tagged_word(&word, &mut packed);
                    if tag == ZERO {
                        self.state = write_zero_range(0, &mut self.unpacked, &mut packed);
                    } else if tag == VERBATIM {
                        match begin_verbatim_range(&mut self.unpacked, &mut packed) {
                            Some(state) => self.state = state,
                            None => {
                                log::trace!("verbatim range continues past the chunk");
                                self.continuation = Some(Continuation::VerbatimRangeInitializing);
                                return Some(packed.written());
                            }
                        }
                    }
                }
                EncodeState::ZeroRangeWriting { byte_count } => {
                    self.state = write_zero_range(byte_count, &mut self.unpacked, &mut packed);
                }
                EncodeState::VerbatimRangeWriting { byte_countdown } => {
                    self.state =
                        write_verbatim_range(byte_countdown, &mut self.unpacked, &mut packed);
                    if self.state != EncodeState::Start {
                        return Some(packed.written());
                    }
                }
            }
        }

        let written = packed.written();
        (written > 0).then_some(written)
    }

    /// Closes whatever range is open after the last chunk, returning the
    /// number of bytes produced.
    fn drain(&mut self) -> usize {
        debug_assert!(
            !matches!(self.state, EncodeState::VerbatimRangeWriting { .. }),
            "flush before the chunk was exhausted"
        );
        let mut packed = Cursor::new(&mut self.buffer[..]);
        match self.continuation.take() {
            Some(Continuation::VerbatimRangeInitializing) => {
                let rest = self.unpacked.read_slice(self.unpacked.remaining());
                packed.write_u8((rest.len() / WORD_BYTES) as u8);
                packed.write_slice(rest);
            }
            Some(Continuation::VerbatimRangeContinuing { end }) => {
                packed.write_u8(((end - 1) / WORD_BYTES) as u8);
                packed.set_written(end);
            }
            None => {
                if let EncodeState::ZeroRangeWriting { byte_count } = self.state {
                    packed.write_u8((byte_count / WORD_BYTES) as u8);
                    self.state = EncodeState::Start;
                }
            }
        }
        packed.written()
    }
}

impl Default for Packer {
    fn default() -> Self {
        Packer::with_len(DEFAULT_ENCODE_BUFFER_SIZE)
    }
}

impl Transform for Packer {
    /// Installs the next unpacked chunk, which must hold whole words.
    fn set(&mut self, chunk: Bytes) -> PackingResult<()> {
        if chunk.len() % WORD_BYTES != 0 {
            return Err(PackingError::UnalignedInput(chunk.len()));
        }
        debug_assert_eq!(self.unpacked.remaining(), 0, "previous chunk not exhausted");
        self.unpacked = Cursor::new(chunk);
        Ok(())
    }

    fn next(&mut self) -> Option<&[u8]> {
        let written = self.advance()?;
        Some(&self.buffer[..written])
    }

    /// Never fails.
    fn flush(&mut self) -> PackingResult<Option<&[u8]>> {
        let written = self.drain();
        Ok((written > 0).then_some(&self.buffer[..written]))
    }
}
