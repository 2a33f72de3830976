use std::io::Cursor;

use crate::cursor::{ReadCursor, WriteCursor};
use crate::decode::state::{sync_bytes, write_zero_range, DecodeState};
use crate::decode::transition::{write_slow_word, FAST_PATH_MIN_BYTES};
use crate::error::{PackingError, PackingResult};

/// Capacity of the remainder: the most packed bytes a single step can need.
pub const REMAINDER_CAPACITY: usize = FAST_PATH_MIN_BYTES;

/// Packed bytes left over when the fast path stops short of a chunk's end.
///
/// After the fast path exits with fewer than [`FAST_PATH_MIN_BYTES`] bytes
/// left, the decoder [`intern`]s them here. On the next chunk, [`sync`] tops
/// the remainder up with just enough bytes for one slow-path step, which
/// leaves the packed cursor where the fast path can resume.
///
/// [`intern`]: Remainder::intern
/// [`sync`]: Remainder::sync
#[derive(Debug, Default)]
pub struct Remainder {
    buffer: [u8; REMAINDER_CAPACITY],
    end: usize,
}

impl Remainder {
    /// Creates an empty remainder.
    pub fn new() -> Remainder {
        Remainder::default()
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.end
    }

    /// True when no bytes are held.
    pub fn is_empty(&self) -> bool {
        self.end == 0
    }

    /// True when no step is pending across a chunk boundary.
    pub fn is_synced(&self) -> bool {
        self.is_empty()
    }

    /// True when nothing remains to decode and the decoder is quiescent.
    pub fn is_flushed(&self, state: DecodeState) -> bool {
        self.is_empty() && state == DecodeState::Start
    }

    /// Takes every unread byte of `packed`.
    pub fn intern(&mut self, packed: &mut impl ReadCursor) {
        debug_assert!(self.is_empty(), "interning over a pending remainder");
        let bytes = packed.read_slice(packed.remaining());
        self.buffer[..bytes.len()].copy_from_slice(bytes);
        self.end = bytes.len();
        if self.end > 0 {
            log::trace!("interned {} packed bytes", self.end);
        }
    }

    /// Unpacks one word purely from held bytes and shifts the rest down.
    fn tail(&mut self, state: DecodeState, unpacked: &mut impl WriteCursor) -> DecodeState {
        let mut held = Cursor::new(&self.buffer[..self.end]);
        let next = write_slow_word(state, &mut held, unpacked);
        let consumed = held.offset();
        self.buffer.copy_within(consumed..self.end, 0);
        self.end -= consumed;
        next
    }

    /// Makes progress on the pending step using held bytes first and `packed`
    /// bytes second.
    ///
    /// Returns `None` when the held bytes plus everything left in `packed`
    /// still fall short of a whole word; all of `packed` is then held.
    pub fn sync(
        &mut self,
        state: DecodeState,
        packed: &mut impl ReadCursor,
        unpacked: &mut impl WriteCursor,
    ) -> Option<DecodeState> {
        if let DecodeState::ZeroRange { byte_countdown } = state {
            return Some(write_zero_range(byte_countdown, unpacked));
        }

        let needed = sync_bytes(state, self.buffer[0]);
        if needed <= self.end {
            return Some(self.tail(state, unpacked));
        }

        let missing = needed - self.end;
        if missing <= packed.remaining() {
            self.buffer[self.end..needed].copy_from_slice(packed.read_slice(missing));
            let mut held = Cursor::new(&self.buffer[..needed]);
            let next = write_slow_word(state, &mut held, unpacked);
            self.end = 0;
            log::trace!("remainder synced with {missing} packed bytes");
            Some(next)
        } else {
            let rest = packed.read_slice(packed.remaining());
            self.buffer[self.end..self.end + rest.len()].copy_from_slice(rest);
            self.end += rest.len();
            None
        }
    }

    /// Makes progress once no more packed bytes will arrive.
    ///
    /// Fails if the held bytes cannot complete the pending word or range.
    pub fn flush(
        &mut self,
        state: DecodeState,
        unpacked: &mut impl WriteCursor,
    ) -> PackingResult<DecodeState> {
        if let DecodeState::ZeroRange { byte_countdown } = state {
            return Ok(write_zero_range(byte_countdown, unpacked));
        }
        if self.end > 0 && sync_bytes(state, self.buffer[0]) <= self.end {
            return Ok(self.tail(state, unpacked));
        }
        log::debug!(
            "packed data ended in {state:?} with {} remainder bytes",
            self.end
        );
        Err(PackingError::MalformedStream)
    }
}
