use std::io::Cursor;

use bytes::{Bytes, BytesMut};

use crate::cursor::{ReadCursor, WriteCursor};
use crate::decode::check_buffer_size;
use crate::decode::remainder::Remainder;
use crate::decode::state::DecodeState;
use crate::decode::transition::{write_fast_path_bytes, FAST_PATH_MIN_BYTES};
use crate::error::{PackingError, PackingResult};
use crate::word::WORD_BYTES;

/// Strategy for enlarging a full [`UnpackingTarget`].
///
/// An implementation must either add at least one word of space, keeping the
/// length a multiple of 8, or return an error.
pub trait Grow {
    /// Enlarges `buffer`, whose every byte is already written.
    fn grow(&mut self, buffer: &mut BytesMut) -> PackingResult<()>;
}

/// Never grows; a full target fails with
/// [`InsufficientCapacity`](PackingError::InsufficientCapacity).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGrowth;

impl Grow for NoGrowth {
    fn grow(&mut self, _buffer: &mut BytesMut) -> PackingResult<()> {
        Err(PackingError::InsufficientCapacity)
    }
}

/// Doubles the target each time it fills.
#[derive(Debug, Clone, Copy, Default)]
pub struct Doubling;

impl Grow for Doubling {
    fn grow(&mut self, buffer: &mut BytesMut) -> PackingResult<()> {
        let len = buffer.len();
        buffer.resize(len * 2, 0);
        Ok(())
    }
}

impl<F> Grow for F
where
    F: FnMut(&mut BytesMut) -> PackingResult<()>,
{
    fn grow(&mut self, buffer: &mut BytesMut) -> PackingResult<()> {
        self(buffer)
    }
}

/// Pre-sized output for a [`FinishUnpacker`].
#[derive(Debug)]
pub struct UnpackingTarget<G = NoGrowth> {
    buffer: BytesMut,
    written: usize,
    growth: G,
}

impl UnpackingTarget<NoGrowth> {
    /// Creates a target of `size` bytes that never grows.
    ///
    /// The size must be a non-zero multiple of 8.
    pub fn new(size: usize) -> PackingResult<UnpackingTarget<NoGrowth>> {
        UnpackingTarget::with_growth(size, NoGrowth)
    }
}

impl<G: Grow> UnpackingTarget<G> {
    /// Creates a target of `size` bytes that grows with `growth` when full.
    pub fn with_growth(size: usize, growth: G) -> PackingResult<UnpackingTarget<G>> {
        check_buffer_size(size)?;
        Ok(UnpackingTarget {
            buffer: BytesMut::zeroed(size),
            written: 0,
            growth,
        })
    }

    /// Number of unpacked bytes written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Current size of the target.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Makes sure at least one word of space is free.
    fn reserve(&mut self) -> PackingResult<()> {
        if self.written < self.buffer.len() {
            return Ok(());
        }
        let before = self.buffer.len();
        self.growth.grow(&mut self.buffer)?;
        let after = self.buffer.len();
        if after < before + WORD_BYTES || after % WORD_BYTES != 0 {
            return Err(PackingError::InsufficientCapacity);
        }
        log::debug!("unpacking target grew from {before} to {after} bytes");
        Ok(())
    }

    /// Runs `f` with a cursor positioned after the written bytes.
    fn with_cursor<R>(&mut self, f: impl FnOnce(&mut Cursor<&mut [u8]>) -> R) -> R {
        let mut unpacked = Cursor::new(&mut self.buffer[..]);
        unpacked.set_written(self.written);
        let result = f(&mut unpacked);
        self.written = unpacked.written();
        result
    }

    /// Drops the unused tail and returns the written bytes.
    fn finish(mut self) -> Bytes {
        self.buffer.truncate(self.written);
        self.buffer.freeze()
    }
}

/// One-shot decoder into an [`UnpackingTarget`].
///
/// Packed chunks passed to [`set`](FinishUnpacker::set) are consumed
/// immediately, so the caller may reuse them. [`finish`](FinishUnpacker::finish)
/// completes the decode and returns everything unpacked.
#[derive(Debug)]
pub struct FinishUnpacker<G = NoGrowth> {
    target: UnpackingTarget<G>,
    remainder: Remainder,
    state: DecodeState,
}

impl<G: Grow> FinishUnpacker<G> {
    /// Creates a decoder writing into `target`.
    pub fn new(target: UnpackingTarget<G>) -> FinishUnpacker<G> {
        FinishUnpacker {
            target,
            remainder: Remainder::new(),
            state: DecodeState::Start,
        }
    }

    /// Unpacks all of `packed`, holding back bytes that end mid-word.
    ///
    /// Fails with [`InsufficientCapacity`](PackingError::InsufficientCapacity)
    /// once the target is full and cannot grow.
    pub fn set(&mut self, packed: &[u8]) -> PackingResult<()> {
        let mut packed = Cursor::new(packed);
        while !self.remainder.is_synced() {
            self.target.reserve()?;
            let state = self.state;
            let remainder = &mut self.remainder;
            match self
                .target
                .with_cursor(|unpacked| remainder.sync(state, &mut packed, unpacked))
            {
                Some(state) => self.state = state,
                None => return Ok(()),
            }
        }

        while packed.remaining() >= FAST_PATH_MIN_BYTES {
            self.target.reserve()?;
            let state = self.state;
            self.state = self
                .target
                .with_cursor(|unpacked| write_fast_path_bytes(state, &mut packed, unpacked));
        }
        self.remainder.intern(&mut packed);
        Ok(())
    }

    /// Unpacks any held bytes and returns the unpacked data.
    ///
    /// Fails with [`MalformedStream`](PackingError::MalformedStream) if the
    /// packed data ended inside a tagged word or a verbatim range.
    pub fn finish(mut self) -> PackingResult<Bytes> {
        while !self.remainder.is_flushed(self.state) {
            self.target.reserve()?;
            let state = self.state;
            let remainder = &mut self.remainder;
            self.state = self
                .target
                .with_cursor(|unpacked| remainder.flush(state, unpacked))?;
        }
        Ok(self.target.finish())
    }
}
