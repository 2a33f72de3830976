#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod adapters;
mod cursor;
mod error;
mod word;

/// Packed to unpacked: the state machine, its fast and slow paths, and both
/// decoding engines.
pub mod decode;
/// Unpacked to packed: the state machine with its range heuristics, and the
/// streaming engine.
pub mod encode;

pub use adapters::{decode_iter, encode_iter, finish_decode, pack, unpack, TransformIter};
pub use bytes::Bytes;
pub use cursor::{ReadCursor, WriteCursor};
pub use decode::{Doubling, FinishUnpacker, Grow, NoGrowth, Unpacker, UnpackingTarget};
pub use encode::Packer;
pub use error::{PackingError, PackingResult};
pub use word::{compute_tag, Word, BIT_COUNT, MAX_RANGE_BYTES, VERBATIM, WORD_BYTES, ZERO};

/// Pull interface shared by the streaming engines.
///
/// Engines own a fixed output buffer. Each call hands back a slice of it
/// that stays valid only until the following call, so callers copy or
/// consume it first.
///
/// A caller alternates between installing a chunk with [`set`] and calling
/// [`next`] until it returns `None`. After the last chunk, [`flush`] is called
/// until it returns `Ok(None)`.
///
/// [`set`]: Transform::set
/// [`next`]: Transform::next
/// [`flush`]: Transform::flush
pub trait Transform {
    /// Installs the next input chunk. The previous chunk must be exhausted.
    fn set(&mut self, chunk: Bytes) -> PackingResult<()>;

    /// Processes the installed chunk into the output buffer.
    ///
    /// Returns `None` once no more output can be produced from the chunk. A
    /// returned slice may be empty when input was consumed without
    /// completing any output.
    fn next(&mut self) -> Option<&[u8]>;

    /// Produces whatever output is held back once there is no more input.
    fn flush(&mut self) -> PackingResult<Option<&[u8]>>;
}
