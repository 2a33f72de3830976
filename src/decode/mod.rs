//! Packed to unpacked.

mod finish;
mod remainder;
mod state;
mod transform;
mod transition;

pub use finish::{Doubling, FinishUnpacker, Grow, NoGrowth, UnpackingTarget};
pub use remainder::{Remainder, REMAINDER_CAPACITY};
pub use state::{sync_bytes, DecodeState};
pub use transform::Unpacker;
pub use transition::{write_fast_path_bytes, write_slow_word, FAST_PATH_MIN_BYTES};

use crate::error::{PackingError, PackingResult};
use crate::word::WORD_BYTES;

/// Smallest accepted decoder buffer: one word.
pub const DECODE_MIN_BUFFER_SIZE: usize = WORD_BYTES;

/// Buffer size of [`Unpacker::default`].
pub const DEFAULT_DECODE_BUFFER_SIZE: usize = 8192;

pub(crate) fn check_buffer_size(size: usize) -> PackingResult<()> {
    if size < DECODE_MIN_BUFFER_SIZE {
        Err(PackingError::DecodeBufferTooSmall(size))
    } else if size % WORD_BYTES != 0 {
        Err(PackingError::DecodeBufferMisaligned(size))
    } else {
        Ok(())
    }
}
