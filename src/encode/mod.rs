//! Unpacked to packed.

mod state;
mod transform;

pub use state::{
    begin_verbatim_range, continue_verbatim_range, write_tagged_word, write_verbatim_range,
    write_zero_range, Continuation, EncodeState,
};
pub use transform::Packer;

/// Smallest accepted encoder buffer. A pending verbatim range needs its
/// reserved count byte plus 255 extra words.
pub const ENCODE_MIN_BUFFER_SIZE: usize = 2048;

/// Buffer size of [`Packer::default`].
pub const DEFAULT_ENCODE_BUFFER_SIZE: usize = 8192;
