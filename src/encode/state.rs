use crate::cursor::{ReadCursor, WriteCursor};
use crate::word::{compute_tag, extends_verbatim, Word, MAX_RANGE_BYTES, WORD_BYTES, ZERO};

/// Encoder state between words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeState {
    /// Expecting the next word to tag.
    #[default]
    Start,
    /// A zero range has `byte_count` extra bytes so far and its end has not
    /// been seen; the count byte is still unwritten.
    ZeroRangeWriting { byte_count: usize },
    /// A verbatim range's count byte is written and `byte_countdown` of its
    /// raw bytes did not fit in the output.
    VerbatimRangeWriting { byte_countdown: usize },
}

/// Verbatim range whose end lies beyond the current unpacked chunk.
///
/// While a continuation is pending, byte 0 of the output buffer is reserved
/// for the range's count byte, and the main state stays at
/// [`EncodeState::Start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// The unpacked cursor sits on the range's first extra word, and every
    /// word up to the chunk's end belongs to the range.
    VerbatimRangeInitializing,
    /// Extra bytes occupy the output buffer up to `end`.
    VerbatimRangeContinuing { end: usize },
}

/// Writes the tag of `word` followed by its non-zero bytes, and returns the tag.
pub fn write_tagged_word(word: &Word, packed: &mut impl WriteCursor) -> u8 {
    let tag = compute_tag(word);
    packed.write_u8(tag);
    for &byte in word {
        if byte != 0 {
            packed.write_u8(byte);
        }
    }
    tag
}

/// Extends a zero range over the following zero words.
///
/// Writes the count byte once a non-zero word or the range limit is reached.
/// If the chunk runs out first, the range stays open.
pub fn write_zero_range(
    mut byte_count: usize,
    unpacked: &mut impl ReadCursor,
    packed: &mut impl WriteCursor,
) -> EncodeState {
    while let Some(word) = unpacked.peek_word() {
        if compute_tag(&word) == ZERO && byte_count < MAX_RANGE_BYTES {
            unpacked.set_offset(unpacked.offset() + WORD_BYTES);
            byte_count += WORD_BYTES;
        } else {
            packed.write_u8((byte_count / WORD_BYTES) as u8);
            log::trace!("zero range of {byte_count} extra bytes complete");
            return EncodeState::Start;
        }
    }
    EncodeState::ZeroRangeWriting { byte_count }
}

/// Copies up to `byte_countdown` raw bytes, stopping at a word boundary when
/// the output fills.
pub fn write_verbatim_range(
    byte_countdown: usize,
    unpacked: &mut impl ReadCursor,
    packed: &mut impl WriteCursor,
) -> EncodeState {
    let available = packed.space();
    if byte_countdown <= available {
        packed.write_slice(unpacked.read_slice(byte_countdown));
        EncodeState::Start
    } else {
        let whole_words = available - available % WORD_BYTES;
        packed.write_slice(unpacked.read_slice(whole_words));
        EncodeState::VerbatimRangeWriting {
            byte_countdown: byte_countdown - whole_words,
        }
    }
}

/// Looks for the end of the verbatim range following a `0xff` word.
///
/// If the range ends inside the chunk, its count byte and as many raw bytes
/// as fit are written. Otherwise nothing is written, the unpacked cursor is
/// left on the range's first extra word, and `None` is returned.
pub fn begin_verbatim_range(
    unpacked: &mut impl ReadCursor,
    packed: &mut impl WriteCursor,
) -> Option<EncodeState> {
    let begin = unpacked.offset();
    let mut byte_count = 0;
    while let Some(word) = unpacked.peek_word() {
        if extends_verbatim(compute_tag(&word)) && byte_count < MAX_RANGE_BYTES {
            unpacked.set_offset(unpacked.offset() + WORD_BYTES);
            byte_count += WORD_BYTES;
        } else {
            packed.write_u8((byte_count / WORD_BYTES) as u8);
            unpacked.set_offset(begin);
            let next = write_verbatim_range(byte_count, unpacked, packed);
            if next != EncodeState::Start {
                log::trace!("verbatim range of {byte_count} extra bytes entered {next:?}");
            }
            return Some(next);
        }
    }
    unpacked.set_offset(begin);
    None
}

/// Carries a pending verbatim range into a new chunk.
///
/// `packed` must be positioned at the continuation's end, with byte 0 reserved
/// for the count. Returns the continuation still pending, or `None` once the
/// range's end is found and the count byte is filled in.
pub fn continue_verbatim_range(
    unpacked: &mut impl ReadCursor,
    packed: &mut impl WriteCursor,
) -> Option<Continuation> {
    let begin = unpacked.offset();
    let mut byte_count = packed.written() - 1;
    while let Some(word) = unpacked.peek_word() {
        if extends_verbatim(compute_tag(&word)) && byte_count < MAX_RANGE_BYTES {
            unpacked.set_offset(unpacked.offset() + WORD_BYTES);
            byte_count += WORD_BYTES;
        } else {
            packed.write_at(0, (byte_count / WORD_BYTES) as u8);
            packed.write_slice(unpacked.since(begin));
            log::trace!("verbatim range of {byte_count} extra bytes resolved");
            return None;
        }
    }
    packed.write_slice(unpacked.since(begin));
    Some(Continuation::VerbatimRangeContinuing {
        end: packed.written(),
    })
}
