//! The two implementations of a decoder step.
//!
//! [`write_fast_path_bytes`] requires [`FAST_PATH_MIN_BYTES`] packed bytes and
//! unpacks a tagged word without testing the input bounds per byte.
//! [`write_slow_word`] requires only [`sync_bytes`] packed bytes and is what
//! the remainder uses near chunk boundaries. Both produce identical output.
//!
//! [`sync_bytes`]: super::state::sync_bytes

use crate::cursor::{ReadCursor, WriteCursor};
use crate::decode::state::{write_zero_range, DecodeState};
use crate::word::{Word, VERBATIM, WORD_BYTES, ZERO};

/// Packed bytes needed by the fast path: the worst case of a verbatim tag, its
/// eight payload bytes and its count byte.
pub const FAST_PATH_MIN_BYTES: usize = 10;

/// Unpacks from `state` given at least [`FAST_PATH_MIN_BYTES`] packed bytes.
///
/// `unpacked` must have room for at least one word.
pub fn write_fast_path_bytes(
    state: DecodeState,
    packed: &mut impl ReadCursor,
    unpacked: &mut impl WriteCursor,
) -> DecodeState {
    debug_assert!(packed.remaining() >= FAST_PATH_MIN_BYTES);
    debug_assert!(unpacked.space() >= WORD_BYTES);

    match state {
        DecodeState::Start => {
            let offset = packed.offset();
            let window = packed.window(FAST_PATH_MIN_BYTES);
            let tag = window[0];

            // Every output byte is written; absent bytes are masked to zero and
            // do not advance `j`.
            let mut word: Word = [0; WORD_BYTES];
            let mut j = 1;
            for (bit, byte) in word.iter_mut().enumerate() {
                let present = usize::from(tag >> bit & 1);
                *byte = window[j] & 0u8.wrapping_sub(present as u8);
                j += present;
            }
            // `j` is at most 9, so the count byte is still inside the window.
            let count = window[j];
            unpacked.write_slice(&word);

            if tag == ZERO || tag == VERBATIM {
                packed.set_offset(offset + j + 1);
                let next = DecodeState::after_range(tag, count);
                if next != DecodeState::Start {
                    log::trace!("fast path: tag {tag:#04x} entered {next:?}");
                }
                next
            } else {
                packed.set_offset(offset + j);
                DecodeState::Start
            }
        }
        DecodeState::ZeroRange { byte_countdown } => write_zero_range(byte_countdown, unpacked),
        DecodeState::VerbatimRange { byte_countdown } => {
            let remaining = packed.remaining();
            let available = unpacked.space();
            if byte_countdown <= remaining {
                if byte_countdown <= available {
                    unpacked.write_slice(packed.read_slice(byte_countdown));
                    log::trace!("fast path: verbatim range complete");
                    DecodeState::Start
                } else {
                    unpacked.write_slice(packed.read_slice(available));
                    DecodeState::VerbatimRange {
                        byte_countdown: byte_countdown - available,
                    }
                }
            } else if remaining < available {
                // The packed chunk ends inside the range. Stop at the last
                // word boundary; the remainder carries the partial word.
                let whole_words = remaining - remaining % WORD_BYTES;
                unpacked.write_slice(packed.read_slice(whole_words));
                DecodeState::VerbatimRange {
                    byte_countdown: byte_countdown - whole_words,
                }
            } else {
                unpacked.write_slice(packed.read_slice(available));
                DecodeState::VerbatimRange {
                    byte_countdown: byte_countdown - available,
                }
            }
        }
    }
}

/// Unpacks exactly one word from `state`.
///
/// `packed` must hold at least `sync_bytes(state, first)` bytes and `unpacked`
/// must have room for one word. A zero range is written like the fast path
/// does, since it consumes no packed bytes.
pub fn write_slow_word(
    state: DecodeState,
    packed: &mut impl ReadCursor,
    unpacked: &mut impl WriteCursor,
) -> DecodeState {
    debug_assert!(unpacked.space() >= WORD_BYTES);

    match state {
        DecodeState::Start => {
            let tag = packed.read_u8();
            let mut word: Word = [0; WORD_BYTES];
            for (bit, byte) in word.iter_mut().enumerate() {
                if tag & (1 << bit) != 0 {
                    *byte = packed.read_u8();
                }
            }
            unpacked.write_slice(&word);

            if tag == ZERO || tag == VERBATIM {
                let next = DecodeState::after_range(tag, packed.read_u8());
                if next != DecodeState::Start {
                    log::trace!("slow path: tag {tag:#04x} entered {next:?}");
                }
                next
            } else {
                DecodeState::Start
            }
        }
        DecodeState::ZeroRange { byte_countdown } => write_zero_range(byte_countdown, unpacked),
        DecodeState::VerbatimRange { byte_countdown } => {
            unpacked.write_slice(packed.read_slice(WORD_BYTES));
            let byte_countdown = byte_countdown - WORD_BYTES;
            if byte_countdown > 0 {
                DecodeState::VerbatimRange { byte_countdown }
            } else {
                log::trace!("slow path: verbatim range complete");
                DecodeState::Start
            }
        }
    }
}
