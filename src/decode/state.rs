use crate::cursor::WriteCursor;
use crate::word::{BIT_COUNT, VERBATIM, WORD_BYTES, ZERO};

/// Decoder state between tagged words.
///
/// Byte countdowns are always word aligned and never zero; a range whose
/// count byte is zero leaves the decoder in [`DecodeState::Start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeState {
    /// Expecting a tag byte.
    #[default]
    Start,
    /// `byte_countdown` zero bytes are still owed to the output.
    ZeroRange { byte_countdown: usize },
    /// `byte_countdown` raw bytes are still to be copied from input to output.
    VerbatimRange { byte_countdown: usize },
}

impl DecodeState {
    /// State following a range tag and its count byte.
    pub(crate) fn after_range(tag: u8, count: u8) -> DecodeState {
        let byte_countdown = usize::from(count) * WORD_BYTES;
        if byte_countdown == 0 {
            DecodeState::Start
        } else if tag == ZERO {
            DecodeState::ZeroRange { byte_countdown }
        } else {
            DecodeState::VerbatimRange { byte_countdown }
        }
    }
}

/// Minimum number of packed bytes that unpack to a whole word from `state`,
/// where `first` is the first pending packed byte.
///
/// From [`DecodeState::Start`] that is the tag, one byte per set bit, and the
/// count byte of a range tag. Never more than 10 bytes.
pub fn sync_bytes(state: DecodeState, first: u8) -> usize {
    match state {
        DecodeState::Start => {
            let bytes = 1 + usize::from(BIT_COUNT[first as usize]);
            if first == ZERO || first == VERBATIM {
                bytes + 1
            } else {
                bytes
            }
        }
        DecodeState::VerbatimRange { .. } => WORD_BYTES,
        // Zero ranges consume no packed bytes.
        DecodeState::ZeroRange { .. } => 0,
    }
}

/// Writes as much of a zero range as `unpacked` has room for.
pub fn write_zero_range(byte_countdown: usize, unpacked: &mut impl WriteCursor) -> DecodeState {
    let available = unpacked.space();
    if byte_countdown <= available {
        unpacked.write_zeros(byte_countdown);
        log::trace!("zero range of {byte_countdown} bytes complete");
        DecodeState::Start
    } else {
        unpacked.write_zeros(available);
        DecodeState::ZeroRange {
            byte_countdown: byte_countdown - available,
        }
    }
}
