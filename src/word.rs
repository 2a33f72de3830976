/// Number of bytes in a word, the atomic unit of unpacked data.
pub const WORD_BYTES: usize = 8;

/// One unpacked word.
pub type Word = [u8; WORD_BYTES];

/// Tag of an all-zero word. A count byte of additional zero words follows it.
pub const ZERO: u8 = 0x00;

/// Tag of a word without zero bytes. A count byte of additional raw words follows it.
pub const VERBATIM: u8 = 0xff;

/// Largest number of extra bytes a zero or verbatim range may cover: 255 words.
pub const MAX_RANGE_BYTES: usize = 0xff * WORD_BYTES;

/// Population count of every tag byte.
pub const BIT_COUNT: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = (i as u8).count_ones() as u8;
        i += 1;
    }
    table
};

/// Computes the tag of `word`: bit `i` is set iff byte `i` is non-zero.
///
/// A zero tag implies an all-zero word, and `BIT_COUNT[tag]` is the number
/// of non-zero bytes in the word.
#[inline]
pub fn compute_tag(word: &Word) -> u8 {
    u8::from(word[0] != 0)
        | u8::from(word[1] != 0) << 1
        | u8::from(word[2] != 0) << 2
        | u8::from(word[3] != 0) << 3
        | u8::from(word[4] != 0) << 4
        | u8::from(word[5] != 0) << 5
        | u8::from(word[6] != 0) << 6
        | u8::from(word[7] != 0) << 7
}

/// True if a word with this tag may extend a verbatim range: at least 7 of its
/// bytes are non-zero, so tagging it on its own saves nothing.
#[inline]
pub fn extends_verbatim(tag: u8) -> bool {
    BIT_COUNT[tag as usize] >= 7
}
