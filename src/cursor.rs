use std::io::Cursor;

use crate::word::{Word, WORD_BYTES};

/// Read-side extension for `Cursor` over packed or unpacked bytes.
///
/// Methods that consume bytes assume the caller has checked [`remaining`]
/// first and panic on overrun, like slice indexing.
///
/// [`remaining`]: ReadCursor::remaining
pub trait ReadCursor {
    /// Current read offset.
    fn offset(&self) -> usize;
    /// Moves the read offset to `offset`.
    fn set_offset(&mut self, offset: usize);
    /// Number of unread bytes.
    fn remaining(&self) -> usize;
    /// Reads one byte and advances.
    fn read_u8(&mut self) -> u8;
    /// Reads `len` bytes and advances past them.
    fn read_slice(&mut self, len: usize) -> &[u8];
    /// Reads one word and advances past it.
    fn read_word(&mut self) -> Word;
    /// Returns the word at the read offset without advancing, if a whole word remains.
    fn peek_word(&self) -> Option<Word>;
    /// The next `len` bytes without advancing.
    fn window(&self, len: usize) -> &[u8];
    /// Bytes from `begin` up to the read offset.
    fn since(&self, begin: usize) -> &[u8];
}

impl<T: AsRef<[u8]>> ReadCursor for Cursor<T> {
    fn offset(&self) -> usize {
        self.position() as usize
    }

    fn set_offset(&mut self, offset: usize) {
        self.set_position(offset as u64);
    }

    fn remaining(&self) -> usize {
        self.get_ref().as_ref().len().saturating_sub(self.offset())
    }

    fn read_u8(&mut self) -> u8 {
        let i = self.offset();
        let byte = self.get_ref().as_ref()[i];
        self.set_offset(i + 1);
        byte
    }

    fn read_slice(&mut self, len: usize) -> &[u8] {
        let i = self.offset();
        self.set_offset(i + len);
        &self.get_ref().as_ref()[i..i + len]
    }

    fn read_word(&mut self) -> Word {
        let i = self.offset();
        let mut word = [0; WORD_BYTES];
        word.copy_from_slice(&self.get_ref().as_ref()[i..i + WORD_BYTES]);
        self.set_offset(i + WORD_BYTES);
        word
    }

    fn peek_word(&self) -> Option<Word> {
        let i = self.offset();
        let bytes = self.get_ref().as_ref().get(i..i + WORD_BYTES)?;
        let mut word = [0; WORD_BYTES];
        word.copy_from_slice(bytes);
        Some(word)
    }

    fn window(&self, len: usize) -> &[u8] {
        let i = self.offset();
        &self.get_ref().as_ref()[i..i + len]
    }

    fn since(&self, begin: usize) -> &[u8] {
        &self.get_ref().as_ref()[begin..self.offset()]
    }
}

/// Write-side extension for `Cursor` over an output buffer.
///
/// Writes never grow the buffer; callers check [`space`] first.
///
/// [`space`]: WriteCursor::space
pub trait WriteCursor {
    /// Number of bytes produced so far, i.e. the write offset.
    fn written(&self) -> usize;
    /// Moves the write offset to `offset`.
    fn set_written(&mut self, offset: usize);
    /// Number of bytes that can still be written.
    fn space(&self) -> usize;
    /// Writes one byte and advances.
    fn write_u8(&mut self, byte: u8);
    /// Copies `bytes` and advances past them.
    fn write_slice(&mut self, bytes: &[u8]);
    /// Writes `len` zero bytes and advances past them.
    fn write_zeros(&mut self, len: usize);
    /// Overwrites the byte at `index` without moving the offset.
    fn write_at(&mut self, index: usize, byte: u8);
}

impl WriteCursor for Cursor<&mut [u8]> {
    fn written(&self) -> usize {
        self.position() as usize
    }

    fn set_written(&mut self, offset: usize) {
        self.set_position(offset as u64);
    }

    fn space(&self) -> usize {
        self.get_ref().len().saturating_sub(self.written())
    }

    fn write_u8(&mut self, byte: u8) {
        let i = self.written();
        self.get_mut()[i] = byte;
        self.set_written(i + 1);
    }

    fn write_slice(&mut self, bytes: &[u8]) {
        let i = self.written();
        self.get_mut()[i..i + bytes.len()].copy_from_slice(bytes);
        self.set_written(i + bytes.len());
    }

    fn write_zeros(&mut self, len: usize) {
        let i = self.written();
        self.get_mut()[i..i + len].fill(0x00);
        self.set_written(i + len);
    }

    fn write_at(&mut self, index: usize, byte: u8) {
        self.get_mut()[index] = byte;
    }
}
