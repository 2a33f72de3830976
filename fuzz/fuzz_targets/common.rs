#![allow(dead_code)]

use wordpack::{Bytes, PackingResult, Transform};

/// Debug view of a byte buffer that prints at most the first few bytes.
pub struct HexSlice<'a>(pub &'a [u8]);

impl std::fmt::Debug for HexSlice<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const MAX: usize = 40;

        let total = self.0.len();
        let shown = total.min(MAX);

        let mut list = f.debug_list();

        for v in &self.0[..shown] {
            list.entry(&format_args!("{v:#04x}"));
        }

        if total > MAX {
            list.entry(&format_args!(".. out of {total} total"));
        }

        list.finish()
    }
}

/// Cuts `data` at the given lengths, each rounded down to a multiple of
/// `align`; whatever is left over becomes the last chunk.
pub fn cut(data: &[u8], lengths: &[u16], align: usize) -> Vec<Bytes> {
    let mut chunks = Vec::with_capacity(lengths.len() + 1);
    let mut rest = data;
    for &len in lengths {
        let len = (usize::from(len) / align * align).min(rest.len());
        let (head, tail) = rest.split_at(len);
        chunks.push(Bytes::copy_from_slice(head));
        rest = tail;
    }
    chunks.push(Bytes::copy_from_slice(rest));
    chunks
}

/// Drives `core` over `chunks` and concatenates the output.
pub fn run<T: Transform>(core: &mut T, chunks: Vec<Bytes>) -> PackingResult<Vec<u8>> {
    let mut out = Vec::new();
    for chunk in chunks {
        core.set(chunk)?;
        while let Some(bytes) = core.next() {
            out.extend_from_slice(bytes);
        }
    }
    while let Some(bytes) = core.flush()? {
        out.extend_from_slice(bytes);
    }
    Ok(out)
}
