//! Drivers that pump a [`Transform`] from a source of chunks.

use std::error::Error;

use bytes::Bytes;

use crate::decode::{Doubling, FinishUnpacker, Grow, Unpacker, UnpackingTarget};
use crate::encode::Packer;
use crate::error::{PackingError, PackingResult};
use crate::word::WORD_BYTES;
use crate::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Running,
    Flushing,
    Done,
}

/// Iterator of output chunks from a [`Transform`] fed by `source`.
///
/// Empty outputs are skipped. A source error is yielded once as
/// [`PackingError::Upstream`], and the iterator ends after any error.
#[derive(Debug)]
pub struct TransformIter<T, I> {
    core: T,
    source: I,
    status: Status,
}

impl<T, I> TransformIter<T, I> {
    pub fn new(core: T, source: I) -> TransformIter<T, I> {
        TransformIter {
            core,
            source,
            status: Status::Running,
        }
    }

    /// Returns the engine, e.g. to inspect its final state.
    pub fn into_inner(self) -> T {
        self.core
    }
}

impl<T, I, E> Iterator for TransformIter<T, I>
where
    T: Transform,
    I: Iterator<Item = Result<Bytes, E>>,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    type Item = PackingResult<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.status {
                Status::Running => {
                    if let Some(chunk) = self.core.next() {
                        if !chunk.is_empty() {
                            return Some(Ok(Bytes::copy_from_slice(chunk)));
                        }
                        continue;
                    }
                    match self.source.next() {
                        Some(Ok(chunk)) => {
                            if let Err(err) = self.core.set(chunk) {
                                self.status = Status::Done;
                                return Some(Err(err));
                            }
                        }
                        Some(Err(err)) => {
                            self.status = Status::Done;
                            return Some(Err(PackingError::Upstream(err.into())));
                        }
                        None => self.status = Status::Flushing,
                    }
                }
                Status::Flushing => match self.core.flush() {
                    Ok(Some(chunk)) => {
                        if !chunk.is_empty() {
                            return Some(Ok(Bytes::copy_from_slice(chunk)));
                        }
                    }
                    Ok(None) => self.status = Status::Done,
                    Err(err) => {
                        self.status = Status::Done;
                        return Some(Err(err));
                    }
                },
                Status::Done => return None,
            }
        }
    }
}

impl<T, I, E> std::iter::FusedIterator for TransformIter<T, I>
where
    T: Transform,
    I: Iterator<Item = Result<Bytes, E>>,
    E: Into<Box<dyn Error + Send + Sync>>,
{
}

/// Decodes packed chunks from `source` with an [`Unpacker`] of `buffer_size`
/// bytes.
pub fn decode_iter<I, E>(
    buffer_size: usize,
    source: I,
) -> PackingResult<TransformIter<Unpacker, I::IntoIter>>
where
    I: IntoIterator<Item = Result<Bytes, E>>,
{
    Ok(TransformIter::new(
        Unpacker::new(buffer_size)?,
        source.into_iter(),
    ))
}

/// Encodes word-aligned chunks from `source` with a [`Packer`] of
/// `buffer_size` bytes.
pub fn encode_iter<I, E>(
    buffer_size: usize,
    source: I,
) -> PackingResult<TransformIter<Packer, I::IntoIter>>
where
    I: IntoIterator<Item = Result<Bytes, E>>,
{
    Ok(TransformIter::new(Packer::new(buffer_size)?, source.into_iter()))
}

/// Feeds every chunk of `source` to `unpacker` and finishes it.
pub fn finish_decode<G, I, B, E>(mut unpacker: FinishUnpacker<G>, source: I) -> PackingResult<Bytes>
where
    G: Grow,
    I: IntoIterator<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    for chunk in source {
        let chunk = chunk.map_err(|err| PackingError::Upstream(err.into()))?;
        unpacker.set(chunk.as_ref())?;
    }
    unpacker.finish()
}

/// Packs a whole word-aligned buffer.
pub fn pack(unpacked: &[u8]) -> PackingResult<Vec<u8>> {
    let mut packer = Packer::default();
    packer.set(Bytes::copy_from_slice(unpacked))?;
    let mut out = Vec::with_capacity(unpacked.len() / 2);
    while let Some(chunk) = packer.next() {
        out.extend_from_slice(chunk);
    }
    while let Some(chunk) = packer.flush()? {
        out.extend_from_slice(chunk);
    }
    Ok(out)
}

/// Unpacks a whole packed buffer into a growing target.
pub fn unpack(packed: &[u8]) -> PackingResult<Vec<u8>> {
    let size = packed.len().max(1).next_multiple_of(WORD_BYTES);
    let mut unpacker = FinishUnpacker::new(UnpackingTarget::with_growth(size, Doubling)?);
    unpacker.set(packed)?;
    Ok(Vec::from(unpacker.finish()?))
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::io;

    use super::*;

    fn ok_chunks(chunks: &[&'static [u8]]) -> Vec<Result<Bytes, Infallible>> {
        chunks.iter().map(|&c| Ok(Bytes::from_static(c))).collect()
    }

    #[test]
    fn test_pack_unpack() {
        let unpacked: Vec<u8> =
            [[0u8; 8], [1, 2, 3, 4, 5, 6, 7, 8], [0, 0, 9, 0, 0, 0, 0, 0]].concat();
        let packed = pack(&unpacked).unwrap();
        assert_eq!(packed, [0x00, 0x00, 0xff, 1, 2, 3, 4, 5, 6, 7, 8, 0x00, 0x04, 9]);
        assert_eq!(unpack(&packed).unwrap(), unpacked);
        assert!(unpack(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_pack_rejects_unaligned_input() {
        assert!(matches!(pack(&[1]), Err(PackingError::UnalignedInput(1))));
    }

    #[test]
    fn test_iterators_skip_empty_outputs() {
        let chunks = ok_chunks(&[&[0x01], &[0x2a], &[], &[0x00], &[0x01]]);
        let out: Vec<Bytes> = decode_iter(8, chunks)
            .unwrap()
            .collect::<PackingResult<_>>()
            .unwrap();
        assert!(out.iter().all(|chunk| !chunk.is_empty()));
        assert_eq!(out.concat(), [&[0x2a, 0, 0, 0, 0, 0, 0, 0][..], &[0u8; 16][..]].concat());

        let chunks = ok_chunks(&[&[0; 8], &[0; 8]]);
        let out: Vec<Bytes> = encode_iter(2048, chunks)
            .unwrap()
            .collect::<PackingResult<_>>()
            .unwrap();
        assert_eq!(out.concat(), [0x00, 0x01]);
    }

    #[test]
    fn test_source_error_is_forwarded_once() {
        let source = vec![
            Ok(Bytes::from_static(&[0x01, 7, 0x01, 7, 0x01, 7, 0x01, 7, 0x01, 7, 0x01, 7])),
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "socket closed")),
            Ok(Bytes::from_static(&[0x01, 8])),
        ];
        // The first two words fill the buffer; the rest waits in the remainder.
        let mut iter = decode_iter(16, source).unwrap();
        assert_eq!(iter.next().unwrap().unwrap(), [7u8, 0, 0, 0, 0, 0, 0, 0].repeat(2));
        let err = iter.next().unwrap().unwrap_err();
        assert!(matches!(err, PackingError::Upstream(_)));
        assert_eq!(err.to_string(), "upstream source failed: socket closed");
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_malformed_stream_ends_iteration() {
        let mut iter = decode_iter(8, ok_chunks(&[&[0xff, 1, 2]])).unwrap();
        assert!(matches!(
            iter.next(),
            Some(Err(PackingError::MalformedStream))
        ));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_finish_decode_from_source() {
        let source: Vec<Result<&[u8], Infallible>> = vec![Ok(&[0x00][..]), Ok(&[0x01][..]), Ok(&[0x80, 5][..])];
        let target = UnpackingTarget::new(24).unwrap();
        let out = finish_decode(FinishUnpacker::new(target), source).unwrap();
        assert_eq!(out, [&[0u8; 16][..], &[0, 0, 0, 0, 0, 0, 0, 5][..]].concat());

        let source = vec![Ok(&[0x00][..]), Err("disk gone")];
        let target = UnpackingTarget::new(24).unwrap();
        assert!(matches!(
            finish_decode(FinishUnpacker::new(target), source),
            Err(PackingError::Upstream(_))
        ));
    }
}
