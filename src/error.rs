use thiserror::Error;

/// Alias for the result type of packing operations.
pub type PackingResult<T> = Result<T, PackingError>;

/// Errors that can occur when packing or unpacking.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PackingError {
    /// Decode buffer shorter than a single word
    #[error("decode buffers require a length of at least 8 bytes, got {0}")]
    DecodeBufferTooSmall(usize),

    /// Decode buffer length is not a multiple of the word size
    #[error("decode buffers require a length aligned for 8 byte words, got {0}")]
    DecodeBufferMisaligned(usize),

    /// Encode buffer too small to hold a deferred verbatim range
    #[error("encode buffers require a length of at least 2048 bytes, got {0}")]
    EncodeBufferTooSmall(usize),

    /// Unpacked input is not made of whole words
    #[error("unpacked data must be aligned to 8 byte words, got {0} bytes")]
    UnalignedInput(usize),

    /// Packed data ended inside a tagged word or a range
    #[error("packed data must end in the start state")]
    MalformedStream,

    /// Packed data unpacks beyond the end of the output target
    #[error("packed data unpacks beyond the supplied buffer's end")]
    InsufficientCapacity,

    /// The source of chunks failed
    #[error("upstream source failed: {0}")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PackingError {
    /// True for errors raised while configuring an engine or its input,
    /// before any bytes were processed.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PackingError::DecodeBufferTooSmall(_)
                | PackingError::DecodeBufferMisaligned(_)
                | PackingError::EncodeBufferTooSmall(_)
                | PackingError::UnalignedInput(_)
        )
    }
}
