use std::convert::Infallible;

use rand::rngs::StdRng;
use rand::SeedableRng as _;
use wordpack::{
    decode_iter, encode_iter, finish_decode, Bytes, Doubling, FinishUnpacker, PackingError,
    PackingResult, UnpackingTarget, WORD_BYTES,
};

mod common;
use common::{init_logger, random_chunks, random_unpacked};

#[test]
fn test_encode_then_decode_pipeline() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(3);
    let input = random_unpacked(&mut rng, 3000);
    let source = random_chunks(&mut rng, &input, 200, WORD_BYTES)
        .into_iter()
        .map(Ok::<_, Infallible>);

    let packed = encode_iter(2048, source).unwrap();
    let chunks: Vec<Bytes> = decode_iter(64, packed)
        .unwrap()
        .collect::<PackingResult<_>>()
        .unwrap();
    assert!(chunks.iter().all(|chunk| chunk.len() <= 64));
    assert_eq!(chunks.concat(), input);
}

#[test]
fn test_finish_decode_from_encoder() {
    let mut rng = StdRng::seed_from_u64(4);
    let input = random_unpacked(&mut rng, 700);
    let source = [Ok::<_, Infallible>(Bytes::from(input.clone()))];

    let target = UnpackingTarget::with_growth(WORD_BYTES, Doubling).unwrap();
    let out = finish_decode(FinishUnpacker::new(target), encode_iter(4096, source).unwrap());
    assert_eq!(out.unwrap(), input);
}

#[test]
fn test_encoder_error_reaches_decoder_as_upstream() {
    let source = vec![Ok::<_, Infallible>(Bytes::from_static(&[1, 2, 3]))];
    let mut decoded = decode_iter(8, encode_iter(2048, source).unwrap()).unwrap();

    let err = decoded.next().unwrap().unwrap_err();
    let PackingError::Upstream(inner) = err else {
        panic!("expected an upstream error");
    };
    assert!(matches!(
        inner.downcast_ref::<PackingError>(),
        Some(PackingError::UnalignedInput(3))
    ));
    assert!(decoded.next().is_none());
}
