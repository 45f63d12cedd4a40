//! Single-frame decoding: headers, palettes, literals, interlacing.

use kolo_core::bytestream::KCursor;
use kolo_gif::{probe_gif, DisposalMethod, GifDecoder};

mod common;
use common::GifBuilder;

const CLEAR: u16 = 4;
const STOP: u16 = 5;

#[test]
fn single_white_pixel() {
    let data = GifBuilder::new(1, 1, 0, 0)
        .palette(&[[0, 0, 0], [255, 255, 255]])
        .image(0, 0, 1, 1, 2, &[CLEAR, 1, STOP])
        .trailer();

    assert!(probe_gif(&data));

    let mut decoder = GifDecoder::new(KCursor::new(&data));
    let pixels = decoder.decode().unwrap();

    assert_eq!(pixels, [1]);
    assert_eq!(decoder.dimensions(), Some((1, 1)));
    assert_eq!(decoder.palette().unwrap(), &[[0, 0, 0], [255, 255, 255]]);
}

#[test]
fn clear_then_four_literals() {
    let data = GifBuilder::new(2, 2, 1, 0)
        .palette(&[[0, 0, 0], [255, 255, 255], [255, 0, 0], [0, 255, 0]])
        .image(0, 0, 2, 2, 2, &[CLEAR, 0, 1, 2, 3, STOP])
        .trailer();

    let mut decoder = GifDecoder::new(KCursor::new(&data));
    let frame = decoder.next_frame().unwrap().unwrap();

    assert_eq!(decoder.canvas(), [0, 1, 2, 3]);
    assert_eq!((frame.x, frame.y, frame.width, frame.height), (0, 0, 2, 2));
    assert_eq!(frame.delay, 0);
    assert_eq!(frame.disposal, DisposalMethod::None);
    assert_eq!(frame.transparency, None);
    assert!(!frame.interlaced);
}

#[test]
fn header_fields_are_exposed() {
    let data = GifBuilder::new(3, 2, 0, 1)
        .palette(&[[1, 2, 3], [4, 5, 6]])
        .trailer();

    let mut decoder = GifDecoder::new(KCursor::new(&data));
    assert_eq!(decoder.dimensions(), None);
    assert_eq!(decoder.background_index(), None);

    decoder.decode_headers().unwrap();
    // decoding headers twice is a no-op
    decoder.decode_headers().unwrap();

    assert_eq!(decoder.dimensions(), Some((3, 2)));
    assert_eq!(decoder.output_buffer_size(), Some(6));
    assert_eq!(decoder.background_index(), Some(1));
    assert_eq!(decoder.global_palette().unwrap(), &[[1, 2, 3], [4, 5, 6]]);
}

// a frame that adds the 8th and 16th table entries, forcing two code
// width bumps; each later literal must decode at the wider width
#[test]
fn literal_runs_grow_code_width() {
    let mut codes = vec![CLEAR];
    let mut expected = Vec::new();
    for row in 0..4_u16 {
        codes.extend(std::iter::repeat(row).take(4));
        expected.extend(std::iter::repeat(row as u8).take(4));
    }
    codes.push(STOP);

    let data = GifBuilder::new(4, 4, 1, 0)
        .palette(&[[0, 0, 0], [85, 85, 85], [170, 170, 170], [255, 255, 255]])
        .image(0, 0, 4, 4, 2, &codes)
        .trailer();

    let mut decoder = GifDecoder::new(KCursor::new(&data));
    decoder.next_frame().unwrap().unwrap();

    assert_eq!(decoder.canvas(), expected);
}

#[test]
fn interlaced_rows_are_reordered() {
    // decoded row r holds the value r; interlacing scatters the rows
    let mut codes = vec![CLEAR];
    for row in 0..4_u16 {
        codes.extend(std::iter::repeat(row).take(4));
    }
    codes.push(STOP);

    let data = GifBuilder::new(4, 4, 1, 0)
        .palette(&[[0, 0, 0], [85, 85, 85], [170, 170, 170], [255, 255, 255]])
        .image_ex(0, 0, 4, 4, true, None, 2, &codes)
        .trailer();

    let mut decoder = GifDecoder::new(KCursor::new(&data));
    let frame = decoder.next_frame().unwrap().unwrap();

    assert!(frame.interlaced);
    // pass order for four rows: 0, then 2, then 1 and 3
    #[rustfmt::skip]
    assert_eq!(
        decoder.canvas(),
        [
            0, 0, 0, 0,
            2, 2, 2, 2,
            1, 1, 1, 1,
            3, 3, 3, 3
        ]
    );
}

#[test]
fn local_palette_shadows_global() {
    let global = [[10, 10, 10], [20, 20, 20]];
    let local = [[1, 1, 1], [2, 2, 2]];

    let data = GifBuilder::new(1, 1, 0, 0)
        .palette(&global)
        .image(0, 0, 1, 1, 2, &[CLEAR, 0, STOP])
        .image_ex(0, 0, 1, 1, false, Some(&local), 2, &[CLEAR, 1, STOP])
        .trailer();

    let mut decoder = GifDecoder::new(KCursor::new(&data));

    decoder.next_frame().unwrap().unwrap();
    assert_eq!(decoder.palette().unwrap(), &global);

    decoder.next_frame().unwrap().unwrap();
    assert_eq!(decoder.palette().unwrap(), &local);
    assert_eq!(decoder.global_palette().unwrap(), &global);
    assert_eq!(decoder.canvas(), [1]);
}

#[test]
fn loop_count_is_reported() {
    let data = GifBuilder::new(1, 1, 0, 0)
        .palette(&[[0, 0, 0], [255, 255, 255]])
        .netscape_loop(5)
        .image(0, 0, 1, 1, 2, &[CLEAR, 1, STOP])
        .trailer();

    let mut decoder = GifDecoder::new(KCursor::new(&data));
    assert_eq!(decoder.loop_count(), None);

    decoder.next_frame().unwrap().unwrap();
    assert_eq!(decoder.loop_count(), Some(5));
}

#[test]
fn loop_count_zero_means_forever() {
    let data = GifBuilder::new(1, 1, 0, 0)
        .palette(&[[0, 0, 0], [255, 255, 255]])
        .netscape_loop(0)
        .image(0, 0, 1, 1, 2, &[CLEAR, 1, STOP])
        .trailer();

    let mut decoder = GifDecoder::new(KCursor::new(&data));
    decoder.next_frame().unwrap().unwrap();

    assert_eq!(decoder.loop_count(), Some(0));
}

#[test]
fn ignorable_extensions_are_skipped() {
    let data = GifBuilder::new(1, 1, 0, 0)
        .palette(&[[0, 0, 0], [255, 255, 255]])
        .comment(b"made by hand")
        .plain_text(b"HELLO")
        .unknown_extension(0xAB, &[1, 2, 3, 4])
        .image(0, 0, 1, 1, 2, &[CLEAR, 1, STOP])
        .trailer();

    let mut decoder = GifDecoder::new(KCursor::new(&data));
    let frame = decoder.next_frame().unwrap().unwrap();

    assert_eq!(frame.delay, 0);
    assert_eq!(decoder.canvas(), [1]);
}

#[test]
fn trailer_finishes_the_stream() {
    let mut data = GifBuilder::new(1, 1, 0, 0)
        .palette(&[[0, 0, 0], [255, 255, 255]])
        .image(0, 0, 1, 1, 2, &[CLEAR, 1, STOP])
        .trailer();
    // garbage past the trailer must never be looked at
    data.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

    let mut decoder = GifDecoder::new(KCursor::new(&data));

    assert!(decoder.next_frame().unwrap().is_some());
    assert!(decoder.next_frame().unwrap().is_none());
    assert!(decoder.next_frame().unwrap().is_none());
}
