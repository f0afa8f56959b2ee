//! End-to-end rendering scenarios against synthetic fonts.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pretty_assertions::assert_eq;
use rastype::{FontReader, Options};

fn utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{actual} != {expected}"
    );
}

fn decode_bmp(uri: &str) -> Vec<u8> {
    let encoded = uri.strip_prefix("data:image/bmp;base64,").unwrap();
    STANDARD.decode(encoded).unwrap()
}

#[test]
fn renders_a_into_mono_bitmap() {
    let font = sfnt_test_data::test_font();
    let mut reader = FontReader::new(&font);
    let uri = reader.get_bitmap(&utf16("A"), 64.0, 64, 64, &[0xffffff, 0x000000]);
    assert!(!uri.is_empty());
    let file = decode_bmp(&uri);
    assert_eq!(&file[..2], b"BM");
    // 64x64 at 1bpp behind a 62-byte header
    assert_eq!(file.len(), 62 + 8 * 64);
    assert_eq!(u32::from_le_bytes(file[18..22].try_into().unwrap()), 64);
    assert!(file[62..].iter().any(|byte| *byte != 0));
}

#[test]
fn draw_reports_advance_and_sets_pixels() {
    let font = sfnt_test_data::test_font();
    let mut reader = FontReader::new(&font);
    let mut buffer = vec![0u8; 8 * 64];
    let drawn = reader.draw(&utf16("A"), 64.0, &mut buffer, 64, 64);
    // the square advances by its scaled x-max: 700 * 64 / 1000
    assert_close(drawn, 44.8);
    // the left edge lands at column 6, bottom row at the baseline
    assert_ne!(buffer[0], 0);
    assert!(buffer.iter().any(|byte| *byte != 0));
}

#[test]
fn draw_stops_at_the_right_edge() {
    let font = sfnt_test_data::test_font();
    let mut reader = FontReader::new(&font);
    let mut buffer = vec![0u8; 8 * 64];
    let drawn = reader.draw(&utf16("AAAAAA"), 64.0, &mut buffer, 64, 64);
    // two glyphs fit before the pen passes 64 pixels; the third starts
    // beyond it and drawing stops
    assert!(drawn >= 64.0);
    assert!(drawn < 3.0 * 44.8);
}

#[test]
fn measure_accumulates_widths() {
    let font = sfnt_test_data::test_font();
    let mut reader = FontReader::new(&font);
    let widths = reader.measure(&utf16("A A"), 100.0);
    // 'A' inks to 700 units, the space advances 300 units
    assert_eq!(widths.len(), 4);
    for (actual, expected) in widths.iter().zip([0.0, 70.0, 100.0, 170.0]) {
        assert_close(*actual, expected);
    }
}

#[test]
fn unmapped_code_falls_back_to_space() {
    let font = sfnt_test_data::test_font();
    let mut reader = FontReader::new(&font);
    // '@' is not in the cmap; it measures as the space placeholder
    let widths = reader.measure(&utf16("@"), 100.0);
    assert_eq!(widths.len(), 2);
    assert_close(widths[1], 30.0);
    // and contributes no ink
    let mut buffer = vec![0u8; 8 * 64];
    reader.draw(&utf16("@"), 64.0, &mut buffer, 64, 64);
    assert!(buffer.iter().all(|byte| *byte == 0));
}

#[test]
fn open_is_idempotent_and_failure_is_permanent() {
    let font = sfnt_test_data::test_font();
    let mut reader = FontReader::new(&font);
    assert!(reader.open());
    assert!(reader.open());

    let mut broken = FontReader::new(&[0u8; 16]);
    assert!(!broken.open());
    assert!(!broken.open());
    assert_eq!(broken.draw(&utf16("A"), 64.0, &mut [0u8; 8], 8, 8), 0.0);
    assert_eq!(broken.measure(&utf16("A"), 64.0), Vec::<f64>::new());
    assert_eq!(broken.get_bitmap(&utf16("A"), 64.0, 64, 64, &[0, 1]), "");
}

#[test]
fn collection_member_renders() {
    let ttc = sfnt_test_data::test_collection();
    let mut reader = FontReader::with_options(
        &ttc,
        Options {
            collection_index: 1,
            ..Options::default()
        },
    );
    let widths = reader.measure(&utf16("A"), 100.0);
    assert_eq!(widths.len(), 2);
    assert_close(widths[1], 70.0);

    let mut out_of_range = FontReader::with_options(
        &ttc,
        Options {
            collection_index: 5,
            ..Options::default()
        },
    );
    assert!(!out_of_range.open());
}

#[test]
fn composite_glyph_renders_two_dots() {
    let font = sfnt_test_data::test_font();
    let mut reader = FontReader::new(&font);
    let mut buffer = vec![0u8; 8 * 64];
    // ':' is a composite of two squares, the second 500 units up
    let drawn = reader.draw(&utf16(":"), 64.0, &mut buffer, 64, 64);
    assert_close(drawn, 12.8);
    let row_has_ink = |row: usize| buffer[row * 8..row * 8 + 8].iter().any(|byte| *byte != 0);
    // lower dot spans rows 0..12, upper dot rows 32..44, gap between
    assert!(row_has_ink(5));
    assert!(!row_has_ink(20));
    assert!(row_has_ink(38));
}

#[test]
fn vertical_mode_substitutes_and_stacks() {
    let font = sfnt_test_data::test_font_with_gsub();
    let mut reader = FontReader::with_options(
        &font,
        Options {
            vertical: true,
            ..Options::default()
        },
    );
    let mut buffer = vec![0u8; 16 * 256];
    let drawn = reader.draw(&utf16(":"), 100.0, &mut buffer, 128, 256);
    assert_eq!(drawn, 100.0);
    // ':' rewrites to U+FE13, which the vert lookup resolves to the
    // 200-unit dot outline drawn at the top of the right-hand column:
    // columns 28..48 of rows 156..175
    assert_eq!(buffer[160 * 16 + 4], 0xff);
    // nothing lands in the left half
    assert!(buffer
        .chunks(16)
        .all(|row| row[..2].iter().all(|byte| *byte == 0)));
}

#[test]
fn gray_bitmap_downsamples() {
    let font = sfnt_test_data::test_font();
    let mut reader = FontReader::new(&font);
    let colors = [0xffffff, 0xaaaaaa, 0x555555, 0x000000];
    let uri = reader.get_bitmap(&utf16("A"), 64.0, 64, 64, &colors);
    assert!(!uri.is_empty());
    let file = decode_bmp(&uri);
    // 64x64 requested -> 256-wide supersample -> 64x64 blocks
    assert_eq!(u32::from_le_bytes(file[18..22].try_into().unwrap()), 64);
    assert_eq!(u32::from_le_bytes(file[22..26].try_into().unwrap()), 64);
    assert!(file[118..].iter().any(|index| *index != 0));
}

#[test]
fn too_many_colors_is_unsupported() {
    let font = sfnt_test_data::test_font();
    let mut reader = FontReader::new(&font);
    let colors = [0u32; 17];
    assert_eq!(reader.get_bitmap(&utf16("A"), 64.0, 64, 64, &colors), "");
}
