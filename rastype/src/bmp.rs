//! BMP container encoding.
//!
//! Rendered bitmaps are wrapped in a minimal Windows BMP byte stream
//! (file header, info header, palette, packed pixels) and returned as
//! a base64 `data:image/bmp` URI so callers can display them without
//! any image library.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const DATA_URI_PREFIX: &str = "data:image/bmp;base64,";

/// BITMAPFILEHEADER + BITMAPINFO for a 1-bit BMP with a 2-entry
/// palette. Size, dimension, and palette fields are patched in.
const MONO_HEADER: [u8; 62] = [
    0x42, 0x4d, // bfType
    0x00, 0x00, 0x00, 0x00, // bfSize
    0x00, 0x00, // bfReserved1
    0x00, 0x00, // bfReserved2
    0x3e, 0x00, 0x00, 0x00, // bfOffBits
    0x28, 0x00, 0x00, 0x00, // biSize
    0x00, 0x00, 0x00, 0x00, // biWidth
    0x00, 0x00, 0x00, 0x00, // biHeight
    0x01, 0x00, // biPlanes
    0x01, 0x00, // biBitCount
    0x00, 0x00, 0x00, 0x00, // biCompression
    0x00, 0x00, 0x00, 0x00, // biSizeImage
    0x00, 0x00, 0x00, 0x00, // biXPelsPerMeter
    0x00, 0x00, 0x00, 0x00, // biYPelsPerMeter
    0x00, 0x00, 0x00, 0x00, // biClrUsed
    0x00, 0x00, 0x00, 0x00, // biClrImportant
    0xff, 0xff, 0xff, 0x00, // bmiColors[0]
    0x00, 0x00, 0x00, 0x00, // bmiColors[1]
];

/// Header for a 4-bit BMP with a 16-entry grayscale ramp palette.
const GRAY_HEADER: [u8; 118] = [
    0x42, 0x4d, // bfType
    0x00, 0x00, 0x00, 0x00, // bfSize
    0x00, 0x00, // bfReserved1
    0x00, 0x00, // bfReserved2
    0x76, 0x00, 0x00, 0x00, // bfOffBits
    0x28, 0x00, 0x00, 0x00, // biSize
    0x00, 0x00, 0x00, 0x00, // biWidth
    0x00, 0x00, 0x00, 0x00, // biHeight
    0x01, 0x00, // biPlanes
    0x04, 0x00, // biBitCount
    0x00, 0x00, 0x00, 0x00, // biCompression
    0x00, 0x00, 0x00, 0x00, // biSizeImage
    0x00, 0x00, 0x00, 0x00, // biXPelsPerMeter
    0x00, 0x00, 0x00, 0x00, // biYPelsPerMeter
    0x00, 0x00, 0x00, 0x00, // biClrUsed
    0x00, 0x00, 0x00, 0x00, // biClrImportant
    0xff, 0xff, 0xff, 0x00, // bmiColors[0]
    0xee, 0xee, 0xee, 0x00, // bmiColors[1]
    0xdd, 0xdd, 0xdd, 0x00, // bmiColors[2]
    0xcc, 0xcc, 0xcc, 0x00, // bmiColors[3]
    0xbb, 0xbb, 0xbb, 0x00, // bmiColors[4]
    0xaa, 0xaa, 0xaa, 0x00, // bmiColors[5]
    0x99, 0x99, 0x99, 0x00, // bmiColors[6]
    0x88, 0x88, 0x88, 0x00, // bmiColors[7]
    0x77, 0x77, 0x77, 0x00, // bmiColors[8]
    0x66, 0x66, 0x66, 0x00, // bmiColors[9]
    0x55, 0x55, 0x55, 0x00, // bmiColors[10]
    0x44, 0x44, 0x44, 0x00, // bmiColors[11]
    0x33, 0x33, 0x33, 0x00, // bmiColors[12]
    0x22, 0x22, 0x22, 0x00, // bmiColors[13]
    0x11, 0x11, 0x11, 0x00, // bmiColors[14]
    0x00, 0x00, 0x00, 0x00, // bmiColors[15]
];

fn write_u32_le(header: &mut [u8], offset: usize, value: u32) {
    header[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// BMP palette entries are stored blue-first.
fn write_palette(header: &mut [u8], colors: &[u32]) {
    let mut offset = 54;
    for &color in colors {
        header[offset] = (color >> 16) as u8;
        header[offset + 1] = (color >> 8) as u8;
        header[offset + 2] = color as u8;
        offset += 4;
    }
}

fn encode(header: &[u8], pixels: &[u8]) -> String {
    let mut file = Vec::with_capacity(header.len() + pixels.len());
    file.extend_from_slice(header);
    file.extend_from_slice(pixels);
    let mut uri = String::from(DATA_URI_PREFIX);
    STANDARD.encode_string(&file, &mut uri);
    uri
}

/// Encodes packed 1-bit rows (bottom-up, width a multiple of 32) as a
/// monochrome BMP data URI with the two given palette colors.
pub fn mono_data_uri(data: &[u8], width: usize, height: usize, colors: &[u32]) -> String {
    let mut header = MONO_HEADER;
    let size_image = ((width + 7) >> 3) * height;
    let file_size = header.len() + size_image;
    write_u32_le(&mut header, 2, file_size as u32);
    write_u32_le(&mut header, 18, width as u32);
    write_u32_le(&mut header, 22, height as u32);
    write_u32_le(&mut header, 34, size_image as u32);
    write_palette(&mut header, colors);
    encode(&header, data)
}

/// Set-bit counts for each 4-bit value.
const COUNT: [u8; 16] = [0, 1, 1, 2, 1, 2, 2, 3, 1, 2, 2, 3, 2, 3, 3, 4];

/// Palette index for a block's set-bit count: round(i * 15 / 16).
const COLOR: [u8; 17] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 8, 9, 10, 11, 12, 13, 14, 15];

/// Downsamples packed 1-bit rows four-to-one in each dimension and
/// encodes the result as a 16-color BMP data URI. Each 4x4 block of
/// input bits becomes one palette index chosen by its set-bit count.
/// The input width must be a multiple of eight.
pub fn gray_data_uri(data: &[u8], width: usize, height: usize, colors: &[u32]) -> String {
    let mut header = GRAY_HEADER;
    let out_width = width >> 2;
    let out_height = height >> 2;
    let size_image = (out_width >> 1) * out_height;
    let file_size = header.len() + size_image;
    write_u32_le(&mut header, 2, file_size as u32);
    write_u32_le(&mut header, 18, out_width as u32);
    write_u32_le(&mut header, 22, out_height as u32);
    write_u32_le(&mut header, 34, size_image as u32);
    write_palette(&mut header, colors);

    let mut pixels = Vec::with_capacity(out_width * out_height);
    let mut line0 = 0usize;
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let line1 = line0 + width;
            let line2 = line1 + width;
            let line3 = line2 + width;
            let shift = 8 - (line0 & 7) - 4;
            let nibble = |line: usize| (data.get(line >> 3).copied().unwrap_or(0) >> shift) & 0xf;
            let count = COUNT[nibble(line0) as usize]
                + COUNT[nibble(line1) as usize]
                + COUNT[nibble(line2) as usize]
                + COUNT[nibble(line3) as usize];
            pixels.push(COLOR[count as usize]);
            x += 4;
            line0 += 4;
        }
        y += 4;
    }
    encode(&header, &pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(uri: &str) -> Vec<u8> {
        let encoded = uri.strip_prefix(DATA_URI_PREFIX).unwrap();
        STANDARD.decode(encoded).unwrap()
    }

    #[test]
    fn mono_round_trips_pixels_and_palette() {
        // one 32x2 row pair, bottom-up
        let data = [0xa5, 0x00, 0xff, 0x3c, 0x00, 0x81, 0x18, 0xe7];
        let uri = mono_data_uri(&data, 32, 2, &[0xffffff, 0x123456]);
        let file = decode(&uri);
        assert_eq!(&file[..2], b"BM");
        assert_eq!(u32::from_le_bytes(file[2..6].try_into().unwrap()), 62 + 8);
        assert_eq!(u32::from_le_bytes(file[10..14].try_into().unwrap()), 0x3e);
        assert_eq!(u32::from_le_bytes(file[18..22].try_into().unwrap()), 32);
        assert_eq!(u32::from_le_bytes(file[22..26].try_into().unwrap()), 2);
        // palette entries are b, g, r, 0
        assert_eq!(&file[54..62], &[0xff, 0xff, 0xff, 0, 0x12, 0x34, 0x56, 0]);
        assert_eq!(&file[62..], &data);
    }

    #[test]
    fn gray_averages_blocks() {
        // 8x4 bitmap: left 4x4 block fully set, right block empty
        let data = [0xf0, 0xf0, 0xf0, 0xf0];
        let colors = [0u32; 16];
        let uri = gray_data_uri(&data, 8, 4, &colors);
        let file = decode(&uri);
        assert_eq!(file.len(), 118 + 2);
        // 16 set bits map to palette index 15, empty to 0
        assert_eq!(&file[118..], &[15, 0]);
    }
}
