use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_image(&buf).unwrap();
    assert_eq!(decoded.width, 1);
    assert_eq!(decoded.height, 1);
    assert_eq!(
        decoded.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn decode_svg_rasterizes_at_native_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="3" height="2">
        <rect x="0" y="0" width="3" height="2" fill="#ff0000"/>
    </svg>"##;
    let decoded = decode_svg(svg).unwrap();
    assert_eq!(decoded.width, 3);
    assert_eq!(decoded.height, 2);
    // Fully opaque red everywhere.
    for px in decoded.rgba8_premul.chunks_exact(4) {
        assert_eq!(px, &[255, 0, 0, 255]);
    }
}

#[test]
fn decode_svg_rejects_malformed_input() {
    assert!(decode_svg(b"<svg").is_err());
}
