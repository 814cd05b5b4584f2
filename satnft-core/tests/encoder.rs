use image::GenericImageView;

use satnft_core::{
    canonical_payload, encode_record, render_png, QrRenderOptions, SatNftError, TelemetryRecord,
};

fn decode_qr(png: &[u8]) -> String {
    let image = image::load_from_memory(png).unwrap().to_luma8();
    let (width, height) = image.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        width as usize,
        height as usize,
        |x, y| image.get_pixel(x as u32, y as u32).0[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one qr code");
    let (_meta, content) = grids[0].decode().unwrap();
    content
}

fn sample() -> TelemetryRecord {
    TelemetryRecord::new("2024-06-01T00:00:00Z", 25, 40, 200, 8)
}

#[test]
fn payload_is_indented_json_in_field_order() {
    let payload = canonical_payload(&sample()).unwrap();
    assert_eq!(
        payload,
        "{\n  \"timestamp\": \"2024-06-01T00:00:00Z\",\n  \"temperature\": 25,\n  \"humidity\": 40,\n  \"light\": 200,\n  \"air_quality\": 8\n}"
    );
}

#[test]
fn png_is_square_and_fixed_width() {
    let png = encode_record(&sample()).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let image = image::load_from_memory(&png).unwrap();
    assert_eq!(image.dimensions(), (400, 400));
}

#[test]
fn image_is_two_tone_with_light_corners() {
    let png = encode_record(&sample()).unwrap();
    let image = image::load_from_memory(&png).unwrap().to_luma8();

    assert!(image.pixels().all(|p| p.0[0] == 0x00 || p.0[0] == 0xFF));
    assert_eq!(image.get_pixel(0, 0).0[0], 0xFF);
    assert_eq!(image.get_pixel(399, 399).0[0], 0xFF);
}

#[test]
fn decoding_reproduces_the_serialized_record() {
    let record = sample();
    let png = encode_record(&record).unwrap();
    assert_eq!(decode_qr(&png), canonical_payload(&record).unwrap());
}

#[test]
fn over_capacity_payload_is_an_encoding_error() {
    let payload = "x".repeat(8_000);
    let err = render_png(&payload, &QrRenderOptions::default()).unwrap_err();
    assert!(matches!(err, SatNftError::Encoding(_)));
}
