use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::{SatNftError, TelemetryRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrRenderOptions {
    /// Side of the square output image, in pixels.
    pub width: u32,
    /// Quiet zone on each side, in modules.
    pub margin: u32,
    pub dark: u8,
    pub light: u8,
    pub ec_level: EcLevel,
}

impl Default for QrRenderOptions {
    fn default() -> Self {
        Self {
            width: 400,
            margin: 2,
            dark: 0x00,
            light: 0xFF,
            ec_level: EcLevel::M,
        }
    }
}

/// Text embedded in the QR code: indented JSON with fixed key order.
pub fn canonical_payload(record: &TelemetryRecord) -> Result<String, SatNftError> {
    serde_json::to_string_pretty(record).map_err(|err| SatNftError::Encoding(err.to_string()))
}

pub fn encode_record(record: &TelemetryRecord) -> Result<Vec<u8>, SatNftError> {
    let payload = canonical_payload(record)?;
    render_png(&payload, &QrRenderOptions::default())
}

pub fn render_png(payload: &str, options: &QrRenderOptions) -> Result<Vec<u8>, SatNftError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), options.ec_level)?;
    let image = rasterize(&code, options);

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    tracing::debug!(
        modules = code.width(),
        payload_len = payload.len(),
        png_len = bytes.len(),
        "rendered qr code"
    );
    Ok(bytes)
}

// The symbol plus its quiet zone is stretched over the full width, so module
// edges land on fractional pixel positions when the width does not divide evenly.
fn rasterize(code: &QrCode, options: &QrRenderOptions) -> GrayImage {
    let modules = code.width();
    let colors = code.to_colors();
    let total = modules as u32 + options.margin * 2;
    let side = options.width.max(total);
    let scale = f64::from(side) / f64::from(total);
    let offset = f64::from(options.margin) * scale;
    let symbol_end = offset + modules as f64 * scale;

    GrayImage::from_fn(side, side, |x, y| {
        let (fx, fy) = (f64::from(x), f64::from(y));
        if fx < offset || fy < offset || fx >= symbol_end || fy >= symbol_end {
            return Luma([options.light]);
        }

        let column = (((fx - offset) / scale) as usize).min(modules - 1);
        let row = (((fy - offset) / scale) as usize).min(modules - 1);
        match colors[row * modules + column] {
            Color::Dark => Luma([options.dark]),
            Color::Light => Luma([options.light]),
        }
    })
}
