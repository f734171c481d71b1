//! Raster redaction (blackout and region blur)

use super::blur::{blur_region, kernel_size};
use super::outcome::{RedactionOutcome, SkippedRegion};
use crate::adapters::traits::ImageCodec;
use crate::domain::{DocumentUnits, PixelRect, Region, RedlineError, Result, SurfaceId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a raster region is obscured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RasterMode {
    #[default]
    Blackout,
    Blur,
}

impl FromStr for RasterMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blackout" | "black" => Ok(Self::Blackout),
            "blur" => Ok(Self::Blur),
            other => Err(format!("Unknown raster mode '{other}'. Use 'blackout' or 'blur'")),
        }
    }
}

/// Opaque fill colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// ITU-R BT.601 luma, for single-channel images
    pub fn luma(&self) -> u8 {
        let y = 0.299 * self.0 as f64 + 0.587 * self.1 as f64 + 0.114 * self.2 as f64;
        y.round().clamp(0.0, 255.0) as u8
    }
}

impl FromStr for Rgb {
    type Err = String;

    /// Parses `#rrggbb` or `rrggbb`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid colour '{s}'. Expected #rrggbb"));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Interleaved 8-bit image with 1 to 4 channels (gray, gray+alpha, RGB, RGBA)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        if !(1..=4).contains(&channels) {
            return Err(RedlineError::Decode(format!(
                "Unsupported channel count: {channels}"
            )));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(RedlineError::Decode(format!(
                "Pixel data is {} bytes, expected {expected} for {width}x{height}x{channels}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Buffer with every byte set to `value`
    pub fn filled(width: u32, height: u32, channels: u8, value: u8) -> Result<Self> {
        let len = width as usize * height as usize * channels as usize;
        Self::new(width, height, channels, vec![value; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * self.channels as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = self.offset(x as usize, y as usize);
        Some(&self.data[start..start + self.channels as usize])
    }

    pub(crate) fn pixel_at(&self, x: usize, y: usize) -> &[u8] {
        let start = self.offset(x, y);
        &self.data[start..start + self.channels as usize]
    }

    pub(crate) fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let start = self.offset(x, y);
        let channels = self.channels as usize;
        &mut self.data[start..start + channels]
    }

    /// Fills a clipped rectangle with an opaque colour
    pub fn fill(&mut self, (x0, y0, x1, y1): (usize, usize, usize, usize), color: Rgb) {
        let value: Vec<u8> = match self.channels {
            1 => vec![color.luma()],
            2 => vec![color.luma(), 255],
            3 => vec![color.0, color.1, color.2],
            _ => vec![color.0, color.1, color.2, 255],
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.pixel_mut(x, y).copy_from_slice(&value);
            }
        }
    }
}

/// Applies `mode` to every region in place
///
/// Regions are clipped to the image. A region with no area left after
/// clipping is skipped.
pub fn redact_buffer(
    buffer: &mut PixelBuffer,
    regions: &[PixelRect],
    mode: RasterMode,
    color: Rgb,
) -> (usize, Vec<SkippedRegion>) {
    let mut applied = 0;
    let mut skipped = Vec::new();

    for region in regions {
        let Some(clipped) = region.clip(buffer.width(), buffer.height()) else {
            skipped.push(SkippedRegion::new(
                format!("image [{}, {}, {}, {}]", region.x, region.y, region.w, region.h),
                "region has no area inside the image",
            ));
            continue;
        };

        match mode {
            RasterMode::Blackout => buffer.fill(clipped, color),
            RasterMode::Blur => blur_region(buffer, clipped, kernel_size(region.w)),
        }
        applied += 1;
    }

    (applied, skipped)
}

/// Decodes, redacts and re-encodes an image in its original format
///
/// Returns the input bytes untouched when no region applies.
pub fn redact_image(
    codec: &dyn ImageCodec,
    bytes: &[u8],
    regions: &[PixelRect],
    mode: RasterMode,
    color: Rgb,
) -> Result<RedactionOutcome> {
    if regions.is_empty() {
        return Ok(RedactionOutcome::unchanged(bytes, Vec::new()));
    }

    let decoded = codec.decode(bytes)?;
    let mut buffer = decoded.buffer;
    let (applied, skipped) = redact_buffer(&mut buffer, regions, mode, color);

    if applied == 0 {
        return Ok(RedactionOutcome::unchanged(bytes, skipped));
    }

    let encoded = codec.encode(&buffer, &decoded.format)?;
    tracing::debug!(applied, skipped = skipped.len(), mode = ?mode, "Image redacted");
    Ok(RedactionOutcome::changed(encoded, applied, skipped))
}

/// Pixel rectangle covering a located image region
///
/// Fractional edges round outwards so partly covered pixels are redacted.
fn covering_pixels(region: &Region) -> std::result::Result<PixelRect, String> {
    if region.surface != SurfaceId::Image {
        return Err(format!("{} is not an image", region.surface));
    }
    if region.units != DocumentUnits::Pixels {
        return Err(format!("expected pixels, got {:?}", region.units));
    }
    if !region.rect.is_valid() {
        return Err("rectangle is empty or not finite".to_string());
    }
    let r = &region.rect;
    let (x0, y0) = (r.x0.floor() as i64, r.y0.floor() as i64);
    let (x1, y1) = (r.x1.ceil() as i64, r.y1.ceil() as i64);
    Ok(PixelRect::new(x0, y0, x1 - x0, y1 - y0))
}

/// Redacts regions located on an OCR'd image
///
/// Regions that are not on the image surface, or not in pixels, are skipped
/// and reported along with any that fall outside the image.
pub fn redact_image_regions(
    codec: &dyn ImageCodec,
    bytes: &[u8],
    regions: &[Region],
    mode: RasterMode,
    color: Rgb,
) -> Result<RedactionOutcome> {
    let mut skipped = Vec::new();
    let rects: Vec<PixelRect> = regions
        .iter()
        .filter_map(|region| match covering_pixels(region) {
            Ok(rect) => Some(rect),
            Err(reason) => {
                let r = &region.rect;
                skipped.push(SkippedRegion::new(
                    format!("{} ({:.1},{:.1})-({:.1},{:.1})", region.surface, r.x0, r.y0, r.x1, r.y1),
                    reason,
                ));
                None
            }
        })
        .collect();

    let mut outcome = redact_image(codec, bytes, &rects, mode, color)?;
    skipped.append(&mut outcome.skipped);
    outcome.skipped = skipped;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rect;

    #[test]
    fn test_blackout_sets_alpha_opaque() {
        let mut buffer = PixelBuffer::filled(4, 4, 4, 100).unwrap();
        let (applied, skipped) = redact_buffer(
            &mut buffer,
            &[PixelRect::new(1, 1, 2, 2)],
            RasterMode::Blackout,
            Rgb::BLACK,
        );
        assert_eq!(applied, 1);
        assert!(skipped.is_empty());
        assert_eq!(buffer.pixel(1, 1).unwrap(), &[0, 0, 0, 255]);
        assert_eq!(buffer.pixel(2, 2).unwrap(), &[0, 0, 0, 255]);
        assert_eq!(buffer.pixel(0, 0).unwrap(), &[100, 100, 100, 100]);
        assert_eq!(buffer.pixel(3, 3).unwrap(), &[100, 100, 100, 100]);
    }

    #[test]
    fn test_blackout_gray() {
        let mut buffer = PixelBuffer::filled(3, 3, 1, 200).unwrap();
        redact_buffer(
            &mut buffer,
            &[PixelRect::new(0, 0, 3, 1)],
            RasterMode::Blackout,
            Rgb(255, 255, 255),
        );
        assert_eq!(buffer.pixel(2, 0).unwrap(), &[255]);
        assert_eq!(buffer.pixel(2, 1).unwrap(), &[200]);
    }

    #[test]
    fn test_out_of_bounds_region_is_skipped() {
        let mut buffer = PixelBuffer::filled(10, 10, 3, 7).unwrap();
        let before = buffer.clone();
        let (applied, skipped) = redact_buffer(
            &mut buffer,
            &[PixelRect::new(50, 50, 5, 5), PixelRect::new(0, 0, -3, 4)],
            RasterMode::Blackout,
            Rgb::BLACK,
        );
        assert_eq!(applied, 0);
        assert_eq!(skipped.len(), 2);
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_partially_outside_region_is_clipped() {
        let mut buffer = PixelBuffer::filled(5, 5, 3, 9).unwrap();
        let (applied, _) = redact_buffer(
            &mut buffer,
            &[PixelRect::new(3, 3, 10, 10)],
            RasterMode::Blackout,
            Rgb::BLACK,
        );
        assert_eq!(applied, 1);
        assert_eq!(buffer.pixel(4, 4).unwrap(), &[0, 0, 0]);
        assert_eq!(buffer.pixel(2, 2).unwrap(), &[9, 9, 9]);
    }

    #[test]
    fn test_covering_pixels_rounds_outwards() {
        let region = Region::new(SurfaceId::Image, Rect::new(1.2, 0.5, 3.5, 2.0), DocumentUnits::Pixels);
        assert_eq!(covering_pixels(&region), Ok(PixelRect::new(1, 0, 3, 2)));

        let page = Region::new(SurfaceId::Page(0), Rect::new(0.0, 0.0, 2.0, 2.0), DocumentUnits::Pixels);
        assert!(covering_pixels(&page).is_err());

        let points = Region::new(SurfaceId::Image, Rect::new(0.0, 0.0, 2.0, 2.0), DocumentUnits::Points);
        assert!(covering_pixels(&points).is_err());
    }

    #[test]
    fn test_rgb_parse() {
        assert_eq!("#000000".parse::<Rgb>().unwrap(), Rgb::BLACK);
        assert_eq!("ff8000".parse::<Rgb>().unwrap(), Rgb(255, 128, 0));
        assert_eq!(Rgb(255, 128, 0).to_string(), "#ff8000");
        assert!("#abc".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_pixel_buffer_rejects_bad_length() {
        assert!(PixelBuffer::new(2, 2, 3, vec![0; 11]).is_err());
        assert!(PixelBuffer::new(2, 2, 5, vec![0; 20]).is_err());
    }
}
