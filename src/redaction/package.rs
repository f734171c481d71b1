//! Blur of images embedded in OOXML packages

use super::blur::blur_image;
use super::outcome::{RedactionOutcome, SkippedRegion};
use crate::adapters::traits::{ImageCodec, PackageCodec, PackageEntry};
use crate::domain::Result;
use std::collections::BTreeSet;

/// Media folders of Word and Excel packages
pub const DEFAULT_MEDIA_PREFIXES: [&str; 2] = ["word/media/", "xl/media/"];

fn is_media(entry: &PackageEntry, prefixes: &[String]) -> bool {
    !entry.is_directory() && prefixes.iter().any(|p| entry.name.starts_with(p.as_str()))
}

/// Base names of the media entries under `prefixes`, in package order
pub fn list_media(
    codec: &dyn PackageCodec,
    bytes: &[u8],
    prefixes: &[String],
) -> Result<Vec<String>> {
    Ok(codec
        .read_entries(bytes)?
        .into_iter()
        .filter(|entry| is_media(entry, prefixes))
        .map(|entry| entry.base_name().to_string())
        .collect())
}

/// Blurs the media entries whose base name is in `include`
///
/// Entry order and every other entry are preserved. An image that cannot be
/// decoded or re-encoded is copied through unchanged and reported as
/// skipped. When nothing is blurred the input bytes are returned as is.
pub fn blur_package_media(
    codec: &dyn PackageCodec,
    images: &dyn ImageCodec,
    bytes: &[u8],
    prefixes: &[String],
    include: &BTreeSet<String>,
    sigma: f64,
) -> Result<RedactionOutcome> {
    if include.is_empty() {
        return Ok(RedactionOutcome::unchanged(bytes, Vec::new()));
    }

    let mut entries = codec.read_entries(bytes)?;
    let mut applied = 0;
    let mut skipped = Vec::new();

    for entry in entries.iter_mut() {
        if !is_media(entry, prefixes) || !include.contains(entry.base_name()) {
            continue;
        }

        let blurred = images.decode(&entry.data).and_then(|decoded| {
            let mut buffer = decoded.buffer;
            blur_image(&mut buffer, sigma);
            images.encode(&buffer, &decoded.format)
        });

        match blurred {
            Ok(data) => {
                entry.data = data;
                applied += 1;
            }
            Err(e) => skipped.push(SkippedRegion::new(entry.name.clone(), e.to_string())),
        }
    }

    if applied == 0 {
        return Ok(RedactionOutcome::unchanged(bytes, skipped));
    }

    tracing::debug!(applied, skipped = skipped.len(), sigma, "Package media blurred");
    Ok(RedactionOutcome::changed(
        codec.write_entries(&entries)?,
        applied,
        skipped,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::traits::{DecodedImage, ImageFormat};
    use crate::domain::RedlineError;
    use crate::redaction::raster::PixelBuffer;

    /// Entries serialized as `name=data` lines
    struct Lines;

    impl PackageCodec for Lines {
        fn read_entries(&self, bytes: &[u8]) -> Result<Vec<PackageEntry>> {
            let text = std::str::from_utf8(bytes).map_err(|e| RedlineError::Decode(e.to_string()))?;
            Ok(text
                .lines()
                .filter_map(|line| line.split_once('='))
                .map(|(name, data)| PackageEntry::new(name, data.as_bytes().to_vec()))
                .collect())
        }

        fn write_entries(&self, entries: &[PackageEntry]) -> Result<Vec<u8>> {
            let lines: Vec<String> = entries
                .iter()
                .map(|e| format!("{}={}", e.name, String::from_utf8_lossy(&e.data)))
                .collect();
            Ok(lines.join("\n").into_bytes())
        }
    }

    /// A 3x1 gray image written as three digits, e.g. "090"
    struct Digits;

    impl ImageCodec for Digits {
        fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
            if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_digit) {
                return Err(RedlineError::Decode("not an image".to_string()));
            }
            let data = bytes.iter().map(|b| (b - b'0') * 10).collect();
            Ok(DecodedImage {
                buffer: PixelBuffer::new(3, 1, 1, data)?,
                format: ImageFormat::Png,
            })
        }

        fn encode(&self, buffer: &PixelBuffer, _format: &ImageFormat) -> Result<Vec<u8>> {
            Ok(buffer.data().iter().map(|v| b'0' + (v / 10).min(9)).collect())
        }
    }

    fn prefixes() -> Vec<String> {
        DEFAULT_MEDIA_PREFIXES.iter().map(|p| p.to_string()).collect()
    }

    fn include(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    const PACKAGE: &str = "word/document.xml=<w/>\nword/media/image1.png=090\nword/media/image2.png=090";

    #[test]
    fn test_list_media() {
        let names = list_media(&Lines, PACKAGE.as_bytes(), &prefixes()).unwrap();
        assert_eq!(names, vec!["image1.png", "image2.png"]);
    }

    #[test]
    fn test_only_included_media_is_blurred() {
        let outcome = blur_package_media(
            &Lines,
            &Digits,
            PACKAGE.as_bytes(),
            &prefixes(),
            &include(&["image2.png"]),
            8.0,
        )
        .unwrap();
        assert_eq!(outcome.applied, 1);
        let text = String::from_utf8(outcome.bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "word/document.xml=<w/>");
        assert_eq!(lines[1], "word/media/image1.png=090");
        assert_ne!(lines[2], "word/media/image2.png=090");
    }

    #[test]
    fn test_undecodable_media_passes_through() {
        let package = "word/media/broken.png=zz\nxl/media/image1.png=090";
        let outcome = blur_package_media(
            &Lines,
            &Digits,
            package.as_bytes(),
            &prefixes(),
            &include(&["broken.png"]),
            8.0,
        )
        .unwrap();
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.bytes, package.as_bytes());
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].target, "word/media/broken.png");
    }

    #[test]
    fn test_entries_outside_media_are_ignored() {
        let package = "word/image1.png=090";
        let outcome = blur_package_media(
            &Lines,
            &Digits,
            package.as_bytes(),
            &prefixes(),
            &include(&["image1.png"]),
            8.0,
        )
        .unwrap();
        assert!(outcome.is_unchanged());
    }
}
