//! Integration tests for placing findings on surfaces and mapping previews

use redline::adapters::traits::Surface;
use redline::adapters::{LayoutDocument, LayoutPage};
use redline::detection::config::DetectionConfig;
use redline::detection::{DetectionEngine, PiiCategory};
use redline::domain::{DocumentUnits, PixelRect, Rect, SurfaceId, WordBox};
use redline::spatial::{LocateTarget, PreviewLayout, SpatialLocator};

fn row(words: &[&str], y: f64) -> Vec<WordBox> {
    let mut x = 72.0;
    words
        .iter()
        .map(|t| {
            let w = 6.0 * t.chars().count() as f64;
            let b = WordBox::new(*t, x, y, w, 12.0);
            x += w + 4.0;
            b
        })
        .collect()
}

fn engine() -> DetectionEngine {
    DetectionEngine::new(&DetectionConfig::default(), 6).unwrap()
}

#[test]
fn test_exact_search_places_email() {
    let document = LayoutDocument::new(vec![LayoutPage::new(
        612.0,
        792.0,
        row(&["Contact:", "alice@example.com"], 100.0),
    )]);

    let detection = engine().detect_surfaces(&document.surfaces(), &[]);
    assert_eq!(detection.match_count(), 1);

    let regions = detection.regions();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].surface, SurfaceId::Page(0));
    assert_eq!(regions[0].units, DocumentUnits::Points);
    // "Contact:" is 48pt wide, plus a 4pt gap
    assert_eq!(regions[0].rect, Rect::new(124.0, 100.0, 226.0, 112.0));
}

#[test]
fn test_split_boxes_use_sliding_window() {
    let mut page = LayoutPage::new(612.0, 792.0, row(&["Phone:", "+1", "555-123-", "4567"], 200.0));
    page.text = Some("Phone: +1 555-123-4567".to_string());
    let document = LayoutDocument::new(vec![page]);

    let detection = engine().detect_surfaces(&document.surfaces(), &[]);
    let phones: Vec<_> = detection
        .matches()
        .filter(|m| m.category == PiiCategory::Phone)
        .collect();
    assert_eq!(phones.len(), 1);

    let regions = detection.regions();
    assert_eq!(regions.len(), 1);
    let words = &document.pages[0].words;
    let expected = words[1].rect().union(&words[2].rect()).union(&words[3].rect());
    assert_eq!(regions[0].rect, expected);
    assert!(detection.soft_misses.is_empty());
}

#[test]
fn test_literal_found_on_every_page() {
    let document = LayoutDocument::new(vec![
        LayoutPage::new(612.0, 792.0, row(&["Prepared", "for", "Jane", "Roe"], 80.0)),
        LayoutPage::new(612.0, 792.0, row(&["Signed:", "Jane", "Roe"], 700.0)),
    ]);

    let detection = engine().detect_surfaces(&document.surfaces(), &["Jane Roe".to_string()]);
    let surfaces: Vec<SurfaceId> = detection.regions().iter().map(|r| r.surface).collect();
    assert_eq!(surfaces, vec![SurfaceId::Page(0), SurfaceId::Page(1)]);
}

#[test]
fn test_unplaceable_literal_is_soft_miss() {
    let document = LayoutDocument::new(vec![LayoutPage::new(
        612.0,
        792.0,
        row(&["nothing", "here"], 80.0),
    )]);

    let detection = engine().detect_surfaces(&document.surfaces(), &["Jane Roe".to_string()]);
    assert!(detection.regions().is_empty());
    assert_eq!(detection.soft_misses.len(), 1);
    assert_eq!(detection.soft_misses[0].surface, SurfaceId::Page(0));
    assert_eq!(detection.soft_misses[0].category, None);
}

#[test]
fn test_located_rect_text_round_trip() {
    let document = LayoutDocument::new(vec![LayoutPage::new(
        612.0,
        792.0,
        row(&["Account:", "123456789012"], 300.0),
    )]);
    let surfaces = document.surfaces();
    let locator = SpatialLocator::default();

    let regions = locator.locate(LocateTarget::Literal("123456789012"), &surfaces[0]);
    assert_eq!(regions.len(), 1);

    let words = surfaces[0].word_boxes();
    let covered: Vec<&WordBox> = words
        .iter()
        .filter(|w| regions[0].rect.contains(&w.rect()))
        .collect();
    assert_eq!(covered.len(), 1);
    assert_eq!(covered[0].text, "123456789012");
}

#[test]
fn test_preview_maps_to_middle_page() {
    let layout = PreviewLayout::from_page_heights(&[792.0, 792.0, 792.0], 2.0).unwrap();
    let page_height = 792.0 * 2.0;

    let y = (1.5 * page_height) as i64;
    let (page, rect) = layout.to_page(&PixelRect::new(100, y, 200, 40)).unwrap();
    assert_eq!(page, 1);
    assert_eq!(rect.x0, 50.0);
    assert_eq!(rect.y0, (y as f64 - page_height) / 2.0);
    assert_eq!(rect.height(), 20.0);
}

#[test]
fn test_preview_outside_pages() {
    let layout = PreviewLayout::from_page_heights(&[792.0, 612.0], 1.0).unwrap();
    assert!(layout.to_page(&PixelRect::new(0, 1500, 10, 10)).is_none());
    assert!(layout.to_page(&PixelRect::new(0, -5, 10, 10)).is_none());
    assert_eq!(layout.to_page(&PixelRect::new(0, 792, 10, 10)).map(|(p, _)| p), Some(1));
}

#[test]
fn test_preview_round_trip() {
    let layout = PreviewLayout::from_page_heights(&[792.0, 792.0], 1.5).unwrap();
    let rect = Rect::new(72.0, 100.0, 172.0, 120.0);
    let preview = layout.to_preview(1, &rect).unwrap();
    let back = layout
        .to_page_xywh(preview.x0, preview.y0, preview.width(), preview.height())
        .unwrap();
    assert_eq!(back.0, 1);
    assert!((back.1.x0 - rect.x0).abs() < 1e-9);
    assert!((back.1.y1 - rect.y1).abs() < 1e-9);
}
