//! Blackout of rectangular regions on paged documents

use super::outcome::{RedactionOutcome, SkippedRegion};
use super::raster::Rgb;
use crate::adapters::traits::{DocumentLoader, PagedDocument};
use crate::domain::{DocumentUnits, PixelRect, Rect, Region, Result, SurfaceId};
use crate::spatial::PreviewLayout;

fn describe(region: &Region) -> String {
    let r = &region.rect;
    format!(
        "{} ({:.1},{:.1})-({:.1},{:.1})",
        region.surface, r.x0, r.y0, r.x1, r.y1
    )
}

/// Checks a region against the document and clips it to its page
fn resolve<D>(document: &D, region: &Region) -> std::result::Result<(usize, Rect), String>
where
    D: PagedDocument + ?Sized,
{
    let SurfaceId::Page(page) = region.surface else {
        return Err(format!("{} is not a page", region.surface));
    };
    if region.units != DocumentUnits::Points {
        return Err(format!("expected points, got {:?}", region.units));
    }
    if page >= document.page_count() {
        return Err(format!(
            "page index out of range (document has {} pages)",
            document.page_count()
        ));
    }
    if !region.rect.is_valid() {
        return Err("rectangle is empty or not finite".to_string());
    }
    let bounds = document
        .page_bounds(page)
        .ok_or_else(|| "page has no bounds".to_string())?;
    let clipped = region
        .rect
        .intersect(&bounds)
        .ok_or_else(|| "rectangle lies outside the page".to_string())?;
    Ok((page, clipped))
}

/// Paints every region with `color` and saves the document
///
/// Regions that name a missing page, have no area, or fall outside their
/// page are skipped and reported. When nothing applies the input bytes are
/// returned byte for byte.
pub fn redact_pages<L>(
    loader: &L,
    bytes: &[u8],
    regions: &[Region],
    color: Rgb,
) -> Result<RedactionOutcome>
where
    L: DocumentLoader + ?Sized,
{
    if regions.is_empty() {
        return Ok(RedactionOutcome::unchanged(bytes, Vec::new()));
    }

    let mut document = loader.load(bytes)?;
    let mut applied = 0;
    let mut skipped = Vec::new();

    for region in regions {
        match resolve(&document, region) {
            Ok((page, rect)) => match document.fill_rect(page, rect, color) {
                Ok(()) => applied += 1,
                Err(e) => skipped.push(SkippedRegion::new(describe(region), e.to_string())),
            },
            Err(reason) => skipped.push(SkippedRegion::new(describe(region), reason)),
        }
    }

    if applied == 0 {
        return Ok(RedactionOutcome::unchanged(bytes, skipped));
    }

    tracing::debug!(applied, skipped = skipped.len(), "Page regions filled");
    Ok(RedactionOutcome::changed(document.save()?, applied, skipped))
}

/// Converts preview rectangles into page regions
///
/// Rectangles that start outside every page are returned as skipped.
pub fn regions_from_preview(
    layout: &PreviewLayout,
    rects: &[PixelRect],
) -> (Vec<Region>, Vec<SkippedRegion>) {
    let mut regions = Vec::with_capacity(rects.len());
    let mut skipped = Vec::new();
    for rect in rects {
        match layout.to_region(rect) {
            Some(region) => regions.push(region),
            None => skipped.push(SkippedRegion::new(
                format!("preview [{}, {}, {}, {}]", rect.x, rect.y, rect.w, rect.h),
                "rectangle does not start on any page",
            )),
        }
    }
    (regions, skipped)
}
