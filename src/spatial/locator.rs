//! Maps detected phrases onto surface regions
//!
//! Three strategies are tried in order, and the first one that yields
//! anything wins:
//!
//! 1. exact search through [`Surface::search_rects`]
//! 2. a sliding window over normalized word boxes
//! 3. single boxes that contain, or mostly cover, the phrase
//!
//! A phrase that none of them can place is a soft miss: the result is empty
//! and the miss is logged at debug level.

use super::normalize::{compact, normalize, token_count};
use crate::adapters::traits::Surface;
use crate::detection::models::{PiiCategory, PiiMatch};
use crate::domain::{Rect, Region, SurfaceId, WordBox};
use serde::{Deserialize, Serialize};

/// Default number of boxes a window may grow beyond the phrase token count
pub const DEFAULT_WINDOW_SLACK: usize = 6;

/// What to locate
#[derive(Debug, Clone, Copy)]
pub enum LocateTarget<'a> {
    Match(&'a PiiMatch),
    Literal(&'a str),
}

impl<'a> LocateTarget<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Self::Match(m) => &m.text,
            Self::Literal(s) => s,
        }
    }

    pub fn category(&self) -> Option<PiiCategory> {
        match self {
            Self::Match(m) => Some(m.category),
            Self::Literal(_) => None,
        }
    }
}

impl<'a> From<&'a PiiMatch> for LocateTarget<'a> {
    fn from(m: &'a PiiMatch) -> Self {
        Self::Match(m)
    }
}

impl<'a> From<&'a str> for LocateTarget<'a> {
    fn from(s: &'a str) -> Self {
        Self::Literal(s)
    }
}

/// A phrase that could not be placed on a surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftMiss {
    pub surface: SurfaceId,
    pub category: Option<PiiCategory>,
    pub phrase: String,
}

struct NormalizedBox {
    text: String,
    compact: String,
    rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialLocator {
    window_slack: usize,
}

impl Default for SpatialLocator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SLACK)
    }
}

impl SpatialLocator {
    pub fn new(window_slack: usize) -> Self {
        Self { window_slack }
    }

    pub fn window_slack(&self) -> usize {
        self.window_slack
    }

    /// Regions covering every placement of `target` on `surface`
    pub fn locate<S>(&self, target: LocateTarget<'_>, surface: &S) -> Vec<Region>
    where
        S: Surface + ?Sized,
    {
        let literal = target.text().trim();
        if literal.is_empty() {
            return Vec::new();
        }

        let to_regions = |rects: Vec<Rect>| -> Vec<Region> {
            rects
                .into_iter()
                .filter(Rect::is_valid)
                .map(|rect| Region::new(surface.id(), rect, surface.units()))
                .collect()
        };

        let exact = to_regions(surface.search_rects(literal));
        if !exact.is_empty() {
            return exact;
        }

        let phrase = normalize(literal);
        if phrase.is_empty() {
            crate::log_locate_miss!(surface.id(), target.category(), literal.chars().count());
            return Vec::new();
        }

        let boxes = normalize_boxes(&surface.word_boxes());

        let windowed = to_regions(self.sliding_window(&phrase, &boxes));
        if !windowed.is_empty() {
            return windowed;
        }

        let single = to_regions(single_box_fallback(&phrase, &boxes));
        if single.is_empty() {
            crate::log_locate_miss!(surface.id(), target.category(), literal.chars().count());
        }
        single
    }

    /// Locates a target and records a soft miss when nothing is found
    pub fn locate_or_record<S>(
        &self,
        target: LocateTarget<'_>,
        surface: &S,
        misses: &mut Vec<SoftMiss>,
    ) -> Vec<Region>
    where
        S: Surface + ?Sized,
    {
        let regions = self.locate(target, surface);
        if regions.is_empty() {
            misses.push(SoftMiss {
                surface: surface.id(),
                category: target.category(),
                phrase: target.text().to_string(),
            });
        }
        regions
    }

    fn sliding_window(&self, phrase: &str, boxes: &[NormalizedBox]) -> Vec<Rect> {
        let phrase_tokens = token_count(phrase);
        let phrase_compact = compact(phrase);
        let max_len = phrase_tokens + self.window_slack;

        let mut rects = Vec::new();
        let mut start = 0;

        while start < boxes.len() {
            let mut accepted = None;
            let mut partial = None;
            let mut joined = String::new();
            let mut joined_compact = String::new();

            for end in start..boxes.len().min(start + max_len) {
                if end > start {
                    joined.push(' ');
                }
                joined.push_str(&boxes[end].text);
                joined_compact.push_str(&boxes[end].compact);

                if joined == phrase {
                    accepted = Some(end);
                    break;
                }

                if joined_compact.contains(&phrase_compact) {
                    // Over-cover only counts if the first box is actually needed
                    let without_first = &joined_compact[boxes[start].compact.len()..];
                    if end == start || !without_first.contains(&phrase_compact) {
                        accepted = Some(end);
                    }
                    break;
                }

                if !phrase_compact.contains(&joined_compact) {
                    break;
                }

                let tokens = end - start + 1;
                if tokens >= phrase_tokens && joined_compact.len() * 2 >= phrase_compact.len() {
                    partial = Some(end);
                }
            }

            match accepted.or(partial) {
                Some(end) => {
                    rects.push(bounding_rect(&boxes[start..=end]));
                    start = end + 1;
                }
                None => start += 1,
            }
        }

        rects
    }
}

fn normalize_boxes(boxes: &[WordBox]) -> Vec<NormalizedBox> {
    boxes
        .iter()
        .filter(|b| b.rect().is_valid())
        .filter_map(|b| {
            let text = normalize(&b.text);
            (!text.is_empty()).then(|| NormalizedBox {
                compact: compact(&text),
                text,
                rect: b.rect(),
            })
        })
        .collect()
}

fn single_box_fallback(phrase: &str, boxes: &[NormalizedBox]) -> Vec<Rect> {
    let phrase_compact = compact(phrase);
    let phrase_chars = phrase_compact.chars().count();

    boxes
        .iter()
        .filter(|b| {
            if b.text.contains(phrase) || b.compact.contains(&phrase_compact) {
                return true;
            }
            let box_chars = b.compact.chars().count();
            phrase_compact.contains(&b.compact) && box_chars >= 4 && box_chars * 2 >= phrase_chars
        })
        .map(|b| b.rect)
        .collect()
}

fn bounding_rect(boxes: &[NormalizedBox]) -> Rect {
    boxes
        .iter()
        .skip(1)
        .fold(boxes[0].rect, |acc, b| acc.union(&b.rect))
}
