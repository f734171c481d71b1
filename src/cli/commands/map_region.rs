//! Map-region command implementation
//!
//! Converts a rectangle drawn on a stacked multi-page preview into a page
//! index and a rectangle in page points.

use super::{load_or_report, parse_number_list, EXIT_CONFIG};
use crate::domain::PixelRect;
use crate::spatial::preview::{DisplayScale, PreviewLayout};
use clap::Args;
use serde::Serialize;

/// Arguments for the map-region command
#[derive(Args, Debug)]
pub struct MapRegionArgs {
    /// Native page heights in points, comma separated (e.g. 792,792,612)
    #[arg(long, value_name = "HEIGHTS")]
    pub page_heights: String,

    /// Zoom the preview was rendered at (default: redaction.preview_zoom)
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Preview rectangle as x,y,w,h in preview pixels (repeatable)
    #[arg(long = "rect", value_name = "X,Y,W,H", required = true)]
    pub rects: Vec<String>,

    /// Rectangles were drawn on a scaled canvas: original preview size, then canvas size
    #[arg(long, value_name = "OW,OH,DW,DH")]
    pub display: Option<String>,
}

#[derive(Debug, Serialize)]
struct MappedRegion {
    preview: PixelRect,
    page: Option<usize>,
    x0: Option<f64>,
    y0: Option<f64>,
    x1: Option<f64>,
    y1: Option<f64>,
}

impl MapRegionArgs {
    /// Execute the map-region command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_or_report(config_path) else {
            return Ok(EXIT_CONFIG);
        };
        let zoom = self.zoom.unwrap_or(config.redaction.preview_zoom);

        let heights = match parse_number_list::<f64>(&self.page_heights) {
            Ok(heights) => heights,
            Err(e) => {
                eprintln!("❌ --page-heights: {e}");
                return Ok(EXIT_CONFIG);
            }
        };
        let layout = match PreviewLayout::from_page_heights(&heights, zoom) {
            Ok(layout) => layout,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let display = match self.display.as_deref().map(parse_display).transpose() {
            Ok(display) => display,
            Err(e) => {
                eprintln!("❌ --display: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let mut mapped = Vec::with_capacity(self.rects.len());
        for spec in &self.rects {
            let values = match parse_values(spec) {
                Ok(values) => values,
                Err(e) => {
                    eprintln!("❌ --rect '{spec}': {e}");
                    return Ok(EXIT_CONFIG);
                }
            };
            let rect = match &display {
                Some(scale) => scale.to_original(&scale.interpret(values)),
                None => PixelRect::new(values[0], values[1], values[2], values[3]),
            };
            mapped.push(map_one(&layout, rect));
        }

        println!("{}", serde_json::to_string_pretty(&mapped)?);
        Ok(0)
    }
}

fn parse_values(spec: &str) -> Result<[i64; 4], String> {
    match parse_number_list::<i64>(spec)?.as_slice() {
        [a, b, c, d] => Ok([*a, *b, *c, *d]),
        values => Err(format!("expected 4 values, got {}", values.len())),
    }
}

fn parse_display(spec: &str) -> Result<DisplayScale, String> {
    match parse_number_list::<u32>(spec)?.as_slice() {
        [ow, oh, dw, dh] => Ok(DisplayScale::new(*ow, *oh, *dw, *dh)),
        values => Err(format!("expected 4 values, got {}", values.len())),
    }
}

fn map_one(layout: &PreviewLayout, preview: PixelRect) -> MappedRegion {
    match layout.to_page(&preview) {
        Some((page, rect)) => MappedRegion {
            preview,
            page: Some(page),
            x0: Some(rect.x0),
            y0: Some(rect.y0),
            x1: Some(rect.x1),
            y1: Some(rect.y1),
        },
        None => {
            tracing::warn!(y = preview.y, "Rectangle does not start on any page");
            MappedRegion {
                preview,
                page: None,
                x0: None,
                y0: None,
                x1: None,
                y1: None,
            }
        }
    }
}
