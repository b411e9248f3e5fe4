//! Default raster backend: decodes an SVG data URI and draws it, scaled,
//! into an off-screen pixmap, returning the PNG-encoded surface as a data
//! URI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::BoxFuture;
use resvg::{tiny_skia, usvg};

use crate::error::{Error, Result};
use crate::rasterize::{RasterEngine, RasterImage, RasterRequest};

const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// CPU rasterizer backed by resvg.
#[derive(Debug, Default)]
pub struct ResvgEngine;

impl ResvgEngine {
    pub fn new() -> Self {
        ResvgEngine
    }
}

impl RasterEngine for ResvgEngine {
    fn rasterize<'a>(&'a self, request: &'a RasterRequest) -> BoxFuture<'a, Result<RasterImage>> {
        Box::pin(async move { draw_scaled(request) })
    }
}

fn draw_scaled(request: &RasterRequest) -> Result<RasterImage> {
    let markup = decode_svg_data_uri(&request.svg_data_uri)?;
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(&markup, &options)
        .map_err(|err| Error::Raster(format!("vector decode failed: {err}")))?;

    let physical_width = physical_pixels(request.logical_width, request.scale);
    let physical_height = physical_pixels(request.logical_height, request.scale);
    let mut pixmap = tiny_skia::Pixmap::new(physical_width, physical_height)
        .ok_or_else(|| Error::Raster("could not allocate raster surface".to_string()))?;

    // Scale the tree's intrinsic size to fill the surface exactly.
    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        physical_width as f32 / size.width(),
        physical_height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|err| Error::Raster(format!("png encoding failed: {err}")))?;
    Ok(RasterImage {
        png_data_uri: format!("data:image/png;base64,{}", STANDARD.encode(&png)),
    })
}

fn physical_pixels(logical: f64, scale: f32) -> u32 {
    (logical * scale as f64).round().max(1.0) as u32
}

fn decode_svg_data_uri(uri: &str) -> Result<String> {
    let payload = uri
        .strip_prefix(SVG_DATA_URI_PREFIX)
        .ok_or_else(|| Error::Raster("unsupported vector payload encoding".to_string()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|err| Error::Raster(format!("malformed vector payload: {err}")))?;
    String::from_utf8(bytes).map_err(|err| Error::Raster(format!("malformed vector payload: {err}")))
}
