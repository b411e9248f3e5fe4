//! Vector rasterization: replaces embedded vector-graphic nodes with
//! self-contained raster images so the markup survives paste targets that
//! strip or mangle inline vector content.
//!
//! Nodes are processed strictly one at a time: each conversion is awaited
//! before the next begins, so failures stay isolated per node and the
//! replacement order matches discovery order.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::BoxFuture;

use crate::dom::{Element, Foreign, Node};
use crate::error::Result;

/// Class marking a vector node as a decorative icon; such nodes are never
/// converted.
pub const ICON_CLASS: &str = "icon";

/// Class marking an element whose entire subtree holds decorative icons.
pub const ICON_CONTAINER_CLASS: &str = "icon-container";

const VECTOR_TAG: &str = "svg";
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Child-index path addressing a node below the traversal root.
type NodePath = Vec<usize>;

/// One vector node handed to a [`RasterEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct RasterRequest {
    /// The node's full markup as a self-contained `image/svg+xml` data URI.
    pub svg_data_uri: String,
    /// Logical (layout) width in CSS pixels.
    pub logical_width: f64,
    /// Logical (layout) height in CSS pixels.
    pub logical_height: f64,
    /// Device scale factor; the raster surface is `logical × scale` pixels.
    pub scale: f32,
}

/// A successfully rasterized vector node.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    /// Self-contained `image/png` data URI at physical pixel dimensions.
    pub png_data_uri: String,
}

/// Decodes and draws one vector graphic to a raster image.
///
/// Implementations decode the SVG payload, draw it scaled to fill a surface
/// of `logical × scale` physical pixels, and return the PNG-encoded result.
/// A failed decode is reported as an error; the batch loop tolerates it.
pub trait RasterEngine: Send + Sync {
    fn rasterize<'a>(&'a self, request: &'a RasterRequest) -> BoxFuture<'a, Result<RasterImage>>;
}

/// Finds every vector-graphic node in `root`'s subtree (document order, any
/// element nesting depth) and replaces each with an `img` element carrying
/// an embedded raster payload.
///
/// Excluded from conversion: nodes carrying the [`ICON_CLASS`] marker, and
/// nodes below an element carrying [`ICON_CONTAINER_CLASS`]. Nodes whose
/// resolved width or height is zero are skipped. A per-node engine failure
/// leaves that node untouched and the batch continues.
pub async fn rasterize_vectors(root: &mut Element, engine: &dyn RasterEngine, scale: f32) {
    let targets = collect_vector_nodes(root);
    for path in targets {
        let Some(Node::Foreign(vector)) = root.node_at(&path) else {
            continue;
        };
        let width = resolve_dimension(vector, "width");
        let height = resolve_dimension(vector, "height");
        if width == 0.0 || height == 0.0 {
            log::debug!("skipping zero-area vector node <{}>", vector.tag());
            continue;
        }

        let request = RasterRequest {
            svg_data_uri: svg_data_uri(&vector_markup(vector)),
            logical_width: width,
            logical_height: height,
            scale,
        };

        match engine.rasterize(&request).await {
            Ok(image) => {
                if let Some(slot) = root.node_at_mut(&path) {
                    *slot = Node::Element(raster_image_element(&image, width, height));
                }
            }
            Err(err) => {
                log::warn!("vector node left unconverted: {err}");
            }
        }
    }
}

/// Pre-order collection of convertible vector nodes. Foreign subtrees are
/// atomic: a vector element nested inside foreign content belongs to its
/// root's markup and is not an independent target.
fn collect_vector_nodes(root: &Element) -> Vec<NodePath> {
    let mut targets = Vec::new();
    let mut prefix = Vec::new();
    collect_into(
        root,
        root.has_class(ICON_CONTAINER_CLASS),
        &mut prefix,
        &mut targets,
    );
    targets
}

fn collect_into(
    element: &Element,
    inside_icon_container: bool,
    prefix: &mut NodePath,
    targets: &mut Vec<NodePath>,
) {
    for (index, child) in element.children().iter().enumerate() {
        match child {
            Node::Element(el) => {
                prefix.push(index);
                collect_into(
                    el,
                    inside_icon_container || el.has_class(ICON_CONTAINER_CLASS),
                    prefix,
                    targets,
                );
                prefix.pop();
            }
            Node::Foreign(foreign) if foreign.tag() == VECTOR_TAG => {
                if !inside_icon_container && !foreign.has_class(ICON_CLASS) {
                    prefix.push(index);
                    targets.push(prefix.clone());
                    prefix.pop();
                }
            }
            _ => {}
        }
    }
}

/// Logical dimension of a vector node, in precedence order: an attribute
/// parsed as a user-unit length if non-zero, the attribute as a bare number
/// if positive, then the node's intrinsic `viewBox` geometry. Returns zero
/// when nothing resolves.
fn resolve_dimension(vector: &Foreign, name: &str) -> f64 {
    if let Some(raw) = vector.attr(name) {
        if let Some(value) = parse_user_length(raw) {
            if value != 0.0 {
                return value;
            }
        }
        if let Ok(value) = raw.trim().parse::<f64>() {
            if value > 0.0 {
                return value;
            }
        }
    }
    view_box_dimension(vector, name).unwrap_or(0.0)
}

fn parse_user_length(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    trimmed.parse::<f64>().ok()
}

fn view_box_dimension(vector: &Foreign, name: &str) -> Option<f64> {
    let view_box = vector.attr("viewBox")?;
    let values: Vec<f64> = view_box
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    if values.len() != 4 {
        return None;
    }
    Some(if name == "width" { values[2] } else { values[3] })
}

/// Serializes a vector node to standalone markup, declaring the SVG
/// namespace on the root when the source omitted it so the payload decodes
/// outside its source document.
fn vector_markup(vector: &Foreign) -> String {
    let mut out = String::new();
    if vector.attr("xmlns").is_none() {
        let mut namespaced = vector.clone();
        namespaced.set_attr("xmlns", SVG_NAMESPACE);
        Node::Foreign(namespaced).serialize_into(&mut out);
    } else {
        Node::Foreign(vector.clone()).serialize_into(&mut out);
    }
    out
}

fn svg_data_uri(markup: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(markup))
}

fn raster_image_element(image: &RasterImage, width: f64, height: f64) -> Element {
    let mut img = Element::new("img");
    img.set_attr("src", image.png_data_uri.clone());
    img.set_attr("width", format_dimension(width));
    img.set_attr("height", format_dimension(height));
    img
}

/// Attribute rendering of a logical dimension: integral values print
/// without a fractional part.
fn format_dimension(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
