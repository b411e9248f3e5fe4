//! Markdown rendering boundary: the renderer capability populates a
//! detached mount element with the document's markup tree.

use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::BoxFuture;

use crate::dom::Element;
use crate::error::Result;

/// Lifecycle handle scoping one render call. Created before rendering and
/// released unconditionally afterwards; backends may tie per-render
/// resources to it.
#[derive(Debug)]
pub struct RenderScope {
    id: u64,
}

static SCOPE_COUNTER: AtomicU64 = AtomicU64::new(0);

impl RenderScope {
    pub fn new() -> Self {
        let id = SCOPE_COUNTER.fetch_add(1, Ordering::Relaxed);
        log::debug!("render scope {id} opened");
        RenderScope { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Default for RenderScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RenderScope {
    fn drop(&mut self) {
        log::debug!("render scope {} released", self.id);
    }
}

/// Renders raw Markdown into a mount element.
pub trait MarkdownRenderer: Send + Sync {
    /// Populates `mount` with the markup tree for `source`. `context`
    /// identifies the document being rendered (used for diagnostics and
    /// relative resolution); `scope` bounds the render lifecycle.
    fn render<'a>(
        &'a self,
        source: &'a str,
        mount: &'a mut Element,
        context: &'a str,
        scope: &'a RenderScope,
    ) -> BoxFuture<'a, Result<()>>;
}

#[cfg(feature = "markdown")]
pub use backend::ComrakRenderer;

#[cfg(feature = "markdown")]
mod backend {
    use comrak::{markdown_to_html, Options};
    use ego_tree::NodeRef;
    use futures::future::BoxFuture;
    use scraper::Html;

    use super::{MarkdownRenderer, RenderScope};
    use crate::dom::{Element, Foreign, Node};
    use crate::error::Result;

    /// Default renderer: comrak converts Markdown to HTML, which is parsed
    /// into the export tree. `svg` elements and their subtrees become
    /// foreign nodes.
    #[derive(Debug, Default)]
    pub struct ComrakRenderer;

    impl ComrakRenderer {
        pub fn new() -> Self {
            ComrakRenderer
        }
    }

    impl MarkdownRenderer for ComrakRenderer {
        fn render<'a>(
            &'a self,
            source: &'a str,
            mount: &'a mut Element,
            context: &'a str,
            scope: &'a RenderScope,
        ) -> BoxFuture<'a, Result<()>> {
            Box::pin(async move {
                log::debug!("rendering {context} in scope {}", scope.id());
                let html = markdown_to_html(source, &render_options());
                append_fragment(mount, &html);
                Ok(())
            })
        }
    }

    fn render_options() -> Options {
        let mut options = Options::default();
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options.extension.header_ids = Some(String::new());
        options.render.unsafe_ = true; // Allow raw HTML
        options
    }

    fn append_fragment(mount: &mut Element, html: &str) {
        let fragment = Html::parse_fragment(html);
        for child in fragment.root_element().children() {
            if let Some(node) = convert_node(child) {
                mount.push(node);
            }
        }
    }

    fn convert_node(node: NodeRef<scraper::Node>) -> Option<Node> {
        match node.value() {
            scraper::Node::Text(text) => Some(Node::Text(text.text.to_string())),
            scraper::Node::Comment(comment) => Some(Node::Comment(comment.comment.to_string())),
            scraper::Node::Element(element) if element.name() == "svg" => {
                Some(Node::Foreign(convert_foreign(node, element)))
            }
            scraper::Node::Element(element) => {
                let mut converted = Element::new(element.name());
                for (name, value) in sorted_attributes(element) {
                    converted.set_attr(name, value);
                }
                for child in node.children() {
                    if let Some(child_node) = convert_node(child) {
                        converted.push(child_node);
                    }
                }
                Some(Node::Element(converted))
            }
            _ => None,
        }
    }

    /// Inside foreign content every element stays foreign, whatever its
    /// name.
    fn convert_foreign(node: NodeRef<scraper::Node>, element: &scraper::node::Element) -> Foreign {
        let mut converted = Foreign::new(element.name());
        for (name, value) in sorted_attributes(element) {
            converted.set_attr(name, value);
        }
        for child in node.children() {
            match child.value() {
                scraper::Node::Text(text) => converted.push(Node::Text(text.text.to_string())),
                scraper::Node::Comment(comment) => {
                    converted.push(Node::Comment(comment.comment.to_string()))
                }
                scraper::Node::Element(inner) => {
                    converted.push(Node::Foreign(convert_foreign(child, inner)))
                }
                _ => {}
            }
        }
        converted
    }

    /// The parser stores attributes unordered; sort them so serialization
    /// is deterministic.
    fn sorted_attributes(element: &scraper::node::Element) -> Vec<(String, String)> {
        let mut attributes: Vec<(String, String)> = element
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        attributes.sort();
        attributes
    }
}
