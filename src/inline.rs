//! Style inlining: copies resolved presentation styles into each element's
//! inline-style bag so the serialized markup survives style-stripping paste
//! targets.

use std::collections::BTreeMap;

use crate::dom::{Element, Node};

/// The properties copied into inline styles: typographic and basic
/// decoration values only. Layout and box-model properties are never
/// inlined.
pub const INLINE_PROPERTIES: [&str; 15] = [
    "color",
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "text-decoration",
    "text-align",
    "line-height",
    "margin",
    "padding",
    "background-color",
    "list-style-type",
    "border",
    "border-collapse",
    "white-space",
];

/// An ephemeral, read-only snapshot of resolved style values for one
/// element. Queried fresh per node; never cached by the pipeline.
#[derive(Debug, Clone, Default)]
pub struct ComputedStyle {
    values: BTreeMap<String, String>,
}

impl ComputedStyle {
    pub fn new() -> Self {
        ComputedStyle::default()
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.values.insert(property.into(), value.into());
    }

    /// Builder-style insert, convenient for resolver implementations.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(property, value);
        self
    }

    /// Returns the resolved value for `property`, or `""` when the resolver
    /// produced no value for it.
    pub fn value(&self, property: &str) -> &str {
        self.values.get(property).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolves presentation styles for an element.
///
/// Injected into [`inline_styles`] rather than reached through a global so
/// tests and embedders can substitute their own resolution.
pub trait StyleResolver: Send + Sync {
    fn resolve(&self, element: &Element) -> ComputedStyle;
}

/// Walks `root` and its native element descendants in pre-order, copying
/// each allowlisted property with a non-empty resolved value into the
/// element's inline-style bag (overwriting prior inline values). Empty
/// resolved values leave the property unset so inherited and default
/// behavior is preserved.
///
/// Text, comment, and foreign-namespace nodes are not visited, and the walk
/// does not recurse through foreign subtrees.
pub fn inline_styles(root: &mut Element, resolver: &dyn StyleResolver) {
    let computed = resolver.resolve(root);
    for property in INLINE_PROPERTIES {
        let value = computed.value(property);
        if !value.is_empty() {
            root.style_mut().set_property(property, value);
        }
    }

    for child in root.children_mut() {
        if let Node::Element(element) = child {
            inline_styles(element, resolver);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Foreign;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Tag-keyed resolver that records every element it was asked about.
    struct MapResolver {
        by_tag: HashMap<String, Vec<(&'static str, &'static str)>>,
        calls: Mutex<Vec<String>>,
    }

    impl MapResolver {
        fn new() -> Self {
            MapResolver {
                by_tag: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn rule(mut self, tag: &str, properties: &[(&'static str, &'static str)]) -> Self {
            self.by_tag.insert(tag.to_string(), properties.to_vec());
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl StyleResolver for MapResolver {
        fn resolve(&self, element: &Element) -> ComputedStyle {
            self.calls.lock().unwrap().push(element.tag().to_string());
            let mut computed = ComputedStyle::new();
            if let Some(properties) = self.by_tag.get(element.tag()) {
                for (property, value) in properties {
                    computed.insert(*property, *value);
                }
            }
            computed
        }
    }

    #[test]
    fn inlines_resolved_properties_onto_the_element() {
        let resolver = MapResolver::new().rule(
            "div",
            &[
                ("color", "rgb(255, 0, 0)"),
                ("font-size", "16px"),
                ("font-weight", "700"),
            ],
        );
        let mut div = Element::new("div");

        inline_styles(&mut div, &resolver);

        assert_eq!(div.style().property("color"), "rgb(255, 0, 0)");
        assert_eq!(div.style().property("font-size"), "16px");
        assert_eq!(div.style().property("font-weight"), "700");
    }

    #[test]
    fn skips_properties_with_empty_resolved_values() {
        let resolver = MapResolver::new().rule("div", &[("color", "rgb(0, 0, 0)")]);
        let mut div = Element::new("div");

        inline_styles(&mut div, &resolver);

        assert_eq!(div.style().property("color"), "rgb(0, 0, 0)");
        assert_eq!(div.style().property("font-size"), "");
        assert_eq!(div.style().property("background-color"), "");
    }

    #[test]
    fn only_allowlisted_properties_are_ever_set() {
        let resolver = MapResolver::new().rule(
            "div",
            &[
                ("color", "red"),
                ("font-size", "14px"),
                ("display", "block"),
                ("position", "relative"),
                ("z-index", "10"),
                ("opacity", "0.5"),
            ],
        );
        let mut div = Element::new("div");

        inline_styles(&mut div, &resolver);

        assert_eq!(div.style().property("color"), "red");
        assert_eq!(div.style().property("font-size"), "14px");
        assert_eq!(div.style().property("display"), "");
        assert_eq!(div.style().property("position"), "");
        assert_eq!(div.style().property("z-index"), "");
        assert_eq!(div.style().property("opacity"), "");
    }

    #[test]
    fn overwrites_prior_inline_values() {
        let resolver = MapResolver::new().rule("p", &[("color", "blue")]);
        let mut p = Element::new("p");
        p.set_attr("style", "color: red; display: inline");

        inline_styles(&mut p, &resolver);

        assert_eq!(p.style().property("color"), "blue");
        // Non-allowlisted declarations already inline are left as they were.
        assert_eq!(p.style().property("display"), "inline");
    }

    #[test]
    fn processes_nested_element_children() {
        let resolver = MapResolver::new()
            .rule("div", &[("color", "blue")])
            .rule("span", &[("font-weight", "bold")]);
        let mut parent = Element::new("div");
        parent.push(Node::Element(Element::new("span")));

        inline_styles(&mut parent, &resolver);

        assert_eq!(parent.style().property("color"), "blue");
        let child = parent.children()[0].as_element().unwrap();
        assert_eq!(child.style().property("font-weight"), "bold");
    }

    #[test]
    fn handles_deeply_nested_structures() {
        let resolver = MapResolver::new()
            .rule("div", &[("margin", "10px")])
            .rule("p", &[("padding", "5px")])
            .rule("strong", &[("font-weight", "700")])
            .rule("em", &[("font-style", "italic")]);

        let mut strong = Element::new("strong");
        strong.push(Node::Element(Element::new("em")));
        let mut p = Element::new("p");
        p.push(Node::Element(strong));
        let mut root = Element::new("div");
        root.push(Node::Element(p));

        inline_styles(&mut root, &resolver);

        assert_eq!(root.style().property("margin"), "10px");
        let p = root.children()[0].as_element().unwrap();
        assert_eq!(p.style().property("padding"), "5px");
        let strong = p.children()[0].as_element().unwrap();
        assert_eq!(strong.style().property("font-weight"), "700");
        let em = strong.children()[0].as_element().unwrap();
        assert_eq!(em.style().property("font-style"), "italic");
    }

    #[test]
    fn skips_foreign_children_entirely() {
        let resolver = MapResolver::new().rule("div", &[("color", "green")]);
        let mut parent = Element::new("div");
        parent.push(Node::Foreign(Foreign::new("svg")));

        inline_styles(&mut parent, &resolver);

        assert_eq!(parent.style().property("color"), "green");
        assert_eq!(resolver.calls(), vec!["div"]);
    }

    #[test]
    fn does_not_recurse_through_foreign_nodes_into_elements() {
        let resolver = MapResolver::new().rule("span", &[("color", "red")]);
        let mut foreign = Foreign::new("svg");
        foreign.push(Node::Element(Element::new("span")));
        let mut parent = Element::new("div");
        parent.push(Node::Foreign(foreign));

        inline_styles(&mut parent, &resolver);

        assert_eq!(resolver.calls(), vec!["div"]);
        let inner = parent.children()[0].as_foreign().unwrap().children()[0]
            .as_element()
            .unwrap();
        assert!(inner.style().is_empty());
    }

    #[test]
    fn skips_text_nodes() {
        let resolver = MapResolver::new().rule("div", &[("color", "black")]);
        let mut parent = Element::new("div");
        parent.push(Node::Text("hello".into()));

        inline_styles(&mut parent, &resolver);

        assert_eq!(parent.style().property("color"), "black");
        assert_eq!(resolver.calls().len(), 1);
    }

    #[test]
    fn processes_siblings_at_the_same_level() {
        let resolver = MapResolver::new()
            .rule("ul", &[("list-style-type", "disc")])
            .rule("li", &[("color", "red")]);
        let mut parent = Element::new("ul");
        parent.push(Node::Element(Element::new("li")));
        parent.push(Node::Element(Element::new("li")));
        parent.push(Node::Element(Element::new("li")));

        inline_styles(&mut parent, &resolver);

        assert_eq!(parent.style().property("list-style-type"), "disc");
        for child in parent.children() {
            assert_eq!(child.as_element().unwrap().style().property("color"), "red");
        }
        assert_eq!(resolver.calls(), vec!["ul", "li", "li", "li"]);
    }

    #[test]
    fn handles_elements_with_no_resolved_styles() {
        let resolver = MapResolver::new();
        let mut div = Element::new("div");

        inline_styles(&mut div, &resolver);

        assert!(div.style().is_empty());
    }

    #[test]
    fn mixed_children_visit_only_native_elements() {
        let resolver = MapResolver::new()
            .rule("div", &[("color", "black")])
            .rule("span", &[("font-size", "12px")]);
        let mut parent = Element::new("div");
        parent.push(Node::Element(Element::new("span")));
        parent.push(Node::Foreign(Foreign::new("rect")));
        parent.push(Node::Text("text".into()));
        parent.push(Node::Comment("comment".into()));

        inline_styles(&mut parent, &resolver);

        assert_eq!(resolver.calls(), vec!["div", "span"]);
        assert_eq!(parent.style().property("color"), "black");
        let span = parent.children()[0].as_element().unwrap();
        assert_eq!(span.style().property("font-size"), "12px");
    }

    #[test]
    fn inlines_all_fifteen_properties_when_all_resolve() {
        let all: Vec<(&str, &str)> = vec![
            ("color", "rgb(0, 0, 0)"),
            ("font-family", "Arial"),
            ("font-size", "16px"),
            ("font-weight", "400"),
            ("font-style", "normal"),
            ("text-decoration", "none"),
            ("text-align", "left"),
            ("line-height", "1.5"),
            ("margin", "0px"),
            ("padding", "0px"),
            ("background-color", "rgba(0, 0, 0, 0)"),
            ("list-style-type", "disc"),
            ("border", "0px none rgb(0, 0, 0)"),
            ("border-collapse", "separate"),
            ("white-space", "normal"),
        ];
        let resolver = MapResolver::new().rule("div", &all);
        let mut div = Element::new("div");

        inline_styles(&mut div, &resolver);

        assert_eq!(div.style().len(), INLINE_PROPERTIES.len());
        for property in INLINE_PROPERTIES {
            assert!(!div.style().property(property).is_empty(), "{property}");
        }
    }
}
