//! Built-in style resolution: a small rule table mapping markup tags to
//! typographic values, standing in for a live styling engine so the default
//! pipeline produces presentable output. Rules can be replaced wholesale
//! from JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::Element;
use crate::error::{Error, Result};
use crate::inline::{ComputedStyle, StyleResolver};

type PropertyMap = BTreeMap<String, String>;

/// Resolution rules: `base` applies to every element, `tags` overrides per
/// tag name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeRules {
    #[serde(default)]
    pub base: PropertyMap,
    #[serde(default)]
    pub tags: BTreeMap<String, PropertyMap>,
}

impl ThemeRules {
    /// An empty rule set: every element resolves to no styles.
    pub fn empty() -> Self {
        ThemeRules {
            base: PropertyMap::new(),
            tags: BTreeMap::new(),
        }
    }

    /// The built-in document theme.
    pub fn standard() -> Self {
        let mut rules = ThemeRules::empty();
        rules.base.insert("color".into(), "rgb(36, 41, 47)".into());
        rules.base.insert(
            "font-family".into(),
            "-apple-system, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif".into(),
        );
        rules.base.insert("font-size".into(), "16px".into());
        rules.base.insert("line-height".into(), "1.6".into());

        rules.tag("h1", &[("font-size", "32px"), ("font-weight", "600"), ("margin", "24px 0 16px 0")]);
        rules.tag("h2", &[("font-size", "24px"), ("font-weight", "600"), ("margin", "24px 0 16px 0")]);
        rules.tag("h3", &[("font-size", "20px"), ("font-weight", "600"), ("margin", "24px 0 16px 0")]);
        rules.tag("h4", &[("font-size", "16px"), ("font-weight", "600"), ("margin", "24px 0 16px 0")]);
        rules.tag("p", &[("margin", "0 0 16px 0")]);
        rules.tag("a", &[("color", "rgb(9, 105, 218)"), ("text-decoration", "none")]);
        rules.tag("ul", &[("margin", "0 0 16px 0"), ("padding", "0 0 0 32px")]);
        rules.tag("ol", &[("margin", "0 0 16px 0"), ("padding", "0 0 0 32px")]);
        rules.tag("li", &[("margin", "0 0 4px 0")]);
        rules.tag(
            "blockquote",
            &[
                ("color", "rgb(101, 109, 118)"),
                ("margin", "0 0 16px 0"),
                ("padding", "0 16px"),
            ],
        );
        rules.tag(
            "code",
            &[
                ("font-family", "'JetBrains Mono', Consolas, Monaco, monospace"),
                ("font-size", "14px"),
                ("background-color", "rgb(246, 248, 250)"),
            ],
        );
        rules.tag(
            "pre",
            &[
                ("font-family", "'JetBrains Mono', Consolas, Monaco, monospace"),
                ("font-size", "14px"),
                ("background-color", "rgb(246, 248, 250)"),
                ("padding", "16px"),
                ("margin", "0 0 16px 0"),
                ("white-space", "pre"),
            ],
        );
        rules.tag("table", &[("border-collapse", "collapse"), ("margin", "0 0 16px 0")]);
        rules.tag(
            "th",
            &[
                ("font-weight", "600"),
                ("text-align", "left"),
                ("border", "1px solid rgb(208, 215, 222)"),
                ("padding", "8px 12px"),
            ],
        );
        rules.tag(
            "td",
            &[("border", "1px solid rgb(208, 215, 222)"), ("padding", "8px 12px")],
        );
        rules.tag("strong", &[("font-weight", "600")]);
        rules.tag("em", &[("font-style", "italic")]);
        rules.tag("del", &[("text-decoration", "line-through")]);
        rules
    }

    /// Parses a rule set from JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| Error::Config(format!("invalid theme rules: {err}")))
    }

    fn tag(&mut self, tag: &str, properties: &[(&str, &str)]) {
        let map = properties
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        self.tags.insert(tag.to_string(), map);
    }
}

impl Default for ThemeRules {
    fn default() -> Self {
        ThemeRules::standard()
    }
}

/// [`StyleResolver`] backed by a [`ThemeRules`] table.
#[derive(Debug, Clone)]
pub struct ThemeResolver {
    rules: ThemeRules,
}

impl ThemeResolver {
    pub fn new(rules: ThemeRules) -> Self {
        ThemeResolver { rules }
    }

    pub fn rules(&self) -> &ThemeRules {
        &self.rules
    }
}

impl StyleResolver for ThemeResolver {
    fn resolve(&self, element: &Element) -> ComputedStyle {
        let mut computed = ComputedStyle::new();
        for (property, value) in &self.rules.base {
            computed.insert(property.clone(), value.clone());
        }
        if let Some(overrides) = self.rules.tags.get(element.tag()) {
            for (property, value) in overrides {
                computed.insert(property.clone(), value.clone());
            }
        }
        computed
    }
}
