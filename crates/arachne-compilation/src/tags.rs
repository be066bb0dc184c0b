/// Value of a rendered HTML attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Renders as ` key="value"`
    Text(String),

    /// Renders as a bare ` key`, e.g. boolean attributes like `scoped`
    Bare,
}

/// One head/body element as produced and consumed by the host's
/// HTML-generation hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    /// Element name, e.g. `link` or `style`
    pub tag_name: String,

    /// Attributes in declaration order
    pub attributes: Vec<(String, AttrValue)>,

    /// Inner markup, only meaningful when `close_tag` is set
    pub inner_html: Option<String>,

    /// Whether the element is rendered with a closing tag
    pub close_tag: bool,
}

impl TagDefinition {
    /// Create an empty void element
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            inner_html: None,
            close_tag: false,
        }
    }

    /// Add an attribute, builder style
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.attributes.push((name.into(), value));
        self
    }

    /// Look up an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value)
    }

    /// The `href` attribute text, if present
    pub fn href(&self) -> Option<&str> {
        match self.attribute("href") {
            Some(AttrValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Serialize the element to markup
    pub fn render(&self) -> String {
        let mut markup = String::with_capacity(16 + self.inner_html.as_ref().map_or(0, String::len));
        markup.push('<');
        markup.push_str(&self.tag_name);
        for (name, value) in &self.attributes {
            markup.push(' ');
            markup.push_str(name);
            if let AttrValue::Text(text) = value {
                markup.push_str("=\"");
                markup.push_str(&escape_attribute(text));
                markup.push('"');
            }
        }
        markup.push('>');
        if self.close_tag {
            if let Some(inner) = &self.inner_html {
                markup.push_str(inner);
            }
            markup.push_str("</");
            markup.push_str(&self.tag_name);
            markup.push('>');
        }
        markup
    }
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
