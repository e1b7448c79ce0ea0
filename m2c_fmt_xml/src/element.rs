use log::trace;

/// An XML element with its attributes (in document order), child elements and text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    pub(crate) children: Vec<Element>,
    pub(crate) text: String,
}

impl Element {
    pub(crate) fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        Element {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute with the given key, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`Element::attr`], but treats an empty value as missing.
    pub fn non_empty_attr(&self, key: &str) -> Option<&str> {
        self.attr(key).filter(|v| !v.is_empty())
    }

    /// Text content with surrounding whitespace removed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn children(&self) -> std::slice::Iter<'_, Element> {
        self.children.iter()
    }

    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == tag)
    }

    /// Iterates over this element and all elements below it, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First element in document order with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.descendants().find(|e| e.name == tag)
    }

    /// First element in document order with the given tag whose attribute `key` equals `value`.
    pub fn find_by_attr(&self, tag: &str, key: &str, value: &str) -> Option<&Element> {
        let found = self
            .descendants()
            .find(|e| e.name == tag && e.attr(key) == Some(value));
        if found.is_some() {
            trace!(target: "parser", "found '{tag}' with {key}='{value}'");
        }
        found
    }

    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |e| e.name == tag)
    }
}

/// Pre-order traversal of an element subtree, see [`Element::descendants`].
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
