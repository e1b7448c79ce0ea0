use std::io::BufRead;
use std::path::Path;
use std::str::{self, FromStr, Utf8Error};

use log::{error, info, trace};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::Element;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("reader failed")]
    Reader(#[from] quick_xml::Error),
    #[error("malformed attribute")]
    Attr(#[from] AttrError),
    #[error("invalid utf8 in tag or attribute name")]
    Utf8(#[from] Utf8Error),
    #[error("unknown or unexpected end tag `{0}`")]
    UnexpectedEndTag(String),
    #[error("open tags have not been closed")]
    UnclosedTags,
    #[error("document has no root element")]
    MissingRoot,
    #[error("found a second root element `{0}`")]
    MultipleRoots(String),
}

/// An [`XmlError`] together with the byte offset at which the reader found it.
#[derive(Error, Debug)]
#[error("xml error at byte `{0}`")]
pub struct ParseError(pub u64, #[source] pub XmlError);

/// A fully parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    /// Parses the document stored at the given path.
    ///
    /// Fails if the file cannot be opened or if its content is not well-formed XML.
    pub fn parse_file(path: &Path) -> Result<Self, ParseError> {
        info!(target: "parser", "creating reader from file '{}'", path.display());
        let mut reader = Reader::from_file(path).map_err(|err| ParseError(0, err.into()))?;
        Self::parse(&mut reader)
    }

    /// Builds the element tree by consuming the events of the given reader.
    pub fn parse<R: BufRead>(reader: &mut Reader<R>) -> Result<Self, ParseError> {
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        loop {
            let position = reader.buffer_position() as u64;
            let at = |err: XmlError| ParseError(position, err);
            match reader.read_event_into(&mut buf) {
                Err(err) => {
                    error!(target: "parser", "reader error: {err}");
                    return Err(at(err.into()));
                }
                Ok(Event::Start(tag)) => {
                    let element = element_from_tag(&tag).map_err(at)?;
                    trace!(target: "parser", "start tag '{}'", element.name());
                    stack.push(element);
                }
                Ok(Event::End(tag)) => {
                    let tag_name = str::from_utf8(tag.name().as_ref())
                        .map_err(|err| at(err.into()))?
                        .to_owned();
                    trace!(target: "parser", "end tag '{tag_name}'");
                    match stack.pop() {
                        Some(element) if element.name() == tag_name => {
                            attach(element, &mut stack, &mut root).map_err(at)?;
                        }
                        _ => {
                            error!(target: "parser", "unexpected end tag {tag_name}");
                            return Err(at(XmlError::UnexpectedEndTag(tag_name)));
                        }
                    }
                }
                Ok(Event::Empty(tag)) => {
                    let element = element_from_tag(&tag).map_err(at)?;
                    trace!(target: "parser", "empty tag '{}'", element.name());
                    attach(element, &mut stack, &mut root).map_err(at)?;
                }
                Ok(Event::Text(text)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = text.unescape().map_err(|err| at(err.into()))?;
                        parent.text.push_str(&text);
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = str::from_utf8(&data).map_err(|err| at(err.into()))?;
                        parent.text.push_str(text);
                    }
                }
                Ok(Event::Eof) => {
                    if !stack.is_empty() {
                        error!(target: "parser", "reached end of file with open tags");
                        return Err(at(XmlError::UnclosedTags));
                    }
                    info!(target: "parser", "parsing completed");
                    return root.map(|root| XmlDocument { root }).ok_or(at(XmlError::MissingRoot));
                }
                // Comments, declarations and processing instructions carry nothing we query.
                Ok(_) => {}
            }
            // if we don't keep a borrow elsewhere, we can clear the buffer to keep memory usage low
            buf.clear();
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

impl FromStr for XmlDocument {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut reader = Reader::from_str(s);
        Self::parse(&mut reader)
    }
}

fn element_from_tag(tag: &BytesStart<'_>) -> Result<Element, XmlError> {
    let name = str::from_utf8(tag.name().as_ref())?.to_owned();
    let mut attributes = Vec::new();
    for attr in tag.attributes() {
        let attr = attr?;
        let key = str::from_utf8(attr.key.as_ref())?.to_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element::new(name, attributes))
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(XmlError::MultipleRoots(element.name().to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_elements() -> Result<(), ParseError> {
        let doc = XmlDocument::from_str(
            r#"<?xml version="1.0"?>
            <scxml name="NavSkillAction">
                <!-- comment -->
                <state id="idle">
                    <transition event="CMD_TICK" target="busy"/>
                </state>
                <data>some <![CDATA[raw]]> text</data>
            </scxml>"#,
        )?;
        let root = doc.root();
        assert_eq!(root.name(), "scxml");
        assert_eq!(root.attr("name"), Some("NavSkillAction"));
        assert_eq!(root.children().count(), 2);
        let transition = root.find("transition").expect("transition");
        assert_eq!(transition.attr("target"), Some("busy"));
        assert_eq!(root.find("data").map(Element::text), Some("some raw text"));
        Ok(())
    }

    #[test]
    fn escaped_attribute() -> Result<(), ParseError> {
        let doc = XmlDocument::from_str(r#"<a expr="x &lt; y &amp;&amp; z"/>"#)?;
        assert_eq!(doc.root().attr("expr"), Some("x < y && z"));
        Ok(())
    }

    #[test]
    fn mismatched_end_tag() {
        assert!(XmlDocument::from_str("<a><b></a>").is_err());
    }

    #[test]
    fn unclosed_tags() {
        let err = XmlDocument::from_str("<a><b/>").expect_err("unclosed");
        assert!(matches!(err.1, XmlError::UnclosedTags | XmlError::Reader(_)));
    }

    #[test]
    fn empty_document() {
        let err = XmlDocument::from_str("<!-- nothing -->").expect_err("no root");
        assert!(matches!(err.1, XmlError::MissingRoot));
    }

    #[test]
    fn missing_file() {
        assert!(XmlDocument::parse_file(Path::new("./does/not/exist.xml")).is_err());
    }
}
