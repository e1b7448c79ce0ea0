//! In-memory XML documents for model2code.
//!
//! Both the skill model and the interface-definition model are small, so they are read fully
//! into an [`Element`] tree and queried by tag name and attribute value afterwards.

mod element;
mod parser;
mod vocabulary;

pub use element::{Descendants, Element};
pub use parser::{ParseError, XmlDocument, XmlError};
pub use vocabulary::*;
