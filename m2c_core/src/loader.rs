use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};
use m2c_fmt_xml::{
    ATTR_EVENT, ATTR_EXPR, ATTR_NAME, ATTR_TARGET, Element, TAG_PARAM, TAG_SEND, TAG_TRANSITION,
    XmlDocument,
};

use crate::{EventAttributes, EventClassification, ModelEvent, TranslationError};

/// Parses the XML document at `path`.
pub fn load_document(path: &Path) -> Result<XmlDocument, TranslationError> {
    XmlDocument::parse_file(path).map_err(|source| TranslationError::MalformedDocument {
        path: path.to_owned(),
        source,
    })
}

/// The parts of a skill's state-machine model that code generation cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillModel {
    pub root_name: String,
    pub transitions: Vec<ModelEvent>,
    pub sends: Vec<ModelEvent>,
}

impl SkillModel {
    pub fn from_document(document: &XmlDocument) -> Result<Self, TranslationError> {
        let root = document.root();
        let root_name = root
            .non_empty_attr(ATTR_NAME)
            .ok_or_else(|| TranslationError::MissingRootName(root.name().to_owned()))?
            .to_owned();
        info!(target: "parser", "loading model '{root_name}'");

        let transitions = collect_events(root, TAG_TRANSITION, |element| EventAttributes {
            target: element.non_empty_attr(ATTR_TARGET).map(str::to_owned),
            params: BTreeMap::new(),
        });
        let sends = collect_events(root, TAG_SEND, |element| EventAttributes {
            target: None,
            params: send_params(element),
        });
        debug!(
            target: "parser",
            "found {} transitions and {} sends",
            transitions.len(),
            sends.len()
        );

        Ok(SkillModel {
            root_name,
            transitions,
            sends,
        })
    }

    /// All events in scan order: transitions first, then sends, each in document order.
    pub fn events(&self) -> impl Iterator<Item = &ModelEvent> {
        self.transitions.iter().chain(self.sends.iter())
    }
}

/// Loads the skill model stored at `path`.
pub fn extract_model(path: &Path) -> Result<SkillModel, TranslationError> {
    let document = load_document(path)?;
    SkillModel::from_document(&document)
}

fn collect_events(
    root: &Element,
    tag: &'static str,
    attributes: impl Fn(&Element) -> EventAttributes,
) -> Vec<ModelEvent> {
    let classification = if tag == TAG_SEND {
        EventClassification::Send
    } else {
        EventClassification::Transition
    };
    root.find_all(tag)
        .filter_map(|element| match element.non_empty_attr(ATTR_EVENT) {
            Some(identifier) => Some(ModelEvent {
                identifier: identifier.to_owned(),
                classification,
                attributes: attributes(element),
            }),
            None => {
                warn!(target: "parser", "'{tag}' without event, skipping");
                None
            }
        })
        .collect()
}

fn send_params(send: &Element) -> BTreeMap<String, String> {
    send.children_named(TAG_PARAM)
        .filter_map(|param| {
            match (param.non_empty_attr(ATTR_NAME), param.attr(ATTR_EXPR)) {
                (Some(name), Some(expr)) => Some((name.to_owned(), expr.to_owned())),
                _ => {
                    warn!(target: "parser", "param without name or expr, skipping");
                    None
                }
            }
        })
        .collect()
}
