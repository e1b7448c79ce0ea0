use std::path::PathBuf;

use m2c_fmt_xml::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("failed to parse '{}'", path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("root element `{0}` has no `name` attribute")]
    MissingRootName(String),
    #[error("root name `{0}` does not contain `Skill`")]
    NotASkillModel(String),
    #[error("root name `{0}` has no skill type after `Skill`")]
    MissingSkillType(String),
    #[error("event `{0}` is not of the form `component.function.event`")]
    MalformedEventName(String),
    #[error("missing `type` attribute in `{tag}` for `{name}`")]
    MissingTypeAttribute { tag: &'static str, name: String },
    #[error("no `{tag}` element for `{name}`")]
    MissingRequestFields { tag: &'static str, name: String },
    #[error("no `{tag}` element for `{name}`")]
    MissingResponseFields { tag: &'static str, name: String },
    #[error("no `{tag}` element for `{name}`")]
    MissingTopicFields { tag: &'static str, name: String },
    #[error("no interface pattern matches component `{component}` and function `{function}`")]
    UnknownInterfacePattern { component: String, function: String },
}
