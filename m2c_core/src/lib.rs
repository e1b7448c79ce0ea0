//! Event classification and interface resolution for model2code.
//!
//! A skill is described by a state-machine model whose transitions and sends carry events
//! named `Component.function.Event`.
//! Each event is matched against the interface-definition model to find the communication
//! pattern it stands for (service, topic or action, on either side),
//! and the result is kept in an [`EventRegistry`] that drives code generation.

#![forbid(unsafe_code)]

mod error;
mod identity;
mod loader;
mod record;
mod registry;
mod resolver;

pub use error::TranslationError;
pub use identity::{SkillIdentity, derive_identity, to_snake_case};
pub use loader::{SkillModel, extract_model, load_document};
pub use m2c_fmt_xml;
pub use record::{
    CommunicationPattern, ControlEvent, ControlFlags, EventAttributes, EventClassification,
    EventRecord, ModelEvent,
};
pub use registry::{EventRegistry, Registration, split_event_identifier};
pub use resolver::{InterfaceResolver, fields_from_assignments, fields_from_children};
