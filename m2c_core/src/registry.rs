use indexmap::IndexMap;
use log::{debug, error, info};

use crate::{
    ControlEvent, ControlFlags, EventAttributes, EventClassification, EventRecord,
    InterfaceResolver, SkillModel, TranslationError, to_snake_case,
};

/// Outcome of a successful [`EventRegistry::register_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    /// The event had already been registered and nothing changed.
    Duplicate,
}

/// Splits `Component.function.Event` into its three segments.
///
/// Every segment must be non-empty, so `Nav..Done` is rejected even though it has three parts.
pub fn split_event_identifier(identifier: &str) -> Result<(&str, &str, &str), TranslationError> {
    let parts: Vec<&str> = identifier.split('.').collect();
    match parts.as_slice() {
        [component, function, event]
            if !component.is_empty() && !function.is_empty() && !event.is_empty() =>
        {
            Ok((*component, *function, *event))
        }
        _ => Err(TranslationError::MalformedEventName(identifier.to_owned())),
    }
}

/// The distinct events of a skill, in the order they were first met.
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    // A slot is reserved with `None` while its record is being built.
    events: IndexMap<String, Option<EventRecord>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every event of the model, transitions first, stopping at the first failure.
    pub fn register_model(
        &mut self,
        model: &SkillModel,
        resolver: &InterfaceResolver<'_>,
    ) -> Result<(), TranslationError> {
        for event in model.events() {
            self.register_event(
                &event.identifier,
                event.classification,
                event.attributes.clone(),
                resolver,
            )?;
        }
        info!(target: "resolver", "registered {} events", self.len());
        Ok(())
    }

    /// Builds and stores the record of `identifier`, unless it is already known.
    ///
    /// Control events are stored without being resolved.
    /// If the record cannot be built the registry is left as it was.
    pub fn register_event(
        &mut self,
        identifier: &str,
        classification: EventClassification,
        attributes: EventAttributes,
        resolver: &InterfaceResolver<'_>,
    ) -> Result<Registration, TranslationError> {
        if self.events.contains_key(identifier) {
            debug!(target: "resolver", "event '{identifier}' already processed");
            return Ok(Registration::Duplicate);
        }
        info!(target: "resolver", "processing event '{identifier}'");
        self.events.insert(identifier.to_owned(), None);
        match Self::build_record(identifier, classification, attributes, resolver) {
            Ok(record) => {
                debug!(target: "resolver", "{record:#?}");
                if let Some(slot) = self.events.get_mut(identifier) {
                    *slot = Some(record);
                }
                Ok(Registration::Registered)
            }
            Err(err) => {
                error!(target: "resolver", "failed to register event '{identifier}': {err}");
                self.events.shift_remove(identifier);
                Err(err)
            }
        }
    }

    fn build_record(
        identifier: &str,
        classification: EventClassification,
        attributes: EventAttributes,
        resolver: &InterfaceResolver<'_>,
    ) -> Result<EventRecord, TranslationError> {
        let mut record = EventRecord::new(identifier, classification);
        record.target = attributes.target;
        if classification == EventClassification::Send {
            record.params = attributes.params;
        }
        if let Some(control) = ControlEvent::from_identifier(identifier) {
            debug!(target: "resolver", "control event {control}");
            return Ok(record);
        }

        let (component, function, suffix) = split_event_identifier(identifier)?;
        record.component_name = component.to_owned();
        record.function_name = function.to_owned();
        record.event_suffix = suffix.to_owned();
        record.function_name_snake_case = to_snake_case(function);
        record.node_name = format!("node{function}");
        record.client_name = format!("client{function}");
        record.server_path = format!("\"/{component}/{function}\"");

        resolver.resolve(component, function, &mut record)?;
        resolver.enrich(&mut record);
        Ok(record)
    }

    pub fn get(&self, identifier: &str) -> Option<&EventRecord> {
        self.events.get(identifier).and_then(Option::as_ref)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    /// Complete records in registration order.
    pub fn records(&self) -> impl Iterator<Item = &EventRecord> {
        self.events.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn control_flags(&self) -> ControlFlags {
        let mut flags = ControlFlags::default();
        for control in self.records().filter_map(EventRecord::control_event) {
            flags.set(control);
        }
        flags
    }
}
