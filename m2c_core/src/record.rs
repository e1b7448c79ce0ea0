use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// The four events that drive the skill's lifecycle.
///
/// They are never resolved against the interface model:
/// their presence only decides which lifecycle sections of the templates survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ControlEvent {
    CmdTick,
    CmdHalt,
    RspTick,
    RspHalt,
}

impl ControlEvent {
    pub const ALL: [ControlEvent; 4] = [
        ControlEvent::CmdTick,
        ControlEvent::CmdHalt,
        ControlEvent::RspTick,
        ControlEvent::RspHalt,
    ];

    pub fn identifier(self) -> &'static str {
        match self {
            ControlEvent::CmdTick => "CMD_TICK",
            ControlEvent::CmdHalt => "CMD_HALT",
            ControlEvent::RspTick => "RSP_TICK",
            ControlEvent::RspHalt => "RSP_HALT",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        ControlEvent::ALL
            .into_iter()
            .find(|event| event.identifier() == identifier)
    }
}

impl fmt::Display for ControlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Which control events appear in the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlFlags {
    pub cmd_tick: bool,
    pub cmd_halt: bool,
    pub rsp_tick: bool,
    pub rsp_halt: bool,
}

impl ControlFlags {
    pub fn get(&self, event: ControlEvent) -> bool {
        match event {
            ControlEvent::CmdTick => self.cmd_tick,
            ControlEvent::CmdHalt => self.cmd_halt,
            ControlEvent::RspTick => self.rsp_tick,
            ControlEvent::RspHalt => self.rsp_halt,
        }
    }

    pub fn set(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::CmdTick => self.cmd_tick = true,
            ControlEvent::CmdHalt => self.cmd_halt = true,
            ControlEvent::RspTick => self.rsp_tick = true,
            ControlEvent::RspHalt => self.rsp_halt = true,
        }
    }
}

/// Kind of model element an event was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventClassification {
    /// The skill reacts to the event.
    Transition,
    /// The skill raises the event.
    Send,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommunicationPattern {
    #[default]
    Unresolved,
    ServiceServer,
    ServiceClient,
    TopicPublisher,
    TopicSubscriber,
    ActionServer,
    ActionClient,
}

impl CommunicationPattern {
    pub fn is_service(self) -> bool {
        matches!(
            self,
            CommunicationPattern::ServiceServer | CommunicationPattern::ServiceClient
        )
    }

    pub fn is_topic(self) -> bool {
        matches!(
            self,
            CommunicationPattern::TopicPublisher | CommunicationPattern::TopicSubscriber
        )
    }

    pub fn is_action(self) -> bool {
        matches!(
            self,
            CommunicationPattern::ActionServer | CommunicationPattern::ActionClient
        )
    }
}

impl fmt::Display for CommunicationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommunicationPattern::Unresolved => "unresolved",
            CommunicationPattern::ServiceServer => "service server",
            CommunicationPattern::ServiceClient => "service client",
            CommunicationPattern::TopicPublisher => "topic publisher",
            CommunicationPattern::TopicSubscriber => "topic subscriber",
            CommunicationPattern::ActionServer => "action server",
            CommunicationPattern::ActionClient => "action client",
        };
        f.write_str(name)
    }
}

/// What the model says about an event, besides its name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventAttributes {
    /// Target state, for transitions.
    pub target: Option<String>,
    /// Parameter name to expression, for sends.
    pub params: BTreeMap<String, String>,
}

/// An event-bearing element of the skill model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEvent {
    pub identifier: String,
    pub classification: EventClassification,
    pub attributes: EventAttributes,
}

/// Everything known about one distinct event of the skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub event_identifier: String,
    pub classification: EventClassification,
    pub target: Option<String>,
    pub params: BTreeMap<String, String>,
    pub component_name: String,
    pub function_name: String,
    pub event_suffix: String,
    pub function_name_snake_case: String,
    pub node_name: String,
    pub client_name: String,
    /// Quoted `"/component/function"`, ready to be pasted into generated code.
    pub server_path: String,
    pub pattern: CommunicationPattern,
    pub interface_type_name: String,
    pub server_identifier: Option<String>,
    pub client_identifier: Option<String>,
    pub topic_identifier: Option<String>,
    pub scxml_interface_name: Option<String>,
    pub request_fields: Vec<String>,
    pub response_fields: Vec<String>,
    pub topic_fields: Vec<String>,
    pub is_virtual_interface: bool,
    pub interface_name: String,
    /// Data field to data type, as declared by the interface function.
    pub interface_data: BTreeMap<String, String>,
}

impl EventRecord {
    pub fn new(identifier: &str, classification: EventClassification) -> Self {
        EventRecord {
            event_identifier: identifier.to_owned(),
            classification,
            target: None,
            params: BTreeMap::new(),
            component_name: String::new(),
            function_name: String::new(),
            event_suffix: String::new(),
            function_name_snake_case: String::new(),
            node_name: String::new(),
            client_name: String::new(),
            server_path: String::new(),
            pattern: CommunicationPattern::Unresolved,
            interface_type_name: String::new(),
            server_identifier: None,
            client_identifier: None,
            topic_identifier: None,
            scxml_interface_name: None,
            request_fields: Vec::new(),
            response_fields: Vec::new(),
            topic_fields: Vec::new(),
            is_virtual_interface: false,
            interface_name: String::new(),
            interface_data: BTreeMap::new(),
        }
    }

    pub fn control_event(&self) -> Option<ControlEvent> {
        ControlEvent::from_identifier(&self.event_identifier)
    }

    pub fn is_control(&self) -> bool {
        self.control_event().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_identifiers() {
        for event in ControlEvent::ALL {
            assert_eq!(ControlEvent::from_identifier(event.identifier()), Some(event));
        }
        assert_eq!(ControlEvent::from_identifier("TICK_RESPONSE"), None);
        assert_eq!(ControlEvent::from_identifier("cmd_tick"), None);
    }

    #[test]
    fn control_flags() {
        let mut flags = ControlFlags::default();
        flags.set(ControlEvent::RspHalt);
        assert!(flags.get(ControlEvent::RspHalt));
        assert!(!flags.get(ControlEvent::CmdTick));
    }

    #[test]
    fn pattern_families() {
        assert!(CommunicationPattern::ServiceClient.is_service());
        assert!(CommunicationPattern::TopicSubscriber.is_topic());
        assert!(CommunicationPattern::ActionServer.is_action());
        assert!(!CommunicationPattern::Unresolved.is_service());
        assert_eq!(CommunicationPattern::default(), CommunicationPattern::Unresolved);
    }
}
