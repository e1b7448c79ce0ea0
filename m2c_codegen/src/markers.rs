use m2c_core::{ControlEvent, ControlFlags};

use crate::text::apply_section;

/// Comment syntax a marker is written in, so that templates stay valid in their own language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `/*NAME*/`, for C++ sources and headers.
    Block,
    /// `#NAME#`, for CMake files.
    Hash,
    /// `<!--NAME-->`, for XML manifests.
    Comment,
}

impl Delimiter {
    pub fn wrap(self, name: &str) -> String {
        match self {
            Delimiter::Block => format!("/*{name}*/"),
            Delimiter::Hash => format!("#{name}#"),
            Delimiter::Comment => format!("<!--{name}-->"),
        }
    }
}

/// A pair of markers `NAME` and `END_NAME` enclosing a template section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    pub name: &'static str,
    pub delimiter: Delimiter,
}

impl Marker {
    pub const fn new(name: &'static str, delimiter: Delimiter) -> Self {
        Marker { name, delimiter }
    }

    pub fn open(&self) -> String {
        self.delimiter.wrap(self.name)
    }

    pub fn close(&self) -> String {
        self.delimiter.wrap(&format!("END_{}", self.name))
    }

    pub fn apply(&self, text: &mut String, keep: bool) {
        apply_section(text, &self.open(), &self.close(), keep);
    }
}

pub const SEND_EVENT_LIST: &str = "/*SEND_EVENT_LIST*/";
pub const PARAM_LIST: &str = "/*PARAM_LIST*/";
pub const RETURN_PARAM_LIST: &str = "/*RETURN_PARAM_LIST*/";
pub const TOPIC_SUBSCRIPTIONS_LIST: &str = "/*TOPIC_SUBSCRIPTIONS_LIST*/";
pub const TOPIC_CALLBACK_LIST: &str = "/*TOPIC_CALLBACK_LIST*/";
pub const TOPIC_PARAM_LIST: &str = "/*TOPIC_PARAM_LIST*/";
pub const ACTION_LIST_C: &str = "/*ACTION_LIST_C*/";
pub const SEND_PARAM_LIST: &str = "/*SEND_PARAM_LIST*/";
pub const FEEDBACK_PARAM_LIST: &str = "/*FEEDBACK_PARAM_LIST*/";
pub const FEEDBACK_PARAM_LIST_FNC: &str = "/*FEEDBACK_PARAM_LIST_FNC*/";
pub const FEEDBACK_DATA_LIST: &str = "/*FEEDBACK_DATA_LIST*/";
pub const ACTION_LAMBDA_LIST: &str = "/*ACTION_LAMBDA_LIST*/";
pub const ACTION_FNC_LIST: &str = "/*ACTION_FNC_LIST*/";
pub const INTERFACES_LIST: &str = "/*INTERFACES_LIST*/";
pub const TOPIC_SUBSCRIPTIONS_LIST_H: &str = "/*TOPIC_SUBSCRIPTIONS_LIST_H*/";
pub const TOPIC_CALLBACK_LIST_H: &str = "/*TOPIC_CALLBACK_LIST_H*/";
pub const ACTION_LIST_H: &str = "/*ACTION_LIST_H*/";
pub const CMAKE_INTERFACE_LIST: &str = "#INTERFACE_LIST#";
pub const CMAKE_PACKAGE_LIST: &str = "#PACKAGE_LIST#";
pub const XML_INTERFACE_LIST: &str = "<!--INTERFACE_LIST-->";

/// Markers that generated code is inserted after; none of them survives generation by default.
pub const LIST_MARKERS: [&str; 20] = [
    SEND_EVENT_LIST,
    PARAM_LIST,
    RETURN_PARAM_LIST,
    TOPIC_SUBSCRIPTIONS_LIST,
    TOPIC_CALLBACK_LIST,
    TOPIC_PARAM_LIST,
    ACTION_LIST_C,
    SEND_PARAM_LIST,
    FEEDBACK_PARAM_LIST,
    FEEDBACK_PARAM_LIST_FNC,
    FEEDBACK_DATA_LIST,
    ACTION_LAMBDA_LIST,
    ACTION_FNC_LIST,
    INTERFACES_LIST,
    TOPIC_SUBSCRIPTIONS_LIST_H,
    TOPIC_CALLBACK_LIST_H,
    ACTION_LIST_H,
    CMAKE_INTERFACE_LIST,
    CMAKE_PACKAGE_LIST,
    XML_INTERFACE_LIST,
];

/// Sections kept only by action skills.
pub const ACTION: Marker = Marker::new("ACTION", Delimiter::Block);

/// Sections kept only when generating with a data model.
pub const DATAMODEL: [Marker; 2] = [
    Marker::new("DATAMODEL", Delimiter::Block),
    Marker::new("DATAMODEL", Delimiter::Hash),
];

const TICK_MARKERS: [Marker; 4] = [
    Marker::new("TICK_CMD", Delimiter::Block),
    Marker::new("TICK", Delimiter::Block),
    Marker::new("TICK", Delimiter::Hash),
    Marker::new("TICK", Delimiter::Comment),
];

const HALT_MARKERS: [Marker; 4] = [
    Marker::new("HALT_CMD", Delimiter::Block),
    Marker::new("HALT", Delimiter::Block),
    Marker::new("HALT", Delimiter::Hash),
    Marker::new("HALT", Delimiter::Comment),
];

const TICK_RESPONSE_MARKERS: [Marker; 3] = [
    Marker::new("TICK_RESPONSE", Delimiter::Block),
    Marker::new("TICK_RESPONSE", Delimiter::Hash),
    Marker::new("TICK_RESPONSE", Delimiter::Comment),
];

const HALT_RESPONSE_MARKERS: [Marker; 3] = [
    Marker::new("HALT_RESPONSE", Delimiter::Block),
    Marker::new("HALT_RESPONSE", Delimiter::Hash),
    Marker::new("HALT_RESPONSE", Delimiter::Comment),
];

/// Sections that exist only to serve the given control event.
pub fn control_markers(event: ControlEvent) -> &'static [Marker] {
    match event {
        ControlEvent::CmdTick => &TICK_MARKERS,
        ControlEvent::CmdHalt => &HALT_MARKERS,
        ControlEvent::RspTick => &TICK_RESPONSE_MARKERS,
        ControlEvent::RspHalt => &HALT_RESPONSE_MARKERS,
    }
}

/// Keeps the sections of the control events the model uses and deletes the others.
pub fn apply_control_sections(text: &mut String, flags: ControlFlags) {
    for event in ControlEvent::ALL {
        let keep = flags.get(event);
        for marker in control_markers(event) {
            marker.apply(text, keep);
        }
    }
}
