use log::{debug, trace, warn};
use m2c_fmt_xml::*;

use crate::{CommunicationPattern, EventRecord, TranslationError};

/// An element of the interface model that can declare an event's communication pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    ServiceServer,
    ServiceClient,
    TopicPublisher,
    TopicSubscriber,
    ActionServer,
    ActionClient,
}

impl Candidate {
    /// Candidates are tried in this order and the first match wins.
    const PRECEDENCE: [Candidate; 6] = [
        Candidate::ServiceServer,
        Candidate::ServiceClient,
        Candidate::TopicPublisher,
        Candidate::TopicSubscriber,
        Candidate::ActionServer,
        Candidate::ActionClient,
    ];

    fn tag(self) -> &'static str {
        match self {
            Candidate::ServiceServer => TAG_ROS_SERVICE_SERVER,
            Candidate::ServiceClient => TAG_ROS_SERVICE_CLIENT,
            Candidate::TopicPublisher => TAG_ROS_TOPIC_PUBLISHER,
            Candidate::TopicSubscriber => TAG_ROS_TOPIC_SUBSCRIBER,
            Candidate::ActionServer => TAG_ROS_ACTION_SERVER,
            Candidate::ActionClient => TAG_ROS_ACTION_CLIENT,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Candidate::ServiceServer | Candidate::ServiceClient => ATTR_SERVICE_NAME,
            Candidate::TopicPublisher | Candidate::TopicSubscriber => ATTR_TOPIC,
            Candidate::ActionServer | Candidate::ActionClient => ATTR_ACTION_NAME,
        }
    }

    fn pattern(self) -> CommunicationPattern {
        match self {
            Candidate::ServiceServer => CommunicationPattern::ServiceServer,
            Candidate::ServiceClient => CommunicationPattern::ServiceClient,
            Candidate::TopicPublisher => CommunicationPattern::TopicPublisher,
            Candidate::TopicSubscriber => CommunicationPattern::TopicSubscriber,
            Candidate::ActionServer => CommunicationPattern::ActionServer,
            Candidate::ActionClient => CommunicationPattern::ActionClient,
        }
    }
}

/// Field names carried by the direct `field` children of `element`, in document order.
pub fn fields_from_children(element: &Element) -> Vec<String> {
    element
        .children_named(TAG_FIELD)
        .filter_map(|field| field.non_empty_attr(ATTR_NAME))
        .map(str::to_owned)
        .collect()
}

/// Field names assigned by the direct `assign` children of `element`, in document order.
///
/// The field is what follows the first `.` of the assigned expression;
/// assignments whose expression has no `.` do not name a field.
pub fn fields_from_assignments(element: &Element) -> Vec<String> {
    element
        .children_named(TAG_ASSIGN)
        .filter_map(|assign| assign.attr(ATTR_EXPR))
        .filter_map(|expr| expr.split_once('.'))
        .map(|(_, field)| field.to_owned())
        .collect()
}

/// Looks up the communication pattern of events in the interface model.
///
/// The resolver only reads the document, so one instance can serve any number of records.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceResolver<'a> {
    document: &'a XmlDocument,
}

impl<'a> InterfaceResolver<'a> {
    pub fn new(document: &'a XmlDocument) -> Self {
        InterfaceResolver { document }
    }

    /// Determines the communication pattern of `/component/function` and fills in the
    /// pattern-specific fields of `record`.
    ///
    /// On failure the record is left untouched.
    pub fn resolve(
        &self,
        component: &str,
        function: &str,
        record: &mut EventRecord,
    ) -> Result<CommunicationPattern, TranslationError> {
        let name = format!("/{component}/{function}");
        let root = self.document.root();
        for candidate in Candidate::PRECEDENCE {
            let Some(element) = root.find_by_attr(candidate.tag(), candidate.key(), &name) else {
                trace!(target: "resolver", "no '{}' for '{name}'", candidate.tag());
                continue;
            };
            debug!(target: "resolver", "'{name}' is a {}", candidate.pattern());
            let interface_type_name = match candidate {
                Candidate::ServiceServer | Candidate::ServiceClient => element
                    .non_empty_attr(ATTR_TYPE)
                    .ok_or_else(|| TranslationError::MissingTypeAttribute {
                        tag: candidate.tag(),
                        name: name.clone(),
                    })?
                    .to_owned(),
                _ => {
                    let type_name = element.attr(ATTR_TYPE).unwrap_or_default();
                    if type_name.is_empty() {
                        let tag = candidate.tag();
                        warn!(target: "resolver", "'{tag}' for '{name}' has no type");
                    }
                    type_name.to_owned()
                }
            };
            match candidate {
                Candidate::ServiceServer => {
                    let request = self.fields(TAG_ROS_SERVICE_HANDLE_REQUEST, &name, true)?;
                    let response = self.fields(TAG_ROS_SERVICE_SEND_RESPONSE, &name, false)?;
                    record.server_identifier = Some(name.clone());
                    record.client_identifier = Some(name.clone());
                    record.request_fields = request;
                    record.response_fields = response;
                }
                Candidate::ServiceClient => {
                    let request = self.fields(TAG_ROS_SERVICE_SEND_REQUEST, &name, true)?;
                    let response = self.fields(TAG_ROS_SERVICE_HANDLE_RESPONSE, &name, false)?;
                    record.server_identifier = Some(name.clone());
                    record.client_identifier = Some(name.clone());
                    record.request_fields = request;
                    record.response_fields = response;
                }
                Candidate::TopicPublisher => {
                    let missing = || TranslationError::MissingTopicFields {
                        tag: TAG_ROS_TOPIC_PUBLISH,
                        name: name.clone(),
                    };
                    let scxml_name = element.non_empty_attr(ATTR_NAME).ok_or_else(missing)?;
                    let publish = root
                        .find_by_attr(TAG_ROS_TOPIC_PUBLISH, ATTR_NAME, scxml_name)
                        .ok_or_else(missing)?;
                    record.topic_fields = non_empty(fields_from_assignments(publish), &name);
                    record.scxml_interface_name = Some(scxml_name.to_owned());
                    record.topic_identifier = element.attr(ATTR_TOPIC).map(str::to_owned);
                }
                Candidate::TopicSubscriber => {
                    let callback = root
                        .find_by_attr(TAG_ROS_TOPIC_CALLBACK, ATTR_NAME, &name)
                        .ok_or_else(|| TranslationError::MissingTopicFields {
                            tag: TAG_ROS_TOPIC_CALLBACK,
                            name: name.clone(),
                        })?;
                    record.topic_fields = non_empty(fields_from_children(callback), &name);
                    record.topic_identifier = element.attr(ATTR_TOPIC).map(str::to_owned);
                }
                Candidate::ActionServer => record.server_identifier = Some(name.clone()),
                Candidate::ActionClient => record.client_identifier = Some(name.clone()),
            }
            record.interface_type_name = interface_type_name;
            record.pattern = candidate.pattern();
            return Ok(record.pattern);
        }
        warn!(target: "resolver", "no interface pattern for '{name}'");
        Err(TranslationError::UnknownInterfacePattern {
            component: component.to_owned(),
            function: function.to_owned(),
        })
    }

    /// Request fields come from `field` children, response fields from `assign` children.
    fn fields(
        &self,
        tag: &'static str,
        name: &str,
        request: bool,
    ) -> Result<Vec<String>, TranslationError> {
        let Some(element) = self.document.root().find_by_attr(tag, ATTR_NAME, name) else {
            return Err(if request {
                TranslationError::MissingRequestFields {
                    tag,
                    name: name.to_owned(),
                }
            } else {
                TranslationError::MissingResponseFields {
                    tag,
                    name: name.to_owned(),
                }
            });
        };
        let fields = if request {
            fields_from_children(element)
        } else {
            fields_from_assignments(element)
        };
        Ok(non_empty(fields, name))
    }

    /// Adds what the interface model declares about the component and function of a resolved
    /// record: the interface package, whether it is virtual and its data fields.
    ///
    /// Missing declarations are not errors.
    pub fn enrich(&self, record: &mut EventRecord) {
        let root = self.document.root();
        let declared = root
            .find_by_attr(TAG_COMPONENT_DECLARATION, ATTR_ID, &record.component_name)
            .and_then(|component| component.non_empty_attr(ATTR_INTERFACE));
        let Some(interface_name) = declared else {
            record.interface_name = package_of(&record.interface_type_name).to_owned();
            debug!(
                target: "resolver",
                "no component declaration for '{}', using package '{}'",
                record.component_name, record.interface_name
            );
            return;
        };
        record.interface_name = interface_name.to_owned();

        let Some(interface) = root.find_by_attr(TAG_INTERFACE, ATTR_ID, interface_name) else {
            warn!(target: "resolver", "interface '{interface_name}' is not defined");
            return;
        };
        record.is_virtual_interface = interface.attr(ATTR_VIRTUAL) == Some("true");

        let Some(function) = interface.find_by_attr(TAG_FUNCTION, ATTR_ID, &record.function_name)
        else {
            debug!(
                target: "resolver",
                "interface '{interface_name}' has no function '{}'",
                record.function_name
            );
            return;
        };
        record.interface_data = function
            .find_all(TAG_DATA_FIELD)
            .zip(function.find_all(TAG_DATA_TYPE))
            .map(|(field, ty)| (field.text().to_owned(), ty.text().to_owned()))
            .filter(|(field, _)| !field.is_empty())
            .collect();
    }
}

fn non_empty(fields: Vec<String>, name: &str) -> Vec<String> {
    if fields.is_empty() {
        warn!(target: "resolver", "no fields found for '{name}'");
    }
    fields
}

/// Package segment of an interface type name, e.g. `nav_interfaces` in `nav_interfaces/srv/GoTo`.
fn package_of(type_name: &str) -> &str {
    let end = [type_name.find('/'), type_name.find("::")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(type_name.len());
    &type_name[..end]
}
