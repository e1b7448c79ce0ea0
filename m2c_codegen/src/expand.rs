use log::{debug, warn};
use m2c_core::{EventClassification, EventRecord, to_snake_case};

use crate::markers::*;
use crate::snippets::{Snippet, SnippetBank};
use crate::text::{replace_all, write_after_command};

const BLACKBOARD_INTERFACE: &str = "blackboard_interfaces";
const PARAM_NAME: &str = "$IT->FIRST$";
const DATA_FIELD: &str = "$eventData.interfaceDataField$";
const DATA_TYPE: &str = "$eventData.interfaceDataType$";
const RESPONSE_FIELD: &str = "response->$eventData.interfaceDataField$";
const MESSAGE_NAME: &str = "$eventData.messageNameSnakeCase$";
const INTERFACE_NAME: &str = "$eventData.interfaceName$";
const FUNCTION_NAME_SNAKE_CASE: &str = "$eventData.functionNameSnakeCase$";

/// Instantiates the snippets that `record` calls for and inserts them after their list markers.
pub fn expand_event(text: &mut String, record: &EventRecord, bank: &SnippetBank) {
    let view = EventView::new(record);
    let pattern = record.pattern;
    let suffix = record.event_suffix.as_str();
    match record.classification {
        EventClassification::Send if pattern.is_service() => view.service_request(text, bank),
        EventClassification::Send if pattern.is_action() && suffix.contains("SendGoal") => {
            view.action_goal(text, bank)
        }
        EventClassification::Transition if pattern.is_topic() => view.topic(text, bank),
        EventClassification::Transition if pattern.is_action() => {
            if suffix.contains("FeedbackReturn") {
                view.action_feedback(text, bank);
            } else if suffix.contains("GoalResponse") {
                let code = view.common(bank.get(Snippet::ActionResponseCallbackFnc));
                write_after_command(text, ACTION_FNC_LIST, &code);
            } else if suffix.contains("ResultResponse") {
                let code = view.common(bank.get(Snippet::ActionResultCallbackFnc));
                write_after_command(text, ACTION_FNC_LIST, &code);
                let code = view.common(bank.get(Snippet::ActionResultRequest));
                write_after_command(text, ACTION_LAMBDA_LIST, &code);
            }
        }
        _ => debug!(
            target: "codegen",
            "nothing to expand for '{}' ({})",
            record.event_identifier, pattern
        ),
    }
}

/// The values an event substitutes into its snippets.
struct EventView<'a> {
    record: &'a EventRecord,
    function_name_snake_case: String,
    /// Last segment of the interface type, e.g. `GoTo` in `nav_interfaces/srv/GoTo`.
    message_name: &'a str,
}

impl<'a> EventView<'a> {
    fn new(record: &'a EventRecord) -> Self {
        let mut function_name_snake_case = record.function_name_snake_case.clone();
        // blackboard interfaces are generated with a suffix
        if record.interface_name == BLACKBOARD_INTERFACE {
            function_name_snake_case.push_str("_blackboard");
        }
        let message_name = record
            .interface_type_name
            .rsplit_once('/')
            .map_or(record.interface_type_name.as_str(), |(_, name)| name);
        EventView {
            record,
            function_name_snake_case,
            message_name,
        }
    }

    /// Substitutes the placeholders every event-level snippet may use.
    fn common(&self, snippet: &str) -> String {
        let record = self.record;
        let message_name_snake_case = to_snake_case(self.message_name);
        let mut code = snippet.to_owned();
        for (placeholder, value) in [
            ("$eventData.event$", record.event_identifier.as_str()),
            ("$eventData.componentName$", record.component_name.as_str()),
            ("$eventData.functionName$", record.function_name.as_str()),
            (FUNCTION_NAME_SNAKE_CASE, self.function_name_snake_case.as_str()),
            ("$eventData.serviceTypeName$", self.message_name),
            ("$eventData.serviceTypeNameSnakeCase$", message_name_snake_case.as_str()),
            ("$eventData.nodeName$", record.node_name.as_str()),
            ("$eventData.serverName$", record.server_path.as_str()),
            ("$eventData.clientName$", record.client_name.as_str()),
            (INTERFACE_NAME, record.interface_name.as_str()),
            ("$eventData.topicName$", record.topic_identifier.as_deref().unwrap_or_default()),
        ] {
            replace_all(&mut code, placeholder, value);
        }
        code
    }

    /// Substitutes the placeholders of topic snippets.
    fn topic_code(&self, snippet: &str, message_name: &str) -> String {
        let record = self.record;
        let mut code = snippet.to_owned();
        replace_all(&mut code, INTERFACE_NAME, &record.interface_name);
        replace_all(&mut code, MESSAGE_NAME, message_name);
        replace_all(&mut code, "$eventData.functionName$", &record.function_name);
        replace_all(&mut code, "$eventData.componentName$", &record.component_name);
        replace_all(
            &mut code,
            "$eventData.topicName$",
            record.topic_identifier.as_deref().unwrap_or_default(),
        );
        code
    }

    fn interface_include(&self, snippet: &str) -> String {
        let mut code = snippet.to_owned();
        replace_all(&mut code, INTERFACE_NAME, &self.record.interface_name);
        replace_all(&mut code, FUNCTION_NAME_SNAKE_CASE, &self.function_name_snake_case);
        code
    }

    /// Adds the build and manifest dependencies on the event's interface package, once.
    fn dependencies(&self, text: &mut String, bank: &SnippetBank) {
        for (snippet, list) in [
            (Snippet::InterfaceCMake, CMAKE_INTERFACE_LIST),
            (Snippet::PackageCMake, CMAKE_PACKAGE_LIST),
            (Snippet::InterfaceXml, XML_INTERFACE_LIST),
        ] {
            let mut code = bank.get(snippet).to_owned();
            replace_all(&mut code, "$interfaceName$", &self.record.interface_name);
            if !code.is_empty() && !text.contains(&code) {
                write_after_command(text, list, &code);
            }
        }
    }

    /// Accessor of a response field, converting strings for the state machine.
    fn response_access(&self, field: &str) -> String {
        let data_type = match self.record.interface_data.get(&format!("m_{field}")) {
            Some(data_type) => data_type.as_str(),
            None => {
                warn!(
                    target: "codegen",
                    "no data type for field 'm_{field}' of '{}', assuming string",
                    self.record.event_identifier
                );
                "string"
            }
        };
        if data_type == "string" {
            format!("response->{field}.c_str()")
        } else {
            format!("response->{field}")
        }
    }

    fn service_request(&self, text: &mut String, bank: &SnippetBank) {
        let record = self.record;
        let mut event_code = self.common(bank.get(Snippet::SendEventSrv));
        for name in record.params.keys() {
            let param = bank.get(Snippet::SendParam).replace(PARAM_NAME, name);
            write_after_command(&mut event_code, PARAM_LIST, &param);
        }
        for field in &record.response_fields {
            let mut code = bank.get(Snippet::ReturnParam).to_owned();
            replace_all(&mut code, RESPONSE_FIELD, &self.response_access(field));
            replace_all(&mut code, DATA_FIELD, field);
            write_after_command(&mut event_code, RETURN_PARAM_LIST, &code);
        }
        for field in &record.request_fields {
            let code = bank.get(Snippet::ReturnParam).replace(DATA_FIELD, field);
            write_after_command(&mut event_code, SEND_PARAM_LIST, &code);
        }
        write_after_command(text, SEND_EVENT_LIST, &event_code);
        write_after_command(
            text,
            INTERFACES_LIST,
            &self.interface_include(bank.get(Snippet::InterfaceH)),
        );
        self.dependencies(text, bank);
    }

    fn action_goal(&self, text: &mut String, bank: &SnippetBank) {
        for (snippet, list) in [
            (Snippet::ActionSendGoal, ACTION_LAMBDA_LIST),
            (Snippet::ActionSendGoalFnc, ACTION_FNC_LIST),
            (Snippet::ActionH, ACTION_LIST_H),
            (Snippet::ActionC, ACTION_LIST_C),
        ] {
            write_after_command(text, list, &self.common(bank.get(snippet)));
        }
        write_after_command(
            text,
            INTERFACES_LIST,
            &self.interface_include(bank.get(Snippet::ActionInterfaceH)),
        );
        self.dependencies(text, bank);
        for name in self.record.params.keys() {
            let param = bank.get(Snippet::ActionSendParam).replace(PARAM_NAME, name);
            write_after_command(text, SEND_PARAM_LIST, &param);
        }
    }

    fn topic(&self, text: &mut String, bank: &SnippetBank) {
        let mut callback = bank.get(Snippet::TopicCallback).to_owned();
        for field in &self.record.topic_fields {
            let code = bank.get(Snippet::TopicParam).replace(DATA_FIELD, field);
            write_after_command(&mut callback, TOPIC_PARAM_LIST, &code);
        }
        let message_name = self.message_name;
        let callback = self.topic_code(&callback, message_name);
        let subscription = self.topic_code(bank.get(Snippet::TopicSubscription), message_name);
        write_after_command(text, TOPIC_SUBSCRIPTIONS_LIST, &subscription);
        write_after_command(text, TOPIC_CALLBACK_LIST, &callback);

        // headers include the message by its snake-case file name
        let include = self.topic_code(
            bank.get(Snippet::TopicInterfaceH),
            &to_snake_case(message_name),
        );
        let subscription_h = self.topic_code(bank.get(Snippet::TopicSubscriptionH), message_name);
        let callback_h = self.topic_code(bank.get(Snippet::TopicCallbackH), message_name);
        write_after_command(text, INTERFACES_LIST, &include);
        write_after_command(text, TOPIC_SUBSCRIPTIONS_LIST_H, &subscription_h);
        write_after_command(text, TOPIC_CALLBACK_LIST_H, &callback_h);
        self.dependencies(text, bank);
    }

    fn action_feedback(&self, text: &mut String, bank: &SnippetBank) {
        let code = self.common(bank.get(Snippet::ActionFeedbackFnc));
        write_after_command(text, ACTION_FNC_LIST, &code);
        let code = self.common(bank.get(Snippet::ActionFeedback));
        write_after_command(text, ACTION_LAMBDA_LIST, &code);
        let data = &self.record.interface_data;
        for field in data.keys() {
            let code = bank.get(Snippet::FeedbackParam).replace(DATA_FIELD, field);
            write_after_command(text, FEEDBACK_PARAM_LIST, &code);
        }
        for field in data.keys() {
            let code = bank.get(Snippet::FeedbackParamFnc).replace(DATA_FIELD, field);
            write_after_command(text, FEEDBACK_PARAM_LIST_FNC, &code);
        }
        for (field, data_type) in data {
            let code = bank
                .get(Snippet::FeedbackData)
                .replace(DATA_FIELD, field)
                .replace(DATA_TYPE, data_type);
            write_after_command(text, FEEDBACK_DATA_LIST, &code);
        }
    }
}

#[cfg(test)]
mod tests {
    use m2c_core::CommunicationPattern;

    use super::*;

    fn bank(templates: &str) -> SnippetBank {
        let mut text = templates.to_owned();
        SnippetBank::extract(&mut text)
    }

    fn service_client() -> EventRecord {
        let mut record = EventRecord::new("Nav.GoTo.Call", EventClassification::Send);
        record.component_name = "Nav".to_owned();
        record.function_name = "GoTo".to_owned();
        record.event_suffix = "Call".to_owned();
        record.function_name_snake_case = "go_to".to_owned();
        record.node_name = "nodeGoTo".to_owned();
        record.client_name = "clientGoTo".to_owned();
        record.server_path = "\"/Nav/GoTo\"".to_owned();
        record.pattern = CommunicationPattern::ServiceClient;
        record.interface_type_name = "nav_interfaces/srv/GoTo".to_owned();
        record.interface_name = "nav_interfaces".to_owned();
        record.params.insert("x".to_owned(), "1".to_owned());
        record.request_fields = vec!["x".to_owned()];
        record.response_fields = vec!["done".to_owned(), "msg".to_owned()];
        record.interface_data.insert("m_done".to_owned(), "bool".to_owned());
        record
    }

    #[test]
    fn service_request() {
        let bank = bank(
            "/*SEND_EVENT_SRV*/[$eventData.event$ $eventData.clientName$ $eventData.serverName$]\
             /*PARAM_LIST*//*RETURN_PARAM_LIST*//*SEND_PARAM_LIST*//*END_SEND_EVENT_SRV*/\
             /*PARAM*/p:$IT->FIRST$;/*END_PARAM*/\
             /*RETURN_PARAM*/r:$eventData.interfaceDataField$=response->$eventData.interfaceDataField$;/*END_RETURN_PARAM*/\
             /*INTERFACE*/<$eventData.interfaceName$/$eventData.functionNameSnakeCase$>/*END_INTERFACE*/\
             #INTERFACE#find($interfaceName$)#END_INTERFACE#",
        );
        let mut text = String::from("/*INTERFACES_LIST*/|/*SEND_EVENT_LIST*/|#INTERFACE_LIST#");
        let record = service_client();
        expand_event(&mut text, &record, &bank);
        // a second event on the same interface adds no second dependency
        expand_event(&mut text, &record, &bank);
        assert_eq!(text.matches("find(nav_interfaces)").count(), 1);
        assert!(text.starts_with("/*INTERFACES_LIST*/<nav_interfaces/go_to>"));
        assert!(text.contains(
            "[Nav.GoTo.Call clientGoTo \"/Nav/GoTo\"]\
             /*PARAM_LIST*/p:x;\
             /*RETURN_PARAM_LIST*/r:msg=response->msg.c_str();r:done=response->done;\
             /*SEND_PARAM_LIST*/r:x=response->x;"
        ));
    }

    #[test]
    fn service_transition_is_not_expanded() {
        let bank = bank("/*SEND_EVENT_SRV*/x/*END_SEND_EVENT_SRV*/");
        let mut record = service_client();
        record.classification = EventClassification::Transition;
        let mut text = String::from("/*SEND_EVENT_LIST*/");
        expand_event(&mut text, &record, &bank);
        assert_eq!(text, "/*SEND_EVENT_LIST*/");
    }

    #[test]
    fn topic_subscription() {
        let bank = bank(
            "/*TOPIC_CALLBACK*/cb_$eventData.functionName$($eventData.interfaceName$::$eventData.messageNameSnakeCase$)\
             {/*TOPIC_PARAM_LIST*/}/*END_TOPIC_CALLBACK*/\
             /*TOPIC_PARAM*/f:$eventData.interfaceDataField$;/*END_TOPIC_PARAM*/\
             /*TOPIC_SUBSCRIPTION*/sub($eventData.topicName$)/*END_TOPIC_SUBSCRIPTION*/\
             /*TOPIC_INTERFACE*/<$eventData.interfaceName$/msg/$eventData.messageNameSnakeCase$.hpp>/*END_TOPIC_INTERFACE*/",
        );
        let mut record = EventRecord::new("Battery.level.Sub", EventClassification::Transition);
        record.function_name = "level".to_owned();
        record.event_suffix = "Sub".to_owned();
        record.pattern = CommunicationPattern::TopicSubscriber;
        record.interface_type_name = "sensor_msgs/msg/BatteryState".to_owned();
        record.interface_name = "sensor_msgs".to_owned();
        record.topic_identifier = Some("/Battery/level".to_owned());
        record.topic_fields = vec!["percentage".to_owned()];
        let mut text = String::from(
            "/*INTERFACES_LIST*/|/*TOPIC_SUBSCRIPTIONS_LIST*/|/*TOPIC_CALLBACK_LIST*/",
        );
        expand_event(&mut text, &record, &bank);
        assert_eq!(
            text,
            "/*INTERFACES_LIST*/<sensor_msgs/msg/battery_state.hpp>|\
             /*TOPIC_SUBSCRIPTIONS_LIST*/sub(/Battery/level)|\
             /*TOPIC_CALLBACK_LIST*/cb_level(sensor_msgs::BatteryState){/*TOPIC_PARAM_LIST*/f:percentage;}"
        );
    }

    #[test]
    fn action_feedback() {
        let bank = bank(
            "/*ACTION_FEEDBACK_FNC*/fb_$eventData.functionName$/*END_ACTION_FEEDBACK_FNC*/\
             /*FEEDBACK_DATA*/$eventData.interfaceDataType$ $eventData.interfaceDataField$;/*END_FEEDBACK_DATA*/",
        );
        let mut record = EventRecord::new("Arm.Move.FeedbackReturn", EventClassification::Transition);
        record.function_name = "Move".to_owned();
        record.event_suffix = "FeedbackReturn".to_owned();
        record.pattern = CommunicationPattern::ActionClient;
        record.interface_data.insert("progress".to_owned(), "float".to_owned());
        let mut text = String::from("/*ACTION_FNC_LIST*/|/*FEEDBACK_DATA_LIST*/");
        expand_event(&mut text, &record, &bank);
        assert_eq!(text, "/*ACTION_FNC_LIST*/fb_Move|/*FEEDBACK_DATA_LIST*/float progress;");
    }

    #[test]
    fn feedback_data_follows_field_names() {
        let bank = bank(
            "/*FEEDBACK_DATA*/$eventData.interfaceDataField$;/*END_FEEDBACK_DATA*/",
        );
        let mut record = EventRecord::new("Arm.Move.FeedbackReturn", EventClassification::Transition);
        record.event_suffix = "FeedbackReturn".to_owned();
        record.pattern = CommunicationPattern::ActionClient;
        for field in ["progress", "distance", "speed"] {
            record.interface_data.insert(field.to_owned(), "float".to_owned());
        }
        let mut text = String::from("/*FEEDBACK_DATA_LIST*/");
        expand_event(&mut text, &record, &bank);
        // each snippet lands right after the marker, so the last field name comes first
        assert_eq!(text, "/*FEEDBACK_DATA_LIST*/speed;progress;distance;");
    }

    #[test]
    fn blackboard_suffix() {
        let mut record = service_client();
        record.interface_name = BLACKBOARD_INTERFACE.to_owned();
        let view = EventView::new(&record);
        assert_eq!(view.common("$eventData.functionNameSnakeCase$"), "go_to_blackboard");
        assert_eq!(view.common("$eventData.serviceTypeName$"), "GoTo");
    }
}
