use std::collections::HashMap;

use log::trace;

use crate::markers::{Delimiter, Marker};
use crate::text::{delete_section, save_section};

/// A reusable piece of template, instantiated once per event (or per field of an event).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Snippet {
    SendParam,
    ReturnParam,
    TopicParam,
    SendEventSrv,
    TopicCallback,
    TopicSubscription,
    ActionC,
    ActionSendParam,
    FeedbackParam,
    FeedbackParamFnc,
    FeedbackData,
    ActionSendGoal,
    ActionResultRequest,
    ActionFeedback,
    ActionSendGoalFnc,
    ActionResultCallbackFnc,
    ActionFeedbackFnc,
    ActionResponseCallbackFnc,
    InterfaceH,
    TopicInterfaceH,
    TopicCallbackH,
    TopicSubscriptionH,
    ActionH,
    ActionInterfaceH,
    InterfaceCMake,
    PackageCMake,
    InterfaceXml,
}

impl Snippet {
    /// Extraction order: snippets nested in other snippets come first,
    /// so that the enclosing snippet keeps only the list marker they leave behind.
    pub const ALL: [Snippet; 27] = [
        Snippet::SendParam,
        Snippet::ReturnParam,
        Snippet::TopicParam,
        Snippet::SendEventSrv,
        Snippet::TopicCallback,
        Snippet::TopicSubscription,
        Snippet::ActionC,
        Snippet::ActionSendParam,
        Snippet::FeedbackParam,
        Snippet::FeedbackParamFnc,
        Snippet::FeedbackData,
        Snippet::ActionSendGoal,
        Snippet::ActionResultRequest,
        Snippet::ActionFeedback,
        Snippet::ActionSendGoalFnc,
        Snippet::ActionResultCallbackFnc,
        Snippet::ActionFeedbackFnc,
        Snippet::ActionResponseCallbackFnc,
        Snippet::InterfaceH,
        Snippet::TopicInterfaceH,
        Snippet::TopicCallbackH,
        Snippet::TopicSubscriptionH,
        Snippet::ActionH,
        Snippet::ActionInterfaceH,
        Snippet::InterfaceCMake,
        Snippet::PackageCMake,
        Snippet::InterfaceXml,
    ];

    pub fn marker(self) -> Marker {
        let (name, delimiter) = match self {
            Snippet::SendParam => ("PARAM", Delimiter::Block),
            Snippet::ReturnParam => ("RETURN_PARAM", Delimiter::Block),
            Snippet::TopicParam => ("TOPIC_PARAM", Delimiter::Block),
            Snippet::SendEventSrv => ("SEND_EVENT_SRV", Delimiter::Block),
            Snippet::TopicCallback => ("TOPIC_CALLBACK", Delimiter::Block),
            Snippet::TopicSubscription => ("TOPIC_SUBSCRIPTION", Delimiter::Block),
            Snippet::ActionC => ("ACTION_C", Delimiter::Block),
            Snippet::ActionSendParam => ("SEND_PARAM", Delimiter::Block),
            Snippet::FeedbackParam => ("FEEDBACK_PARAM", Delimiter::Block),
            Snippet::FeedbackParamFnc => ("FEEDBACK_PARAM_FNC", Delimiter::Block),
            Snippet::FeedbackData => ("FEEDBACK_DATA", Delimiter::Block),
            Snippet::ActionSendGoal => ("ACTION_SEND_GOAL", Delimiter::Block),
            Snippet::ActionResultRequest => ("ACTION_RESULT_REQUEST", Delimiter::Block),
            Snippet::ActionFeedback => ("ACTION_FEEDBACK", Delimiter::Block),
            Snippet::ActionSendGoalFnc => ("ACTION_SEND_GOAL_FNC", Delimiter::Block),
            Snippet::ActionResultCallbackFnc => ("ACTION_RESULT_CALLBACK_FNC", Delimiter::Block),
            Snippet::ActionFeedbackFnc => ("ACTION_FEEDBACK_FNC", Delimiter::Block),
            Snippet::ActionResponseCallbackFnc => {
                ("ACTION_RESPONSE_CALLBACK_FNC", Delimiter::Block)
            }
            Snippet::InterfaceH => ("INTERFACE", Delimiter::Block),
            Snippet::TopicInterfaceH => ("TOPIC_INTERFACE", Delimiter::Block),
            Snippet::TopicCallbackH => ("TOPIC_CALLBACK_H", Delimiter::Block),
            Snippet::TopicSubscriptionH => ("TOPIC_SUBSCRIPTION_H", Delimiter::Block),
            Snippet::ActionH => ("ACTION_H", Delimiter::Block),
            Snippet::ActionInterfaceH => ("ACTION_INTERFACE", Delimiter::Block),
            Snippet::InterfaceCMake => ("INTERFACE", Delimiter::Hash),
            Snippet::PackageCMake => ("PACKAGE", Delimiter::Hash),
            Snippet::InterfaceXml => ("INTERFACE", Delimiter::Comment),
        };
        Marker::new(name, delimiter)
    }
}

/// Snippet bodies collected from the templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetBank {
    snippets: HashMap<Snippet, String>,
}

impl SnippetBank {
    /// Saves the body of every snippet section found in `text`, then removes the sections.
    pub fn extract(text: &mut String) -> Self {
        let mut snippets = HashMap::new();
        for snippet in Snippet::ALL {
            let marker = snippet.marker();
            let (open, close) = (marker.open(), marker.close());
            if let Some(body) = save_section(text, &open, &close) {
                trace!(target: "codegen", "saved snippet {snippet:?}");
                snippets.insert(snippet, body);
            }
            delete_section(text, &open, &close);
        }
        SnippetBank { snippets }
    }

    /// Body of the snippet, empty if no template defines it.
    pub fn get(&self, snippet: Snippet) -> &str {
        self.snippets.get(&snippet).map_or("", String::as_str)
    }

    pub fn contains(&self, snippet: Snippet) -> bool {
        self.snippets.contains_key(&snippet)
    }

    /// Adds the snippets of `other`, which win over those already present.
    pub fn merge(&mut self, other: &SnippetBank) {
        self.snippets
            .extend(other.snippets.iter().map(|(snippet, body)| (*snippet, body.clone())));
    }

    /// A bank where the snippets of `own` take precedence over these.
    pub fn overlaid_with(&self, own: &SnippetBank) -> SnippetBank {
        let mut bank = self.clone();
        bank.merge(own);
        bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_snippets() {
        let mut text = String::from(
            "start/*SEND_EVENT_LIST*//*SEND_EVENT_SRV*/call($eventData.event$);\
             /*PARAM_LIST*//*PARAM*/p($IT->FIRST$);/*END_PARAM*/\
             /*END_SEND_EVENT_SRV*/end",
        );
        let bank = SnippetBank::extract(&mut text);
        assert_eq!(text, "start/*SEND_EVENT_LIST*/end");
        assert_eq!(bank.get(Snippet::SendParam), "p($IT->FIRST$);");
        assert_eq!(
            bank.get(Snippet::SendEventSrv),
            "call($eventData.event$);/*PARAM_LIST*/"
        );
        assert_eq!(bank.get(Snippet::ActionC), "");
        assert!(!bank.contains(Snippet::ActionC));
    }

    #[test]
    fn delimiter_families() {
        let mut text = String::from(
            "/*INTERFACE*/#include <a>/*END_INTERFACE*/\
             #INTERFACE#find_package($interfaceName$)#END_INTERFACE#\
             <!--INTERFACE--><depend>$interfaceName$</depend><!--END_INTERFACE-->",
        );
        let bank = SnippetBank::extract(&mut text);
        assert!(text.is_empty());
        assert_eq!(bank.get(Snippet::InterfaceH), "#include <a>");
        assert_eq!(bank.get(Snippet::InterfaceCMake), "find_package($interfaceName$)");
        assert_eq!(bank.get(Snippet::InterfaceXml), "<depend>$interfaceName$</depend>");
    }

    #[test]
    fn own_snippets_win() {
        let mut shared =
            String::from("/*PARAM*/shared/*END_PARAM*//*RETURN_PARAM*/r/*END_RETURN_PARAM*/");
        let mut own = String::from("/*PARAM*/own/*END_PARAM*/");
        let shared = SnippetBank::extract(&mut shared);
        let own = SnippetBank::extract(&mut own);
        let bank = shared.overlaid_with(&own);
        assert_eq!(bank.get(Snippet::SendParam), "own");
        assert_eq!(bank.get(Snippet::ReturnParam), "r");
    }

    #[test]
    fn markers_are_distinct() {
        let opens: std::collections::HashSet<_> =
            Snippet::ALL.iter().map(|s| s.marker().open()).collect();
        assert_eq!(opens.len(), Snippet::ALL.len());
    }
}
