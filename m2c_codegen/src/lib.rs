//! Template processing for model2code.
//!
//! Templates are plain text files carrying markers in the comment syntax of their language.
//! Generation fills the skill-level placeholders, keeps or drops the conditional sections,
//! collects reusable snippets and expands them once per resolved event,
//! then strips the list markers that are left.

mod error;
mod expand;
mod layout;
pub mod markers;
mod snippets;
mod templates;
pub mod text;

use log::{debug, info};
use m2c_core::{EventRegistry, SkillIdentity};

pub use error::CodegenError;
pub use layout::{TemplateKind, TemplateLayout};
pub use snippets::{Snippet, SnippetBank};
pub use templates::TemplateSet;

use crate::text::{delete_command, replace_all};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Keep the `DATAMODEL` sections.
    pub data_model: bool,
}

/// Generates the code of one skill from its identity and resolved events.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    identity: &'a SkillIdentity,
    registry: &'a EventRegistry,
    layout: &'a TemplateLayout,
    options: GenerationOptions,
}

impl<'a> Generator<'a> {
    pub fn new(
        identity: &'a SkillIdentity,
        registry: &'a EventRegistry,
        layout: &'a TemplateLayout,
        options: GenerationOptions,
    ) -> Self {
        Generator {
            identity,
            registry,
            layout,
            options,
        }
    }

    /// Turns every template of the set into generated code, in place.
    ///
    /// Snippets are collected from all templates before any event is expanded,
    /// so a template may use snippets another template defines.
    pub fn generate(&self, templates: &mut TemplateSet) {
        let flags = self.registry.control_flags();
        let mut shared = SnippetBank::default();
        let mut banks = Vec::with_capacity(templates.len());
        for text in templates.texts_mut() {
            self.apply_skill(text);
            markers::apply_control_sections(text, flags);
            let bank = SnippetBank::extract(text);
            shared.merge(&bank);
            banks.push(bank);
        }

        for (text, own) in templates.texts_mut().zip(&banks) {
            let bank = shared.overlaid_with(own);
            for record in self.registry.records().filter(|record| !record.is_control()) {
                debug!(target: "codegen", "expanding '{}'", record.event_identifier);
                expand::expand_event(text, record, &bank);
            }
            for marker in &self.layout.list_markers {
                delete_command(text, marker);
            }
        }
        info!(
            target: "codegen",
            "generated {} files for '{}'",
            templates.len(),
            self.identity.class_name
        );
    }

    /// Substitutes the skill-level placeholders and applies the skill-level sections.
    fn apply_skill(&self, text: &mut String) {
        let identity = self.identity;
        replace_all(text, "$className$", &identity.class_name);
        replace_all(text, "$projectName$", &identity.class_name_snake_case);
        replace_all(text, "$SMName$", &identity.raw_root_name);
        replace_all(text, "$skillName$", &identity.skill_base_name);
        replace_all(text, "$skillTypeLC$", &identity.skill_type_lowercase);
        replace_all(text, "$skillType$", &identity.skill_type_suffix);

        markers::ACTION.apply(text, identity.is_action_skill());
        for marker in &markers::DATAMODEL {
            marker.apply(text, self.options.data_model);
        }
        if self.options.data_model {
            replace_all(text, "$dataModelClassName$", &identity.data_model_class_name());
        }
    }
}
