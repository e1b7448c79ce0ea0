use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;
use m2c_codegen::{GenerationOptions, Generator, TemplateLayout, TemplateSet};
use m2c_core::{
    ControlFlags, EventRecord, EventRegistry, InterfaceResolver, SkillIdentity, derive_identity,
    extract_model, load_document,
};
use serde::Serialize;

/// One run of the translator: from a skill model and its interfaces to generated code.
#[derive(Debug, Clone)]
pub struct Translator {
    model: PathBuf,
    interface: Option<PathBuf>,
    template_dir: PathBuf,
    output_dir: PathBuf,
    layout: Option<PathBuf>,
    data_model: bool,
}

impl Translator {
    pub fn new(
        model: impl Into<PathBuf>,
        template_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Translator {
            model: model.into(),
            interface: None,
            template_dir: template_dir.into(),
            output_dir: output_dir.into(),
            layout: None,
            data_model: false,
        }
    }

    /// Reads the interface definitions from their own document instead of the model.
    pub fn with_interface(mut self, interface: impl Into<PathBuf>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    pub fn with_layout(mut self, layout: impl Into<PathBuf>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn with_data_model(mut self, data_model: bool) -> Self {
        self.data_model = data_model;
        self
    }

    /// Resolves every event of the model and generates the code in memory.
    pub fn translate(&self) -> anyhow::Result<Translation> {
        let model = extract_model(&self.model)
            .with_context(|| format!("failed to load model '{}'", self.model.display()))?;
        let identity = derive_identity(&model.root_name)?;

        let interface_path = self.interface.as_deref().unwrap_or(&self.model);
        let interfaces = load_document(interface_path).with_context(|| {
            format!("failed to load interfaces '{}'", interface_path.display())
        })?;
        let mut registry = EventRegistry::new();
        registry
            .register_model(&model, &InterfaceResolver::new(&interfaces))
            .with_context(|| format!("failed to resolve events of '{}'", self.model.display()))?;

        let layout = match &self.layout {
            Some(path) => TemplateLayout::from_file(path)?,
            None => TemplateLayout::default(),
        };
        let mut templates = TemplateSet::load(&self.template_dir, &layout, self.data_model)
            .with_context(|| {
                format!("failed to load templates from '{}'", self.template_dir.display())
            })?;
        let options = GenerationOptions {
            data_model: self.data_model,
        };
        Generator::new(&identity, &registry, &layout, options).generate(&mut templates);

        Ok(Translation {
            identity,
            registry,
            templates,
        })
    }

    /// Translates and writes the generated files, returning their paths.
    pub fn run(&self) -> anyhow::Result<(Translation, Vec<PathBuf>)> {
        let translation = self.translate()?;
        let written = translation
            .templates
            .write(&self.output_dir, &translation.identity)
            .with_context(|| format!("failed to write into '{}'", self.output_dir.display()))?;
        info!("written {} files", written.len());
        Ok((translation, written))
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct Translation {
    pub identity: SkillIdentity,
    pub registry: EventRegistry,
    pub templates: TemplateSet,
}

#[derive(Serialize)]
struct RegistryDump<'a> {
    skill: &'a SkillIdentity,
    control_events: ControlFlags,
    events: Vec<&'a EventRecord>,
}

impl Translation {
    /// Writes the skill identity and the resolved events as JSON.
    pub fn dump_registry(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        let dump = RegistryDump {
            skill: &self.identity,
            control_events: self.registry.control_flags(),
            events: self.registry.records().collect(),
        };
        serde_json::to_writer_pretty(BufWriter::new(file), &dump)?;
        info!("registry dumped to '{}'", path.display());
        Ok(())
    }
}
