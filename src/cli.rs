use std::path::PathBuf;

use clap::Parser;

use crate::Translator;

/// Generates the code of a ROS skill from its state-machine model
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the skill's SCXML model
    #[arg(value_hint = clap::ValueHint::FilePath)]
    model: PathBuf,
    /// Directory holding the templates
    #[arg(value_hint = clap::ValueHint::DirPath)]
    template_path: PathBuf,
    /// Directory the generated files are written to
    #[arg(value_hint = clap::ValueHint::DirPath)]
    output_path: PathBuf,
    /// Interface definitions, if not part of the model
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    interface: Option<PathBuf>,
    /// Generate the data-model files and keep the data-model sections
    #[arg(long, default_value = "false")]
    datamodel: bool,
    /// JSON file overriding the template layout
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    layout: Option<PathBuf>,
    /// Write the resolved events as JSON
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    dump_registry: Option<PathBuf>,
    /// Log the translation steps
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    pub fn translator(&self) -> Translator {
        let mut translator = Translator::new(&self.model, &self.template_path, &self.output_path)
            .with_data_model(self.datamodel);
        if let Some(interface) = &self.interface {
            translator = translator.with_interface(interface);
        }
        if let Some(layout) = &self.layout {
            translator = translator.with_layout(layout);
        }
        translator
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let (translation, written) = self.translator().run()?;
        for path in &written {
            println!("Generated {}", path.display());
        }
        if let Some(path) = &self.dump_registry {
            translation.dump_registry(path)?;
        }
        Ok(())
    }
}
