use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::info;
use m2c_core::SkillIdentity;
use serde::{Deserialize, Serialize};

use crate::CodegenError;
use crate::markers::LIST_MARKERS;

/// The files a skill is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    CMakeLists,
    Source,
    DataModelSource,
    Header,
    DataModelHeader,
    Main,
    PackageXml,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 7] = [
        TemplateKind::CMakeLists,
        TemplateKind::Source,
        TemplateKind::DataModelSource,
        TemplateKind::Header,
        TemplateKind::DataModelHeader,
        TemplateKind::Main,
        TemplateKind::PackageXml,
    ];

    /// Data-model templates are only used when generating with a data model.
    pub fn is_data_model(self) -> bool {
        matches!(
            self,
            TemplateKind::DataModelSource | TemplateKind::DataModelHeader
        )
    }

    /// Where the generated file goes, relative to the output directory.
    pub fn output_path(self, identity: &SkillIdentity) -> PathBuf {
        let class = &identity.class_name;
        match self {
            TemplateKind::Header => Path::new("include").join(format!("{class}.h")),
            TemplateKind::DataModelHeader => {
                Path::new("include").join(format!("{class}DataModel.h"))
            }
            TemplateKind::Source => Path::new("src").join(format!("{class}.cpp")),
            TemplateKind::DataModelSource => {
                Path::new("src").join(format!("{class}DataModel.cpp"))
            }
            TemplateKind::Main => Path::new("src").join("main.cpp"),
            TemplateKind::CMakeLists => PathBuf::from("CMakeLists.txt"),
            TemplateKind::PackageXml => PathBuf::from("package.xml"),
        }
    }
}

/// Where the templates live inside the template directory,
/// and which list markers are stripped once every event has been expanded.
///
/// Every field has a default, so a layout file only needs the entries it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateLayout {
    pub header: PathBuf,
    pub source: PathBuf,
    pub data_model_header: PathBuf,
    pub data_model_source: PathBuf,
    pub main: PathBuf,
    pub cmake_lists: PathBuf,
    pub package_xml: PathBuf,
    pub list_markers: Vec<String>,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        TemplateLayout {
            header: PathBuf::from("include/TemplateSkill.h"),
            source: PathBuf::from("src/TemplateSkill.cpp"),
            data_model_header: PathBuf::from("include/TemplateSkillDataModel.h"),
            data_model_source: PathBuf::from("src/TemplateSkillDataModel.cpp"),
            main: PathBuf::from("src/main.cpp"),
            cmake_lists: PathBuf::from("CMakeLists.txt"),
            package_xml: PathBuf::from("package.xml"),
            list_markers: LIST_MARKERS.map(str::to_owned).into(),
        }
    }
}

impl TemplateLayout {
    /// Reads a layout from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, CodegenError> {
        info!(target: "codegen", "reading layout '{}'", path.display());
        let file = File::open(path).map_err(|source| CodegenError::ReadLayout {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CodegenError::InvalidLayout {
                path: path.to_owned(),
                source,
            }
        })
    }

    /// Path of the template, relative to the template directory.
    pub fn template_path(&self, kind: TemplateKind) -> &Path {
        match kind {
            TemplateKind::Header => &self.header,
            TemplateKind::Source => &self.source,
            TemplateKind::DataModelHeader => &self.data_model_header,
            TemplateKind::DataModelSource => &self.data_model_source,
            TemplateKind::Main => &self.main,
            TemplateKind::CMakeLists => &self.cmake_lists,
            TemplateKind::PackageXml => &self.package_xml,
        }
    }
}
