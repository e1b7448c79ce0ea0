use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use m2c_core::SkillIdentity;

use crate::{CodegenError, TemplateKind, TemplateLayout};

/// Template texts, before or after generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    texts: BTreeMap<TemplateKind, String>,
}

impl TemplateSet {
    /// Reads the templates listed by `layout` from `dir`.
    ///
    /// Data-model templates are read only if `data_model` is set.
    pub fn load(dir: &Path, layout: &TemplateLayout, data_model: bool) -> Result<Self, CodegenError> {
        let mut set = TemplateSet::default();
        for kind in TemplateKind::ALL {
            if kind.is_data_model() && !data_model {
                continue;
            }
            let path = dir.join(layout.template_path(kind));
            debug!(target: "codegen", "reading template '{}'", path.display());
            let text = fs::read_to_string(&path)
                .map_err(|source| CodegenError::ReadTemplate { path, source })?;
            set.insert(kind, text);
        }
        info!(target: "codegen", "loaded {} templates", set.len());
        Ok(set)
    }

    pub fn insert(&mut self, kind: TemplateKind, text: impl Into<String>) {
        self.texts.insert(kind, text.into());
    }

    pub fn get(&self, kind: TemplateKind) -> Option<&str> {
        self.texts.get(&kind).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TemplateKind, &str)> {
        self.texts.iter().map(|(kind, text)| (*kind, text.as_str()))
    }

    pub(crate) fn texts_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.texts.values_mut()
    }

    /// Writes every text to its place under `output_dir`, creating directories as needed,
    /// and returns the paths written.
    pub fn write(
        &self,
        output_dir: &Path,
        identity: &SkillIdentity,
    ) -> Result<Vec<PathBuf>, CodegenError> {
        let mut written = Vec::with_capacity(self.texts.len());
        for (kind, text) in &self.texts {
            let path = output_dir.join(kind.output_path(identity));
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| CodegenError::CreateDir {
                    path: parent.to_owned(),
                    source,
                })?;
            }
            fs::write(&path, text).map_err(|source| CodegenError::Write {
                path: path.clone(),
                source,
            })?;
            info!(target: "codegen", "written '{}'", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
