//! Manifest template loader
//!
//! A small YAML service description: declared inputs plus a list of nodes
//! with `requires` ordering. Enough to drive a real deployment through the
//! template ports; it is not a general template language.
//!
//! ```yaml
//! inputs:
//!   name: { default: demo }
//!   region: { required: true }
//! nodes:
//!   - name: web
//!     requires: [db]
//!   - name: db
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use crate::domain::ports::{InstanceStore, ServiceAst, ServiceTemplate, TemplateLoader, Topology};
use crate::domain::value_objects::Inputs;
use crate::error::{KeelError, KeelResult};

use super::executor::LocalTopology;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestDoc {
    #[serde(default)]
    inputs: BTreeMap<String, Option<InputDecl>>,
    #[serde(default)]
    nodes: Vec<NodeDecl>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputDecl {
    #[serde(default)]
    default: Option<serde_json::Value>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    #[allow(dead_code)]
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeDecl {
    name: String,
    #[serde(default)]
    requires: Vec<String>,
}

/// Loads manifest templates from the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestLoader;

impl ManifestLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse manifest text; `origin` is used for error locations.
    pub fn parse(origin: &str, content: &str) -> KeelResult<ManifestAst> {
        if content.trim().is_empty() {
            return Ok(ManifestAst {
                doc: ManifestDoc::default(),
            });
        }
        let doc: ManifestDoc = serde_yaml_ng::from_str(content).map_err(|e| {
            let location = match e.location() {
                Some(loc) => format!("{}:{}:{}", origin, loc.line(), loc.column()),
                None => origin.to_string(),
            };
            KeelError::Parse {
                location,
                message: e.to_string(),
            }
        })?;
        Ok(ManifestAst { doc })
    }
}

impl TemplateLoader for ManifestLoader {
    fn load(&self, working_dir: &Path, template_ref: &Path) -> KeelResult<Box<dyn ServiceAst>> {
        let path = working_dir.join(template_ref);
        let origin = template_ref.display().to_string();
        let content = std::fs::read_to_string(&path).map_err(|e| KeelError::Parse {
            location: origin.clone(),
            message: format!("could not read template: {}", e),
        })?;
        tracing::debug!(template = %path.display(), "template loaded");
        Ok(Box::new(Self::parse(&origin, &content)?))
    }
}

/// Parsed manifest, inputs not yet bound.
#[derive(Debug, Clone)]
pub struct ManifestAst {
    doc: ManifestDoc,
}

impl ManifestAst {
    /// Merge supplied inputs with declared defaults.
    fn bind_inputs(&self, supplied: &Inputs) -> KeelResult<Inputs> {
        let unknown: Vec<&str> = supplied
            .names()
            .filter(|name| !self.doc.inputs.contains_key(*name))
            .collect();
        if !unknown.is_empty() {
            return Err(data_error(format!(
                "unknown input(s): {}",
                unknown.join(", ")
            )));
        }

        let mut bound = Inputs::new();
        let mut missing = Vec::new();
        for (name, decl) in &self.doc.inputs {
            let decl = decl.clone().unwrap_or_default();
            match (supplied.get(name), decl.default) {
                (Some(value), _) => bound.insert(name.clone(), value.clone()),
                (None, Some(default)) => bound.insert(name.clone(), default),
                (None, None) if decl.required => missing.push(name.as_str()),
                (None, None) => {}
            }
        }
        if !missing.is_empty() {
            return Err(data_error(format!(
                "missing required input(s): {}",
                missing.join(", ")
            )));
        }
        Ok(bound)
    }

    /// Group nodes into dependency waves; every node in a wave only
    /// requires nodes from earlier waves.
    fn waves(&self) -> KeelResult<Vec<Vec<String>>> {
        let mut requires: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for node in &self.doc.nodes {
            if !is_valid_node_name(&node.name) {
                return Err(data_error(format!(
                    "invalid node name '{}': use letters, digits, '-' or '_'",
                    node.name
                )));
            }
            let deps = node.requires.iter().map(String::as_str).collect();
            if requires.insert(node.name.as_str(), deps).is_some() {
                return Err(data_error(format!("duplicate node '{}'", node.name)));
            }
        }
        for (name, deps) in &requires {
            if let Some(missing) = deps.iter().find(|dep| !requires.contains_key(*dep)) {
                return Err(data_error(format!(
                    "node '{}' requires unknown node '{}'",
                    name, missing
                )));
            }
        }

        let mut done: BTreeSet<&str> = BTreeSet::new();
        let mut waves = Vec::new();
        while done.len() < requires.len() {
            let wave: Vec<&str> = requires
                .iter()
                .filter(|(name, deps)| !done.contains(*name) && deps.is_subset(&done))
                .map(|(name, _)| *name)
                .collect();
            if wave.is_empty() {
                let stuck: Vec<&str> = requires
                    .keys()
                    .filter(|name| !done.contains(*name))
                    .copied()
                    .collect();
                return Err(data_error(format!(
                    "dependency cycle between nodes: {}",
                    stuck.join(", ")
                )));
            }
            done.extend(wave.iter().copied());
            waves.push(wave.into_iter().map(String::from).collect());
        }
        Ok(waves)
    }
}

impl ServiceAst for ManifestAst {
    fn template(&self, inputs: &Inputs) -> KeelResult<Box<dyn ServiceTemplate>> {
        let inputs = self.bind_inputs(inputs)?;
        let waves = self.waves()?;
        Ok(Box::new(ManifestTemplate { inputs, waves }))
    }
}

/// Manifest with inputs bound and deploy order computed.
#[derive(Debug, Clone)]
pub struct ManifestTemplate {
    inputs: Inputs,
    waves: Vec<Vec<String>>,
}

impl ServiceTemplate for ManifestTemplate {
    fn instantiate<'s>(
        &self,
        store: &'s dyn InstanceStore,
    ) -> KeelResult<Box<dyn Topology + 's>> {
        Ok(Box::new(LocalTopology::new(
            store,
            self.waves.clone(),
            self.inputs.clone(),
        )))
    }
}

fn data_error(message: String) -> KeelError {
    KeelError::DataValidation { message }
}

fn is_valid_node_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
