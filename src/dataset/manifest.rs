//! Class manifest (`data.yaml`) loading.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::LabelscopeError;

/// Ordered list of class names; a class index is a position in this list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassList {
    names: Vec<String>,
}

impl ClassList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    /// Name of the class at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a ClassList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Deserialize)]
struct DataYaml {
    nc: usize,
    names: DataYamlNames,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataYamlNames {
    Sequence(Vec<String>),
    Mapping(BTreeMap<usize, String>),
}

/// Read the class manifest at `path`.
///
/// Fails with [`LabelscopeError::ClassCountMismatch`] when the declared
/// `nc` does not match the number of names.
pub fn read_class_manifest(path: &Path) -> Result<ClassList, LabelscopeError> {
    let data = fs::read_to_string(path).map_err(LabelscopeError::Io)?;
    parse_class_manifest(&data, path)
}

fn parse_class_manifest(data: &str, path: &Path) -> Result<ClassList, LabelscopeError> {
    let parsed: DataYaml =
        serde_yaml::from_str(data).map_err(|source| LabelscopeError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;

    let names = match parsed.names {
        DataYamlNames::Sequence(names) => names,
        DataYamlNames::Mapping(mapping) => names_from_mapping(mapping, parsed.nc, path)?,
    };

    if parsed.nc != names.len() {
        return Err(LabelscopeError::ClassCountMismatch {
            path: path.to_path_buf(),
            declared: parsed.nc,
            found: names.len(),
        });
    }

    // Counts are keyed by name, so a repeated name would merge two classes.
    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.as_str()) {
            return Err(LabelscopeError::DuplicateClassName {
                path: path.to_path_buf(),
                name: name.clone(),
            });
        }
    }

    debug!("{} class(es) from {}", names.len(), path.display());
    Ok(ClassList { names })
}

// Gaps in an index->name mapping get a placeholder name. An index at or
// past `nc` is a count mismatch, checked before anything is allocated.
fn names_from_mapping(
    mapping: BTreeMap<usize, String>,
    nc: usize,
    path: &Path,
) -> Result<Vec<String>, LabelscopeError> {
    let Some(max_index) = mapping.keys().max().copied() else {
        return Ok(Vec::new());
    };
    if max_index >= nc {
        return Err(LabelscopeError::ClassCountMismatch {
            path: path.to_path_buf(),
            declared: nc,
            found: max_index.saturating_add(1),
        });
    }

    let mut names = vec![String::new(); max_index + 1];
    for (index, name) in mapping {
        names[index] = name;
    }
    for (index, name) in names.iter_mut().enumerate() {
        if name.trim().is_empty() {
            *name = format!("class_{}", index);
        }
    }
    Ok(names)
}
