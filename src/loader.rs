use std::fmt;
use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::jil::AttrValue;

/// A loaded declarative document: job name to attribute list, both in
/// document order.
pub type JobDocument = Vec<(String, Vec<(String, AttrValue)>)>;

/// Loader-level errors
#[derive(Debug)]
pub enum LoaderError {
    /// The source could not be read
    Io(std::io::Error),

    /// The document is not well-formed YAML
    Parse(serde_yaml::Error),

    /// The document is well-formed YAML but not a mapping of job entries
    /// to scalar attributes
    Format(String),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::Io(e) => write!(f, "Failed to read document: {}", e),
            LoaderError::Parse(e) => write!(f, "Malformed document: {}", e),
            LoaderError::Format(msg) => write!(f, "Unexpected document shape: {}", msg),
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoaderError::Io(e) => Some(e),
            LoaderError::Parse(e) => Some(e),
            LoaderError::Format(_) => None,
        }
    }
}

/// Load a YAML job document from disk.
pub fn load(path: &Path) -> Result<JobDocument, LoaderError> {
    info!("Loading job document from {}", path.display());

    let text = fs::read_to_string(path).map_err(LoaderError::Io)?;
    parse(&text)
}

/// Parse a YAML job document: a mapping of job name to a mapping of
/// attribute name to scalar value. Mapping order is preserved end to end.
pub fn parse(text: &str) -> Result<JobDocument, LoaderError> {
    let root: Mapping = serde_yaml::from_str(text).map_err(LoaderError::Parse)?;

    let mut document = JobDocument::new();
    for (key, value) in root {
        let name = scalar_key(&key)?;
        let entry = value.as_mapping().ok_or_else(|| {
            LoaderError::Format(format!("entry '{}' is not an attribute mapping", name))
        })?;

        let mut attrs = Vec::with_capacity(entry.len());
        for (attr_key, attr_value) in entry {
            let attr_name = scalar_key(attr_key)?;
            attrs.push((attr_name.clone(), scalar_value(&name, &attr_name, attr_value)?));
        }

        debug!("Loaded entry '{}' with {} attributes", name, attrs.len());
        document.push((name, attrs));
    }

    info!("Loaded document with {} job entries", document.len());
    Ok(document)
}

fn scalar_key(key: &Value) -> Result<String, LoaderError> {
    key.as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| LoaderError::Format(format!("non-string key: {:?}", key)))
}

fn scalar_value(entry: &str, attr: &str, value: &Value) -> Result<AttrValue, LoaderError> {
    match value {
        // Scalars deserialize straight into the untagged AttrValue.
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            serde_yaml::from_value(value.clone()).map_err(|e| {
                LoaderError::Format(format!("attribute '{}.{}': {}", entry, attr, e))
            })
        }
        other => Err(LoaderError::Format(format!(
            "attribute '{}.{}' is not a scalar: {:?}",
            entry, attr, other
        ))),
    }
}
