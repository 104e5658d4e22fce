//! Loading field descriptors from files.

use crate::descriptor::FieldDescriptor;
use crate::field::Field;
use field_core::ConfigError;
use std::fs;
use std::path::Path;

/// Errors that can occur when loading a field descriptor.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// Error reading descriptor file
    #[error("Failed to read descriptor file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing JSON
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// File extension is neither JSON nor YAML
    #[error("Unsupported descriptor file extension: {0:?}")]
    UnsupportedExtension(String),

    /// The descriptor parsed but does not describe a valid field
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Read a descriptor from a `.json`, `.yaml` or `.yml` file.
pub fn load_descriptor<P: AsRef<Path>>(path: P) -> Result<FieldDescriptor, DescriptorError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let content = fs::read_to_string(path)?;

    let descriptor = match extension.as_str() {
        "json" => descriptor_from_json(&content)?,
        "yaml" | "yml" => descriptor_from_yaml(&content)?,
        _ => return Err(DescriptorError::UnsupportedExtension(extension)),
    };
    tracing::debug!(path = %path.display(), name = %descriptor.name, "Loaded field descriptor");
    Ok(descriptor)
}

/// Parse a descriptor from a JSON string.
pub fn descriptor_from_json(json: &str) -> Result<FieldDescriptor, DescriptorError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a descriptor from a YAML string.
pub fn descriptor_from_yaml(yaml: &str) -> Result<FieldDescriptor, DescriptorError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a descriptor file and build its field.
pub fn load_field<P: AsRef<Path>>(path: P) -> Result<Field, DescriptorError> {
    let descriptor = load_descriptor(path)?;
    Ok(Field::new(descriptor)?)
}
