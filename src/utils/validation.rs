use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        validate_path(field_name, file)?;

        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => {}
            Some(extension) => {
                return Err(EtlError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(EtlError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Accepts `#RRGGBB` (the leading `#` is optional) and returns the packed RGB value.
pub fn parse_hex_color(field_name: &str, value: &str) -> Result<u32> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    let invalid = || EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: "Colors must be written as #RRGGBB".to_string(),
    };

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u32::from_str_radix(hex, 16).map_err(|_| invalid())
}
