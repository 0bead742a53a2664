use serde::Serialize;

use crate::domain::AppError;

pub const FORMATS: [&str; 3] = ["text", "json", "yaml"];

/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Yaml,
}

impl Format {
    pub fn from_name(name: &str) -> Format {
        match name {
            "json" => Format::Json,
            "yaml" => Format::Yaml,
            _ => Format::Text,
        }
    }
}

/// Print `value` as JSON or YAML, or through `text` in text mode.
pub fn emit<T, F>(format: Format, value: &T, text: F) -> Result<(), AppError>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T),
{
    match format {
        Format::Text => text(value),
        Format::Json => println!("{}", serde_json::to_string_pretty(value)?),
        Format::Yaml => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}
