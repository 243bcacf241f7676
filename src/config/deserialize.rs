// ABOUTME: Custom serde deserializers for config fields.
// ABOUTME: Validates the Neutron endpoint URL and the image registry prefix.

use serde::Deserialize;

pub fn deserialize_endpoint<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    validate_endpoint(&s).map_err(serde::de::Error::custom)?;
    Ok(s.trim_end_matches('/').to_string())
}

pub fn deserialize_registry<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    validate_registry(&s).map_err(serde::de::Error::custom)?;
    Ok(s.trim_end_matches('/').to_string())
}

pub fn validate_endpoint(s: &str) -> Result<(), String> {
    let rest = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .ok_or_else(|| format!("endpoint must start with http:// or https://: {s}"))?;

    if rest.trim_end_matches('/').is_empty() {
        return Err("endpoint host cannot be empty".to_string());
    }
    Ok(())
}

/// A registry prefix such as `registry.example.com:5000/team`.
pub fn validate_registry(s: &str) -> Result<(), String> {
    let trimmed = s.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("registry cannot be empty".to_string());
    }

    if let Some(c) = trimmed
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '/' | ':' | '.' | '-' | '_'))
    {
        return Err(format!("invalid character in registry: '{c}'"));
    }

    if trimmed.split('/').any(str::is_empty) {
        return Err(format!("registry has an empty path segment: {s}"));
    }
    Ok(())
}
