use anyhow::{anyhow, Result};

pub fn validate_base_url(name: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("{} must not be empty", name));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(anyhow!("{} must start with http:// or https://", name));
    }
    Ok(())
}

pub fn validate_path_segment(name: &str, value: &str) -> Result<()> {
    if value.trim_matches('/').trim().is_empty() {
        return Err(anyhow!("{} must not be empty", name));
    }
    Ok(())
}
