use anyhow::{anyhow, Result};

pub fn validate_hour(name: &str, value: u32) -> Result<()> {
    if value > 23 {
        return Err(anyhow!("{} must be within 0..=23", name));
    }
    Ok(())
}

pub fn validate_positive(name: &str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(anyhow!("{} must be greater than 0", name));
    }
    Ok(())
}
