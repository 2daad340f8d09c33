//! CLI command implementations

pub mod palettes;
pub mod render;

use anyhow::{Context, Result, bail};

/// Parses `ff8000`, `#ff8000` or `0xff8000` into a packed RGB value.
pub fn parse_hex(text: &str) -> Result<u32> {
    let digits = text
        .trim()
        .trim_start_matches('#')
        .trim_start_matches("0x");
    let value = u32::from_str_radix(digits, 16)
        .with_context(|| format!("Invalid hex color: {text}"))?;
    if value > 0xFF_FFFF {
        bail!("Hex color out of range: {text}");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("ff8000").unwrap(), 0xff8000);
        assert_eq!(parse_hex("#11998E").unwrap(), 0x11998e);
        assert_eq!(parse_hex("0x000001").unwrap(), 1);
        assert!(parse_hex("1000000").is_err());
        assert!(parse_hex("zz").is_err());
    }
}
