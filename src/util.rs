use std::num::ParseIntError;

/// Collapses every whitespace run in `s` into a single space and trims the
/// ends. Descriptor description text arrives with the XML document's
/// indentation baked in; everything stored in the catalog goes through here
/// first.
pub fn respace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a descriptor integer, either decimal or `0x`-prefixed hex.
pub fn parse_u32(text: &str) -> Result<u32, ParseIntError> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        text.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respace_collapses_runs_and_trims() {
        assert_eq!(respace("  UART  control\n   register\t"), "UART control register");
        assert_eq!(respace("already clean"), "already clean");
        assert_eq!(respace(""), "");
        assert_eq!(respace(" \n\t "), "");
    }

    #[test]
    fn respace_is_idempotent() {
        let once = respace("  a \n b\tc ");
        assert_eq!(respace(&once), once);
    }

    #[test]
    fn parse_u32_accepts_decimal_and_hex() {
        assert_eq!(parse_u32("42"), Ok(42));
        assert_eq!(parse_u32("0x2A"), Ok(42));
        assert_eq!(parse_u32("0X2a"), Ok(42));
        assert_eq!(parse_u32(" 7 "), Ok(7));
        assert!(parse_u32("").is_err());
        assert!(parse_u32("0xZZ").is_err());
        assert!(parse_u32("-1").is_err());
    }
}
