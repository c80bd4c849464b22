use std::string::FromUtf16Error;

/// Convert UTF16 units up to the first NUL into UTF8 bytes. Unpaired surrogates are an error, not replaced
pub(crate) fn utf16_to_bytes(units: &[u16]) -> Result<Vec<u8>, FromUtf16Error> {
    let end = units
        .iter()
        .position(|unit| *unit == 0)
        .unwrap_or(units.len());
    let value = String::from_utf16(&units[..end])?;
    Ok(value.into_bytes())
}

/// Render bytes as an escaped byte string literal body. Ex: `przyk\xc5\x82ad`
pub(crate) fn escape_bytes(data: &[u8]) -> String {
    let mut escaped = String::with_capacity(data.len());
    for byte in data.iter().copied() {
        match byte {
            b'\\' => escaped.push_str("\\\\"),
            b'"' => escaped.push_str("\\\""),
            b'\n' => escaped.push_str("\\n"),
            b'\r' => escaped.push_str("\\r"),
            b'\t' => escaped.push_str("\\t"),
            0x20..=0x7e => escaped.push(byte as char),
            _ => escaped.push_str(&format!("\\x{byte:02x}")),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_bytes, utf16_to_bytes};

    #[test]
    fn test_utf16_to_bytes() {
        let units: Vec<u16> = "przykład".encode_utf16().collect();
        assert_eq!(utf16_to_bytes(&units).unwrap(), "przykład".as_bytes());
    }

    #[test]
    fn test_utf16_to_bytes_stops_at_nul() {
        let test = [50, 46, 51, 0, 65];
        assert_eq!(utf16_to_bytes(&test).unwrap(), b"2.3");
    }

    #[test]
    fn test_utf16_to_bytes_lone_surrogate() {
        assert!(utf16_to_bytes(&[0xd800, 65]).is_err());
    }

    #[test]
    fn test_escape_bytes() {
        assert_eq!(escape_bytes(b"2.3.0"), "2.3.0");
        assert_eq!(escape_bytes("przykład".as_bytes()), "przyk\\xc5\\x82ad");
        assert_eq!(escape_bytes(b"a\"b\\c\n\0"), "a\\\"b\\\\c\\n\\x00");
    }
}
