use serde_json::Value;
use std::borrow::Cow;

/// The encoded line break draw.io writes inside attribute values.
pub const ENCODED_LINE_BREAK: &str = "&#xa;";

/// Formats a coordinate or size the way draw.io writes them: integral values have no
/// fractional part (`120`, not `120.0`).
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        let n = v as i64;
        if n == 0 {
            // Also folds `-0.0`.
            return "0".to_string();
        }
        return n.to_string();
    }
    v.to_string()
}

/// Escapes text for use inside a double-quoted XML attribute value.
///
/// Line breaks are written as character references so they survive attribute-value
/// normalization on the way back in.
pub fn escape_attr_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\n' => ENCODED_LINE_BREAK,
            b'\r' => "&#xd;",
            b'\t' => "&#x9;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_attr_into(&mut out, text);
    out
}

/// Replaces literal `&#xa;` sequences left in a decoded label with real line breaks.
pub fn decode_line_breaks(text: &str) -> Cow<'_, str> {
    if text.contains(ENCODED_LINE_BREAK) {
        Cow::Owned(text.replace(ENCODED_LINE_BREAK, "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// A fresh 12-hex-digit identifier.
pub fn short_uid() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(12);
    id
}

/// Renders a scalar JSON value as an attribute or style value.
///
/// Strings are taken verbatim, numbers use [`fmt_num`] and booleans become `1`/`0`. Arrays,
/// objects and `null` have no attribute form.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => Some(fmt_num(f)),
            _ => Some(n.to_string()),
        },
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_drop_trailing_zero_fraction() {
        assert_eq!(fmt_num(120.0), "120");
        assert_eq!(fmt_num(-40.0), "-40");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(f64::NAN), "0");
    }

    #[test]
    fn attribute_escaping_covers_markup_and_line_breaks() {
        assert_eq!(
            escape_attr("a < b & \"c\" >\nd"),
            "a &lt; b &amp; &quot;c&quot; &gt;&#xa;d"
        );
        assert_eq!(escape_attr("plain"), "plain");
    }

    #[test]
    fn encoded_line_breaks_decode() {
        assert_eq!(decode_line_breaks("Web&#xa;Tier"), "Web\nTier");
        assert!(matches!(decode_line_breaks("Web"), Cow::Borrowed(_)));
    }

    #[test]
    fn short_uids_are_twelve_hex_digits() {
        let id = short_uid();
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, short_uid());
    }

    #[test]
    fn scalars_render_as_attribute_text() {
        assert_eq!(scalar_to_string(&json!("8 8")).as_deref(), Some("8 8"));
        assert_eq!(scalar_to_string(&json!(14)).as_deref(), Some("14"));
        assert_eq!(scalar_to_string(&json!(14.0)).as_deref(), Some("14"));
        assert_eq!(scalar_to_string(&json!(0.5)).as_deref(), Some("0.5"));
        assert_eq!(scalar_to_string(&json!(true)).as_deref(), Some("1"));
        assert_eq!(scalar_to_string(&json!(null)), None);
    }
}
