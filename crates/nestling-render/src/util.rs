/// Shortest decimal form rounded to 3 places; never emits `-0`, `NaN` or `inf`.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let k = (v * 1000.0).round() as i64;
    if k == 0 {
        return "0".to_string();
    }
    let sign = if k < 0 { "-" } else { "" };
    let k = k.unsigned_abs();
    let (int, frac) = (k / 1000, k % 1000);
    if frac == 0 {
        return format!("{sign}{int}");
    }
    let digits = format!("{frac:03}");
    format!("{sign}{int}.{}", digits.trim_end_matches('0'))
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
