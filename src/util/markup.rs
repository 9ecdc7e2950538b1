//! Markup stripping for device-reported messages.

/// Remove everything between `<` and `>`, turn newlines into spaces and trim.
///
/// Devices answer failed requests with HTML error pages; this reduces them to
/// the readable text.
pub fn detag(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if in_tag => {}
            '\n' => out.push(' '),
            other => out.push(other),
        }
    }

    out.trim().to_string()
}
