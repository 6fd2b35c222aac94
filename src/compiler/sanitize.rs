/// Returned for ids that contain nothing usable.
pub const FALLBACK_IDENTIFIER: &str = "node";

/// Maps an arbitrary node id to a valid binding name.
///
/// Non-alphanumeric ASCII characters become `_`, runs of `_` collapse, a leading
/// digit gets a `_` prefix and trailing `_` are stripped. Total and idempotent.
pub fn sanitize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return FALLBACK_IDENTIFIER.to_string();
    }

    let mut ident = String::with_capacity(raw.len() + 1);
    for c in raw.chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '_' };
        if c == '_' && ident.ends_with('_') {
            continue;
        }
        ident.push(c);
    }

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    let trimmed = ident.trim_end_matches('_');
    if trimmed.is_empty() {
        FALLBACK_IDENTIFIER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Whether `name` already has the shape `sanitize` produces.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
