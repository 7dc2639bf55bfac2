//! Account code generation.

/// Next free account code for a company: `prefix` plus a zero-padded counter
/// one above the highest counter already in use.
///
/// Codes that do not start with `prefix` or whose remainder is not a number
/// are ignored, so hand-typed codes never block generation.
#[must_use]
pub fn next_account_code<'a>(prefix: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let highest = existing
        .into_iter()
        .filter_map(|code| code.strip_prefix(prefix))
        .filter_map(|counter| counter.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{:03}", highest.saturating_add(1))
}
