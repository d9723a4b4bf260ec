//! Locale tag helpers

/// Canonical form of a locale tag: lower case with `-` separators
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('_', "-").to_lowercase()
}

/// Candidate tags from most to least specific.
///
/// `"en-US-x-test"` yields `"en-us-x-test"`, `"en-us-x"`, `"en-us"`, `"en"`.
pub fn fallback_chain(locale: &str) -> Vec<String> {
    let normalized = normalize_locale(locale);
    let mut chain = Vec::new();
    let mut current = normalized.as_str();
    loop {
        if !current.is_empty() {
            chain.push(current.to_string());
        }
        match current.rfind('-') {
            Some(index) => current = &current[..index],
            None => break,
        }
    }
    chain
}

/// Whether a locale tag is syntactically usable
pub fn is_valid_locale(locale: &str) -> bool {
    let normalized = normalize_locale(locale);
    !normalized.is_empty()
        && normalized
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()))
}
