use crate::registry::reference_model::Capability;

pub const SEPARATORS: [char; 3] = ['_', '-', ' '];

/// Convert a captured display name into the canonical convention:
/// Capitalized_Words terminated by the capability's type word.
///
/// A name that already carries the type word (or a known abbreviation of
/// it) in some convention is left untouched unless `force` is set, so
/// existing naming schemes are respected by default. Re-applying this
/// function is idempotent either way: the type word is never accumulated.
pub fn normalize(raw: &str, capability: Capability, force: bool) -> String {
    let cleaned = cleanup(raw);
    if cleaned.is_empty() {
        return capability.type_word().to_string();
    }
    if !force && is_already_canonical(&cleaned, capability) {
        return cleaned;
    }

    let stripped = strip_type_pattern(&cleaned, capability);
    let cased = to_capitalized_words(&stripped);
    if cased.is_empty() {
        // The name was only the type
        return capability.type_word().to_string();
    }
    format!("{}_{}", cased, capability.type_word())
}

// ============================================================================
// Step 1: cleanup
// ============================================================================

/// Strip engine-generated duplicate markers (`(1)`, `(23)`) and the
/// `(Legacy)` marker, collapse whitespace, and turn remaining spaces into
/// word separators.
pub fn cleanup(raw: &str) -> String {
    let mut buf = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close_rel) => {
                let inner = &rest[open + 1..open + close_rel];
                let is_copy_marker =
                    !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit());
                let is_legacy_marker = inner.trim().eq_ignore_ascii_case("legacy");

                buf.push_str(&rest[..open]);
                if !(is_copy_marker || is_legacy_marker) {
                    buf.push_str(&rest[open..=open + close_rel]);
                }
                rest = &rest[open + close_rel + 1..];
            }
            None => break,
        }
    }
    buf.push_str(rest);

    buf.split_whitespace().collect::<Vec<_>>().join("_")
}

// ============================================================================
// Step 2: type-pattern stripping
// ============================================================================

/// Attempt to strip the capability's type information from the name.
/// The full type word is tried through every pattern before the
/// abbreviation table; the first pattern that strips wins. Returns the
/// name unchanged when nothing matched.
fn strip_type_pattern(name: &str, capability: Capability) -> String {
    if let Some(stripped) = strip_token(name, capability.type_word()) {
        return stripped;
    }
    for abbrev in capability.abbreviations() {
        if let Some(stripped) = strip_token(name, abbrev) {
            return stripped;
        }
    }
    name.to_string()
}

/// One token through the ordered patterns: exact match, suffix with
/// separator, prefix with separator, bare boundary-aware suffix/prefix.
fn strip_token(name: &str, token: &str) -> Option<String> {
    if name.eq_ignore_ascii_case(token) {
        return Some(String::new());
    }
    if name.len() <= token.len() {
        return None;
    }

    let split_tail = name.len() - token.len();
    let suffix_ok = name.is_char_boundary(split_tail);
    let prefix_ok = name.is_char_boundary(token.len());

    // Suffix with separator: "Play_Button"
    if suffix_ok {
        let (head, tail) = name.split_at(split_tail);
        if tail.eq_ignore_ascii_case(token) && head.ends_with(SEPARATORS) {
            return Some(head.trim_end_matches(SEPARATORS).to_string());
        }
    }

    // Prefix with separator: "Button_Play"
    if prefix_ok {
        let (head, tail) = name.split_at(token.len());
        if head.eq_ignore_ascii_case(token) && tail.starts_with(SEPARATORS) {
            return Some(tail.trim_start_matches(SEPARATORS).to_string());
        }
    }

    // Bare suffix, boundary-aware: "PlayButton" but not "playbutton"
    if suffix_ok {
        let (head, tail) = name.split_at(split_tail);
        if tail.eq_ignore_ascii_case(token) {
            let prev = head.chars().last();
            let first = tail.chars().next();
            if prev.is_some_and(|c| c.is_lowercase() || c.is_ascii_digit())
                && first.is_some_and(|c| c.is_uppercase())
            {
                return Some(head.to_string());
            }
        }
    }

    // Bare prefix, boundary-aware: "btnPlay"
    if prefix_ok {
        let (head, tail) = name.split_at(token.len());
        if head.eq_ignore_ascii_case(token)
            && tail.chars().next().is_some_and(|c| c.is_uppercase())
        {
            return Some(tail.to_string());
        }
    }

    None
}

// ============================================================================
// Step 3: word casing
// ============================================================================

/// Split on separators and internal lower-to-upper boundaries, re-join as
/// Capitalized_Words.
pub fn to_capitalized_words(s: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for chunk in s.split(|c: char| SEPARATORS.contains(&c)) {
        if chunk.is_empty() {
            continue;
        }
        let mut word = String::new();
        let mut prev_lower = false;
        for ch in chunk.chars() {
            if ch.is_uppercase() && prev_lower && !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
            word.push(ch);
        }
        if !word.is_empty() {
            words.push(word);
        }
    }

    words
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join("_")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ============================================================================
// Already-canonical detection
// ============================================================================

/// A name counts as already standardized when, after cleanup, it
/// structurally starts or ends with the type word or a known abbreviation
/// of it (boundary-aware, case-insensitive).
pub fn is_already_canonical(name: &str, capability: Capability) -> bool {
    if name.eq_ignore_ascii_case(capability.type_word())
        || strip_token(name, capability.type_word()).is_some()
    {
        return true;
    }
    capability
        .abbreviations()
        .iter()
        .any(|a| name.eq_ignore_ascii_case(a) || strip_token(name, a).is_some())
}
