//! Text rendering utilities for human-friendly error messages.
//!
//! Provides helpers to list registered behavior names, shorten
//! type paths and suggest close matches for a mistyped name.

/// Renders names as a comma separated list.
///
/// # Examples
/// ```
/// use tadbir_support::rendering::render_list;
///
/// let names = vec!["CreditCardSettlement", "WalletSettlement"];
/// assert_eq!(render_list(&names), "CreditCardSettlement, WalletSettlement");
/// assert_eq!(render_list::<&str>(&[]), "<none>");
/// ```
pub fn render_list<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return "<none>".to_string();
    }

    names
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a titled bullet block, indented for nesting under an error line.
///
/// ```text
///   Did you mean one of:
///     - CreditCardSettlement
///     - WalletSettlement
/// ```
///
/// Returns an empty string when there are no items.
pub fn render_bullets<S: AsRef<str>>(title: &str, items: &[S]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut out = format!("\n  {title}:");
    for item in items {
        out.push_str("\n    - ");
        out.push_str(item.as_ref());
    }
    out
}

/// Returns the last path segment of a type name.
///
/// ```
/// use tadbir_support::rendering::short_type_name;
///
/// assert_eq!(short_type_name("tadbir::wiring::PaymentsProvider"), "PaymentsProvider");
/// assert_eq!(short_type_name("Plain"), "Plain");
/// ```
pub fn short_type_name(full_name: &str) -> &str {
    // Generic arguments carry their own paths; cut them off first.
    let base = full_name.split('<').next().unwrap_or(full_name);
    base.rsplit("::").next().unwrap_or(base)
}

/// Suggests registered names close to `requested`.
///
/// Matching is case-insensitive. A candidate qualifies when one name
/// contains the other, or when the edit distance is small relative
/// to the name length. Best matches come first.
pub fn suggest_similar(
    requested: &str,
    available: &[&str],
    max_suggestions: usize,
) -> Vec<String> {
    let requested_lower = requested.to_lowercase();
    if requested_lower.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter_map(|&name| {
            let name_lower = name.to_lowercase();
            if name_lower == requested_lower {
                return None;
            }

            if name_lower.contains(&requested_lower) || requested_lower.contains(&name_lower) {
                return Some((name, 0));
            }

            let distance = edit_distance(&requested_lower, &name_lower);
            let longest = requested_lower.chars().count().max(name_lower.chars().count());
            // At most a third of the characters may differ
            (distance * 3 <= longest).then_some((name, distance))
        })
        .collect();

    scored.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}
