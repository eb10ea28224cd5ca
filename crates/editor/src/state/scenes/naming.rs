//! Default scene names

/// Next free default name of the form `base` + number.
///
/// Looks at existing names made of `base` followed only by digits and
/// returns `base` + (largest suffix + 1), or `base1` when there are none.
pub fn next_default_name<'a>(existing: impl IntoIterator<Item = &'a str>, base: &str) -> String {
    let existing: Vec<&str> = existing.into_iter().collect();

    let max_suffix = existing
        .iter()
        .filter_map(|name| name.strip_prefix(base))
        .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|rest| rest.parse::<u64>().ok())
        .max()
        .unwrap_or(0);

    let mut n = max_suffix.saturating_add(1);
    let mut candidate = format!("{base}{n}");
    while existing.contains(&candidate.as_str()) {
        n = n.saturating_add(1);
        candidate = format!("{base}{n}");
    }
    candidate
}
