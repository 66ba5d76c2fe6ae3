//! Theme name and identifier disambiguation.
//!
//! Names and identifiers are made unique in two separate passes: first the
//! display name gets a `-N` suffix until it is free, then the slug of that
//! name gets its own `-N` suffix until it is free among identifiers.

/// Pick a free display name for a new theme.
///
/// `existing` holds the names of the user themes (compared exactly).
/// `base_builtin` is the name of the built-in theme being saved as a
/// modified copy, compared case-insensitively.
pub fn unique_theme_name<'a, I>(desired: &str, existing: I, base_builtin: Option<&str>) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let desired = desired.trim();
    let existing: Vec<&str> = existing.into_iter().collect();

    let taken = |candidate: &str| {
        existing.iter().any(|name| *name == candidate)
            || base_builtin.is_some_and(|base| base.eq_ignore_ascii_case(candidate))
    };

    first_free(desired, taken)
}

/// Lowercase the name and turn whitespace runs into single hyphens
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Pick a free identifier for a theme name
pub fn unique_theme_id<'a, I>(name: &str, existing_ids: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let slug = slugify(name);
    let existing: Vec<&str> = existing_ids.into_iter().collect();
    first_free(&slug, |candidate| existing.contains(&candidate))
}

fn first_free(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }

    (1u32..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}
