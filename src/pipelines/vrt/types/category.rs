//! Category normalization.

/// Turn a category into a slug that only contains `[A-Za-z0-9_]`.
///
/// Umlauts and ß are transliterated, `&` becomes `und`,
/// `/` and `-` become `_`, whitespace runs become a single `_`,
/// and whatever remains outside of the allowed set is dropped.
pub fn slugify(category: &str) -> String {
    let mut expanded = String::with_capacity(category.len());
    for c in category.chars() {
        match c {
            'ä' => expanded.push_str("ae"),
            'ö' => expanded.push_str("oe"),
            'ü' => expanded.push_str("ue"),
            'Ä' => expanded.push_str("Ae"),
            'Ö' => expanded.push_str("Oe"),
            'Ü' => expanded.push_str("Ue"),
            'ß' => expanded.push_str("ss"),
            '&' => expanded.push_str("und"),
            '/' | '-' => expanded.push('_'),
            c => expanded.push(c),
        }
    }

    let mut slug = String::with_capacity(expanded.len());
    let mut in_whitespace = false;
    for c in expanded.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        }
    }
    slug
}
