use deunicode::deunicode;

/// Turn a title into a URL-safe, hyphenated slug.
///
/// - non-ASCII letters are transliterated first (`é` -> `e`)
/// - ASCII letters and digits are kept, lowercased
/// - `_` is kept
/// - every other run becomes a single `-`
/// - leading/trailing separators are trimmed
pub fn slugify(input: &str) -> String {
    let ascii = deunicode(input);
    let mut slug = String::with_capacity(ascii.len());
    let mut last_was_dash = false;

    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if !slug.is_empty() && !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Output filename for a copied asset: spaces become underscores.
pub fn asset_output_name(filename: &str) -> String {
    filename.replace(' ', "_")
}
