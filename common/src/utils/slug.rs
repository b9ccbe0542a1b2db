/// Converts a display name into a URL-safe slug.
///
/// Every run of non-alphanumeric characters collapses into a single `-`,
/// and leading/trailing dashes are trimmed. Case is preserved.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}
