//! Stable anchor generation for in-document links.
//!
//! Every rendered type and member gets a fragment identifier derived from
//! its ID string, so TOC entries and cross-reference links agree byte for
//! byte with their targets: lowercase, with every character that is not
//! alphanumeric or a hyphen stripped. Punctuation (`.`, `:`, `()`, `` ` ``,
//! `#`) disappears while argument type names survive, which keeps method
//! overloads distinct.

/// Anchor slug for an ID string.
pub fn anchor(id: &str) -> String {
    let mut slug = String::with_capacity(id.len());
    for c in id.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '-' {
            slug.push(c);
        }
    }
    slug
}

/// An `<a href="#...">` fragment reference for an ID string.
pub fn href(id: &str) -> String {
    format!("#{}", anchor(id))
}
