//! Assignee avatars
//!
//! An avatar is either an explicit image reference from the project data or a
//! pair of initials on a palette color picked from the assignee's name.

use serde::Serialize;

const PALETTE: [&str; 7] = [
    "#667eea", "#f093fb", "#4facfe", "#43e97b", "#fa709a", "#fee140", "#30cfd0",
];

/// What to display for an assignee
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Avatar {
    Image { src: String, alt: String },
    Initials { text: String, color: String },
}

impl Avatar {
    /// Build the avatar for `name`, preferring a non-blank image reference
    pub fn new(name: &str, image: Option<&str>) -> Self {
        match image.map(str::trim).filter(|src| !src.is_empty()) {
            Some(src) => Avatar::Image {
                src: src.to_string(),
                alt: name.to_string(),
            },
            None => Avatar::Initials {
                text: initials(name),
                color: palette_color(name).to_string(),
            },
        }
    }
}

/// First letter of the first two words, or the first two characters of a single word
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split(' ').collect();
    let raw: String = if words.len() >= 2 {
        words
            .iter()
            .take(2)
            .filter_map(|w| w.chars().next())
            .collect()
    } else {
        name.chars().take(2).collect()
    };
    raw.to_uppercase()
}

/// Palette color keyed on the first character of the name
pub fn palette_color(name: &str) -> &'static str {
    let code = name.chars().next().map_or(0, |c| c as usize);
    PALETTE[code % PALETTE.len()]
}
