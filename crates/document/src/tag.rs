//! Element-name and text validation against the XML 1.0 productions.

use feedforge_core::{FeedError, FeedResult};

/// XML 1.0 `NameStartChar`, without `:` (namespace prefixes are not supported).
fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}'
    )
}

/// XML 1.0 `NameChar`, without `:`.
fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}

/// XML 1.0 `Char`.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Check that `tag` can be written as an XML element name.
pub fn validate_tag(tag: &str) -> FeedResult<()> {
    let mut chars = tag.chars();
    let Some(first) = chars.next() else {
        return Err(FeedError::serialization("empty tag name"));
    };
    if !is_name_start_char(first) {
        return Err(FeedError::serialization(format!(
            "tag `{tag}` cannot start with {first:?}"
        )));
    }
    if let Some(bad) = chars.find(|c| !is_name_char(*c)) {
        return Err(FeedError::serialization(format!(
            "tag `{tag}` contains invalid character {bad:?}"
        )));
    }
    Ok(())
}

/// Check that `text` contains only characters an XML 1.0 document can carry.
///
/// Markup characters are fine (the writer escapes them); control characters
/// other than tab, newline and carriage return are not.
pub fn validate_text(tag: &str, text: &str) -> FeedResult<()> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        Some(bad) => Err(FeedError::serialization(format!(
            "value of `{tag}` contains unrepresentable character {bad:?}"
        ))),
        None => Ok(()),
    }
}
