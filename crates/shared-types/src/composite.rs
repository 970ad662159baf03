//! # Composite Keys
//!
//! Scoped keys of the form `\0 <object-type> \0 <attr> \0 <attr> \0 ...`.
//!
//! The leading NUL keeps composite keys out of the range of plain keys, so a
//! record stored under a bare id can never collide with a scoped record for
//! the same id.

use crate::errors::LedgerError;

/// Separator and namespace marker.
pub const COMPOSITE_KEY_NAMESPACE: char = '\u{0}';

const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

fn validate_part(part: &str) -> Result<(), LedgerError> {
    if part.contains(COMPOSITE_KEY_NAMESPACE) || part.contains(MAX_UNICODE_RUNE) {
        return Err(LedgerError::InvalidKey(format!(
            "key part {part:?} contains a reserved code point"
        )));
    }
    Ok(())
}

/// Build a composite key from an object type and its attributes.
pub fn create_composite_key(object_type: &str, attributes: &[&str]) -> Result<String, LedgerError> {
    if object_type.is_empty() {
        return Err(LedgerError::InvalidKey("object type is empty".to_string()));
    }
    validate_part(object_type)?;

    let mut key = String::with_capacity(
        2 + object_type.len() + attributes.iter().map(|a| a.len() + 1).sum::<usize>(),
    );
    key.push(COMPOSITE_KEY_NAMESPACE);
    key.push_str(object_type);
    key.push(COMPOSITE_KEY_NAMESPACE);
    for attribute in attributes {
        validate_part(attribute)?;
        key.push_str(attribute);
        key.push(COMPOSITE_KEY_NAMESPACE);
    }
    Ok(key)
}

/// Split a composite key back into its object type and attributes.
pub fn split_composite_key(key: &str) -> Result<(String, Vec<String>), LedgerError> {
    let body = key
        .strip_prefix(COMPOSITE_KEY_NAMESPACE)
        .ok_or_else(|| LedgerError::InvalidKey(format!("{key:?} is not a composite key")))?;

    let mut parts = body.split(COMPOSITE_KEY_NAMESPACE);
    let object_type = parts
        .next()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| LedgerError::InvalidKey(format!("{key:?} has no object type")))?
        .to_string();

    // The trailing separator yields one empty element at the end.
    let mut attributes: Vec<String> = parts.map(str::to_string).collect();
    if attributes.pop().as_deref() != Some("") {
        return Err(LedgerError::InvalidKey(format!("{key:?} is not terminated")));
    }
    Ok((object_type, attributes))
}
