//! Custom element registry.
//!
//! Records which semantic tags have been defined as custom elements, applying
//! the platform's naming rules: a valid name starts with a lowercase ASCII
//! letter, contains a hyphen, has no uppercase ASCII letters and is not one of
//! the reserved SVG/MathML names.
//!
//! None of the semantic document tags contain a hyphen, so defining them
//! always fails. The enhancer logs that failure and carries on; the element
//! passes do not depend on registration.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::enhance::SemanticTag;

/// Names the platform reserves even though they contain a hyphen.
const RESERVED_NAMES: [&str; 8] = [
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("`{name}` is not a valid custom element name: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("`{0}` has already been defined")]
    AlreadyDefined(String),
}

/// Check a name against the custom element naming rules.
pub fn validate_name(name: &str) -> Result<(), RegistryError> {
    let invalid = |reason| RegistryError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(invalid("must start with a lowercase ASCII letter"));
    }
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        return Err(invalid("must not contain uppercase ASCII letters"));
    }
    if !name.contains('-') {
        return Err(invalid("must contain a hyphen"));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(invalid("name is reserved"));
    }
    Ok(())
}

/// Defined custom elements, keyed by name.
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    defined: FxHashMap<String, SemanticTag>,
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a single element.
    pub fn define(&mut self, name: &str, tag: SemanticTag) -> Result<(), RegistryError> {
        validate_name(name)?;
        if self.defined.contains_key(name) {
            return Err(RegistryError::AlreadyDefined(name.to_string()));
        }
        self.defined.insert(name.to_string(), tag);
        Ok(())
    }

    /// Define every tag in order, stopping at the first failure.
    ///
    /// Definitions made before the failure stay in place.
    pub fn define_all(&mut self, tags: &[SemanticTag]) -> Result<(), RegistryError> {
        for &tag in tags {
            self.define(tag.tag(), tag)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<SemanticTag> {
        self.defined.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.defined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defined.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_rules() {
        assert!(validate_name("note-ref").is_ok());
        assert!(validate_name("x-footnote").is_ok());

        assert!(matches!(
            validate_name("noteref"),
            Err(RegistryError::InvalidName { reason: "must contain a hyphen", .. })
        ));
        assert!(validate_name("commentStartRef").is_err());
        assert!(validate_name("Note-ref").is_err());
        assert!(validate_name("1-note").is_err());
        assert!(validate_name("font-face").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn test_semantic_tags_are_rejected() {
        for tag in SemanticTag::ALL {
            assert!(validate_name(tag.tag()).is_err(), "{} accepted", tag.tag());
        }
    }

    #[test]
    fn test_define_rejects_duplicates() {
        let mut registry = CustomElementRegistry::new();
        registry.define("note-ref", SemanticTag::NoteRef).unwrap();
        assert_eq!(
            registry.define("note-ref", SemanticTag::NoteRef),
            Err(RegistryError::AlreadyDefined("note-ref".to_string()))
        );
        assert_eq!(registry.get("note-ref"), Some(SemanticTag::NoteRef));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_define_all_stops_at_first_failure() {
        let mut registry = CustomElementRegistry::new();
        let err = registry.define_all(&SemanticTag::ALL).unwrap_err();
        assert!(err.to_string().contains("commentstartref"));
        assert!(registry.is_empty());
    }
}
