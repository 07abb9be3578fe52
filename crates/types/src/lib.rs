//! Shared primitive types for the SurveyJS/FHIR conversion crates.

/// Errors that can occur when validating an identifier.
#[derive(Debug, thiserror::Error)]
pub enum IdentifierError {
    /// The input was empty or contained only whitespace
    #[error("identifier cannot be blank")]
    Blank,
}

/// A non-blank identifier: a SurveyJS page or element `name`, or a FHIR item `linkId`.
///
/// Both schemas require one before an entity may be emitted. Identifiers double as response map
/// keys and are matched verbatim, so surrounding whitespace is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Validates `input`, rejecting empty and whitespace-only strings.
    pub fn new(input: impl Into<String>) -> Result<Self, IdentifierError> {
        let input = input.into();
        if input.trim().is_empty() {
            return Err(IdentifierError::Blank);
        }
        Ok(Self(input))
    }

    /// Validates an optional identifier, returning `None` when it is absent or blank.
    pub fn from_optional(input: Option<&str>) -> Option<Self> {
        input.and_then(|s| Self::new(s).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
