//! Render requests and the label rules shared by every entry point.

use super::error::DomainError;

/// SMILES rendered when the page is opened without a `smiles` query parameter.
pub const DEFAULT_SMILES: &str = "c1ccccc1";
/// Display name paired with [`DEFAULT_SMILES`].
pub const DEFAULT_NAME: &str = "Benzene";

/// Maximum number of characters of a SMILES string used as a fallback label.
pub const LABEL_SMILES_CHARS: usize = 30;

/// A request to render one molecule, regardless of where it came from
/// (text entry, preset, name lookup or page URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub smiles: String,
    pub display_name: Option<String>,
}

impl RenderRequest {
    pub fn new(smiles: impl Into<String>) -> Self {
        Self {
            smiles: smiles.into(),
            display_name: None,
        }
    }

    /// Attach a display name; blank names are treated as absent.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = normalize_name(name.into());
        self
    }

    /// Validate the request and return the trimmed SMILES and normalized name.
    pub fn validated(&self) -> Result<ValidRequest, DomainError> {
        let smiles = self.smiles.trim();
        if smiles.is_empty() {
            return Err(DomainError::EmptyInput);
        }

        Ok(ValidRequest {
            smiles: smiles.to_string(),
            display_name: self.display_name.clone().and_then(normalize_name),
        })
    }
}

/// A request that passed input validation; `smiles` is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    pub smiles: String,
    pub display_name: Option<String>,
}

impl ValidRequest {
    pub fn label(&self) -> String {
        label_for(&self.smiles, self.display_name.as_deref())
    }
}

/// The label shown above the drawing: the display name when present,
/// otherwise the leading characters of the SMILES.
pub fn label_for(smiles: &str, display_name: Option<&str>) -> String {
    match display_name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => truncate_chars(smiles, LABEL_SMILES_CHARS),
    }
}

/// Truncate on a character boundary.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

fn normalize_name(name: String) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_smiles_is_rejected() {
        let err = RenderRequest::new("  \t ").validated().expect_err("empty");
        assert_eq!(err, DomainError::EmptyInput);
        assert_eq!(err.to_string(), "empty input");
    }

    #[test]
    fn validation_trims_smiles_and_drops_blank_names() {
        let request = RenderRequest {
            smiles: "  CCO \n".to_string(),
            display_name: Some("   ".to_string()),
        };
        let valid = request.validated().expect("valid");
        assert_eq!(valid.smiles, "CCO");
        assert_eq!(valid.display_name, None);
    }

    #[test]
    fn label_prefers_display_name() {
        let valid = RenderRequest::new("c1ccccc1")
            .with_name("Benzene")
            .validated()
            .expect("valid");
        assert_eq!(valid.label(), "Benzene");
    }

    #[test]
    fn label_falls_back_to_leading_smiles_characters() {
        let long = "CC(C)Cc1ccc(cc1)C(C)C(=O)OCCOCCOCCOCC";
        let label = label_for(long, None);
        assert_eq!(label.chars().count(), LABEL_SMILES_CHARS);
        assert!(long.starts_with(&label));
        assert_eq!(label_for("c1ccccc1", None), "c1ccccc1");
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        assert_eq!(truncate_chars("αβγδ", 2), "αβ");
    }
}
