//! Diagnostics and the sink checks write them to.

use super::classifier::{Category, Classifier, Severity};
use serde::Serialize;

/// Placeholder written for an absent identifier or data id.
pub const NULL_ID: &str = "null";

/// One finding.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub classifier: Classifier,
    pub context: String,
    /// Subject the diagnostic is filed under in its category
    pub identifier: Option<String>,
    pub page: Option<String>,
    pub page_id: Option<String>,
    /// Secondary id, usually the frame or rectangle on the page
    pub data_id: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with no context.
    pub fn new(classifier: impl Into<Classifier>) -> Self {
        Self {
            classifier: classifier.into(),
            context: String::new(),
            identifier: None,
            page: None,
            page_id: None,
            data_id: None,
        }
    }

    /// Set the free-text context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Set the subject identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set page name and page id.
    pub fn with_page(mut self, page: Option<&str>, page_id: Option<&str>) -> Self {
        self.page = page.map(str::to_string);
        self.page_id = page_id.map(str::to_string);
        self
    }

    /// Set the secondary data id.
    pub fn with_data_id(mut self, data_id: Option<&str>) -> Self {
        self.data_id = data_id.map(str::to_string);
        self
    }

    pub fn severity(&self) -> Severity {
        self.classifier.severity()
    }

    pub fn category(&self) -> Category {
        self.classifier.category()
    }

    /// Identifier key used in the report, `null` when absent.
    pub fn identifier_key(&self) -> &str {
        self.identifier.as_deref().unwrap_or(NULL_ID)
    }

    /// Serializable report entry.
    pub fn entry(&self) -> DiagnosticEntry {
        DiagnosticEntry {
            validation_classifier: self.classifier.code().to_string(),
            context: self.context.clone(),
            identifier: self.identifier_key().to_string(),
            page: self.page.clone().unwrap_or_default(),
            page_id: self.page_id.clone().unwrap_or_default(),
            data_id: self.data_id.clone().unwrap_or_else(|| NULL_ID.to_string()),
        }
    }
}

/// A diagnostic as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEntry {
    #[serde(rename = "validationClassifier")]
    pub validation_classifier: String,
    pub context: String,
    pub identifier: String,
    pub page: String,
    pub page_id: String,
    pub data_id: String,
}

/// Ordered collection of diagnostics emitted during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        log::trace!(
            "{} [{}] {}",
            diagnostic.classifier,
            diagnostic.identifier_key(),
            diagnostic.context
        );
        self.items.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of diagnostics with a severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|d| d.severity() == severity).count()
    }

    /// Diagnostics of one classifier, in emission order.
    pub fn of(&self, classifier: impl Into<Classifier>) -> impl Iterator<Item = &Diagnostic> {
        let classifier = classifier.into();
        self.items.iter().filter(move |d| d.classifier == classifier)
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.add(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ErrorKind, WarningKind};

    #[test]
    fn test_entry_defaults() {
        let entry = Diagnostic::new(ErrorKind::Masterpage)
            .with_context("Elements: TextFrame")
            .entry();
        assert_eq!(entry.validation_classifier, "MASTERPAGE");
        assert_eq!(entry.identifier, "null");
        assert_eq!(entry.page, "");
        assert_eq!(entry.page_id, "");
        assert_eq!(entry.data_id, "null");
    }

    #[test]
    fn test_entry_serializes_classifier_key() {
        let entry = Diagnostic::new(ErrorKind::Table)
            .with_identifier("u10")
            .with_page(Some("1"), Some("ud1"))
            .with_data_id(Some("u20"))
            .entry();
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"validationClassifier":"TABLE","context":"","identifier":"u10","page":"1","page_id":"ud1","data_id":"u20"}"#
        );
    }

    #[test]
    fn test_sink_counts() {
        let mut sink = Diagnostics::new();
        sink.add(Diagnostic::new(ErrorKind::Table));
        sink.add(Diagnostic::new(WarningKind::Override));
        sink.add(Diagnostic::new(ErrorKind::Table));
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.count(Severity::Error), 2);
        assert_eq!(sink.count(Severity::Info), 0);
        assert_eq!(sink.of(ErrorKind::Table).count(), 2);
    }
}
