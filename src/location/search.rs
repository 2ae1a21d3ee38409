//! Caller-owned search box state: input text, suggestion list, input error.

use super::resolver::LocationResolver;
use super::types::{Coordinate, ValidationError};

/// State behind a location text field.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    resolver: LocationResolver,
    text: String,
    suggestions: Vec<&'static str>,
    show_suggestions: bool,
    input_error: Option<ValidationError>,
}

impl SearchBox {
    pub fn new(resolver: LocationResolver) -> Self {
        Self {
            resolver,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn input_error(&self) -> Option<ValidationError> {
        self.input_error
    }

    /// Keystroke handler. Refreshes suggestions but never resolves.
    pub fn on_input(&mut self, text: &str) {
        self.text = text.to_string();
        if text.is_empty() {
            self.suggestions.clear();
            self.show_suggestions = false;
        } else {
            self.suggestions = self.resolver.suggest(text);
            self.show_suggestions = true;
        }
    }

    pub fn on_focus(&mut self) {
        self.show_suggestions = true;
    }

    /// Suggestions to display right now; empty when hidden.
    pub fn visible_suggestions(&self) -> &[&'static str] {
        if self.show_suggestions {
            &self.suggestions
        } else {
            &[]
        }
    }

    /// Explicit submit. The previous input error is cleared before resolving.
    pub fn submit(&mut self) -> Result<Coordinate, ValidationError> {
        self.input_error = None;
        self.resolver.resolve(&self.text).inspect_err(|e| {
            self.input_error = Some(*e);
        })
    }

    /// Pick a suggested name: fills the field, hides the list and resolves.
    pub fn select(&mut self, name: &str) -> Result<Coordinate, ValidationError> {
        self.text = name.to_string();
        self.suggestions.clear();
        self.show_suggestions = false;
        self.submit()
    }
}
