//! Add-item dialog state, UI-framework-free.

use tally_core::ItemName;

/// State of the "Add Item" modal.
///
/// Holds the single text field bound to the pending item name. Submit,
/// whether by button or Enter key, hands the pending name to the caller,
/// clears the field, and closes the dialog. There is no validation: an
/// empty submit passes the empty name through as-is. Closing without
/// submitting keeps the typed text for the next open, exactly like the
/// modal it models.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddItemDialog {
    open: bool,
    pending_name: String,
}

impl AddItemDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn pending_name(&self) -> &str {
        &self.pending_name
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Bind the text field.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.pending_name = name.into();
    }

    /// Submit the dialog: returns the pending name (possibly empty),
    /// clears the field, and closes.
    pub fn submit(&mut self) -> ItemName {
        let name = ItemName::new(std::mem::take(&mut self.pending_name));
        self.open = false;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_returns_name_clears_field_and_closes() {
        let mut dialog = AddItemDialog::new();
        dialog.open();
        dialog.set_name("apple");

        let name = dialog.submit();

        assert_eq!(name, ItemName::new("apple"));
        assert_eq!(dialog.pending_name(), "");
        assert!(!dialog.is_open());
    }

    #[test]
    fn empty_submit_passes_the_empty_name_through() {
        let mut dialog = AddItemDialog::new();
        dialog.open();

        let name = dialog.submit();

        assert_eq!(name, ItemName::new(""));
        assert!(name.is_empty());
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        let mut dialog = AddItemDialog::new();
        dialog.open();
        dialog.set_name("  apple ");

        assert_eq!(dialog.submit(), ItemName::new("  apple "));
    }

    #[test]
    fn closing_without_submit_keeps_the_typed_text() {
        let mut dialog = AddItemDialog::new();
        dialog.open();
        dialog.set_name("pea");
        dialog.close();

        assert_eq!(dialog.pending_name(), "pea");

        dialog.open();
        assert_eq!(dialog.pending_name(), "pea");
    }
}
