//! Text input over form fields.
//!
//! The editor keeps a draft of the focused field so numeric inputs can be
//! cleared and retyped; every keystroke is written through
//! [`FieldSet::set_text`], and text that does not parse is reported as an
//! input error while the form keeps its last good value.

use cardholder_core::forms::{FieldSet, FieldSpec};
use cardholder_core::validation::FieldViolation;

/// Which form a focusable field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Contact fields of the creation form
    NewCustomer,
    /// Card sub-entry `i` of the creation form
    NewCustomerCard(usize),
    /// Edit-customer modal
    EditCustomer,
    /// Add-card modal
    AddCard,
    /// Edit-card modal
    EditCard,
}

/// One focusable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub section: Section,
    pub field: FieldSpec,
}

/// Slots for every field of `form`, in display order
pub fn slots_of(section: Section, form: &dyn FieldSet) -> impl Iterator<Item = Slot> + '_ {
    form.fields()
        .iter()
        .map(move |&field| Slot { section, field })
}

/// Focus and draft state for the active form
#[derive(Debug, Clone, Default)]
pub struct FieldEditor {
    focus: usize,
    draft: String,
    input_error: Option<FieldViolation>,
}

impl FieldEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the focused slot
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Text being edited in the focused slot
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Parse failure of the current draft, if any
    pub fn input_error(&self) -> Option<&FieldViolation> {
        self.input_error.as_ref()
    }

    /// Move focus to `index`, starting the draft from the field's value
    pub fn set_focus(&mut self, index: usize, form: &dyn FieldSet, field: &str) {
        self.focus = index;
        self.draft = form.text(field);
        self.input_error = None;
    }

    /// Slot index after the focused one, wrapping
    pub fn next_index(&self, count: usize) -> usize {
        if count == 0 {
            0
        } else {
            (self.focus + 1) % count
        }
    }

    /// Slot index before the focused one, wrapping
    pub fn prev_index(&self, count: usize) -> usize {
        match count {
            0 => 0,
            _ if self.focus == 0 || self.focus >= count => count - 1,
            _ => self.focus - 1,
        }
    }

    pub fn insert(&mut self, form: &mut dyn FieldSet, field: &str, c: char) {
        self.draft.push(c);
        self.commit(form, field);
    }

    pub fn backspace(&mut self, form: &mut dyn FieldSet, field: &str) {
        self.draft.pop();
        self.commit(form, field);
    }

    /// Reset focus to the first slot with an empty draft
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn commit(&mut self, form: &mut dyn FieldSet, field: &str) {
        self.input_error = form.set_text(field, &self.draft).err();
    }
}
