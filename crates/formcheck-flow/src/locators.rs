//! The DOM contract of the demo site's text-box page.

use formcheck_browser::Locator;
use formcheck_core::FormField;

/// Every element the check touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocators {
    /// Card on the start page leading to the section
    pub section_card: Locator,
    /// Side-menu entry opening the form; the bounded wait targets this
    pub section_item: Locator,
    /// Submit control
    pub submit: Locator,
    /// Container the submitted values are echoed into
    pub results: Locator,
    inputs: [Locator; 4],
    outputs: [Locator; 4],
}

impl Default for PageLocators {
    fn default() -> Self {
        Self {
            section_card: Locator::text("h5", "Elements"),
            section_item: Locator::id("item-0"),
            submit: Locator::id("submit"),
            results: Locator::id("output"),
            inputs: [
                Locator::id("userName"),
                Locator::id("userEmail"),
                Locator::id("currentAddress"),
                Locator::id("permanentAddress"),
            ],
            // Resolved inside `results`; the address ids repeat on the inputs
            outputs: [
                Locator::id("name"),
                Locator::id("email"),
                Locator::id("currentAddress"),
                Locator::id("permanentAddress"),
            ],
        }
    }
}

impl PageLocators {
    /// Input the field's value is typed into.
    #[must_use]
    pub fn input(&self, field: FormField) -> &Locator {
        &self.inputs[index(field)]
    }

    /// Element echoing the field, relative to [`PageLocators::results`].
    #[must_use]
    pub fn output(&self, field: FormField) -> &Locator {
        &self.outputs[index(field)]
    }

    /// Replace the input locator for a field.
    #[must_use]
    pub fn with_input(mut self, field: FormField, locator: Locator) -> Self {
        self.inputs[index(field)] = locator;
        self
    }

    /// Replace the echo locator for a field.
    #[must_use]
    pub fn with_output(mut self, field: FormField, locator: Locator) -> Self {
        self.outputs[index(field)] = locator;
        self
    }
}

fn index(field: FormField) -> usize {
    match field {
        FormField::Name => 0,
        FormField::Email => 1,
        FormField::CurrentAddress => 2,
        FormField::PermanentAddress => 3,
    }
}
