//! In-memory host document.
//!
//! [`PageDocument`] holds a flat list of elements, at most one of which has
//! focus.  It exists so the receiver and the integration tests can exercise
//! the locate → mutate path against something concrete; nothing outside
//! those call sites depends on it.

use crate::field::BufferField;
use crate::rich::RunRegion;
use crate::target::{Editable, HostDocument, InputTarget};

/// One focusable element on the page.
#[derive(Debug)]
pub enum PageElement {
    /// Plain value+selection field.
    Field(BufferField),
    /// Run-structured rich-text region.
    Rich(RunRegion),
    /// Focusable but not editable (a button, a link).
    Inert,
}

impl Editable for PageElement {
    fn probe_target(&mut self) -> Option<InputTarget<'_>> {
        match self {
            Self::Field(field) => Some(InputTarget::PlainField(field)),
            Self::Rich(region) => Some(InputTarget::RichText(region)),
            Self::Inert => None,
        }
    }
}

/// A document with focus tracking.
#[derive(Debug, Default)]
pub struct PageDocument {
    elements: Vec<PageElement>,
    focused: Option<usize>,
}

impl PageDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element and returns its index.
    pub fn add(&mut self, element: PageElement) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// Moves focus to the element at `index`.  Out-of-range indices clear
    /// focus instead.
    pub fn focus(&mut self, index: usize) {
        self.focused = (index < self.elements.len()).then_some(index);
    }

    /// Clears focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// The focused element's index, if any.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Direct access for assertions.
    pub fn element(&self, index: usize) -> Option<&PageElement> {
        self.elements.get(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut PageElement> {
        self.elements.get_mut(index)
    }

    /// The element at `index` as a plain field, if it is one.
    pub fn field(&self, index: usize) -> Option<&BufferField> {
        match self.elements.get(index) {
            Some(PageElement::Field(field)) => Some(field),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut BufferField> {
        match self.elements.get_mut(index) {
            Some(PageElement::Field(field)) => Some(field),
            _ => None,
        }
    }

    /// The element at `index` as a rich region, if it is one.
    pub fn rich(&self, index: usize) -> Option<&RunRegion> {
        match self.elements.get(index) {
            Some(PageElement::Rich(region)) => Some(region),
            _ => None,
        }
    }

    pub fn rich_mut(&mut self, index: usize) -> Option<&mut RunRegion> {
        match self.elements.get_mut(index) {
            Some(PageElement::Rich(region)) => Some(region),
            _ => None,
        }
    }
}

impl HostDocument for PageDocument {
    fn active_element(&mut self) -> Option<&mut dyn Editable> {
        let index = self.focused?;
        self.elements
            .get_mut(index)
            .map(|element| element as &mut dyn Editable)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
