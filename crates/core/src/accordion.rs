//! Expand/collapse state for a set of FAQ panels.
//!
//! At most one panel is expanded at a time.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccordionError {
    #[error("panel {index} does not exist (accordion has {len} panels)")]
    OutOfRange { index: usize, len: usize },
}

/// What a toggle changed, for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccordionChange {
    pub collapsed: Option<usize>,
    pub expanded: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    expanded: Option<usize>,
}

impl Accordion {
    /// An accordion of `len` panels, all collapsed.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            len,
            expanded: None,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    #[must_use]
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded == Some(index)
    }

    /// Activate the toggle of panel `index`.
    ///
    /// Collapses the panel if it is expanded; otherwise collapses whichever
    /// panel is expanded and expands this one.
    ///
    /// # Errors
    ///
    /// Returns `AccordionError::OutOfRange` if there is no such panel.
    pub fn toggle(&mut self, index: usize) -> Result<AccordionChange, AccordionError> {
        if index >= self.len {
            return Err(AccordionError::OutOfRange {
                index,
                len: self.len,
            });
        }

        let change = if self.expanded == Some(index) {
            self.expanded = None;
            AccordionChange {
                collapsed: Some(index),
                expanded: None,
            }
        } else {
            AccordionChange {
                collapsed: self.expanded.replace(index),
                expanded: Some(index),
            }
        };
        Ok(change)
    }
}
