//! FAQ accordion rendering.

use serde::Deserialize;

use menu_cart_core::{Accordion, AccordionChange};

use super::patch::{DomPatch, by_attr};
use crate::content::FaqEntry;

const EXPANDED_CLASS: &str = "show-text";

/// Delegated events from the FAQ section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FaqEvent {
    Toggle { index: usize },
}

/// FAQ entry display data for templates.
#[derive(Debug, Clone)]
pub struct FaqView {
    pub index: usize,
    pub question: String,
    pub answer_html: String,
    pub expanded: bool,
}

#[must_use]
pub fn faq_views(entries: &[FaqEntry], accordion: &Accordion) -> Vec<FaqView> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| FaqView {
            index,
            question: entry.question.clone(),
            answer_html: entry.answer_html.clone(),
            expanded: accordion.is_expanded(index),
        })
        .collect()
}

/// Patches for one toggle: the collapse first, then the expand.
#[must_use]
pub fn toggle_patches(change: AccordionChange) -> Vec<DomPatch> {
    let patch = |index: usize, enabled: bool| DomPatch::SetClass {
        target: by_attr(".question", "data-index", &index.to_string()),
        class: EXPANDED_CLASS.to_string(),
        enabled,
    };
    change
        .collapsed
        .map(|index| patch(index, false))
        .into_iter()
        .chain(change.expanded.map(|index| patch(index, true)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_patches_collapse_before_expand() {
        let patches = toggle_patches(AccordionChange {
            collapsed: Some(0),
            expanded: Some(2),
        });
        assert_eq!(
            patches,
            vec![
                DomPatch::SetClass {
                    target: r#".question[data-index="0"]"#.to_string(),
                    class: "show-text".to_string(),
                    enabled: false,
                },
                DomPatch::SetClass {
                    target: r#".question[data-index="2"]"#.to_string(),
                    class: "show-text".to_string(),
                    enabled: true,
                },
            ]
        );
    }

    #[test]
    fn test_faq_views_mark_expanded() {
        let entries = vec![
            FaqEntry {
                question: "a".to_string(),
                answer_html: "<p>1</p>".to_string(),
            },
            FaqEntry {
                question: "b".to_string(),
                answer_html: "<p>2</p>".to_string(),
            },
        ];
        let mut accordion = Accordion::new(2);
        accordion.toggle(1).unwrap();
        let views = faq_views(&entries, &accordion);
        assert!(!views[0].expanded);
        assert!(views[1].expanded);
    }
}
