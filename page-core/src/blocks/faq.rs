//! FAQ accordion.

use std::collections::BTreeSet;

use serde_json::json;

use super::{header, section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::textarea("subtitle", "Subtitle"),
    FieldSchema::new("allowMultiple", "Allow Multiple Open", FieldType::Boolean),
    FieldSchema::new("faqs", "Questions", FieldType::Array),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "faq",
        label: "FAQ",
        icon: "help-circle",
        category: Category::Content,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "Frequently Asked Questions",
        "subtitle": "",
        "allowMultiple": false,
        "faqs": [
            {"question": "Can I cancel anytime?", "answer": "Yes. There are no long-term contracts."},
            {"question": "Do you offer a free trial?", "answer": "Every plan starts with a 14-day trial."},
            {"question": "Can I use my own domain?", "answer": "Custom domains are available on paid plans."}
        ]
    }))
}

/// Open/closed state of the accordion panels.
///
/// Starts with every panel closed. In single mode opening a panel closes
/// the others.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccordionState {
    open: BTreeSet<usize>,
    allow_multiple: bool,
    len: usize,
}

impl AccordionState {
    /// An all-closed accordion over `len` panels.
    #[must_use]
    pub fn new(len: usize, allow_multiple: bool) -> Self {
        Self {
            open: BTreeSet::new(),
            allow_multiple,
            len,
        }
    }

    /// Initial state for a FAQ block's props.
    #[must_use]
    pub fn from_props(props: &Props<'_>) -> Self {
        Self::new(
            props.items("faqs").count(),
            props.flag("allowMultiple", false),
        )
    }

    /// Toggle panel `index`. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        if self.open.remove(&index) {
            return;
        }
        if !self.allow_multiple {
            self.open.clear();
        }
        self.open.insert(index);
    }

    /// Whether panel `index` is open.
    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open.contains(&index)
    }

    /// Indices of open panels in ascending order.
    pub fn open_panels(&self) -> impl Iterator<Item = usize> + '_ {
        self.open.iter().copied()
    }

    /// Close everything.
    pub fn collapse_all(&mut self) {
        self.open.clear();
    }
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let state = AccordionState::from_props(props);
    let items = props.items("faqs").enumerate().map(|(index, faq)| {
        Node::el("details")
            .class("pf-faq-item")
            .attr_opt("open", state.is_open(index).then_some(""))
            .child(Node::el("summary").child(cx.item_text(
                "span",
                "faqs",
                index,
                "question",
                &faq.text("question", "Question"),
            )))
            .child(cx.item_multiline("p", "faqs", index, "answer", &faq.text("answer", "")))
    });

    section("faq")
        .attr(
            "data-accordion",
            if props.flag("allowMultiple", false) { "multiple" } else { "single" },
        )
        .child(header(cx, props, "Frequently Asked Questions", ""))
        .child(Node::el("div").class("pf-faq-list").children(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode_keeps_one_open() {
        let mut state = AccordionState::new(3, false);
        state.toggle(0);
        state.toggle(2);
        assert!(!state.is_open(0));
        assert!(state.is_open(2));
        state.toggle(2);
        assert_eq!(state.open_panels().count(), 0);
    }

    #[test]
    fn test_multiple_mode() {
        let mut state = AccordionState::new(3, true);
        state.toggle(0);
        state.toggle(1);
        assert_eq!(state.open_panels().collect::<Vec<_>>(), vec![0, 1]);
        state.collapse_all();
        assert!(!state.is_open(0));
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut state = AccordionState::new(2, false);
        state.toggle(5);
        assert_eq!(state, AccordionState::new(2, false));
    }

    #[test]
    fn test_from_props_starts_closed() {
        let props = defaults();
        let state = AccordionState::from_props(&Props::new(&props));
        assert_eq!(state.len, 3);
        assert_eq!(state.open_panels().count(), 0);
    }
}
