//! Minimal CSS selector support for locating countdown containers

use crate::error::CountdownError;

use super::{Document, NodeId};

/// One compound selector such as `div.simply-countdown#main`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if !doc.tag(node).eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.element_id(node) != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| doc.has_class(node, class))
    }
}

/// Parsed selector list: comma-separated groups of compounds joined by the
/// descendant combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Vec<Compound>>,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(input: &str) -> Result<Self, CountdownError> {
        let mut groups = Vec::new();

        for group in input.split(',') {
            let group = group.trim();
            if group.is_empty() {
                return Err(CountdownError::selector(input, "empty selector"));
            }

            let compounds = group
                .split_whitespace()
                .map(|part| parse_compound(part).map_err(|reason| CountdownError::selector(input, reason)))
                .collect::<Result<Vec<_>, _>>()?;
            groups.push(compounds);
        }

        Ok(Self { groups })
    }

    /// Check whether `node` is matched by any group of this selector
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.groups.iter().any(|group| group_matches(group, doc, node))
    }
}

fn group_matches(group: &[Compound], doc: &Document, node: NodeId) -> bool {
    let Some((last, ancestors)) = group.split_last() else {
        return false;
    };
    if !last.matches(doc, node) {
        return false;
    }

    // Greedy right-to-left walk is exact when every combinator is a descendant one.
    let mut pending = ancestors.iter().rev().peekable();
    let mut current = doc.parent(node);
    while let (Some(compound), Some(ancestor)) = (pending.peek(), current) {
        if compound.matches(doc, ancestor) {
            pending.next();
        }
        current = doc.parent(ancestor);
    }
    pending.peek().is_none()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_name(input: &str) -> (&str, &str) {
    let end = input.find(|c: char| !is_name_char(c)).unwrap_or(input.len());
    input.split_at(end)
}

fn parse_compound(part: &str) -> Result<Compound, String> {
    let mut compound = Compound::default();

    let mut rest = match part.strip_prefix('*') {
        Some(stripped) => stripped,
        None => {
            let (tag, rest) = take_name(part);
            if !tag.is_empty() {
                compound.tag = Some(tag.to_ascii_lowercase());
            }
            rest
        }
    };

    while let Some(marker) = rest.chars().next() {
        if marker != '#' && marker != '.' {
            return Err(format!("unexpected character '{}'", marker));
        }
        let (name, tail) = take_name(&rest[1..]);
        if name.is_empty() {
            return Err(format!("expected a name after '{}'", marker));
        }
        if marker == '#' {
            compound.id = Some(name.to_string());
        } else {
            compound.classes.push(name.to_string());
        }
        rest = tail;
    }

    Ok(compound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let main = doc.create_element("main");
        doc.set_id(main, "app");
        doc.append_child(root, main);

        let first = doc.create_element("div");
        doc.add_class(first, "simply-countdown");
        doc.append_child(main, first);

        let second = doc.create_element("div");
        doc.add_class(second, "simply-countdown");
        doc.add_class(second, "big");
        doc.append_child(root, second);

        (doc, main, first, second)
    }

    #[test]
    fn class_selector_matches_in_document_order() {
        let (doc, _, first, second) = page();
        let found = doc.query_selector_all(".simply-countdown").unwrap();
        assert_eq!(found, vec![first, second]);
    }

    #[test]
    fn compound_and_descendant_selectors() {
        let (doc, main, first, second) = page();
        assert_eq!(doc.query_selector_all("div.big").unwrap(), vec![second]);
        assert_eq!(doc.query_selector_all("#app .simply-countdown").unwrap(), vec![first]);
        assert_eq!(doc.query_selector_all("body main").unwrap(), vec![main]);
        assert_eq!(doc.query_selector_all("#app, .big").unwrap(), vec![main, second]);
    }

    #[test]
    fn unmatched_selector_is_empty() {
        let (doc, ..) = page();
        assert!(doc.query_selector_all(".nothing-here").unwrap().is_empty());
    }

    #[test]
    fn malformed_selectors_are_rejected() {
        for bad in ["", "  ", ".a,", "div.", "#", "a>b", "p:first"] {
            assert!(
                matches!(Selector::parse(bad), Err(CountdownError::InvalidSelector { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
