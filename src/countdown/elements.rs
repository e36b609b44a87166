//! Builds the nodes a countdown renders into

use crate::dom::{NodeId, RenderTarget};

use super::CountdownParams;

/// Amount and word nodes of one unit section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitNodes {
    pub section: NodeId,
    pub amount: NodeId,
    pub word: NodeId,
}

/// Nodes owned by one countdown instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownElements {
    Sections {
        days: UnitNodes,
        hours: UnitNodes,
        minutes: UnitNodes,
        seconds: UnitNodes,
    },
    Inline(NodeId),
}

impl CountdownElements {
    /// Create the display nodes under `container`. Called once per instance;
    /// ticks only update text afterwards.
    pub fn build<R: RenderTarget + ?Sized>(params: &CountdownParams, container: NodeId, target: &mut R) -> Self {
        if params.inline {
            let span = target.create_node("span");
            target.add_class(span, &params.inline_class);
            target.append_child(container, span);
            return Self::Inline(span);
        }

        Self::Sections {
            days: build_section(params, container, "simply-days-section", target),
            hours: build_section(params, container, "simply-hours-section", target),
            minutes: build_section(params, container, "simply-minutes-section", target),
            seconds: build_section(params, container, "simply-seconds-section", target),
        }
    }
}

fn build_section<R: RenderTarget + ?Sized>(
    params: &CountdownParams,
    container: NodeId,
    unit_class: &str,
    target: &mut R,
) -> UnitNodes {
    let section = target.create_node("div");
    let inner = target.create_node("div");
    let amount = target.create_node("span");
    let word = target.create_node("span");

    target.append_child(inner, amount);
    target.append_child(inner, word);
    target.append_child(section, inner);

    target.add_class(section, &params.section_class);
    target.add_class(section, unit_class);
    target.add_class(amount, &params.amount_class);
    target.add_class(word, &params.word_class);

    target.append_child(container, section);

    UnitNodes {
        section,
        amount,
        word,
    }
}
