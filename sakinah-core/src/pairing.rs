//! Row and side assignment for illustrations laid out beside timeline steps.

use serde::{Deserialize, Serialize};

/// Classification of a child of the timeline list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingKind {
    Step,
    /// Non-step element containing a visual marker.
    Visual,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Start,
    End,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Start => Side::End,
            Side::End => Side::Start,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Start => "start",
            Side::End => "end",
        }
    }

    /// Accepts logical and physical names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "start" | "left" => Some(Side::Start),
            "end" | "right" => Some(Side::End),
            _ => None,
        }
    }

    /// Default side when a step does not declare one.
    pub fn alternating(ordinal: usize) -> Self {
        if ordinal % 2 == 0 {
            Side::Start
        } else {
            Side::End
        }
    }
}

/// Layout decision for one step and its paired illustration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualPlacement {
    /// Ordinal of the step among steps.
    pub step: usize,
    /// Position of the step among all siblings.
    pub step_sibling: usize,
    /// Position of the claimed illustration among all siblings.
    pub visual_sibling: Option<usize>,
    /// 1-based grid row shared by the step and its illustration.
    pub row: usize,
    pub step_side: Side,
    pub visual_side: Side,
}

/// Pairs every step with the first following unclaimed visual sibling.
/// `declared_sides[n]` is the side the n-th step asks for, if any.
pub fn pair_visuals(siblings: &[SiblingKind], declared_sides: &[Option<Side>]) -> Vec<VisualPlacement> {
    let mut claimed = vec![false; siblings.len()];
    let mut placements = Vec::new();

    for (position, kind) in siblings.iter().enumerate() {
        if *kind != SiblingKind::Step {
            continue;
        }
        let ordinal = placements.len();

        let visual_sibling = (position + 1..siblings.len())
            .find(|candidate| siblings[*candidate] == SiblingKind::Visual && !claimed[*candidate]);
        if let Some(visual) = visual_sibling {
            claimed[visual] = true;
        }

        let step_side = declared_sides
            .get(ordinal)
            .copied()
            .flatten()
            .unwrap_or_else(|| Side::alternating(ordinal));

        placements.push(VisualPlacement {
            step: ordinal,
            step_sibling: position,
            visual_sibling,
            row: ordinal + 1,
            step_side,
            visual_side: step_side.opposite(),
        });
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::SiblingKind::{Other, Step, Visual};
    use super::*;

    #[test]
    fn steps_claim_following_visuals_with_opposite_side() {
        let siblings = [Step, Visual, Step, Other, Visual, Step];
        let placements = pair_visuals(&siblings, &[]);

        assert_eq!(placements.len(), 3);
        assert_eq!(placements[0].visual_sibling, Some(1));
        assert_eq!(placements[1].visual_sibling, Some(4));
        assert_eq!(placements[2].visual_sibling, None);
        assert_eq!(placements[1].row, 2);
        assert_eq!(placements[0].step_side, Side::Start);
        assert_eq!(placements[0].visual_side, Side::End);
        assert_eq!(placements[1].step_side, Side::End);
        assert_eq!(placements[1].visual_side, Side::Start);
    }

    #[test]
    fn claimed_visuals_are_skipped() {
        let siblings = [Step, Step, Visual, Visual];
        let placements = pair_visuals(&siblings, &[]);
        assert_eq!(placements[0].visual_sibling, Some(2));
        assert_eq!(placements[1].visual_sibling, Some(3));
    }

    #[test]
    fn declared_side_wins_over_alternation() {
        let siblings = [Step, Visual];
        let placements = pair_visuals(&siblings, &[Some(Side::End)]);
        assert_eq!(placements[0].step_side, Side::End);
        assert_eq!(placements[0].visual_side, Side::Start);
        assert_eq!(Side::parse("left"), Some(Side::Start));
        assert_eq!(Side::parse("middle"), None);
    }

    #[test]
    fn declared_sides_are_read_in_sibling_step_order() {
        // Two steps in this list, declared sides given for exactly those.
        let siblings = [Other, Step, Visual, Step, Visual];
        let placements = pair_visuals(&siblings, &[None, Some(Side::Start)]);
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].step_sibling, 1);
        assert_eq!(placements[0].step_side, Side::Start);
        assert_eq!(placements[1].step_sibling, 3);
        assert_eq!(placements[1].step_side, Side::Start);
        assert_eq!(placements[1].visual_side, Side::End);
    }
}
