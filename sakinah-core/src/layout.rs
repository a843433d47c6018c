//! Serializable timeline geometry, used to replay the controller off the
//! browser (fixtures, the CLI simulator).

use serde::{Deserialize, Serialize};

use crate::timeline::{
    nearest_to_center, progress_offset, ActivationSource, Rect, StepFlags, TimelineState,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLayout {
    pub id: String,
    pub rect: Rect,
    /// Inner marker box, when the step has one.
    #[serde(default)]
    pub marker: Option<Rect>,
    /// Step carries the active class in the markup.
    #[serde(default)]
    pub marked_active: bool,
}

impl StepLayout {
    pub fn anchor(&self) -> Rect {
        self.marker.unwrap_or(self.rect)
    }
}

/// Viewport-relative geometry of one timeline at one scroll position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub viewport_height: f64,
    pub track: Rect,
    pub steps: Vec<StepLayout>,
}

/// Rendered result: which step is active and where the indicator sits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFrame {
    pub active: Option<usize>,
    pub flags: Vec<StepFlags>,
    pub progress: f64,
}

impl TimelineLayout {
    pub fn state(&self) -> Option<TimelineState> {
        TimelineState::new(self.steps.iter().map(|step| step.id.clone()))
    }

    /// Same layout after scrolling the document down by `offset` pixels.
    pub fn scrolled(&self, offset: f64) -> Self {
        let shift = |rect: Rect| Rect::new(rect.top - offset, rect.height);
        Self {
            viewport_height: self.viewport_height,
            track: shift(self.track),
            steps: self
                .steps
                .iter()
                .map(|step| StepLayout {
                    rect: shift(step.rect),
                    marker: step.marker.map(shift),
                    ..step.clone()
                })
                .collect(),
        }
    }

    /// Initial activation on page load.
    pub fn load(&self, hash: Option<&str>) -> Option<(TimelineState, TimelineFrame)> {
        let mut state = self.state()?;
        let marked = self.steps.iter().position(|step| step.marked_active);
        state.activate_initial(hash, marked);
        let frame = self.frame(&state);
        Some((state, frame))
    }

    /// Scroll-driven activation of the step nearest the viewport midpoint.
    pub fn scroll(&self, state: &mut TimelineState) -> TimelineFrame {
        let rects: Vec<Rect> = self.steps.iter().map(|step| step.rect).collect();
        if let Some(index) = nearest_to_center(&rects, self.viewport_height) {
            state.set_active(index, ActivationSource::Scroll);
        }
        self.frame(state)
    }

    pub fn frame(&self, state: &TimelineState) -> TimelineFrame {
        let progress = state
            .active()
            .and_then(|index| self.steps.get(index))
            .map(|step| progress_offset(step.anchor(), self.track))
            .unwrap_or(0.0);
        TimelineFrame {
            active: state.active(),
            flags: state.all_flags(),
            progress,
        }
    }
}
