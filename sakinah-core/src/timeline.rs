//! Scroll-synchronized journey timeline: which step is active, which steps
//! are complete, and where the progress indicator sits on the rail.

use serde::{Deserialize, Serialize};

/// Vertical extent of an element, in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Display flags for a single step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFlags {
    pub active: bool,
    pub complete: bool,
}

/// What asked for a step to become active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationSource {
    Initial,
    Scroll,
    Pointer,
    Keyboard,
    Fragment,
}

impl ActivationSource {
    /// Only explicit user actions write the URL fragment.
    pub fn rewrites_fragment(self) -> bool {
        matches!(self, ActivationSource::Pointer | ActivationSource::Keyboard)
    }
}

/// Outcome of [`TimelineState::set_active`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Index out of range; nothing changed.
    Ignored,
    /// Step was already active; only the indicator needs a refresh.
    Refreshed {
        index: usize,
        fragment: Option<String>,
    },
    /// A different step became active; flags and indicator need a refresh.
    Activated {
        index: usize,
        fragment: Option<String>,
    },
}

impl Transition {
    /// Fragment to write with a history replace, when the source asked for it.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Transition::Ignored => None,
            Transition::Refreshed { fragment, .. } | Transition::Activated { fragment, .. } => {
                fragment.as_deref()
            }
        }
    }

    pub fn flags_changed(&self) -> bool {
        matches!(self, Transition::Activated { .. })
    }

    pub fn needs_progress(&self) -> bool {
        !matches!(self, Transition::Ignored)
    }
}

/// Keys a focused step reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKey {
    Activate,
    Next,
    Previous,
}

impl StepKey {
    /// Maps a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | " " | "Spacebar" => Some(StepKey::Activate),
            "ArrowDown" => Some(StepKey::Next),
            "ArrowUp" => Some(StepKey::Previous),
            _ => None,
        }
    }
}

/// Active-step bookkeeping for an ordered, non-empty list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineState {
    ids: Vec<String>,
    active: Option<usize>,
    /// Set when a fragment chose the load-time step.
    hold_observer_batch: bool,
}

impl TimelineState {
    /// Returns `None` for an empty step list: a page without a timeline is
    /// not an error, there is simply nothing to drive.
    pub fn new<I, S>(ids: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return None;
        }
        Some(Self {
            ids,
            active: None,
            hold_observer_batch: false,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn id(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    pub fn flags(&self, index: usize) -> StepFlags {
        match self.active {
            Some(active) => StepFlags {
                active: index == active,
                complete: index < active,
            },
            None => StepFlags::default(),
        }
    }

    pub fn all_flags(&self) -> Vec<StepFlags> {
        (0..self.len()).map(|index| self.flags(index)).collect()
    }

    pub fn set_active(&mut self, index: usize, source: ActivationSource) -> Transition {
        if index >= self.len() {
            log::debug!("timeline: ignoring out-of-range step {index}");
            return Transition::Ignored;
        }

        let fragment = source
            .rewrites_fragment()
            .then(|| self.ids[index].clone());

        if self.active == Some(index) {
            return Transition::Refreshed { index, fragment };
        }

        self.active = Some(index);
        log::debug!("timeline: step {index} active via {source:?}");
        Transition::Activated {
            index,
            fragment,
        }
    }

    /// Whether the active step is the first one.
    pub fn at_first(&self) -> bool {
        self.active == Some(0)
    }

    /// Whether the active step is the last one.
    pub fn at_last(&self) -> bool {
        self.active == Some(self.len() - 1)
    }

    /// Resolves a `location.hash` value to a step. Accepts the step's own
    /// identifier and the older `journey-N` form (1-based, clamped).
    ///
    /// Browsers report the hash percent-encoded, so the fragment is decoded
    /// first; text that does not decode is matched as is.
    pub fn fragment_target(&self, hash: &str) -> Option<usize> {
        let raw = hash.trim_start_matches('#');
        if raw.is_empty() {
            return None;
        }
        let decoded = urlencoding::decode(raw).ok();
        let fragment = decoded.as_deref().unwrap_or(raw);
        if let Some(index) = self.index_of(fragment).or_else(|| self.index_of(raw)) {
            return Some(index);
        }

        let ordinal: usize = fragment.strip_prefix("journey-")?.parse().ok()?;
        Some(ordinal.saturating_sub(1).min(self.len() - 1))
    }

    /// Step to activate on load: fragment match, then a step already marked
    /// active in the markup, then the first step.
    pub fn initial_index(&self, hash: Option<&str>, marked: Option<usize>) -> usize {
        hash.and_then(|hash| self.fragment_target(hash))
            .or_else(|| marked.filter(|index| *index < self.len()))
            .unwrap_or(0)
    }

    /// Activates the load-time step. When the fragment picked it, the next
    /// observer batch is held back so the deep link survives whatever sits
    /// in the focus band at load.
    pub fn activate_initial(&mut self, hash: Option<&str>, marked: Option<usize>) -> Transition {
        let index = self.initial_index(hash, marked);
        self.hold_observer_batch = hash.and_then(|hash| self.fragment_target(hash)).is_some();
        self.set_active(index, ActivationSource::Initial)
    }

    /// Called once per intersection-observer batch; `false` means the batch
    /// is the load-time report after a deep link and must be dropped.
    pub fn admit_observer_batch(&mut self) -> bool {
        !std::mem::take(&mut self.hold_observer_batch)
    }

    /// Target of a key press on the step at `focused`.
    pub fn key_target(&self, focused: usize, key: StepKey) -> usize {
        let last = self.len() - 1;
        let current = self.active.unwrap_or(focused).min(last);
        match key {
            StepKey::Activate => focused.min(last),
            StepKey::Next => (current + 1).min(last),
            StepKey::Previous => current.saturating_sub(1),
        }
    }
}

/// Offset of the anchor's vertical center from the top of the track,
/// clamped to `[0, track.height]`.
pub fn progress_offset(anchor: Rect, track: Rect) -> f64 {
    let max = track.height.max(0.0);
    let offset = anchor.center() - track.top;
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, max)
}

/// Index of the visible step whose center lies closest to the viewport
/// midpoint. Ties go to the earlier step.
pub fn nearest_to_center(steps: &[Rect], viewport_height: f64) -> Option<usize> {
    let midpoint = viewport_height / 2.0;
    let mut best: Option<(usize, f64)> = None;

    for (index, rect) in steps.iter().enumerate() {
        if rect.bottom() <= 0.0 || rect.top >= viewport_height {
            continue;
        }
        let distance = (rect.center() - midpoint).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}

/// `rootMargin` for an intersection observer whose active area is a band of
/// `band` (fraction of the viewport height) centered on the midpoint.
pub fn focus_band_root_margin(band: f64) -> String {
    let band = if band.is_finite() {
        band.clamp(0.0, 1.0)
    } else {
        1.0
    };
    let inset = (1.0 - band) / 2.0 * 100.0;
    format!("-{inset:.1}% 0px -{inset:.1}% 0px")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_steps() -> TimelineState {
        TimelineState::new((1..=5).map(|n| format!("step-{n}"))).expect("steps")
    }

    #[test]
    fn empty_step_list_yields_no_state() {
        assert!(TimelineState::new(Vec::<String>::new()).is_none());
    }

    #[test]
    fn exactly_one_active_and_earlier_steps_complete() {
        let mut state = five_steps();
        for target in 0..state.len() {
            state.set_active(target, ActivationSource::Scroll);
            let flags = state.all_flags();
            assert_eq!(flags.iter().filter(|f| f.active).count(), 1);
            for (index, flag) in flags.iter().enumerate() {
                assert_eq!(flag.active, index == target);
                assert_eq!(flag.complete, index < target);
            }
        }
    }

    #[test]
    fn out_of_range_request_changes_nothing() {
        let mut state = five_steps();
        state.set_active(1, ActivationSource::Initial);
        let before = state.all_flags();

        assert_eq!(state.set_active(5, ActivationSource::Pointer), Transition::Ignored);
        assert_eq!(state.set_active(usize::MAX, ActivationSource::Keyboard), Transition::Ignored);
        assert_eq!(state.all_flags(), before);
        assert_eq!(state.active(), Some(1));
    }

    #[test]
    fn reactivating_same_step_only_refreshes() {
        let mut state = five_steps();
        assert!(state.set_active(3, ActivationSource::Scroll).flags_changed());

        let again = state.set_active(3, ActivationSource::Scroll);
        assert_eq!(
            again,
            Transition::Refreshed {
                index: 3,
                fragment: None
            }
        );
        assert!(!again.flags_changed());
        assert!(again.needs_progress());
    }

    #[test]
    fn only_user_actions_rewrite_fragment() {
        let mut state = five_steps();
        assert_eq!(state.set_active(2, ActivationSource::Scroll).fragment(), None);
        assert_eq!(state.set_active(3, ActivationSource::Fragment).fragment(), None);
        assert_eq!(state.set_active(0, ActivationSource::Initial).fragment(), None);
        assert_eq!(
            state.set_active(1, ActivationSource::Keyboard).fragment(),
            Some("step-2")
        );
        assert_eq!(
            state.set_active(1, ActivationSource::Pointer).fragment(),
            Some("step-2")
        );
    }

    #[test]
    fn initial_index_prefers_fragment_then_marked_step() {
        let state = five_steps();
        assert_eq!(state.initial_index(Some("#step-4"), Some(1)), 3);
        assert_eq!(state.initial_index(Some("#unknown"), Some(1)), 1);
        assert_eq!(state.initial_index(Some(""), None), 0);
        assert_eq!(state.initial_index(None, Some(9)), 0);
    }

    #[test]
    fn legacy_journey_fragment_is_clamped() {
        let state = five_steps();
        assert_eq!(state.fragment_target("#journey-3"), Some(2));
        assert_eq!(state.fragment_target("#journey-0"), Some(0));
        assert_eq!(state.fragment_target("#journey-40"), Some(4));
        assert_eq!(state.fragment_target("#journey-x"), None);
    }

    #[test]
    fn encoded_fragment_matches_its_step() {
        let state =
            TimelineState::new(["الخطوة-1", "الخطوة-2", "step two", "100%"]).expect("steps");
        assert_eq!(state.fragment_target("#الخطوة-2"), Some(1));
        assert_eq!(
            state.fragment_target("#%D8%A7%D9%84%D8%AE%D8%B7%D9%88%D8%A9-2"),
            Some(1)
        );
        assert_eq!(state.fragment_target("#step%20two"), Some(2));
        // Not valid percent-encoding: matched verbatim.
        assert_eq!(state.fragment_target("#100%"), Some(3));
    }

    #[test]
    fn deep_link_holds_back_first_observer_batch() {
        let mut state = five_steps();
        let transition = state.activate_initial(Some("#step-4"), None);
        assert_eq!(
            transition,
            Transition::Activated {
                index: 3,
                fragment: None
            }
        );
        assert!(!state.admit_observer_batch());
        assert_eq!(state.active(), Some(3));
        assert!(state.admit_observer_batch());
        assert!(state.admit_observer_batch());
    }

    #[test]
    fn plain_load_admits_first_observer_batch() {
        let mut state = five_steps();
        state.activate_initial(Some("#unknown"), Some(2));
        assert_eq!(state.active(), Some(2));
        assert!(state.admit_observer_batch());

        let mut state = five_steps();
        state.activate_initial(None, None);
        assert_eq!(state.active(), Some(0));
        assert!(state.admit_observer_batch());
    }

    #[test]
    fn edge_flags_follow_active_step() {
        let mut state = five_steps();
        assert!(!state.at_first() && !state.at_last());
        state.set_active(0, ActivationSource::Initial);
        assert!(state.at_first() && !state.at_last());
        state.set_active(2, ActivationSource::Pointer);
        assert!(!state.at_first() && !state.at_last());
        state.set_active(4, ActivationSource::Pointer);
        assert!(state.at_last());

        let single = TimelineState::new(["only"]).map(|mut state| {
            state.set_active(0, ActivationSource::Initial);
            state
        });
        let single = single.expect("steps");
        assert!(single.at_first() && single.at_last());
    }

    #[test]
    fn arrow_keys_clamp_at_the_ends() {
        let mut state = five_steps();
        state.set_active(0, ActivationSource::Initial);
        assert_eq!(state.key_target(0, StepKey::Previous), 0);
        assert_eq!(state.key_target(0, StepKey::Next), 1);

        state.set_active(4, ActivationSource::Scroll);
        assert_eq!(state.key_target(4, StepKey::Next), 4);
        assert_eq!(state.key_target(2, StepKey::Activate), 2);
    }

    #[test]
    fn step_keys_map_from_dom_names() {
        assert_eq!(StepKey::from_key("Enter"), Some(StepKey::Activate));
        assert_eq!(StepKey::from_key(" "), Some(StepKey::Activate));
        assert_eq!(StepKey::from_key("ArrowDown"), Some(StepKey::Next));
        assert_eq!(StepKey::from_key("ArrowUp"), Some(StepKey::Previous));
        assert_eq!(StepKey::from_key("Tab"), None);
    }

    #[test]
    fn progress_is_clamped_to_track() {
        let track = Rect::new(100.0, 400.0);
        assert_eq!(progress_offset(Rect::new(180.0, 40.0), track), 100.0);
        assert_eq!(progress_offset(Rect::new(-500.0, 20.0), track), 0.0);
        assert_eq!(progress_offset(Rect::new(2_000.0, 20.0), track), 400.0);
        assert_eq!(progress_offset(Rect::new(50.0, 20.0), Rect::new(0.0, -10.0)), 0.0);
        assert_eq!(progress_offset(Rect::new(f64::NAN, 20.0), track), 0.0);
    }

    #[test]
    fn nearest_step_skips_offscreen_and_prefers_earlier_on_tie() {
        let steps = [
            Rect::new(-300.0, 100.0),
            Rect::new(250.0, 100.0),
            Rect::new(450.0, 100.0),
            Rect::new(900.0, 100.0),
        ];
        assert_eq!(nearest_to_center(&steps, 800.0), Some(1));
        assert_eq!(nearest_to_center(&steps[..1], 800.0), None);
    }

    #[test]
    fn root_margin_describes_center_band() {
        assert_eq!(focus_band_root_margin(0.2), "-40.0% 0px -40.0% 0px");
        assert_eq!(focus_band_root_margin(1.0), "-0.0% 0px -0.0% 0px");
    }
}
