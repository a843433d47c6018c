//! DOM-free logic behind the Sakinah landing page: timeline state and
//! geometry, tabs, localization, theme, counters and the page configuration.
//!
//! Everything here is plain data in, plain data out, so the browser bindings
//! in `sakinah-ui` stay thin and this crate can be tested natively.

pub mod config;
pub mod counter;
pub mod error;
pub mod focus;
pub mod i18n;
pub mod layout;
pub mod pairing;
pub mod storage;
pub mod tabs;
pub mod theme;
pub mod timeline;
pub mod track;

pub use config::{PageConfig, RevealConfig, TimelineConfig};
pub use counter::{Counter, CounterFrame};
pub use error::SakinahError;
pub use i18n::{Dictionary, I18n, Locale, LocaleCoverage};
pub use layout::{StepLayout, TimelineFrame, TimelineLayout};
pub use pairing::{pair_visuals, Side, SiblingKind, VisualPlacement};
pub use storage::{KeyValueStore, MemoryStore, LANG_KEY, THEME_KEY};
pub use theme::{Theme, ThemeState};
pub use timeline::{
    focus_band_root_margin, nearest_to_center, progress_offset, ActivationSource, Rect,
    StepFlags, StepKey, TimelineState, Transition,
};
pub use track::TrackEvent;
