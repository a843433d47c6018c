//! Analytics events emitted by the page.

use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackEvent {
    FeatureCardCta { feature: String },
    FeatureCardClick { feature: String },
    HeroPrimaryCta,
    HeroSecondaryCta,
    HeroCountersView,
}

impl TrackEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TrackEvent::FeatureCardCta { .. } => "features_card_cta",
            TrackEvent::FeatureCardClick { .. } => "features_card_click",
            TrackEvent::HeroPrimaryCta => "hero_cta_primary_click",
            TrackEvent::HeroSecondaryCta => "hero_cta_secondary_click",
            TrackEvent::HeroCountersView => "hero_counters_view",
        }
    }

    pub fn detail(&self) -> Value {
        match self {
            TrackEvent::FeatureCardCta { feature } | TrackEvent::FeatureCardClick { feature } => {
                json!({ "feature": feature })
            }
            TrackEvent::HeroPrimaryCta => json!({ "label": "register" }),
            TrackEvent::HeroSecondaryCta => json!({ "label": "features" }),
            TrackEvent::HeroCountersView => json!({}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_ctas_carry_labels() {
        assert_eq!(TrackEvent::HeroPrimaryCta.name(), "hero_cta_primary_click");
        assert_eq!(TrackEvent::HeroPrimaryCta.detail()["label"], "register");
        assert_eq!(TrackEvent::HeroSecondaryCta.detail()["label"], "features");
    }

    #[test]
    fn feature_events_carry_feature_key() {
        let event = TrackEvent::FeatureCardCta {
            feature: "journal".into(),
        };
        assert_eq!(event.name(), "features_card_cta");
        assert_eq!(event.detail(), json!({ "feature": "journal" }));
    }
}
