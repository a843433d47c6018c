//! Eased count-up animation for the hero metrics.

use std::f64::consts::PI;

/// Parameters read from a `[data-count]` node.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    pub to: f64,
    pub suffix: String,
    pub final_suffix: String,
}

/// One rendered animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterFrame {
    pub value: f64,
    pub text: String,
    pub done: bool,
}

impl Counter {
    /// Builds a counter from `data-to`, `data-suffix` and `data-final-suffix`.
    /// A missing or unparsable target counts to zero; the final suffix
    /// defaults to the running suffix.
    pub fn from_attributes(to: Option<&str>, suffix: Option<&str>, final_suffix: Option<&str>) -> Self {
        let to = to
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(0.0);
        let suffix = suffix.unwrap_or_default().to_string();
        let final_suffix = final_suffix.map(str::to_string).unwrap_or_else(|| suffix.clone());
        Self {
            to,
            suffix,
            final_suffix,
        }
    }

    /// Larger targets run longer, capped at two seconds.
    pub fn duration_ms(&self) -> f64 {
        (1200.0 + (self.to * 1.5).min(800.0)).max(1.0)
    }

    pub fn frame(&self, elapsed_ms: f64) -> CounterFrame {
        let progress = (elapsed_ms / self.duration_ms()).clamp(0.0, 1.0);
        let eased = 0.5 - (PI * progress).cos() / 2.0;
        let value = (self.to * eased).round();
        let done = progress >= 1.0;
        let suffix = if done { &self.final_suffix } else { &self.suffix };
        CounterFrame {
            value,
            text: format!("{value}{suffix}"),
            done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_ends_on_target() {
        let counter = Counter::from_attributes(Some("120"), Some("+"), Some("k+"));
        assert_eq!(counter.duration_ms(), 1380.0);

        let first = counter.frame(0.0);
        assert_eq!(first.text, "0+");
        assert!(!first.done);

        let halfway = counter.frame(690.0);
        assert_eq!(halfway.value, 60.0);

        let last = counter.frame(5_000.0);
        assert_eq!(last.text, "120k+");
        assert!(last.done);
    }

    #[test]
    fn duration_is_capped() {
        let counter = Counter::from_attributes(Some("10000"), None, None);
        assert_eq!(counter.duration_ms(), 2000.0);
    }

    #[test]
    fn bad_target_counts_to_zero_with_running_suffix() {
        let counter = Counter::from_attributes(Some("many"), Some("%"), None);
        assert_eq!(counter.to, 0.0);
        assert_eq!(counter.final_suffix, "%");
        assert_eq!(counter.frame(10_000.0).text, "0%");
    }
}
