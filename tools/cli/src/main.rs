use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use sakinah_core::{Dictionary, LocaleCoverage, TimelineFrame, TimelineLayout};

#[derive(Parser, Debug)]
#[command(
    name = "sakinah-cli",
    about = "Developer checks for the Sakinah landing page."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report translation coverage of a dictionary JSON file.
    Dict {
        /// Path to the dictionary (`{"ar": {...}, "en": {...}}`).
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Replay the timeline against a recorded layout.
    Timeline {
        /// Path to the layout JSON file.
        #[arg(short, long)]
        input: PathBuf,
        /// URL fragment present at load, e.g. `#step-4`.
        #[arg(long)]
        hash: Option<String>,
        /// Scroll the document down by this many pixels after load.
        #[arg(long)]
        scroll: Option<f64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Dict { input } => {
            let dictionary = Dictionary::from_json(&read(&input)?)
                .with_context(|| format!("Invalid dictionary {:?}", input))?;
            let coverage = dictionary.coverage();
            print!("{}", render_coverage(&coverage));
            let missing: usize = coverage.iter().map(|c| c.missing.len()).sum();
            if missing > 0 {
                bail!("{missing} translation(s) missing");
            }
        }
        Command::Timeline {
            input,
            hash,
            scroll,
        } => {
            let layout: TimelineLayout = serde_json::from_str(&read(&input)?)
                .with_context(|| format!("Invalid layout {:?}", input))?;
            let frame = simulate(&layout, hash.as_deref(), scroll)?;
            println!("{}", render_frame(&frame));
        }
    }

    Ok(())
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Could not read file {:?}", path))
}

fn simulate(
    layout: &TimelineLayout,
    hash: Option<&str>,
    scroll: Option<f64>,
) -> anyhow::Result<TimelineFrame> {
    let Some((mut state, frame)) = layout.load(hash) else {
        bail!("Layout has no steps");
    };
    log::debug!("loaded at step {:?}", frame.active);
    Ok(match scroll {
        Some(offset) => layout.scrolled(offset).scroll(&mut state),
        None => frame,
    })
}

fn render_coverage(coverage: &[LocaleCoverage]) -> String {
    let mut out = String::new();
    for locale in coverage {
        out.push_str(&format!(
            "{}: {} translated, {} missing\n",
            locale.locale,
            locale.translated,
            locale.missing.len()
        ));
        for key in &locale.missing {
            out.push_str(&format!("  - {key}\n"));
        }
    }
    out
}

fn render_frame(frame: &TimelineFrame) -> String {
    let steps: Vec<&str> = frame
        .flags
        .iter()
        .map(|flags| match (flags.active, flags.complete) {
            (true, _) => "active",
            (false, true) => "complete",
            (false, false) => "pending",
        })
        .collect();
    let active = frame
        .active
        .map(|index| index.to_string())
        .unwrap_or_else(|| "--".to_string());
    format!(
        "Active step: {active}\nSteps: {}\nProgress: {:.1}px",
        steps.join(", "),
        frame.progress
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sakinah_core::{Locale, Rect, StepLayout};

    fn layout() -> TimelineLayout {
        TimelineLayout {
            viewport_height: 600.0,
            track: Rect::new(0.0, 900.0),
            steps: (0..3)
                .map(|n| StepLayout {
                    id: format!("step-{}", n + 1),
                    rect: Rect::new(n as f64 * 300.0, 100.0),
                    marker: None,
                    marked_active: false,
                })
                .collect(),
        }
    }

    #[test]
    fn scroll_moves_active_step() {
        let frame = simulate(&layout(), None, Some(300.0)).expect("frame");
        assert_eq!(frame.active, Some(2));
        assert_eq!(
            render_frame(&frame),
            "Active step: 2\nSteps: complete, complete, active\nProgress: 650.0px"
        );
    }

    #[test]
    fn fragment_sets_initial_step() {
        let frame = simulate(&layout(), Some("#step-2"), None).expect("frame");
        assert_eq!(frame.active, Some(1));
        assert_eq!(frame.progress, 350.0);
    }

    #[test]
    fn empty_layout_is_an_error() {
        let mut empty = layout();
        empty.steps.clear();
        assert!(simulate(&empty, None, None).is_err());
    }

    #[test]
    fn coverage_lists_missing_keys() {
        let mut dictionary = Dictionary::default();
        dictionary.insert(Locale::Ar, "nav.home", "الرئيسية");
        let text = render_coverage(&dictionary.coverage());
        assert_eq!(
            text,
            "ar: 1 translated, 0 missing\nen: 0 translated, 1 missing\n  - nav.home\n"
        );
    }
}
