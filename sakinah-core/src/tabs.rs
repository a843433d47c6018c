//! Roving selection for the features tablist.

/// Index reached from `current` after an arrow key, wrapping around.
/// Horizontal arrows are mirrored in right-to-left documents.
pub fn arrow_target(current: usize, len: usize, key: &str, rtl: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let forward = match key {
        "ArrowRight" => !rtl,
        "ArrowLeft" => rtl,
        _ => return None,
    };
    let current = current % len;
    Some(if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    })
}

/// First tab already marked selected, else the first tab.
pub fn initial_tab(selected: &[bool]) -> Option<usize> {
    if selected.is_empty() {
        return None;
    }
    Some(selected.iter().position(|is_selected| *is_selected).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_wrap_in_both_directions() {
        assert_eq!(arrow_target(2, 3, "ArrowRight", false), Some(0));
        assert_eq!(arrow_target(0, 3, "ArrowLeft", false), Some(2));
        assert_eq!(arrow_target(1, 3, "ArrowDown", false), None);
        assert_eq!(arrow_target(0, 0, "ArrowRight", false), None);
    }

    #[test]
    fn rtl_mirrors_direction() {
        assert_eq!(arrow_target(0, 3, "ArrowRight", true), Some(2));
        assert_eq!(arrow_target(0, 3, "ArrowLeft", true), Some(1));
    }

    #[test]
    fn initial_tab_falls_back_to_first() {
        assert_eq!(initial_tab(&[false, true, false]), Some(1));
        assert_eq!(initial_tab(&[false, false]), Some(0));
        assert_eq!(initial_tab(&[]), None);
    }
}
