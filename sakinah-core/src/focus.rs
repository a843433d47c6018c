//! Focus trapping arithmetic for modal dialogs.

/// Where Tab focus has to jump to stay inside a dialog with `count`
/// focusable elements, given the index of the focused one. `None` means the
/// browser's own focus move is fine.
pub fn trap_target(current: Option<usize>, count: usize, shift: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    match (current, shift) {
        (Some(0), true) => Some(last),
        (Some(index), false) if index == last => Some(0),
        _ => None,
    }
}
