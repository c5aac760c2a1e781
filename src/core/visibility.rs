//! Sticky-bar visibility policy.

use super::scroll::ScrollOffset;

/// Offset at which the sticky bar appears.
pub const STICKY_BAR_THRESHOLD: ScrollOffset = 1040;

/// Whether the sticky bar is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarVisibility {
    #[default]
    Hidden,
    Shown,
}

impl BarVisibility {
    pub fn is_shown(self) -> bool {
        self == BarVisibility::Shown
    }
}

/// Hidden below `threshold`, shown at or past it.  No hysteresis: an offset
/// oscillating around the threshold flips the bar on every event.
pub fn bar_visibility(offset: ScrollOffset, threshold: ScrollOffset) -> BarVisibility {
    if offset >= threshold {
        BarVisibility::Shown
    } else {
        BarVisibility::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_exactly_at_threshold() {
        assert_eq!(bar_visibility(0, STICKY_BAR_THRESHOLD), BarVisibility::Hidden);
        assert_eq!(bar_visibility(1039, STICKY_BAR_THRESHOLD), BarVisibility::Hidden);
        assert_eq!(bar_visibility(1040, STICKY_BAR_THRESHOLD), BarVisibility::Shown);
        assert_eq!(bar_visibility(u32::MAX, STICKY_BAR_THRESHOLD), BarVisibility::Shown);
    }

    #[test]
    fn single_monotonic_flip_point() {
        let flips = (0..3000u32)
            .map(|o| bar_visibility(o, STICKY_BAR_THRESHOLD))
            .collect::<Vec<_>>()
            .windows(2)
            .filter(|w| w[0] != w[1])
            .count();
        assert_eq!(flips, 1);
    }

    #[test]
    fn same_offset_same_answer() {
        let first = bar_visibility(1040, STICKY_BAR_THRESHOLD);
        for _ in 0..100 {
            assert_eq!(bar_visibility(1040, STICKY_BAR_THRESHOLD), first);
        }
    }

    #[test]
    fn oscillation_at_boundary_flickers() {
        let seq: Vec<bool> = [1039, 1040, 1039, 1040]
            .into_iter()
            .map(|o| bar_visibility(o, STICKY_BAR_THRESHOLD).is_shown())
            .collect();
        assert_eq!(seq, vec![false, true, false, true]);
    }
}
