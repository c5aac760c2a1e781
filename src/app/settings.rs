//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and the popup renderer consume the same source of truth.

use super::state::AppState;

/// A single item in the settings menu.  Each one cycles through a finite
/// set of values.
pub struct SettingsItem {
    pub label: &'static str,
    pub value: fn(&AppState) -> String,
    pub cycle: fn(&mut AppState),
}

/// Next entry after `current` in `values`, or `values[fallback + 1]` when
/// `current` is not one of them.
fn next_in<T: Copy + PartialEq>(values: &[T], current: T, fallback: usize) -> T {
    let idx = values.iter().position(|v| *v == current).unwrap_or(fallback);
    values[(idx + 1) % values.len()]
}

fn persist(state: &mut AppState, message: String) {
    if let Some(path) = &state.config_path {
        if let Err(err) = state.config.save_to(path) {
            tracing::warn!("failed to save config: {err:#}");
        }
    }
    state.status_message = Some(message);
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem {
        label: "Row Height",
        value: |s| format!("{}px", s.config.row_height_px),
        cycle: |s| {
            const HEIGHTS: &[u32] = &[12, 14, 16, 18, 20, 24];
            s.config.row_height_px = next_in(HEIGHTS, s.config.row_height_px, 1);
            persist(s, format!("Row height: {}px", s.config.row_height_px));
        },
    },
    SettingsItem {
        label: "Alert Duration",
        value: |s| format!("{}ms", s.config.alert_ms),
        cycle: |s| {
            const DURATIONS: &[u64] = &[1500, 2500, 4000, 6000];
            s.config.alert_ms = next_in(DURATIONS, s.config.alert_ms, 0);
            s.alerts.set_display_ms(s.config.alert_ms);
            persist(s, format!("Alert duration: {}ms", s.config.alert_ms));
        },
    },
    SettingsItem {
        label: "Sticky Threshold",
        value: |s| format!("{}px", s.bar.threshold()),
        cycle: |s| {
            const THRESHOLDS: &[u32] = &[640, 1040, 1440];
            // Picking a value here replaces any one-run override.
            if let Some(px) = s.threshold_override.take() {
                tracing::debug!(threshold = px, "dropping threshold override");
            }
            s.config.sticky_threshold_px = next_in(THRESHOLDS, s.config.sticky_threshold_px, 0);
            if s.bar.set_threshold(s.config.sticky_threshold_px) && s.bar.visibility().is_shown() {
                s.bar_slide.start();
            }
            persist(s, format!("Sticky bar at {}px", s.config.sticky_threshold_px));
        },
    },
];
