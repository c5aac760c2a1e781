//! Alert centre: the app's [`AlertSink`].
//!
//! Keeps the most recent alert and drops it once its display time is up.

use chrono::{DateTime, Duration, Local};

use crate::core::alert::{Alert, AlertSink};

#[derive(Debug, Clone)]
pub struct ShownAlert {
    pub alert: Alert,
    pub shown_at: DateTime<Local>,
}

#[derive(Debug)]
pub struct AlertCenter {
    current: Option<ShownAlert>,
    display_for: Duration,
}

impl AlertCenter {
    pub fn new(display_ms: u64) -> Self {
        Self {
            current: None,
            display_for: Duration::milliseconds(display_ms as i64),
        }
    }

    pub fn set_display_ms(&mut self, display_ms: u64) {
        self.display_for = Duration::milliseconds(display_ms as i64);
    }

    pub fn current(&self) -> Option<&ShownAlert> {
        self.current.as_ref()
    }

    /// Drop the alert if it has been up for longer than the display time.
    pub fn expire(&mut self, now: DateTime<Local>) {
        if let Some(shown) = &self.current {
            if now - shown.shown_at >= self.display_for {
                self.current = None;
            }
        }
    }

    fn show_at(&mut self, alert: Alert, now: DateTime<Local>) {
        tracing::info!(kind = ?alert.kind, message = %alert.message, "alert");
        self.current = Some(ShownAlert {
            alert,
            shown_at: now,
        });
    }
}

impl AlertSink for AlertCenter {
    fn show_alert(&mut self, alert: Alert) {
        self.show_at(alert, Local::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alert::AlertKind;

    #[test]
    fn newest_alert_replaces_previous() {
        let mut center = AlertCenter::new(2500);
        center.show_alert(Alert::neutral("Select a color"));
        center.show_alert(Alert::new("Out of stock", AlertKind::Error));
        let shown = center.current().unwrap();
        assert_eq!(shown.alert.message, "Out of stock");
        assert_eq!(shown.alert.kind, AlertKind::Error);
    }

    #[test]
    fn expires_after_display_time() {
        let mut center = AlertCenter::new(1000);
        let t0 = Local::now();
        center.show_at(Alert::neutral("hi"), t0);

        center.expire(t0 + Duration::milliseconds(999));
        assert!(center.current().is_some());

        center.expire(t0 + Duration::milliseconds(1000));
        assert!(center.current().is_none());
    }
}
