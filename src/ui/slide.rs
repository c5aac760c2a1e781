//! Slide-in animation for the sticky bar with exponential ease-out.
//!
//! `start` pushes the bar fully off its final position; each tick the
//! remaining displacement decays toward zero.  Hiding is never animated.

/// Fractional slide animator.
#[derive(Debug, Clone)]
pub struct SlideIn {
    /// Share of the widget height still hidden (1.0 = fully hidden).
    hidden: f64,
    /// Damping: `hidden *= (1 - speed)` each tick.
    speed: f64,
}

impl SlideIn {
    pub fn new(speed: f64) -> Self {
        Self {
            hidden: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Begin sliding in from fully hidden.
    pub fn start(&mut self) {
        self.hidden = 1.0;
    }

    /// Decay the displacement toward zero.  Call once per frame.
    pub fn tick(&mut self) {
        self.hidden *= 1.0 - self.speed;
        if self.hidden < 0.05 {
            self.hidden = 0.0;
        }
    }

    /// Rows of a `height`-row widget still above the visible edge.
    pub fn row_offset(&self, height: u16) -> u16 {
        (self.hidden * f64::from(height)).round() as u16
    }

    /// True while there is visible motion left.
    pub fn is_animating(&self) -> bool {
        self.hidden != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_after_a_few_ticks() {
        let mut slide = SlideIn::new(0.45);
        assert!(!slide.is_animating());

        slide.start();
        assert_eq!(slide.row_offset(3), 3);

        let mut ticks = 0;
        while slide.is_animating() {
            slide.tick();
            ticks += 1;
            assert!(ticks < 20);
        }
        assert_eq!(slide.row_offset(3), 0);
    }

    #[test]
    fn offset_shrinks_monotonically() {
        let mut slide = SlideIn::new(0.3);
        slide.start();
        let mut last = slide.row_offset(10);
        for _ in 0..10 {
            slide.tick();
            let now = slide.row_offset(10);
            assert!(now <= last);
            last = now;
        }
    }
}
