//! Scroll container and the observer that reports its offset upward.
//!
//! The container is the page viewport: it owns the vertical offset (in
//! pixels) and clamps it to the content geometry.  A [`ScrollObserver`] is the
//! mounted wrapper around it.  Mounting registers exactly one listener,
//! dropping the observer releases it.

use super::observe::{Observable, Subscription};

/// Vertical pixel offset of a scroll container.
pub type ScrollOffset = u32;

/// A vertically scrollable region.
pub struct ScrollContainer {
    scroll_top: Observable<ScrollOffset>,
    content_height: u32,
    viewport_height: u32,
}

impl ScrollContainer {
    pub fn new() -> Self {
        Self {
            scroll_top: Observable::new(0),
            content_height: 0,
            viewport_height: 0,
        }
    }

    /// Current offset.
    pub fn scroll_top(&self) -> ScrollOffset {
        self.scroll_top.get()
    }

    /// Visible height of the container.
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Largest reachable offset for the current geometry.
    pub fn max_scroll_top(&self) -> ScrollOffset {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Update content/viewport heights.  Re-clamps the offset, which fires a
    /// scroll event when the clamp moves it.
    pub fn set_geometry(&mut self, content_height: u32, viewport_height: u32) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        let current = self.scroll_top();
        let clamped = current.min(self.max_scroll_top());
        if clamped != current {
            self.scroll_top.set(clamped);
        }
    }

    /// Scroll to an absolute offset.  Emits a scroll event only if the
    /// offset actually moves.
    pub fn scroll_to(&self, offset: ScrollOffset) {
        let target = offset.min(self.max_scroll_top());
        if target != self.scroll_top() {
            self.scroll_top.set(target);
        }
    }

    /// Scroll by a signed pixel delta.
    pub fn scroll_by(&self, delta: i64) {
        let next = (i64::from(self.scroll_top()) + delta).clamp(0, i64::from(u32::MAX));
        self.scroll_to(next as ScrollOffset);
    }

    /// Number of registered scroll listeners.
    pub fn listener_count(&self) -> usize {
        self.scroll_top.listener_count()
    }

    fn add_scroll_listener(
        &self,
        listener: impl Fn(&ScrollOffset) + Send + Sync + 'static,
    ) -> Subscription {
        self.scroll_top.subscribe(listener)
    }
}

impl Default for ScrollContainer {
    fn default() -> Self {
        Self::new()
    }
}

/// Mounted scroll watcher.
///
/// Holds the container's scroll listener for as long as it lives.
#[derive(Debug)]
pub struct ScrollObserver {
    _listener: Subscription,
}

impl ScrollObserver {
    /// Subscribe to `container` and forward every new offset to `publish`.
    pub fn mount(
        container: &ScrollContainer,
        publish: impl Fn(ScrollOffset) + Send + Sync + 'static,
    ) -> Self {
        tracing::debug!("scroll observer mounted");
        Self {
            _listener: container.add_scroll_listener(move |offset| publish(*offset)),
        }
    }

    /// Tear down the subscription.
    pub fn unmount(self) {
        tracing::debug!("scroll observer unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn container(content: u32, viewport: u32) -> ScrollContainer {
        let mut c = ScrollContainer::new();
        c.set_geometry(content, viewport);
        c
    }

    #[test]
    fn observer_publishes_each_new_offset() {
        let page = container(4000, 800);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _observer = ScrollObserver::mount(&page, move |o| sink.lock().unwrap().push(o));

        page.scroll_by(500);
        page.scroll_by(600);
        page.scroll_by(-100);

        assert_eq!(*seen.lock().unwrap(), vec![500, 1100, 1000]);
    }

    #[test]
    fn offset_is_clamped_to_content() {
        let page = container(2000, 800);
        page.scroll_by(5000);
        assert_eq!(page.scroll_top(), 1200);
        page.scroll_by(-9000);
        assert_eq!(page.scroll_top(), 0);
    }

    #[test]
    fn no_event_when_offset_does_not_move() {
        let page = container(2000, 800);
        let hits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hits);
        let _observer = ScrollObserver::mount(&page, move |_| *counter.lock().unwrap() += 1);

        page.scroll_by(-10);
        page.scroll_to(0);

        assert_eq!(*hits.lock().unwrap(), 0);
    }

    #[test]
    fn shrinking_content_reclamps_and_notifies() {
        let mut page = container(4000, 800);
        page.scroll_to(3000);
        let last = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&last);
        let _observer = ScrollObserver::mount(&page, move |o| *sink.lock().unwrap() = Some(o));

        page.set_geometry(1500, 800);

        assert_eq!(page.scroll_top(), 700);
        assert_eq!(*last.lock().unwrap(), Some(700));
    }

    #[test]
    fn unmount_releases_listener() {
        let page = container(4000, 800);
        for _ in 0..5 {
            let observer = ScrollObserver::mount(&page, |_| {});
            assert_eq!(page.listener_count(), 1);
            observer.unmount();
        }
        assert_eq!(page.listener_count(), 0);
    }
}
