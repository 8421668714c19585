use std::time::Instant;

use crate::{Debouncer, SidebarConfig, SidebarEffect, SidebarViewModel};

/// Open/closed state of the navigation panel and its pending resize.
///
/// Transition methods return the newly applied view when what the page shows
/// changed, `None` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    config: SidebarConfig,
    open: bool,
    viewport_width: u32,
    applied: SidebarViewModel,
    resize: Debouncer,
    dirty: bool,
}

impl Sidebar {
    pub fn new(config: SidebarConfig, viewport_width: u32) -> Self {
        let open = config.is_wide(viewport_width);
        let mut sidebar = Self {
            config,
            open,
            viewport_width,
            applied: SidebarViewModel::default(),
            resize: Debouncer::new(config.resize_quiet_period),
            dirty: true,
        };
        sidebar.applied = sidebar.compute_view();
        sidebar
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn view(&self) -> SidebarViewModel {
        self.applied
    }

    pub fn settle_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn toggle(&mut self) -> Option<SidebarViewModel> {
        self.apply(!self.open)
    }

    pub fn close(&mut self) -> Option<SidebarViewModel> {
        self.apply(false)
    }

    /// Records the live width and restarts the quiet period. Returns the new
    /// settle deadline.
    pub fn record_resize(&mut self, width: u32, at: Instant) -> Instant {
        self.viewport_width = width;
        self.resize.schedule(at)
    }

    /// Settles a pending resize whose quiet period has elapsed: open when the
    /// viewport is at least the breakpoint, closed otherwise.
    pub fn settle(&mut self, now: Instant) -> Option<SidebarViewModel> {
        if !self.resize.fire(now) {
            return None;
        }
        self.apply(self.config.is_wide(self.viewport_width))
    }

    fn apply(&mut self, open: bool) -> Option<SidebarViewModel> {
        self.open = open;
        let next = self.compute_view();
        if next == self.applied {
            return None;
        }
        self.applied = next;
        self.dirty = true;
        Some(next)
    }

    fn compute_view(&self) -> SidebarViewModel {
        SidebarViewModel {
            open: self.open,
            panel_visible: self.open,
            backdrop_visible: self.open,
            scroll_locked: self.open && !self.config.is_wide(self.viewport_width),
        }
    }

    /// Effects that bring a freshly loaded page in line with the initial state.
    pub fn initial_effects(&self) -> Vec<SidebarEffect> {
        vec![SidebarEffect::Apply(self.applied)]
    }
}
