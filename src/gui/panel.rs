//! Floating panel position: dragging, edge snapping, minimize docking and
//! persistence through a key-value store.

use std::collections::HashMap;

use eframe::egui::{pos2, Pos2, Rect, Vec2};

use crate::AppConfig;

pub const PANEL_LEFT_KEY: &str = "advsearch_panel_left";
pub const PANEL_TOP_KEY: &str = "advsearch_panel_top";

/// Where the panel position is remembered between sessions
pub trait PositionStore {
    fn load(&self, key: &str) -> Option<f32>;
    fn save(&mut self, key: &str, value: f32);
}

impl<'a> PositionStore for dyn eframe::Storage + 'a {
    fn load(&self, key: &str) -> Option<f32> {
        self.get_string(key)?.parse().ok()
    }

    fn save(&mut self, key: &str, value: f32) {
        self.set_string(key, value.to_string());
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, f32>,
}

impl PositionStore for MemoryStore {
    fn load(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    fn save(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapConfig {
    pub threshold: f32,
    pub margin: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: 30.0,
            margin: 10.0,
        }
    }
}

impl From<&AppConfig> for SnapConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            threshold: config.snap_threshold,
            margin: config.snap_margin,
        }
    }
}

/// Pull the panel flush (plus margin) against any edge it is close to.
/// Left and top win over right and bottom.
pub fn snap_to_edge(panel: Rect, viewport: Rect, snap: SnapConfig) -> Pos2 {
    let mut pos = panel.min;

    if panel.left() - viewport.left() < snap.threshold {
        pos.x = viewport.left() + snap.margin;
    } else if viewport.right() - panel.right() < snap.threshold {
        pos.x = viewport.right() - panel.width() - snap.margin;
    }

    if panel.top() - viewport.top() < snap.threshold {
        pos.y = viewport.top() + snap.margin;
    } else if viewport.bottom() - panel.bottom() < snap.threshold {
        pos.y = viewport.bottom() - panel.height() - snap.margin;
    }

    pos
}

/// Top-left corner, inset by the margin
pub fn dock_left_top(viewport: Rect, snap: SnapConfig) -> Pos2 {
    pos2(viewport.left() + snap.margin, viewport.top() + snap.margin)
}

/// Panel UI state, owned by the app and passed to every handler
#[derive(Debug, Clone)]
pub struct PanelState {
    pub position: Pos2,
    pub minimized: bool,
    snap: SnapConfig,
    settle_pending: bool,
    dirty: bool,
}

impl PanelState {
    pub fn new(snap: SnapConfig, start_minimized: bool) -> Self {
        Self {
            position: pos2(snap.margin, snap.margin),
            minimized: start_minimized,
            snap,
            settle_pending: true,
            dirty: false,
        }
    }

    /// Pick up a previously saved position, if both coordinates are there
    pub fn restore<S: PositionStore + ?Sized>(&mut self, store: &S) {
        if let (Some(left), Some(top)) = (store.load(PANEL_LEFT_KEY), store.load(PANEL_TOP_KEY)) {
            tracing::debug!(left, top, "restored panel position");
            self.position = pos2(left, top);
        }
    }

    pub fn persist<S: PositionStore + ?Sized>(&self, store: &mut S) {
        store.save(PANEL_LEFT_KEY, self.position.x);
        store.save(PANEL_TOP_KEY, self.position.y);
    }

    pub fn drag_by(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn end_drag(&mut self, size: Vec2, viewport: Rect) {
        self.settle(size, viewport);
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
        self.settle_pending = true;
    }

    /// True once after a state change that needs the panel repositioned
    pub fn take_settle(&mut self) -> bool {
        std::mem::take(&mut self.settle_pending)
    }

    /// True once after the position changed and should be saved
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Minimized panels dock to the top-left corner; expanded ones snap to a near edge.
    pub fn settle(&mut self, size: Vec2, viewport: Rect) {
        let target = if self.minimized {
            dock_left_top(viewport, self.snap)
        } else {
            snap_to_edge(Rect::from_min_size(self.position, size), viewport, self.snap)
        };
        if target != self.position {
            tracing::debug!(x = target.x, y = target.y, minimized = self.minimized, "panel settled");
        }
        self.position = target;
        self.dirty = true;
    }
}
