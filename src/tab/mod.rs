// Tab orchestrator: owns one pane tree plus the per-pane content surfaces,
// and bridges focus, size, and settings between them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use crossbeam_channel::{Receiver, Sender};

use crate::config::Config;
use crate::geometry::{Direction, Rect, Size, SplitAxis};
use crate::pane::{CloseOutcome, PaneError, PaneId, PaneTree, ProfileId};
use crate::surface::{ContentSurface, SurfaceSettings};

static NEXT_TAB_ID: AtomicU32 = AtomicU32::new(1);

/// Unique identifier for a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u32);

impl TabId {
    pub fn new() -> Self {
        Self(NEXT_TAB_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single tab: one pane tree, one content surface per leaf.
///
/// The tree holds structure and focus; this type holds the surfaces and
/// performs the actual focus transfers and settings forwarding. All
/// mutating operations are synchronous and leave no observable
/// intermediate state.
pub struct Tab<S: ContentSurface> {
    pub id: TabId,
    tree: PaneTree,
    surfaces: HashMap<PaneId, S>,
    config: Config,
    /// Last known viewport size; updated by `resize`.
    size: Size,
    focused: bool,
    closed_txs: Vec<Sender<()>>,
    closed_fired: bool,
}

impl<S: ContentSurface> Tab<S> {
    /// Create a tab hosting a single pane for `profile`.
    pub fn new(profile: ProfileId, surface: S, size: Size, config: Config) -> Self {
        let tree = PaneTree::with_policy(profile, config.focus.policy);
        let mut surfaces = HashMap::new();
        // A fresh tree always has its root leaf focused.
        if let Some(root_id) = tree.focused_leaf() {
            surfaces.insert(root_id, surface);
        }
        Self {
            id: TabId::new(),
            tree,
            surfaces,
            config,
            size,
            focused: false,
            closed_txs: Vec::new(),
            closed_fired: false,
        }
    }

    /// Subscribe to the closed notification. Each subscriber receives one
    /// `()` when the tab's last pane closes, at most once per tab lifetime.
    pub fn subscribe_closed(&mut self) -> Receiver<()> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.closed_txs.push(tx);
        rx
    }

    fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    /// Derived rects for every pane at the current viewport size.
    pub fn layout(&self) -> Vec<(PaneId, Rect)> {
        self.tree
            .root()
            .map_or_else(Vec::new, |root| {
                crate::pane::layout::compute_layout(root, self.bounds(), &self.config)
            })
    }

    /// Number of panes in this tab.
    pub fn pane_count(&self) -> usize {
        self.tree.pane_count()
    }

    /// All pane ids in traversal order.
    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.tree.pane_ids()
    }

    /// Whether the focused pane can be split along the given axis.
    pub fn can_split(&self, axis: SplitAxis) -> bool {
        self.tree.can_split(axis, self.bounds(), &self.config)
    }

    /// Split the focused pane, hosting `surface` in the new leaf. The new
    /// pane takes the focus target. On failure the tree is untouched and
    /// the surface is handed back to the caller.
    pub fn split(
        &mut self,
        axis: SplitAxis,
        profile: ProfileId,
        surface: S,
    ) -> Result<PaneId, (PaneError, S)> {
        match self
            .tree
            .split_focused(axis, profile, self.bounds(), &self.config)
        {
            Ok(new_id) => {
                self.surfaces.insert(new_id, surface);
                log::debug!("tab {:?}: split {:?}, new pane {:?}", self.id, axis, new_id);
                self.transfer_focus();
                Ok(new_id)
            }
            Err(e) => Err((e, surface)),
        }
    }

    /// Close the currently focused pane. No-op on an empty tree.
    pub fn close_focused_pane(&mut self) -> CloseOutcome {
        match self.tree.focused_leaf() {
            Some(id) => self.close_pane(id),
            None => CloseOutcome::NotFound,
        }
    }

    /// Close the pane with the given id. If it was the last pane, the
    /// closed notification fires once, after the tree mutation completes.
    /// Unknown ids are a no-op.
    pub fn close_pane(&mut self, id: PaneId) -> CloseOutcome {
        let outcome = self.tree.close(id);
        match outcome {
            CloseOutcome::Closed => {
                self.surfaces.remove(&id);
                log::debug!("tab {:?}: closed pane {:?}", self.id, id);
                self.transfer_focus();
            }
            CloseOutcome::TreeEmpty => {
                self.surfaces.remove(&id);
                log::info!("tab {:?}: last pane closed", self.id);
                self.fire_closed();
            }
            CloseOutcome::NotFound => {
                log::debug!("tab {:?}: close for unknown pane {:?}", self.id, id);
            }
        }
        outcome
    }

    /// Update the viewport size and return the re-derived layout. Ratios
    /// are untouched; only the derived rects change.
    pub fn resize(&mut self, size: Size) -> Vec<(PaneId, Rect)> {
        self.size = size;
        self.layout()
    }

    /// Move the separator nearest the focused pane in the given direction.
    /// Returns false (not an error) when no separator qualifies.
    pub fn resize_separator(&mut self, direction: Direction) -> bool {
        let moved = self.tree.resize_separator(direction, &self.config);
        if moved {
            log::debug!("tab {:?}: separator moved {:?}", self.id, direction);
        }
        moved
    }

    /// Move focus to the pane adjacent in the given direction, transferring
    /// focus to its surface. Returns None (no-op) at the edge of the grid.
    pub fn navigate(&mut self, direction: Direction) -> Option<PaneId> {
        let target = self
            .tree
            .navigate(direction, self.bounds(), &self.config)?;
        log::debug!("tab {:?}: focus moved {:?} to {:?}", self.id, direction, target);
        self.transfer_focus();
        Some(target)
    }

    /// Returns true iff this tab is focused.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Update the tab's focus state. On gaining focus, transfer focus to
    /// the tracked last-focused pane, or the first pane if none is tracked.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            if self.tree.focused_leaf().is_none() {
                if let Some(first) = self.tree.pane_ids().first().copied() {
                    self.tree.set_focus(first);
                }
            }
            self.transfer_focus();
        }
    }

    /// Id of the last-focused pane, if any.
    pub fn focused_pane_id(&self) -> Option<PaneId> {
        self.tree.focused_leaf()
    }

    /// Profile of the last-focused pane, if any.
    pub fn focused_profile(&self) -> Option<ProfileId> {
        self.tree.focused_profile()
    }

    /// The surface of the last-focused pane.
    pub fn focused_surface(&self) -> Option<&S> {
        self.surfaces.get(&self.tree.focused_leaf()?)
    }

    /// The surface hosted by the given pane.
    pub fn surface(&self, id: PaneId) -> Option<&S> {
        self.surfaces.get(&id)
    }

    /// Scroll the focused pane's viewport by `delta` lines. The surface
    /// decides how to interpret the request.
    pub fn scroll(&mut self, delta: i32) {
        if let Some(id) = self.tree.focused_leaf() {
            if let Some(surface) = self.surfaces.get_mut(&id) {
                surface.scroll_viewport(delta);
            }
        }
    }

    /// Apply settings to every pane whose profile matches. Panes with
    /// other profiles are untouched; no match at all is a no-op.
    pub fn update_settings(&mut self, settings: &SurfaceSettings, profile: ProfileId) {
        for (id, pane_profile) in self.tree.leaves() {
            if pane_profile == profile {
                if let Some(surface) = self.surfaces.get_mut(&id) {
                    surface.update_settings(settings);
                }
            }
        }
    }

    /// Focus the tracked pane's surface, if the tab itself is focused.
    fn transfer_focus(&mut self) {
        if !self.focused {
            return;
        }
        if let Some(id) = self.tree.focused_leaf() {
            if let Some(surface) = self.surfaces.get_mut(&id) {
                surface.focus();
            }
        }
    }

    /// Deliver the closed notification to every subscriber, exactly once.
    fn fire_closed(&mut self) {
        if self.closed_fired {
            return;
        }
        self.closed_fired = true;
        for tx in &self.closed_txs {
            // A subscriber that went away is not our problem.
            let _ = tx.try_send(());
        }
    }
}
