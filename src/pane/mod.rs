// Pane tree: binary split tree with a single focus token and collapse-safe
// close semantics.

pub mod layout;
pub mod navigate;

use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::Config;
use crate::geometry::{Rect, SplitAxis};

/// Global monotonically increasing pane ID counter.
static NEXT_PANE_ID: AtomicU32 = AtomicU32::new(1);

/// Unique identifier for a pane leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneId(pub u32);

impl PaneId {
    /// Generate a new unique PaneId.
    pub fn next() -> Self {
        Self(NEXT_PANE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Opaque identifier of the profile that created a pane's content.
/// The core only ever compares these for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(pub u64);

/// Errors raised by tree-mutating operations. A failed operation leaves
/// the tree exactly as it was.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaneError {
    #[error("focused pane is too small to split along the requested axis")]
    InvalidOperation,
    #[error("no pane with the requested id exists in this tree")]
    NotFound,
}

/// A node in the binary pane tree.
#[derive(Debug)]
pub enum PaneNode {
    /// A leaf node holding one content surface, tagged with its profile.
    Leaf { id: PaneId, profile: ProfileId },
    /// An internal split node with exactly two children.
    Split {
        axis: SplitAxis,
        /// Fraction of the extent allotted to the first child, in (0, 1).
        ratio: f32,
        first: Box<PaneNode>,
        second: Box<PaneNode>,
    },
}

impl PaneNode {
    /// Create a new leaf node.
    pub fn leaf(id: PaneId, profile: ProfileId) -> Self {
        PaneNode::Leaf { id, profile }
    }

    /// Create a new split node.
    pub fn split(axis: SplitAxis, ratio: f32, first: PaneNode, second: PaneNode) -> Self {
        PaneNode::Split {
            axis,
            ratio,
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Check if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, PaneNode::Leaf { .. })
    }

    /// Get the pane ID if this is a leaf node.
    pub fn pane_id(&self) -> Option<PaneId> {
        match self {
            PaneNode::Leaf { id, .. } => Some(*id),
            PaneNode::Split { .. } => None,
        }
    }

    /// Count the number of leaf nodes in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            PaneNode::Leaf { .. } => 1,
            PaneNode::Split { first, second, .. } => first.leaf_count() + second.leaf_count(),
        }
    }

    /// Collect all leaf PaneIds in this subtree, in pre-order.
    pub fn leaf_ids(&self) -> Vec<PaneId> {
        match self {
            PaneNode::Leaf { id, .. } => vec![*id],
            PaneNode::Split { first, second, .. } => {
                let mut ids = first.leaf_ids();
                ids.extend(second.leaf_ids());
                ids
            }
        }
    }

    /// Collect all (PaneId, ProfileId) pairs in this subtree, in pre-order.
    pub fn leaves(&self) -> Vec<(PaneId, ProfileId)> {
        match self {
            PaneNode::Leaf { id, profile } => vec![(*id, *profile)],
            PaneNode::Split { first, second, .. } => {
                let mut out = first.leaves();
                out.extend(second.leaves());
                out
            }
        }
    }

    /// The first leaf in pre-order traversal.
    pub fn first_leaf_id(&self) -> PaneId {
        match self {
            PaneNode::Leaf { id, .. } => *id,
            PaneNode::Split { first, .. } => first.first_leaf_id(),
        }
    }

    /// Whether the subtree contains a leaf with the given id.
    pub fn contains(&self, target: PaneId) -> bool {
        match self {
            PaneNode::Leaf { id, .. } => *id == target,
            PaneNode::Split { first, second, .. } => {
                first.contains(target) || second.contains(target)
            }
        }
    }

    /// Profile of the leaf with the given id, if present.
    pub fn profile_of(&self, target: PaneId) -> Option<ProfileId> {
        match self {
            PaneNode::Leaf { id, profile } if *id == target => Some(*profile),
            PaneNode::Leaf { .. } => None,
            PaneNode::Split { first, second, .. } => first
                .profile_of(target)
                .or_else(|| second.profile_of(target)),
        }
    }

    /// Find and split the leaf with the given id. The existing content stays
    /// in the first child; the new leaf becomes the second child at ratio
    /// 0.5. Returns the new pane id if the target was found.
    fn split_leaf(
        &mut self,
        target: PaneId,
        axis: SplitAxis,
        profile: ProfileId,
    ) -> Option<PaneId> {
        match self {
            PaneNode::Leaf { id, profile: old } if *id == target => {
                let new_id = PaneId::next();
                let original = PaneNode::leaf(*id, *old);
                let new_pane = PaneNode::leaf(new_id, profile);
                *self = PaneNode::split(axis, 0.5, original, new_pane);
                Some(new_id)
            }
            PaneNode::Leaf { .. } => None,
            PaneNode::Split { first, second, .. } => {
                if let Some(id) = first.split_leaf(target, axis, profile) {
                    return Some(id);
                }
                second.split_leaf(target, axis, profile)
            }
        }
    }

    /// Remove the leaf with the given id, collapsing its parent split into
    /// the surviving sibling.
    fn remove_leaf(&mut self, target: PaneId) -> RemoveResult {
        match self {
            PaneNode::Leaf { id, .. } if *id == target => RemoveResult::RemovedSelf,
            PaneNode::Leaf { .. } => RemoveResult::NotFound,
            PaneNode::Split { first, second, .. } => {
                match first.remove_leaf(target) {
                    RemoveResult::RemovedSelf => {
                        // First child was the target; replace self with second
                        let surviving = std::mem::replace(
                            second.as_mut(),
                            PaneNode::Leaf {
                                id: PaneId(0), // placeholder
                                profile: ProfileId(0),
                            },
                        );
                        *self = surviving;
                        RemoveResult::Removed
                    }
                    RemoveResult::Removed => RemoveResult::Removed,
                    RemoveResult::NotFound => match second.remove_leaf(target) {
                        RemoveResult::RemovedSelf => {
                            let surviving = std::mem::replace(
                                first.as_mut(),
                                PaneNode::Leaf {
                                    id: PaneId(0), // placeholder
                                    profile: ProfileId(0),
                                },
                            );
                            *self = surviving;
                            RemoveResult::Removed
                        }
                        other => other,
                    },
                }
            }
        }
    }

    /// Leaf ids of the sibling subtree of the leaf with the given id.
    /// None if no split in this subtree has that leaf as a direct child.
    fn sibling_leaf_ids(&self, target: PaneId) -> Option<Vec<PaneId>> {
        match self {
            PaneNode::Leaf { .. } => None,
            PaneNode::Split { first, second, .. } => {
                if first.pane_id() == Some(target) {
                    return Some(second.leaf_ids());
                }
                if second.pane_id() == Some(target) {
                    return Some(first.leaf_ids());
                }
                first
                    .sibling_leaf_ids(target)
                    .or_else(|| second.sibling_leaf_ids(target))
            }
        }
    }
}

/// Result of a remove_leaf operation.
#[derive(Debug, PartialEq)]
enum RemoveResult {
    /// The node itself was the target and should be replaced by its sibling.
    RemovedSelf,
    /// The target was found and removed within this subtree.
    Removed,
    /// The target was not found in this subtree.
    NotFound,
}

/// Which leaf inherits focus when the focused leaf closes and its sibling
/// collapses into the parent slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPolicy {
    /// The most recently focused leaf inside the surviving sibling subtree,
    /// falling back to the sibling's first leaf in traversal order.
    #[default]
    MostRecentlyUsed,
    /// Always the sibling's first leaf in traversal order.
    FirstLeaf,
}

/// Outcome of closing a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The leaf was removed; the tree still has panes.
    Closed,
    /// The removed leaf was the last one; the tree is now empty.
    TreeEmpty,
    /// No such leaf; nothing was mutated.
    NotFound,
}

/// The pane tree: owns the root node and tracks the single last-focused
/// leaf. Rectangles are never stored here; they are derived per layout
/// pass from the root rect and the ratio chain.
pub struct PaneTree {
    root: Option<PaneNode>,
    focused: Option<PaneId>,
    /// Focus history, most recent last. Drives the MostRecentlyUsed policy.
    history: Vec<PaneId>,
    policy: FocusPolicy,
}

impl PaneTree {
    /// Create a new PaneTree with a single root pane for the given profile.
    pub fn new(profile: ProfileId) -> Self {
        Self::with_policy(profile, FocusPolicy::default())
    }

    /// Create a new PaneTree with an explicit collapse-focus policy.
    pub fn with_policy(profile: ProfileId, policy: FocusPolicy) -> Self {
        let id = PaneId::next();
        Self {
            root: Some(PaneNode::leaf(id, profile)),
            focused: Some(id),
            history: vec![id],
            policy,
        }
    }

    /// Get a reference to the root node, if the tree is non-empty.
    pub fn root(&self) -> Option<&PaneNode> {
        self.root.as_ref()
    }

    /// True once the last leaf has closed.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Get the number of panes.
    pub fn pane_count(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.leaf_count())
    }

    /// Get all leaf pane IDs in traversal order.
    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.root.as_ref().map_or_else(Vec::new, |r| r.leaf_ids())
    }

    /// Get all (PaneId, ProfileId) pairs in traversal order.
    pub fn leaves(&self) -> Vec<(PaneId, ProfileId)> {
        self.root.as_ref().map_or_else(Vec::new, |r| r.leaves())
    }

    /// The leaf currently marked last-focused, or None if the tree is empty.
    pub fn focused_leaf(&self) -> Option<PaneId> {
        self.focused
    }

    /// Profile of the last-focused leaf.
    pub fn focused_profile(&self) -> Option<ProfileId> {
        let focused = self.focused?;
        self.root.as_ref()?.profile_of(focused)
    }

    /// Set focus to a specific pane ID. No-op if the pane doesn't exist.
    pub fn set_focus(&mut self, pane_id: PaneId) {
        if self.root.as_ref().is_some_and(|r| r.contains(pane_id)) {
            self.focused = Some(pane_id);
            self.touch_history(pane_id);
        }
    }

    /// True iff the focused leaf's rectangle can host two children that
    /// both meet the minimum size for the requested axis.
    pub fn can_split(&self, axis: SplitAxis, bounds: Rect, config: &Config) -> bool {
        let Some(root) = self.root.as_ref() else {
            return false;
        };
        let Some(focused) = self.focused else {
            return false;
        };
        let rects = layout::compute_layout(root, bounds, config);
        let Some((_, rect)) = rects.iter().find(|(id, _)| *id == focused) else {
            return false;
        };
        let (extent, min) = match axis {
            SplitAxis::Horizontal => (rect.height, config.layout.min_pane_height),
            SplitAxis::Vertical => (rect.width, config.layout.min_pane_width),
        };
        extent >= 2.0 * min + config.layout.separator_thickness
    }

    /// Split the focused pane along the given axis, placing a new leaf for
    /// `profile` as the second child at ratio 0.5. The new leaf takes focus.
    pub fn split_focused(
        &mut self,
        axis: SplitAxis,
        profile: ProfileId,
        bounds: Rect,
        config: &Config,
    ) -> Result<PaneId, PaneError> {
        let focused = self.focused.ok_or(PaneError::NotFound)?;
        if !self.can_split(axis, bounds, config) {
            return Err(PaneError::InvalidOperation);
        }
        let root = self.root.as_mut().ok_or(PaneError::NotFound)?;
        let new_id = root
            .split_leaf(focused, axis, profile)
            .ok_or(PaneError::NotFound)?;
        self.focused = Some(new_id);
        self.touch_history(new_id);
        Ok(new_id)
    }

    /// Close the leaf with the given id. The sibling replaces the parent
    /// split; if the target held focus, the collapse-focus policy picks the
    /// new focus target within the surviving sibling subtree.
    pub fn close(&mut self, target: PaneId) -> CloseOutcome {
        let Some(root) = self.root.as_mut() else {
            return CloseOutcome::NotFound;
        };

        // Last leaf: the tree becomes empty.
        if root.pane_id() == Some(target) {
            self.root = None;
            self.focused = None;
            self.history.clear();
            return CloseOutcome::TreeEmpty;
        }

        let sibling_ids = root.sibling_leaf_ids(target);
        match root.remove_leaf(target) {
            RemoveResult::Removed => {
                self.history.retain(|id| *id != target);
                if self.focused == Some(target) {
                    // sibling_ids is always Some here: the target had a parent.
                    let sibling_ids = sibling_ids.unwrap_or_default();
                    let next = self.resolve_collapse_focus(&sibling_ids);
                    self.focused = next;
                    if let Some(id) = next {
                        self.touch_history(id);
                    }
                }
                CloseOutcome::Closed
            }
            _ => CloseOutcome::NotFound,
        }
    }

    /// Navigate focus in the given direction. On success the resolved leaf
    /// takes the focus token and its id is returned; at the edge of the
    /// grid this is a no-op returning None.
    pub fn navigate(
        &mut self,
        direction: crate::geometry::Direction,
        bounds: Rect,
        config: &Config,
    ) -> Option<PaneId> {
        let root = self.root.as_ref()?;
        let focused = self.focused?;
        let target = navigate::navigate(root, focused, direction, bounds, config)?;
        self.focused = Some(target);
        self.touch_history(target);
        Some(target)
    }

    /// Move the separator nearest to the focused leaf in the given
    /// direction. Returns false (no-op) when no ancestor split qualifies.
    pub fn resize_separator(
        &mut self,
        direction: crate::geometry::Direction,
        config: &Config,
    ) -> bool {
        let Some(focused) = self.focused else {
            return false;
        };
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        layout::resize_separator(root, focused, direction, config)
    }

    fn resolve_collapse_focus(&self, sibling_ids: &[PaneId]) -> Option<PaneId> {
        if sibling_ids.is_empty() {
            return self.root.as_ref().map(|r| r.first_leaf_id());
        }
        match self.policy {
            FocusPolicy::FirstLeaf => Some(sibling_ids[0]),
            FocusPolicy::MostRecentlyUsed => self
                .history
                .iter()
                .rev()
                .find(|id| sibling_ids.contains(id))
                .copied()
                .or(Some(sibling_ids[0])),
        }
    }

    fn touch_history(&mut self, id: PaneId) {
        self.history.retain(|h| *h != id);
        self.history.push(id);
    }
}
