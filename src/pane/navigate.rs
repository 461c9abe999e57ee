// Navigator: resolves directional focus moves by geometric adjacency over
// the derived leaf rects.

use super::layout::compute_layout;
use super::{PaneId, PaneNode};
use crate::config::Config;
use crate::geometry::{Direction, Rect};

/// Edge distances closer together than this are considered tied, so the
/// center-distance tie-break decides (separators put small gaps between
/// otherwise-aligned edges).
const EDGE_TOLERANCE: f32 = 0.5;

/// Find the leaf adjacent to `focused` in the given direction.
///
/// A candidate is eligible when its rect lies strictly on the requested
/// side of the focused rect's edge and the two rects' projections onto the
/// perpendicular axis overlap by a nonzero amount. Among eligible
/// candidates the nearest edge wins; ties fall to the smallest squared
/// center distance. Pure: safe to call from any thread. Returns None at
/// the edge of the grid.
pub fn navigate(
    root: &PaneNode,
    focused: PaneId,
    direction: Direction,
    bounds: Rect,
    config: &Config,
) -> Option<PaneId> {
    let layout = compute_layout(root, bounds, config);
    let (_, from) = *layout.iter().find(|(id, _)| *id == focused)?;
    let (fcx, fcy) = from.center();

    let mut best: Option<(PaneId, f32, f32)> = None;

    for &(id, rect) in &layout {
        if id == focused {
            continue;
        }

        let edge_distance = match direction {
            Direction::Right => rect.left() - from.right(),
            Direction::Left => from.left() - rect.right(),
            Direction::Down => rect.top() - from.bottom(),
            Direction::Up => from.top() - rect.bottom(),
        };
        if edge_distance < 0.0 {
            continue;
        }
        if perpendicular_overlap(&from, &rect, direction) <= 0.0 {
            continue;
        }

        let (cx, cy) = rect.center();
        let center_dist2 = (cx - fcx).powi(2) + (cy - fcy).powi(2);

        let better = match best {
            None => true,
            Some((_, best_edge, best_center)) => {
                if edge_distance < best_edge - EDGE_TOLERANCE {
                    true
                } else if edge_distance <= best_edge + EDGE_TOLERANCE {
                    center_dist2 < best_center
                } else {
                    false
                }
            }
        };
        if better {
            best = Some((id, edge_distance, center_dist2));
        }
    }

    best.map(|(id, _, _)| id)
}

/// Overlap of the two rects' projections onto the axis perpendicular to
/// the direction of travel.
fn perpendicular_overlap(from: &Rect, other: &Rect, direction: Direction) -> f32 {
    match direction {
        Direction::Left | Direction::Right => {
            from.bottom().min(other.bottom()) - from.top().max(other.top())
        }
        Direction::Up | Direction::Down => {
            from.right().min(other.right()) - from.left().max(other.left())
        }
    }
}
