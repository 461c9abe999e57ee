// Layout engine: derives every leaf rect from the root rect and the ratio
// chain, computes separator geometry, and applies separator resize requests.

use super::{PaneId, PaneNode};
use crate::config::Config;
use crate::geometry::{split_rect, Direction, Rect, SplitAxis};

/// Information about a single separator between split children.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorInfo {
    /// Physical pixel rect of the separator bar.
    pub rect: Rect,
    /// Axis of the split that owns this separator. A vertical split yields
    /// a vertical separator line (resize left/right).
    pub axis: SplitAxis,
    /// Index of the owning split node in pre-order tree walk.
    pub split_index: usize,
}

/// Default hit-test margin in pixels around a separator.
pub const HIT_TEST_MARGIN: f32 = 8.0;

/// Calculate layout rects for all leaf nodes given a bounding rect.
/// Pure and deterministic: the same tree and bounds always yield the same
/// mapping. Returns (PaneId, Rect) pairs in pre-order.
pub fn compute_layout(root: &PaneNode, bounds: Rect, config: &Config) -> Vec<(PaneId, Rect)> {
    match root {
        PaneNode::Leaf { id, .. } => vec![(*id, bounds)],
        PaneNode::Split {
            axis,
            ratio,
            first,
            second,
        } => {
            let (first_bounds, second_bounds) = child_bounds(bounds, *axis, *ratio, config);
            let mut result = compute_layout(first, first_bounds, config);
            result.extend(compute_layout(second, second_bounds, config));
            result
        }
    }
}

/// Sub-rects for a split's children, using the per-axis minimum size.
fn child_bounds(bounds: Rect, axis: SplitAxis, ratio: f32, config: &Config) -> (Rect, Rect) {
    let min = match axis {
        SplitAxis::Horizontal => config.layout.min_pane_height,
        SplitAxis::Vertical => config.layout.min_pane_width,
    };
    split_rect(bounds, axis, ratio, config.layout.separator_thickness, min)
}

/// Calculate separator rects from the pane tree. Walks the tree in
/// pre-order, emitting a SeparatorInfo at each split node.
pub fn separators(root: &PaneNode, bounds: Rect, config: &Config) -> Vec<SeparatorInfo> {
    let mut out = Vec::new();
    let mut split_index = 0;
    collect_separators(root, bounds, config, &mut out, &mut split_index);
    out
}

fn collect_separators(
    node: &PaneNode,
    bounds: Rect,
    config: &Config,
    out: &mut Vec<SeparatorInfo>,
    split_index: &mut usize,
) {
    match node {
        PaneNode::Leaf { .. } => {}
        PaneNode::Split {
            axis,
            ratio,
            first,
            second,
        } => {
            let (first_bounds, second_bounds) = child_bounds(bounds, *axis, *ratio, config);
            let sep = config.layout.separator_thickness;
            let rect = match axis {
                SplitAxis::Vertical => {
                    Rect::new(first_bounds.right(), bounds.y, sep, bounds.height)
                }
                SplitAxis::Horizontal => {
                    Rect::new(bounds.x, first_bounds.bottom(), bounds.width, sep)
                }
            };

            let current_index = *split_index;
            *split_index += 1;

            out.push(SeparatorInfo {
                rect,
                axis: *axis,
                split_index: current_index,
            });

            collect_separators(first, first_bounds, config, out, split_index);
            collect_separators(second, second_bounds, config, out, split_index);
        }
    }
}

/// Hit-test a point against separators, returning the first separator
/// within margin. The margin expands the separator rect on its thin axis.
pub fn hit_test_separator(
    point: (f32, f32),
    separators: &[SeparatorInfo],
    margin: f32,
) -> Option<usize> {
    let (px, py) = point;
    for (i, sep) in separators.iter().enumerate() {
        let r = &sep.rect;
        let expanded = match sep.axis {
            SplitAxis::Vertical => Rect::new(r.x - margin, r.y, r.width + margin * 2.0, r.height),
            SplitAxis::Horizontal => Rect::new(r.x, r.y - margin, r.width, r.height + margin * 2.0),
        };
        if expanded.contains_point(px, py) {
            return Some(i);
        }
    }
    None
}

/// Move the separator adjacent to `target` in the given direction.
///
/// Walks from the leaf upward (re-deriving ancestry from the root, no
/// parent pointers) and adjusts the ratio of the nearest ancestor split
/// whose axis matches the direction and whose separator lies on the
/// requested side of the target leaf. The ratio is clamped to the
/// configured bounds. Returns false when no ancestor qualifies.
pub fn resize_separator(
    root: &mut PaneNode,
    target: PaneId,
    direction: Direction,
    config: &Config,
) -> bool {
    matches!(
        resize_in_subtree(root, target, direction, config),
        SeparatorSearch::Resized
    )
}

enum SeparatorSearch {
    /// A qualifying ancestor was found and its ratio adjusted.
    Resized,
    /// The target leaf is in this subtree but no split here qualified.
    FoundTarget,
    /// The target leaf is not in this subtree.
    NotFound,
}

fn resize_in_subtree(
    node: &mut PaneNode,
    target: PaneId,
    direction: Direction,
    config: &Config,
) -> SeparatorSearch {
    match node {
        PaneNode::Leaf { id, .. } if *id == target => SeparatorSearch::FoundTarget,
        PaneNode::Leaf { .. } => SeparatorSearch::NotFound,
        PaneNode::Split {
            axis,
            ratio,
            first,
            second,
        } => {
            let (result, in_first) = match resize_in_subtree(first, target, direction, config) {
                SeparatorSearch::NotFound => {
                    (resize_in_subtree(second, target, direction, config), false)
                }
                found => (found, true),
            };
            match result {
                SeparatorSearch::Resized => SeparatorSearch::Resized,
                SeparatorSearch::NotFound => SeparatorSearch::NotFound,
                SeparatorSearch::FoundTarget => {
                    // The separator borders the target on the requested side
                    // iff the target sits in the child the direction points
                    // away from.
                    if *axis == direction.axis() && in_first == direction.toward_second() {
                        let delta = if direction.toward_second() {
                            config.resize.increment
                        } else {
                            -config.resize.increment
                        };
                        *ratio =
                            (*ratio + delta).clamp(config.resize.ratio_min, config.resize.ratio_max);
                        SeparatorSearch::Resized
                    } else {
                        SeparatorSearch::FoundTarget
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::ProfileId;

    fn cfg() -> Config {
        Config::default()
    }

    /// Config with no separator gap, for exact-arithmetic assertions.
    fn cfg_no_gap() -> Config {
        let mut c = Config::default();
        c.layout.separator_thickness = 0.0;
        c
    }

    fn leaf(id: u32) -> PaneNode {
        PaneNode::leaf(PaneId(id), ProfileId(0))
    }

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 720.0)
    }

    // ── compute_layout tests ─────────────────────────────────────────

    #[test]
    fn single_leaf_gets_full_rect() {
        let root = leaf(1);
        let layout = compute_layout(&root, bounds(), &cfg());
        assert_eq!(layout, vec![(PaneId(1), bounds())]);
    }

    #[test]
    fn vertical_split_divides_width_by_ratio() {
        let root = PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2));
        let layout = compute_layout(&root, bounds(), &cfg_no_gap());
        assert_eq!(layout[0].1, Rect::new(0.0, 0.0, 640.0, 720.0));
        assert_eq!(layout[1].1, Rect::new(640.0, 0.0, 640.0, 720.0));
    }

    #[test]
    fn horizontal_split_divides_height_by_ratio() {
        let root = PaneNode::split(SplitAxis::Horizontal, 0.5, leaf(1), leaf(2));
        let layout = compute_layout(&root, bounds(), &cfg_no_gap());
        assert_eq!(layout[0].1, Rect::new(0.0, 0.0, 1280.0, 360.0));
        assert_eq!(layout[1].1, Rect::new(0.0, 360.0, 1280.0, 360.0));
    }

    #[test]
    fn separator_thickness_subtracted_from_extent() {
        // 100x100 at ratio 0.5 with a 2px separator: two 49-wide children.
        let root = PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2));
        let layout = compute_layout(&root, Rect::new(0.0, 0.0, 100.0, 100.0), &cfg());
        assert_eq!(layout[0].1, Rect::new(0.0, 0.0, 49.0, 100.0));
        assert_eq!(layout[1].1, Rect::new(51.0, 0.0, 49.0, 100.0));
    }

    #[test]
    fn nested_splits_tile_the_root_rect() {
        let root = PaneNode::split(
            SplitAxis::Vertical,
            0.5,
            leaf(1),
            PaneNode::split(SplitAxis::Horizontal, 0.5, leaf(2), leaf(3)),
        );
        let layout = compute_layout(&root, bounds(), &cfg_no_gap());
        assert_eq!(layout.len(), 3);
        let total_area: f32 = layout.iter().map(|(_, r)| r.width * r.height).sum();
        assert!((total_area - 1280.0 * 720.0).abs() < 1.0);
    }

    #[test]
    fn layout_is_deterministic_and_idempotent() {
        let root = PaneNode::split(
            SplitAxis::Horizontal,
            0.3,
            leaf(1),
            PaneNode::split(SplitAxis::Vertical, 0.7, leaf(2), leaf(3)),
        );
        let a = compute_layout(&root, bounds(), &cfg());
        let b = compute_layout(&root, bounds(), &cfg());
        assert_eq!(a, b);
    }

    #[test]
    fn new_bounds_rescale_without_touching_ratios() {
        let root = PaneNode::split(SplitAxis::Vertical, 0.25, leaf(1), leaf(2));
        let small = compute_layout(&root, Rect::new(0.0, 0.0, 400.0, 300.0), &cfg_no_gap());
        let large = compute_layout(&root, Rect::new(0.0, 0.0, 800.0, 600.0), &cfg_no_gap());
        assert_eq!(small[0].1.width, 100.0);
        assert_eq!(large[0].1.width, 200.0);
    }

    #[test]
    fn min_size_clamps_extreme_ratio_in_layout() {
        let root = PaneNode::split(SplitAxis::Vertical, 0.01, leaf(1), leaf(2));
        let layout = compute_layout(&root, Rect::new(0.0, 0.0, 100.0, 100.0), &cfg_no_gap());
        for (_, rect) in &layout {
            assert!(rect.width >= 19.9, "pane width {} below minimum", rect.width);
        }
    }

    // ── separators tests ─────────────────────────────────────────────

    #[test]
    fn single_leaf_has_no_separators() {
        let root = leaf(1);
        assert!(separators(&root, bounds(), &cfg()).is_empty());
    }

    #[test]
    fn vertical_split_produces_one_vertical_separator() {
        let root = PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2));
        let seps = separators(&root, Rect::new(0.0, 0.0, 102.0, 100.0), &cfg());
        assert_eq!(seps.len(), 1);
        assert_eq!(seps[0].axis, SplitAxis::Vertical);
        // First child is 50 wide; the 2px separator starts right after it.
        assert_eq!(seps[0].rect, Rect::new(50.0, 0.0, 2.0, 100.0));
    }

    #[test]
    fn horizontal_separator_spans_only_its_subtree() {
        // [A | [B / C]] — horizontal separator spans the right half only.
        let root = PaneNode::split(
            SplitAxis::Vertical,
            0.5,
            leaf(1),
            PaneNode::split(SplitAxis::Horizontal, 0.5, leaf(2), leaf(3)),
        );
        let seps = separators(&root, bounds(), &cfg());
        assert_eq!(seps.len(), 2);
        let h = &seps[1];
        assert_eq!(h.axis, SplitAxis::Horizontal);
        // Right half starts at 639 + 2 separator
        assert_eq!(h.rect.x, 641.0);
        assert_eq!(h.rect.width, 639.0);
    }

    #[test]
    fn split_index_increments_in_preorder() {
        let root = PaneNode::split(
            SplitAxis::Horizontal,
            0.5,
            PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2)),
            leaf(3),
        );
        let seps = separators(&root, bounds(), &cfg());
        assert_eq!(seps[0].split_index, 0); // root horizontal
        assert_eq!(seps[0].axis, SplitAxis::Horizontal);
        assert_eq!(seps[1].split_index, 1); // inner vertical
        assert_eq!(seps[1].axis, SplitAxis::Vertical);
    }

    // ── hit_test_separator tests ─────────────────────────────────────

    fn vertical_seps() -> Vec<SeparatorInfo> {
        let root = PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2));
        separators(&root, bounds(), &cfg())
    }

    #[test]
    fn hit_test_on_separator_returns_index() {
        let seps = vertical_seps();
        assert_eq!(hit_test_separator((640.0, 360.0), &seps, HIT_TEST_MARGIN), Some(0));
    }

    #[test]
    fn hit_test_within_margin_returns_index() {
        let seps = vertical_seps();
        assert_eq!(hit_test_separator((635.0, 360.0), &seps, HIT_TEST_MARGIN), Some(0));
    }

    #[test]
    fn hit_test_outside_margin_returns_none() {
        let seps = vertical_seps();
        assert_eq!(hit_test_separator((600.0, 360.0), &seps, HIT_TEST_MARGIN), None);
    }

    #[test]
    fn hit_test_beyond_separator_length_returns_none() {
        let seps = vertical_seps();
        assert_eq!(hit_test_separator((640.0, 800.0), &seps, HIT_TEST_MARGIN), None);
    }

    #[test]
    fn hit_test_empty_separators_returns_none() {
        assert_eq!(hit_test_separator((640.0, 360.0), &[], HIT_TEST_MARGIN), None);
    }

    // ── resize_separator tests ───────────────────────────────────────

    fn root_ratio(node: &PaneNode) -> f32 {
        match node {
            PaneNode::Split { ratio, .. } => *ratio,
            PaneNode::Leaf { .. } => panic!("expected split"),
        }
    }

    #[test]
    fn focused_in_first_child_resizes_toward_second() {
        // [1 | 2], focus 1: separator is to its right, Right moves it right.
        let mut root = PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2));
        assert!(resize_separator(&mut root, PaneId(1), Direction::Right, &cfg()));
        assert!((root_ratio(&root) - 0.55).abs() < 0.0001);
    }

    #[test]
    fn focused_in_second_child_resizes_toward_first() {
        // [1 | 2], focus 2: separator is to its left, Left moves it left.
        let mut root = PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2));
        assert!(resize_separator(&mut root, PaneId(2), Direction::Left, &cfg()));
        assert!((root_ratio(&root) - 0.45).abs() < 0.0001);
    }

    #[test]
    fn direction_away_from_separator_is_noop() {
        // [1 | 2], focus 1: no separator on its left.
        let mut root = PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2));
        assert!(!resize_separator(&mut root, PaneId(1), Direction::Left, &cfg()));
        assert_eq!(root_ratio(&root), 0.5);
    }

    #[test]
    fn axis_mismatch_is_noop() {
        let mut root = PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2));
        assert!(!resize_separator(&mut root, PaneId(1), Direction::Down, &cfg()));
        assert_eq!(root_ratio(&root), 0.5);
    }

    #[test]
    fn nearest_matching_ancestor_wins() {
        // [[1 | 2] | 3], focus 2: Right should move the inner separator?
        // No — 2 is the second child of the inner split, so its right-hand
        // separator belongs to the outer split.
        let mut root = PaneNode::split(
            SplitAxis::Vertical,
            0.5,
            PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2)),
            leaf(3),
        );
        assert!(resize_separator(&mut root, PaneId(2), Direction::Right, &cfg()));
        assert!((root_ratio(&root) - 0.55).abs() < 0.0001);
        match &root {
            PaneNode::Split { first, .. } => {
                assert_eq!(root_ratio(first), 0.5, "inner split untouched");
            }
            PaneNode::Leaf { .. } => unreachable!(),
        }
    }

    #[test]
    fn inner_separator_preferred_when_adjacent() {
        // [[1 | 2] | 3], focus 2, Left: the inner separator is on 2's left.
        let mut root = PaneNode::split(
            SplitAxis::Vertical,
            0.5,
            PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2)),
            leaf(3),
        );
        assert!(resize_separator(&mut root, PaneId(2), Direction::Left, &cfg()));
        assert_eq!(root_ratio(&root), 0.5, "outer split untouched");
        match &root {
            PaneNode::Split { first, .. } => {
                assert!((root_ratio(first) - 0.45).abs() < 0.0001);
            }
            PaneNode::Leaf { .. } => unreachable!(),
        }
    }

    #[test]
    fn crossing_axes_walks_to_matching_ancestor() {
        // [1 | [2 / 3]], focus 3, Left: the horizontal split doesn't match,
        // the vertical root does and 3 is on its second side.
        let mut root = PaneNode::split(
            SplitAxis::Vertical,
            0.5,
            leaf(1),
            PaneNode::split(SplitAxis::Horizontal, 0.5, leaf(2), leaf(3)),
        );
        assert!(resize_separator(&mut root, PaneId(3), Direction::Left, &cfg()));
        assert!((root_ratio(&root) - 0.45).abs() < 0.0001);
    }

    #[test]
    fn ratio_clamped_at_configured_bounds() {
        let mut root = PaneNode::split(SplitAxis::Vertical, 0.88, leaf(1), leaf(2));
        assert!(resize_separator(&mut root, PaneId(1), Direction::Right, &cfg()));
        assert_eq!(root_ratio(&root), 0.9);
        // Further requests stay pinned at the bound
        assert!(resize_separator(&mut root, PaneId(1), Direction::Right, &cfg()));
        assert_eq!(root_ratio(&root), 0.9);
    }

    #[test]
    fn missing_target_is_noop() {
        let mut root = PaneNode::split(SplitAxis::Vertical, 0.5, leaf(1), leaf(2));
        assert!(!resize_separator(&mut root, PaneId(99), Direction::Right, &cfg()));
        assert_eq!(root_ratio(&root), 0.5);
    }
}
