// Pure geometry for the pane layout core: rects, axes, ratio clamping.

/// Axis of a split in the pane tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Horizontal split: children stacked top/bottom (divides height).
    Horizontal,
    /// Vertical split: children side by side left/right (divides width).
    Vertical,
}

/// Compass direction for focus navigation and separator resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The split axis whose separator this direction can move or cross.
    pub fn axis(self) -> SplitAxis {
        match self {
            Direction::Up | Direction::Down => SplitAxis::Horizontal,
            Direction::Left | Direction::Right => SplitAxis::Vertical,
        }
    }

    /// Whether this direction points from a split's first child toward its
    /// second (down or right in screen coordinates).
    pub fn toward_second(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }
}

/// A two-dimensional extent in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A rectangle in physical pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin covering the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if a point (px, py) is inside this rectangle.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Center point of this rectangle.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Split a rect into two sub-rects along an axis with a given ratio.
/// The separator thickness is removed from the extent before division, so
/// the two children plus the separator exactly tile the input rect. The
/// ratio is clamped so neither child is smaller than `min_size` pixels.
pub fn split_rect(
    bounds: Rect,
    axis: SplitAxis,
    ratio: f32,
    separator: f32,
    min_size: f32,
) -> (Rect, Rect) {
    match axis {
        SplitAxis::Vertical => {
            let usable = (bounds.width - separator).max(0.0);
            let clamped_ratio = clamp_ratio(ratio, usable, min_size);
            let first_w = usable * clamped_ratio;
            let second_w = usable - first_w;
            (
                Rect::new(bounds.x, bounds.y, first_w, bounds.height),
                Rect::new(
                    bounds.x + first_w + separator.min(bounds.width),
                    bounds.y,
                    second_w,
                    bounds.height,
                ),
            )
        }
        SplitAxis::Horizontal => {
            let usable = (bounds.height - separator).max(0.0);
            let clamped_ratio = clamp_ratio(ratio, usable, min_size);
            let first_h = usable * clamped_ratio;
            let second_h = usable - first_h;
            (
                Rect::new(bounds.x, bounds.y, bounds.width, first_h),
                Rect::new(
                    bounds.x,
                    bounds.y + first_h + separator.min(bounds.height),
                    bounds.width,
                    second_h,
                ),
            )
        }
    }
}

/// Clamp a split ratio so neither side is smaller than min_size.
pub fn clamp_ratio(ratio: f32, total: f32, min_size: f32) -> f32 {
    if total <= 0.0 || total < 2.0 * min_size {
        return 0.5; // Can't satisfy constraint; split evenly
    }
    let min_ratio = min_size / total;
    let max_ratio = 1.0 - min_ratio;
    ratio.clamp(min_ratio, max_ratio)
}
