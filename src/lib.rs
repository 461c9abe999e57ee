// Layout core for a tabbed terminal multiplexer: recursive split trees,
// derived pane rectangles, focus tracking, and tab orchestration.

pub mod config;
pub mod geometry;
pub mod pane;
pub mod surface;
pub mod tab;

pub use config::{Config, ConfigError, FocusConfig, LayoutConfig, ResizeConfig};
pub use geometry::{Direction, Rect, Size, SplitAxis};
pub use pane::layout::{compute_layout, hit_test_separator, SeparatorInfo};
pub use pane::navigate::navigate;
pub use pane::{CloseOutcome, FocusPolicy, PaneError, PaneId, PaneNode, PaneTree, ProfileId};
pub use surface::{ContentSurface, SurfaceSettings};
pub use tab::{Tab, TabId};
