// Content-surface seam: the one interface the layout core needs from the
// hosted terminal session.

/// Settings forwarded to matching surfaces by `Tab::update_settings`. The
/// core never interprets these; the surface decides what to do with them.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSettings {
    /// Scrollback buffer length in lines.
    pub scrollback_lines: u32,
    /// Font size in points.
    pub font_size: f32,
    /// Name of the color theme to apply.
    pub theme: String,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            scrollback_lines: 10_000,
            font_size: 14.0,
            theme: "default".to_string(),
        }
    }
}

/// An interactive content surface hosted by one pane leaf.
///
/// The tab drives these calls; the close notification travels the other
/// way (the embedding layer observes the surface exiting and calls
/// `Tab::close_pane`).
pub trait ContentSurface {
    /// Accept input focus.
    fn focus(&mut self);

    /// Scroll the viewport by `delta` lines; negative moves up. The
    /// surface decides how (or whether) to honor the request.
    fn scroll_viewport(&mut self, delta: i32);

    /// Apply a new settings snapshot.
    fn update_settings(&mut self, settings: &SurfaceSettings);
}
