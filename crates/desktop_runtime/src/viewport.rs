//! Viewport metrics and the desktop/mobile layout switch derived from them.

/// Viewports narrower than this use the stacked mobile layout.
pub const MOBILE_BREAKPOINT_PX: i32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportMetrics {
    pub width: i32,
    pub height: i32,
}

impl ViewportMetrics {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Samples the host viewport right now.
    pub fn from_host() -> Self {
        let (width, height) = platform_host_web::viewport_metrics();
        Self { width, height }
    }

    pub fn layout_mode(self) -> LayoutMode {
        LayoutMode::from_viewport(self)
    }
}

/// How windows are laid out: free-floating frames, or a vertical stack with no pointer geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    Desktop,
    Mobile,
}

impl LayoutMode {
    pub fn from_viewport(viewport: ViewportMetrics) -> Self {
        if viewport.width < MOBILE_BREAKPOINT_PX {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}
