//! Pointer gesture state machine that turns pointer events into window moves and resizes.
//!
//! A gesture starts on pointer-down over a title bar or resize handle and lasts until
//! pointer-up, wherever that lands. Every move recomputes geometry from the anchor recorded at
//! gesture start and the pointer's current absolute position, so coalesced move events only
//! reduce the number of intermediate updates, not the final result.

use crate::model::{Point, PointerPosition, Size};
use crate::viewport::ViewportMetrics;
use crate::window_manager::WindowManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: String,
    /// Pointer position minus the window's top-left at gesture start.
    pub pointer_offset: Point,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: String,
    pub size_start: Size,
    pub pointer_start: PointerPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PointerGesture {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

#[derive(Debug, Clone, Default)]
pub struct PointerInteractionController {
    gesture: PointerGesture,
}

impl PointerInteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &PointerGesture {
        &self.gesture
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, PointerGesture::Idle)
    }

    /// Pointer-down on a title bar.
    ///
    /// Focuses and raises the window before anchoring the drag. Returns `false` without touching
    /// anything when the window cannot be dragged (absent, minimized, maximized, mobile layout)
    /// or another gesture is already running.
    pub fn begin_drag(
        &mut self,
        manager: &mut WindowManager,
        window_id: &str,
        pointer: PointerPosition,
        viewport: ViewportMetrics,
    ) -> bool {
        if !self.can_start(manager, window_id, viewport) {
            return false;
        }
        manager.focus_window(window_id);
        let Some(window) = manager.get_window(window_id) else {
            return false;
        };
        self.gesture = PointerGesture::Dragging(DragSession {
            window_id: window_id.to_string(),
            pointer_offset: Point::new(
                pointer.x.saturating_sub(window.position.x),
                pointer.y.saturating_sub(window.position.y),
            ),
        });
        true
    }

    /// Pointer-down on a resize handle. Same exclusions as [`Self::begin_drag`].
    pub fn begin_resize(
        &mut self,
        manager: &mut WindowManager,
        window_id: &str,
        pointer: PointerPosition,
        viewport: ViewportMetrics,
    ) -> bool {
        if !self.can_start(manager, window_id, viewport) {
            return false;
        }
        manager.focus_window(window_id);
        let Some(window) = manager.get_window(window_id) else {
            return false;
        };
        self.gesture = PointerGesture::Resizing(ResizeSession {
            window_id: window_id.to_string(),
            size_start: window.size,
            pointer_start: pointer,
        });
        true
    }

    /// Pointer-move anywhere in the document. Ignored while idle or when the gesture's window
    /// has gone away.
    pub fn pointer_move(
        &mut self,
        manager: &mut WindowManager,
        pointer: PointerPosition,
        viewport: ViewportMetrics,
    ) {
        match &self.gesture {
            PointerGesture::Idle => {}
            PointerGesture::Dragging(session) => {
                let Some(window) = manager.get_window(&session.window_id) else {
                    return;
                };
                let position = drag_position(session, window.size, pointer, viewport);
                manager.move_window(&session.window_id, position);
            }
            PointerGesture::Resizing(session) => {
                let Some(window) = manager.get_window(&session.window_id) else {
                    return;
                };
                let size = resize_size(session, window.position, window.min_size, pointer, viewport);
                manager.resize_window(&session.window_id, size);
            }
        }
    }

    /// Pointer-up ends whatever gesture is running.
    pub fn pointer_up(&mut self) {
        self.gesture = PointerGesture::Idle;
    }

    fn can_start(&self, manager: &WindowManager, window_id: &str, viewport: ViewportMetrics) -> bool {
        if self.is_active() || viewport.layout_mode().is_mobile() {
            return false;
        }
        manager
            .get_window(window_id)
            .is_some_and(|w| !w.is_maximized && !w.is_minimized)
    }
}

/// Clamps `value` into `[0, limit]`, with the upper bound floored at 0 when the window is larger
/// than the viewport.
fn clamp_axis(value: i32, limit: i32) -> i32 {
    value.clamp(0, limit.max(0))
}

fn drag_position(
    session: &DragSession,
    size: Size,
    pointer: PointerPosition,
    viewport: ViewportMetrics,
) -> Point {
    Point::new(
        clamp_axis(
            pointer.x.saturating_sub(session.pointer_offset.x),
            viewport.width.saturating_sub(size.width),
        ),
        clamp_axis(
            pointer.y.saturating_sub(session.pointer_offset.y),
            viewport.height.saturating_sub(size.height),
        ),
    )
}

fn resize_size(
    session: &ResizeSession,
    origin: Point,
    min_size: Size,
    pointer: PointerPosition,
    viewport: ViewportMetrics,
) -> Size {
    let max_width = viewport.width.saturating_sub(origin.x).max(min_size.width);
    let max_height = viewport.height.saturating_sub(origin.y).max(min_size.height);
    let width = session
        .size_start
        .width
        .saturating_add(pointer.x.saturating_sub(session.pointer_start.x));
    let height = session
        .size_start
        .height
        .saturating_add(pointer.y.saturating_sub(session.pointer_start.y));
    Size::new(
        width.clamp(min_size.width, max_width),
        height.clamp(min_size.height, max_height),
    )
}
