//! Sidebar divider drag handling.
//!
//! Pointer input is reduced to [`DividerInput`] events so the drag logic can be
//! driven without an egui context.

use eframe::egui;

/// Pixels of the handle that sit left of the divider line
const HANDLE_LEAD: f32 = 2.0;

/// Pointer events relevant to the divider, positions relative to the window's left edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DividerInput {
    Pressed(egui::Pos2),
    Dragged(egui::Pos2),
    Released,
}

/// Limits applied while dragging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthBounds {
    pub min_sidebar_width: f32,
    pub min_content_width: f32,
    pub window_width: f32,
}

impl WidthBounds {
    /// Clamp to `[min_sidebar_width, window_width - min_content_width]`.
    ///
    /// When the window is too narrow for both minimums the sidebar minimum wins.
    pub fn clamp(&self, width: f32) -> f32 {
        let max = (self.window_width - self.min_content_width).max(self.min_sidebar_width);
        width.clamp(self.min_sidebar_width, max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SidebarResize {
    width: f32,
    resizing: bool,
    handle_width: f32,
}

impl SidebarResize {
    pub fn new(width: f32, handle_width: f32) -> Self {
        Self {
            width,
            resizing: false,
            handle_width,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    pub fn handle_width(&self) -> f32 {
        self.handle_width
    }

    /// Grab area around the divider line, spanning `height` from the top
    pub fn handle_rect(&self, height: f32) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.width - HANDLE_LEAD, 0.0),
            egui::vec2(self.handle_width, height),
        )
    }

    /// Advance the drag state machine by one pointer event.
    ///
    /// Returns `true` when the width changed.
    pub fn handle_input(&mut self, input: DividerInput, height: f32, bounds: WidthBounds) -> bool {
        match input {
            DividerInput::Pressed(pos) => {
                if self.handle_rect(height).contains(pos) {
                    self.resizing = true;
                }
                false
            }
            DividerInput::Dragged(pos) => {
                if !self.resizing {
                    return false;
                }
                let width = bounds.clamp(pos.x);
                let changed = width != self.width;
                self.width = width;
                changed
            }
            DividerInput::Released => {
                self.resizing = false;
                false
            }
        }
    }

    /// Re-apply the bounds without a drag, e.g. after the window shrank
    pub fn constrain(&mut self, bounds: WidthBounds) {
        self.width = bounds.clamp(self.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> WidthBounds {
        WidthBounds {
            min_sidebar_width: 100.0,
            min_content_width: 200.0,
            window_width: 800.0,
        }
    }

    #[test]
    fn test_drag_below_minimum_clamps() {
        let mut resize = SidebarResize::new(200.0, 5.0);

        resize.handle_input(DividerInput::Pressed(egui::pos2(200.0, 40.0)), 300.0, bounds());
        assert!(resize.is_resizing());

        resize.handle_input(DividerInput::Dragged(egui::pos2(50.0, 40.0)), 300.0, bounds());
        assert_eq!(resize.width(), 100.0);
    }

    #[test]
    fn test_drag_above_maximum_clamps() {
        let mut resize = SidebarResize::new(200.0, 5.0);
        resize.handle_input(DividerInput::Pressed(egui::pos2(199.0, 10.0)), 300.0, bounds());
        resize.handle_input(DividerInput::Dragged(egui::pos2(790.0, 10.0)), 300.0, bounds());
        assert_eq!(resize.width(), 600.0);
    }

    #[test]
    fn test_press_outside_handle_does_not_arm() {
        let mut resize = SidebarResize::new(200.0, 5.0);
        resize.handle_input(DividerInput::Pressed(egui::pos2(150.0, 10.0)), 300.0, bounds());
        assert!(!resize.is_resizing());

        let changed =
            resize.handle_input(DividerInput::Dragged(egui::pos2(300.0, 10.0)), 300.0, bounds());
        assert!(!changed);
        assert_eq!(resize.width(), 200.0);
    }

    #[test]
    fn test_release_always_disarms() {
        let mut resize = SidebarResize::new(200.0, 5.0);
        resize.handle_input(DividerInput::Pressed(egui::pos2(201.0, 10.0)), 300.0, bounds());
        resize.handle_input(DividerInput::Dragged(egui::pos2(-40.0, 900.0)), 300.0, bounds());
        resize.handle_input(DividerInput::Released, 300.0, bounds());
        assert!(!resize.is_resizing());

        resize.handle_input(DividerInput::Dragged(egui::pos2(400.0, 10.0)), 300.0, bounds());
        assert_eq!(resize.width(), 100.0);
    }

    #[test]
    fn test_narrow_window_keeps_sidebar_minimum() {
        let narrow = WidthBounds {
            window_width: 250.0,
            ..bounds()
        };
        assert_eq!(narrow.clamp(180.0), 100.0);
        assert_eq!(narrow.clamp(20.0), 100.0);

        let mut resize = SidebarResize::new(240.0, 5.0);
        resize.constrain(narrow);
        assert_eq!(resize.width(), 100.0);
    }
}
