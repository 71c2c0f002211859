//! Window focus management.
//!
//! Windows implement [`FocusableWindow`] so the window selector can bring any of
//! them to the front the same way. Tool windows use their window name as id, so
//! ids are borrowed from the window rather than being static strings.

use eframe::egui;

/// Trait for windows that can be brought to the foreground
///
/// # Example
/// ```rust,ignore
/// impl FocusableWindow for HelpWindow {
///     type ShowParams = ();
///
///     fn window_id(&self) -> &str { "help_window" }
///     fn window_title(&self) -> String { "Help".to_string() }
///     fn is_open(&self) -> bool { self.open }
///
///     fn show_with_focus(&mut self, ctx: &egui::Context, _params: (), bring_to_front: bool) {
///         let window = egui::Window::new("Help").resizable(true);
///         WindowFocusManager::apply_focus_order(window, bring_to_front).show(ctx, |ui| {
///             // Window content...
///         });
///     }
/// }
/// ```
pub trait FocusableWindow {
    /// Parameters required for the show method
    type ShowParams;

    /// Unique identifier, matching the id registered with the window selector
    fn window_id(&self) -> &str;

    /// Title shown in the title bar and the window selector
    fn window_title(&self) -> String;

    fn is_open(&self) -> bool;

    /// Show the window; `bring_to_front` draws it with `egui::Order::Foreground`
    fn show_with_focus(
        &mut self,
        ctx: &egui::Context,
        params: Self::ShowParams,
        bring_to_front: bool,
    );
}

/// Tracks which window should be brought to the front on the next frame
#[derive(Default)]
pub struct WindowFocusManager {
    bring_to_front_window: Option<String>,
}

impl WindowFocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_focus(&mut self, window_id: String) {
        self.bring_to_front_window = Some(window_id);
    }

    pub fn should_bring_to_front(&self, window_id: &str) -> bool {
        self.bring_to_front_window.as_deref() == Some(window_id)
    }

    /// Clear the request once `window_id` has been shown in front
    pub fn clear_bring_to_front(&mut self, window_id: &str) {
        if self.should_bring_to_front(window_id) {
            self.bring_to_front_window = None;
        }
    }

    /// Show `window` through its [`FocusableWindow`] impl, honouring and clearing
    /// any pending focus request for it
    pub fn show_window<W>(&mut self, window: &mut W, ctx: &egui::Context, params: W::ShowParams)
    where
        W: FocusableWindow,
    {
        let bring_to_front = self.should_bring_to_front(window.window_id());
        window.show_with_focus(ctx, params, bring_to_front);
        if bring_to_front {
            self.clear_bring_to_front(window.window_id());
        }
    }

    pub fn apply_focus_order(window: egui::Window<'_>, bring_to_front: bool) -> egui::Window<'_> {
        if bring_to_front {
            window.order(egui::Order::Foreground)
        } else {
            window
        }
    }
}

/// Parameters for windows that need no additional data
pub type SimpleShowParams = ();

/// Implement [`FocusableWindow`] for a window with a boolean open flag and a
/// `show_with_focus(ctx, bring_to_front)` method
macro_rules! impl_simple_focusable_window {
    ($window_type:ty, $window_id:expr, $window_title:expr, $open_field:ident, $show_method:ident) => {
        impl crate::app::dashui::window_focus::FocusableWindow for $window_type {
            type ShowParams = crate::app::dashui::window_focus::SimpleShowParams;

            fn window_id(&self) -> &str {
                $window_id
            }

            fn window_title(&self) -> String {
                $window_title.to_string()
            }

            fn is_open(&self) -> bool {
                self.$open_field
            }

            fn show_with_focus(
                &mut self,
                ctx: &eframe::egui::Context,
                _params: Self::ShowParams,
                bring_to_front: bool,
            ) {
                self.$show_method(ctx, bring_to_front);
            }
        }
    };
}

pub(crate) use impl_simple_focusable_window;
