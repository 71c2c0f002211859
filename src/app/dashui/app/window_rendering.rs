//! Tool window, help window and title handling

use super::ToolsApp;
use crate::app::dashui::window_focus::FocusableWindow;
use crate::app::title_template::{render_title, TitleContext, APP_NAME};
use crate::app::tools::{lock, LINK_XML_TAB};
use crate::trace_debug;
use eframe::egui;

impl ToolsApp {
    /// Open `window_id` and bring it to the front on the next frame
    pub fn focus_window(&mut self, window_id: &str) {
        self.window_focus_manager
            .request_focus(window_id.to_string());

        if window_id == self.help_window.window_id() {
            self.help_window.open = true;
            return;
        }

        match self.tool_window_mut(window_id) {
            Some(window) => {
                window.open();
                self.active_window = Some(window_id.to_string());
            }
            None => {
                trace_debug!("focus_window: unknown window '{}'", window_id);
            }
        }
    }

    pub(super) fn handle_tool_windows(&mut self, ctx: &egui::Context) {
        for window in &mut self.tool_windows {
            let was_open = window.open;
            self.window_focus_manager.show_window(window, ctx, ());

            if was_open && !window.open && self.active_window.as_deref() == Some(window.window_name())
            {
                self.active_window = None;
            }
            self.window_selector
                .update_window_visibility(window.window_id(), window.is_open());
        }
    }

    pub(super) fn handle_help_window(&mut self, ctx: &egui::Context) {
        self.window_focus_manager
            .show_window(&mut self.help_window, ctx, ());
        self.window_selector
            .update_window_visibility(self.help_window.window_id(), self.help_window.is_open());
    }

    /// Turn warnings raised by tool windows into toasts
    pub(super) fn collect_tool_window_warnings(&mut self) {
        for window in &mut self.tool_windows {
            for warning in window.take_warnings() {
                self.notification_manager
                    .add_tool_window_warning(window.window_name(), &warning);
            }
        }
    }

    fn active_window_name(&self) -> &str {
        self.active_window.as_deref().unwrap_or(APP_NAME)
    }

    /// Report link.xml updates as toasts and serve save requests from the editor
    pub(super) fn handle_link_xml_requests(&mut self) {
        let mut state = lock(&self.link_xml_state);
        let report = state.take_report();
        let save_now = state.take_save_request();
        drop(state);

        match report {
            Some(Ok(update)) => {
                self.notification_manager
                    .add_info(LINK_XML_TAB, "link.xml updated", update.to_string());
            }
            Some(Err(e)) => {
                self.notification_manager
                    .add_error(LINK_XML_TAB, "link.xml update failed", e);
            }
            None => {}
        }
        if save_now {
            self.save_config();
        }
    }

    /// Keep the viewport title in sync with the template and serve editor requests
    pub(super) fn handle_title(&mut self, ctx: &egui::Context) {
        let branch = lock(&self.git).branch();
        let context = TitleContext::current(self.active_window_name(), branch);

        let mut state = lock(&self.title_state);
        state.preview_context = context.clone();

        let apply_now = state.take_apply_request();
        if apply_now {
            self.title_applier.invalidate();
        }
        if state.settings.auto_update || apply_now {
            let title = render_title(&state.settings.template, &context);
            self.title_applier.apply(ctx, title);
        }

        let save_now = state.take_save_request();
        drop(state);
        if save_now {
            self.save_config();
        }
    }
}
