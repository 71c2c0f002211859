//! Tool window composition.
//!
//! A [`ToolWindow`] owns everything one window needs: the tabs discovered for it,
//! the selection, the sidebar tree, divider and scroll state. Nothing is shared
//! between windows, including two windows with the same name.
//!
//! The window starts uninitialized and runs its first discovery pass when opened or
//! on the first frame it draws. [`ToolWindow::refresh`] repeats the pass and
//! re-resolves the selection against the new tabs; a selection that vanished falls
//! back to the first entry with a warning.

use super::error::ToolWindowWarning;
use super::registry::{Discovery, TabRegistry};
use super::resize::{DividerInput, SidebarResize, WidthBounds};
use super::tab::ToolWindowTab;
use super::tree_view::{TabSelected, TabTreeView};
use crate::app::config::ToolWindowSettings;
use crate::app::dashui::window_focus::{FocusableWindow, SimpleShowParams, WindowFocusManager};
use crate::{log_warn, trace_debug, trace_info};
use eframe::egui;
use egui::RichText;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SELECTOR_HEIGHT: f32 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowLayout {
    /// Single row of top-level tabs
    #[default]
    Tabs,
    /// Two-level tree on the left, selected tool on the right
    Sidebar,
}

impl std::fmt::Display for WindowLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowLayout::Tabs => write!(f, "Tabs"),
            WindowLayout::Sidebar => write!(f, "Sidebar"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffsets {
    pub sidebar: egui::Vec2,
    pub content: egui::Vec2,
}

/// Per-window selection, divider and scroll state
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// Index into the top-level list (tab strip layout)
    pub selected_flat_index: usize,
    /// Selected tree key (sidebar layout)
    pub selected_tree_key: Option<String>,
    pub resize: SidebarResize,
    pub scroll: ScrollOffsets,
}

impl SelectionState {
    fn new(settings: &ToolWindowSettings) -> Self {
        Self {
            selected_flat_index: 0,
            selected_tree_key: None,
            resize: SidebarResize::new(settings.sidebar_width, settings.resize_handle_width),
            scroll: ScrollOffsets::default(),
        }
    }
}

pub struct ToolWindow {
    pub open: bool,
    window_name: String,
    layout: WindowLayout,
    settings: ToolWindowSettings,
    registry: Arc<TabRegistry>,
    /// `None` until the first discovery pass
    discovery: Option<Discovery>,
    tree_view: Option<TabTreeView>,
    selection: SelectionState,
    /// Tab requested before the first discovery pass
    pending_tab: Option<String>,
    warnings: Vec<ToolWindowWarning>,
    repaint_requested: bool,
}

impl ToolWindow {
    pub fn new(
        window_name: impl Into<String>,
        layout: WindowLayout,
        registry: Arc<TabRegistry>,
    ) -> Self {
        Self::with_settings(window_name, layout, registry, ToolWindowSettings::default())
    }

    /// `settings.layout`, when set, overrides `layout`
    pub fn with_settings(
        window_name: impl Into<String>,
        layout: WindowLayout,
        registry: Arc<TabRegistry>,
        settings: ToolWindowSettings,
    ) -> Self {
        Self {
            open: false,
            window_name: window_name.into(),
            layout: settings.layout.unwrap_or(layout),
            selection: SelectionState::new(&settings),
            settings,
            registry,
            discovery: None,
            tree_view: None,
            pending_tab: None,
            warnings: Vec::new(),
            repaint_requested: false,
        }
    }

    pub fn window_name(&self) -> &str {
        &self.window_name
    }

    pub fn layout(&self) -> WindowLayout {
        self.layout
    }

    pub fn settings(&self) -> &ToolWindowSettings {
        &self.settings
    }

    /// Whether the first discovery pass has run
    pub fn is_ready(&self) -> bool {
        self.discovery.is_some()
    }

    pub fn hierarchy(&self) -> Option<&super::TabHierarchy> {
        self.discovery.as_ref().map(|d| &d.hierarchy)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The tree, once the sidebar layout has drawn it
    pub fn tree_view(&self) -> Option<&TabTreeView> {
        self.tree_view.as_ref()
    }

    /// Key the current layout is showing
    pub fn selected_key(&self) -> Option<String> {
        let hierarchy = &self.discovery.as_ref()?.hierarchy;
        match self.layout {
            WindowLayout::Tabs => hierarchy
                .top_level()
                .get(self.selection.selected_flat_index)
                .cloned(),
            WindowLayout::Sidebar => self.selection.selected_tree_key.clone(),
        }
    }

    /// Open the window, discovering tabs if that has not happened yet
    pub fn open(&mut self) {
        self.open = true;
        if !self.is_ready() {
            self.refresh();
        }
    }

    /// Warnings raised since the last call
    pub fn take_warnings(&mut self) -> Vec<ToolWindowWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn warn(&mut self, warning: ToolWindowWarning) {
        log_warn!("{}: {}", self.window_name, warning);
        self.warnings.push(warning);
    }

    /// Rediscover tabs and re-resolve the selection against them
    pub fn refresh(&mut self) {
        let previous = self.selected_key();
        let discovery = self.registry.discover(&self.window_name);

        // Already logged by the registry.
        self.warnings.extend(discovery.failures.iter().cloned());

        if discovery.hierarchy.is_empty() {
            self.warn(ToolWindowWarning::EmptyHierarchy {
                window: self.window_name.clone(),
            });
        } else if self.layout == WindowLayout::Tabs {
            for parent in discovery.hierarchy.parents_without_tab() {
                trace_info!(
                    "'{}' has no tab of its own; its children only show in the sidebar layout",
                    parent
                );
            }
        }

        if let Some(tree) = &mut self.tree_view {
            tree.rebuild(&discovery.hierarchy);
        }
        self.discovery = Some(discovery);

        if let Some(requested) = self.pending_tab.take() {
            self.change_tab(&requested);
        } else {
            match previous {
                Some(key) if self.apply_selection(&key) => {}
                Some(key) => {
                    let fallback = self.select_first();
                    self.warn(ToolWindowWarning::StaleSelection { key, fallback });
                }
                None => {
                    if self.layout == WindowLayout::Tabs {
                        self.selection.selected_flat_index = 0;
                    }
                }
            }
        }

        self.repaint_requested = true;
    }

    /// Select `tab_name`, or the first entry (with a warning) when it does not exist.
    ///
    /// Before the first discovery pass the name is remembered and resolved by it.
    pub fn change_tab(&mut self, tab_name: &str) {
        if !self.is_ready() {
            self.pending_tab = Some(tab_name.to_string());
            return;
        }

        if !self.apply_selection(tab_name) {
            let fallback = self.select_first();
            self.warn(ToolWindowWarning::UnknownTab {
                requested: tab_name.to_string(),
                fallback,
            });
        }
        self.repaint_requested = true;
    }

    /// Switch layouts, carrying the selected key over when the new layout has it
    pub fn set_layout(&mut self, layout: WindowLayout) {
        if layout == self.layout {
            return;
        }
        let previous = self.selected_key();
        self.layout = layout;

        if let Some(key) = previous {
            if !self.apply_selection(&key) {
                let fallback = self.select_first();
                self.warn(ToolWindowWarning::StaleSelection { key, fallback });
            }
        }
        self.repaint_requested = true;
    }

    /// Restore the divider position and scroll offsets
    pub fn reset(&mut self) {
        self.selection.resize =
            SidebarResize::new(self.settings.sidebar_width, self.settings.resize_handle_width);
        self.selection.scroll = ScrollOffsets::default();
    }

    fn apply_selection(&mut self, key: &str) -> bool {
        let Some(discovery) = &self.discovery else {
            return false;
        };

        match self.layout {
            WindowLayout::Tabs => {
                match discovery.hierarchy.top_level().iter().position(|k| k == key) {
                    Some(index) => {
                        self.selection.selected_flat_index = index;
                        true
                    }
                    None => false,
                }
            }
            WindowLayout::Sidebar => {
                if !discovery.hierarchy.contains_key(key) {
                    return false;
                }
                self.selection.selected_tree_key = Some(key.to_string());
                if let Some(tree) = &mut self.tree_view {
                    tree.sync_selection(Some(key));
                }
                true
            }
        }
    }

    fn select_first(&mut self) -> Option<String> {
        let hierarchy = &self.discovery.as_ref()?.hierarchy;

        match self.layout {
            WindowLayout::Tabs => {
                self.selection.selected_flat_index = 0;
                hierarchy.top_level().first().cloned()
            }
            WindowLayout::Sidebar => {
                let first = hierarchy.parent_keys().first().cloned();
                self.selection.selected_tree_key = first.clone();
                if let Some(tree) = &mut self.tree_view {
                    tree.sync_selection(first.as_deref());
                }
                first
            }
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.show_with_focus(ctx, false);
    }

    pub fn show_with_focus(&mut self, ctx: &egui::Context, bring_to_front: bool) {
        if !self.open {
            return;
        }
        if !self.is_ready() {
            self.refresh();
        }

        let mut is_open = self.open;
        let window = egui::Window::new(self.window_name.clone())
            .id(egui::Id::new(("tool_window", self.window_name.as_str())))
            .open(&mut is_open)
            .min_size([self.settings.min_width, self.settings.min_height])
            .default_size([
                self.settings.min_width * 1.5,
                self.settings.min_height * 1.5,
            ])
            .resizable(true)
            .collapsible(false);

        WindowFocusManager::apply_focus_order(window, bring_to_front).show(ctx, |ui| {
            self.ui(ui);
        });

        self.open = is_open;
    }

    /// Draw the window contents for this frame
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        if !self.is_ready() {
            self.refresh();
        }
        if std::mem::take(&mut self.repaint_requested) {
            ui.ctx().request_repaint();
        }

        match self.layout {
            WindowLayout::Tabs => self.tabs_ui(ui),
            WindowLayout::Sidebar => self.sidebar_ui(ui),
        }
    }

    fn tabs_ui(&mut self, ui: &mut egui::Ui) {
        let Self {
            discovery,
            selection,
            window_name,
            ..
        } = self;
        let Some(Discovery {
            instances,
            hierarchy,
            ..
        }) = discovery.as_mut()
        else {
            return;
        };

        let top_level = hierarchy.top_level();
        if top_level.is_empty() {
            no_tools_label(ui, window_name);
            return;
        }
        if selection.selected_flat_index >= top_level.len() {
            selection.selected_flat_index = 0;
        }

        if top_level.len() > 1 {
            ui.horizontal(|ui| {
                ui.set_min_height(SELECTOR_HEIGHT);
                for (index, name) in top_level.iter().enumerate() {
                    let is_selected = index == selection.selected_flat_index;
                    if ui.selectable_label(is_selected, name.as_str()).clicked() && !is_selected {
                        trace_debug!("{}: tab '{}' selected", window_name, name);
                        selection.selected_flat_index = index;
                    }
                }
            });
            ui.add_space(10.0);
        }

        let key = &top_level[selection.selected_flat_index];
        let indices: Vec<usize> = hierarchy
            .tab_strip_elements(key)
            .iter()
            .map(|element| element.index())
            .collect();

        let output = egui::ScrollArea::vertical()
            .id_salt(("tool_window_content", window_name.as_str()))
            .auto_shrink([false, false])
            .scroll_offset(selection.scroll.content)
            .show(ui, |ui| draw_elements(instances, &indices, ui));
        selection.scroll.content = output.state.offset;
    }

    fn sidebar_ui(&mut self, ui: &mut egui::Ui) {
        let Self {
            discovery,
            tree_view,
            selection,
            settings,
            window_name,
            ..
        } = self;
        let Some(Discovery {
            instances,
            hierarchy,
            ..
        }) = discovery.as_mut()
        else {
            return;
        };

        let tree = tree_view.get_or_insert_with(|| {
            let mut tree = TabTreeView::new(hierarchy);
            tree.sync_selection(selection.selected_tree_key.as_deref());
            tree
        });

        let area = ui.available_rect_before_wrap();
        let height = area.height();
        let bounds = WidthBounds {
            min_sidebar_width: settings.min_sidebar_width,
            min_content_width: settings.min_content_width,
            window_width: area.width(),
        };

        let handle_rect = selection
            .resize
            .handle_rect(height)
            .translate(area.min.to_vec2());
        let handle = ui.interact(
            handle_rect,
            ui.id().with(("sidebar_divider", window_name.as_str())),
            egui::Sense::drag(),
        );
        for input in divider_inputs(ui, area.min) {
            if selection.resize.handle_input(input, height, bounds) {
                ui.ctx().request_repaint();
            }
        }
        if !selection.resize.is_resizing() {
            selection.resize.constrain(bounds);
        }
        if handle.hovered() || selection.resize.is_resizing() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        }

        let sidebar_width = selection.resize.width();
        let handle_width = selection.resize.handle_width();

        ui.horizontal_top(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;

            let sidebar = ui.allocate_ui_with_layout(
                egui::vec2(sidebar_width, height),
                egui::Layout::top_down(egui::Align::Min),
                |ui| {
                    ui.set_min_size(egui::vec2(sidebar_width, height));
                    egui::ScrollArea::vertical()
                        .id_salt(("tool_window_sidebar", window_name.as_str()))
                        .auto_shrink([false, false])
                        .scroll_offset(selection.scroll.sidebar)
                        .show(ui, |ui| tree.ui(ui))
                },
            );
            selection.scroll.sidebar = sidebar.inner.state.offset;

            if let Some(TabSelected(key)) = sidebar.inner.inner {
                trace_debug!("{}: tree selected '{}'", window_name, key);
                selection.selected_tree_key = Some(key);
            }

            ui.add_space(handle_width);
            ui.painter().vline(
                area.left() + sidebar_width,
                area.y_range(),
                ui.visuals().widgets.noninteractive.bg_stroke,
            );

            ui.vertical(|ui| {
                let output = egui::ScrollArea::vertical()
                    .id_salt(("tool_window_content", window_name.as_str()))
                    .auto_shrink([false, false])
                    .scroll_offset(selection.scroll.content)
                    .show(ui, |ui| {
                        if hierarchy.is_empty() {
                            no_tools_label(ui, window_name);
                            return;
                        }

                        let Some(key) = &selection.selected_tree_key else {
                            ui.label(RichText::new("Select a tab to view its content.").weak());
                            return;
                        };

                        let indices: Vec<usize> = hierarchy
                            .sidebar_elements(key)
                            .iter()
                            .map(|element| element.index())
                            .collect();
                        if indices.is_empty() {
                            ui.label(RichText::new(format!("Selected: {}", key)).strong());
                        } else {
                            draw_elements(instances, &indices, ui);
                        }
                    });
                selection.scroll.content = output.state.offset;
            });
        });
    }
}

fn no_tools_label(ui: &mut egui::Ui, window_name: &str) {
    ui.label(RichText::new(format!("No tools found for {}!", window_name)).strong());
}

/// Draw the tabs at `indices`, with a separator between consecutive tabs
fn draw_elements(instances: &mut [Box<dyn ToolWindowTab>], indices: &[usize], ui: &mut egui::Ui) {
    for (position, index) in indices.iter().enumerate() {
        if let Some(tab) = instances.get_mut(*index) {
            tab.ui(ui);
        }
        if position + 1 < indices.len() {
            ui.separator();
        }
    }
}

/// Translate this frame's pointer state into divider events relative to `origin`
fn divider_inputs(ui: &egui::Ui, origin: egui::Pos2) -> Vec<DividerInput> {
    let offset = origin.to_vec2();
    ui.input(|i| {
        let mut inputs = Vec::new();
        if i.pointer.primary_pressed() {
            if let Some(pos) = i.pointer.press_origin() {
                inputs.push(DividerInput::Pressed(pos - offset));
            }
        }
        // The press frame only arms the drag; width follows on later frames
        if i.pointer.primary_down() && !i.pointer.primary_pressed() {
            if let Some(pos) = i.pointer.interact_pos() {
                inputs.push(DividerInput::Dragged(pos - offset));
            }
        }
        if i.pointer.any_released() {
            inputs.push(DividerInput::Released);
        }
        inputs
    })
}

impl FocusableWindow for ToolWindow {
    type ShowParams = SimpleShowParams;

    fn window_id(&self) -> &str {
        &self.window_name
    }

    fn window_title(&self) -> String {
        self.window_name.clone()
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn show_with_focus(
        &mut self,
        ctx: &egui::Context,
        _params: Self::ShowParams,
        bring_to_front: bool,
    ) {
        ToolWindow::show_with_focus(self, ctx, bring_to_front);
    }
}
