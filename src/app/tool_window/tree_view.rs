//! Two-level selection tree shown in the sidebar layout.
//!
//! The tree knows nothing about tabs beyond a map from row id to selection key. A
//! parent row maps to its group key; a child row maps to the child's own tab name,
//! not to its `parent/name` composite key.

use super::hierarchy::TabHierarchy;
use eframe::egui;
use std::collections::{HashMap, HashSet};

/// Id of the synthetic, never drawn, root row
pub const ROOT_ID: i32 = -1;

const CHILD_INDENT: f32 = 18.0;

/// Emitted once per user selection in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSelected(pub String);

#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub id: i32,
    /// -1 for the root, 0 for group keys, 1 for nested tabs
    pub depth: i32,
    pub label: String,
    /// Group key this row sits under (child rows only)
    pub parent: Option<String>,
    pub has_children: bool,
}

pub struct TabTreeView {
    root: TreeRow,
    rows: Vec<TreeRow>,
    keys_by_id: HashMap<i32, String>,
    selected_id: Option<i32>,
    collapsed: HashSet<String>,
    next_id: i32,
}

impl TabTreeView {
    pub fn new(hierarchy: &TabHierarchy) -> Self {
        let mut tree = Self {
            root: TreeRow {
                id: ROOT_ID,
                depth: -1,
                label: "Root".to_string(),
                parent: None,
                has_children: false,
            },
            rows: Vec::new(),
            keys_by_id: HashMap::new(),
            selected_id: None,
            collapsed: HashSet::new(),
            next_id: 0,
        };
        tree.build(hierarchy);
        tree
    }

    fn build(&mut self, hierarchy: &TabHierarchy) {
        self.rows.clear();
        self.keys_by_id.clear();
        self.next_id = 0;

        for key in hierarchy.parent_keys() {
            let children = hierarchy.children_of(key);
            let parent_id = self.next_id();
            self.keys_by_id.insert(parent_id, key.clone());
            self.rows.push(TreeRow {
                id: parent_id,
                depth: 0,
                label: key.clone(),
                parent: None,
                has_children: !children.is_empty(),
            });

            for child in children {
                let child_id = self.next_id();
                self.keys_by_id
                    .insert(child_id, child.display_name().to_string());
                self.rows.push(TreeRow {
                    id: child_id,
                    depth: 1,
                    label: child.display_name().to_string(),
                    parent: Some(key.clone()),
                    has_children: false,
                });
            }
        }

        self.root.has_children = !self.rows.is_empty();
    }

    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    /// Rebuild from a fresh hierarchy, keeping the selected key when it still exists.
    ///
    /// Returns `false` when a previous selection could not be kept.
    pub fn rebuild(&mut self, hierarchy: &TabHierarchy) -> bool {
        let previous = self.selected_key().map(str::to_string);
        self.build(hierarchy);
        self.collapsed
            .retain(|key| hierarchy.parent_keys().contains(key));

        match previous {
            Some(key) => {
                self.selected_id = self.id_for_key(&key);
                self.selected_id.is_some()
            }
            None => {
                self.selected_id = None;
                true
            }
        }
    }

    pub fn root(&self) -> &TreeRow {
        &self.root
    }

    /// Visible rows in display order (the root excluded)
    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn key_for(&self, id: i32) -> Option<&str> {
        self.keys_by_id.get(&id).map(String::as_str)
    }

    /// First row (in display order) whose selection key is `key`
    pub fn id_for_key(&self, key: &str) -> Option<i32> {
        self.rows
            .iter()
            .find(|row| self.key_for(row.id) == Some(key))
            .map(|row| row.id)
    }

    pub fn selected_id(&self) -> Option<i32> {
        self.selected_id
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected_id.and_then(|id| self.key_for(id))
    }

    /// Handle a selection change; only the first id is honoured
    pub fn select_ids(&mut self, ids: &[i32]) -> Option<TabSelected> {
        let id = *ids.first()?;
        let key = self.key_for(id)?.to_string();
        self.selected_id = Some(id);
        Some(TabSelected(key))
    }

    /// Mirror a selection made elsewhere without emitting an event
    pub fn sync_selection(&mut self, key: Option<&str>) {
        if self.selected_key() == key {
            return;
        }
        self.selected_id = key.and_then(|key| self.id_for_key(key));
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        !self.collapsed.contains(key)
    }

    pub fn toggle_expanded(&mut self, key: &str) {
        if !self.collapsed.remove(key) {
            self.collapsed.insert(key.to_string());
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<TabSelected> {
        let mut clicked = None;
        let mut toggled = None;

        for row in &self.rows {
            if let Some(parent) = &row.parent {
                if self.collapsed.contains(parent) {
                    continue;
                }
            }

            let is_selected = self.selected_id == Some(row.id);
            ui.horizontal(|ui| {
                if row.depth == 0 {
                    if row.has_children {
                        let icon = if self.collapsed.contains(&row.label) {
                            "▶"
                        } else {
                            "▼"
                        };
                        if ui.small_button(icon).clicked() {
                            toggled = Some(row.label.clone());
                        }
                    } else {
                        ui.add_space(CHILD_INDENT);
                    }
                } else {
                    ui.add_space(CHILD_INDENT * 2.0);
                }

                if ui.selectable_label(is_selected, row.label.as_str()).clicked() {
                    clicked = Some(row.id);
                }
            });
        }

        if let Some(key) = toggled {
            self.toggle_expanded(&key);
        }

        clicked.and_then(|id| self.select_ids(&[id]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tool_window::hierarchy::TabElement;
    use crate::app::tool_window::TabParent;
    use pretty_assertions::assert_eq;

    fn sample_hierarchy() -> TabHierarchy {
        TabHierarchy::from_elements(vec![
            TabElement::new(0, "Alpha", TabParent::Root),
            TabElement::new(1, "Beta", TabParent::Child("Alpha".to_string())),
            TabElement::new(2, "Gamma", TabParent::Root),
        ])
    }

    #[test]
    fn test_build_assigns_ids_depth_first() {
        let tree = TabTreeView::new(&sample_hierarchy());

        assert_eq!(tree.root().id, ROOT_ID);
        assert_eq!(tree.root().depth, -1);

        let rows: Vec<(i32, i32, &str)> = tree
            .rows()
            .iter()
            .map(|row| (row.id, row.depth, row.label.as_str()))
            .collect();
        assert_eq!(rows, vec![(1, 0, "Alpha"), (2, 1, "Beta"), (3, 0, "Gamma")]);
        assert!(tree.rows()[0].has_children);
        assert!(!tree.rows()[2].has_children);
    }

    #[test]
    fn test_child_rows_map_to_tab_name() {
        let tree = TabTreeView::new(&sample_hierarchy());
        assert_eq!(tree.key_for(1), Some("Alpha"));
        assert_eq!(tree.key_for(2), Some("Beta"));
        assert_eq!(tree.key_for(ROOT_ID), None);
    }

    #[test]
    fn test_select_honours_first_id_only() {
        let mut tree = TabTreeView::new(&sample_hierarchy());

        let event = tree.select_ids(&[2, 3]);
        assert_eq!(event, Some(TabSelected("Beta".to_string())));
        assert_eq!(tree.selected_key(), Some("Beta"));

        assert_eq!(tree.select_ids(&[]), None);
        assert_eq!(tree.select_ids(&[42]), None);
        assert_eq!(tree.selected_key(), Some("Beta"));
    }

    #[test]
    fn test_rebuild_keeps_existing_selection() {
        let mut tree = TabTreeView::new(&sample_hierarchy());
        tree.select_ids(&[3]);

        let hierarchy = TabHierarchy::from_elements(vec![
            TabElement::new(0, "Aardvark", TabParent::Root),
            TabElement::new(1, "Gamma", TabParent::Root),
        ]);
        assert!(tree.rebuild(&hierarchy));
        assert_eq!(tree.selected_key(), Some("Gamma"));
        assert_eq!(tree.selected_id(), Some(2));
    }

    #[test]
    fn test_rebuild_clears_vanished_selection() {
        let mut tree = TabTreeView::new(&sample_hierarchy());
        tree.select_ids(&[2]);

        let hierarchy =
            TabHierarchy::from_elements(vec![TabElement::new(0, "Gamma", TabParent::Root)]);
        assert!(!tree.rebuild(&hierarchy));
        assert_eq!(tree.selected_key(), None);
    }

    #[test]
    fn test_ids_restart_on_rebuild() {
        let mut tree = TabTreeView::new(&sample_hierarchy());
        tree.rebuild(&sample_hierarchy());
        let ids: Vec<i32> = tree.rows().iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_sync_selection_and_collapse() {
        let mut tree = TabTreeView::new(&sample_hierarchy());
        tree.sync_selection(Some("Beta"));
        assert_eq!(tree.selected_id(), Some(2));
        tree.sync_selection(None);
        assert_eq!(tree.selected_id(), None);

        assert!(tree.is_expanded("Alpha"));
        tree.toggle_expanded("Alpha");
        assert!(!tree.is_expanded("Alpha"));
        tree.toggle_expanded("Alpha");
        assert!(tree.is_expanded("Alpha"));
    }
}
