//! Grouping of discovered tabs into a two-level hierarchy.
//!
//! The hierarchy is rebuilt wholesale on every discovery pass. Nothing in it keeps
//! identity across passes; selection survives a rebuild only by key equality.

use super::tab::TabParent;
use std::collections::BTreeMap;

/// Read-only view over one discovered tab instance
#[derive(Debug, Clone, PartialEq)]
pub struct TabElement {
    index: usize,
    display_name: String,
    parent: TabParent,
}

impl TabElement {
    /// `index` is the position of the tab instance within its discovery pass
    pub fn new(index: usize, tab_name: impl Into<String>, parent: TabParent) -> Self {
        Self {
            index,
            display_name: tab_name.into(),
            parent,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn parent(&self) -> &TabParent {
        &self.parent
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_child()
    }

    /// `parent/name` for nested tabs, the bare name otherwise
    pub fn composite_key(&self) -> String {
        match &self.parent {
            TabParent::Root => self.display_name.clone(),
            TabParent::Child(parent) => format!("{}/{}", parent, self.display_name),
        }
    }
}

/// Sorted, grouped view of every tab discovered for one window.
///
/// - `parent_keys`: every group key, de-duplicated and ascending. A key is either the
///   name of a top-level tab or the parent name of a nested tab.
/// - `top_level`: names of top-level tabs, de-duplicated and ascending.
/// - `groups`: top-level tab elements keyed by their own name.
/// - `children`: nested tab elements keyed by parent name.
///
/// Every element list is ordered by display name with a stable sort, so tabs sharing
/// a name keep their registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabHierarchy {
    parent_keys: Vec<String>,
    top_level: Vec<String>,
    groups: BTreeMap<String, Vec<TabElement>>,
    children: BTreeMap<String, Vec<TabElement>>,
}

impl TabHierarchy {
    /// Classify elements (in registration order) and sort the result
    pub fn from_elements(elements: impl IntoIterator<Item = TabElement>) -> Self {
        let mut hierarchy = Self::default();

        for element in elements {
            match element.parent().clone() {
                TabParent::Root => {
                    let name = element.display_name().to_string();
                    if !hierarchy.parent_keys.contains(&name) {
                        hierarchy.parent_keys.push(name.clone());
                    }
                    if !hierarchy.top_level.contains(&name) {
                        hierarchy.top_level.push(name.clone());
                    }
                    hierarchy.groups.entry(name).or_default().push(element);
                }
                TabParent::Child(parent) => {
                    if !hierarchy.parent_keys.contains(&parent) {
                        hierarchy.parent_keys.push(parent.clone());
                    }
                    hierarchy.children.entry(parent).or_default().push(element);
                }
            }
        }

        hierarchy.sort();
        hierarchy
    }

    fn sort(&mut self) {
        self.parent_keys.sort();
        self.top_level.sort();
        for elements in self
            .groups
            .values_mut()
            .chain(self.children.values_mut())
        {
            elements.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        }
    }

    pub fn parent_keys(&self) -> &[String] {
        &self.parent_keys
    }

    pub fn top_level(&self) -> &[String] {
        &self.top_level
    }

    pub fn is_empty(&self) -> bool {
        self.parent_keys.is_empty()
    }

    /// Top-level tabs registered under `key`
    pub fn group(&self, key: &str) -> &[TabElement] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tabs nested beneath `key`
    pub fn children_of(&self, key: &str) -> &[TabElement] {
        self.children.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every element, top-level groups first, in key order
    pub fn elements(&self) -> impl Iterator<Item = &TabElement> {
        self.groups.values().chain(self.children.values()).flatten()
    }

    /// Whether `key` names a group or a nested tab
    pub fn contains_key(&self, key: &str) -> bool {
        self.parent_keys.iter().any(|k| k == key) || !self.children_named(key).is_empty()
    }

    fn children_named(&self, name: &str) -> Vec<&TabElement> {
        self.parent_keys
            .iter()
            .flat_map(|parent| self.children_of(parent))
            .filter(|child| child.display_name() == name)
            .collect()
    }

    /// Elements drawn when `key` is selected in the sidebar.
    ///
    /// A top-level tab named `key` wins; otherwise every nested tab named `key`, in
    /// parent order. A parent that owns no tab itself resolves to nothing.
    pub fn sidebar_elements(&self, key: &str) -> Vec<&TabElement> {
        let own = self.group(key);
        if !own.is_empty() {
            return own.iter().collect();
        }
        self.children_named(key)
    }

    /// Elements drawn when `key` is selected in the tab strip: the entry's own tabs
    /// followed by the tabs nested beneath it.
    pub fn tab_strip_elements(&self, key: &str) -> Vec<&TabElement> {
        self.group(key)
            .iter()
            .chain(self.children_of(key).iter())
            .collect()
    }

    /// Parents that own no top-level tab; their children never appear in the tab strip
    pub fn parents_without_tab(&self) -> Vec<&str> {
        self.children
            .keys()
            .filter(|parent| !self.groups.contains_key(parent.as_str()))
            .map(String::as_str)
            .collect()
    }
}
