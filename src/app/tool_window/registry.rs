//! Tab registration and discovery.
//!
//! Tools are registered once, at start-up, as named factories. Every discovery pass
//! calls every factory, keeps the instances that target the requested window and
//! groups them into a [`TabHierarchy`]. A factory that fails or panics is skipped
//! and reported; it never aborts the pass.

use super::error::ToolWindowWarning;
use super::hierarchy::{TabElement, TabHierarchy};
use super::tab::ToolWindowTab;
use crate::{log_warn, trace_debug};
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

/// Creates a fresh tab instance for one discovery pass
pub type TabFactory = Box<dyn Fn() -> anyhow::Result<Box<dyn ToolWindowTab>> + Send + Sync>;

struct RegisteredTab {
    type_name: String,
    factory: TabFactory,
}

/// Build-time list of every tool the application knows about
#[derive(Default)]
pub struct TabRegistry {
    tabs: Vec<RegisteredTab>,
}

/// Result of one discovery pass for one window
pub struct Discovery {
    /// Tab instances, indexed by [`TabElement::index`]
    pub instances: Vec<Box<dyn ToolWindowTab>>,
    pub hierarchy: TabHierarchy,
    /// Factories that failed during this pass
    pub failures: Vec<ToolWindowWarning>,
}

impl Discovery {
    pub fn empty() -> Self {
        Self {
            instances: Vec::new(),
            hierarchy: TabHierarchy::default(),
            failures: Vec::new(),
        }
    }
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under `type_name`, which identifies it in warnings
    pub fn register<F>(&mut self, type_name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> anyhow::Result<Box<dyn ToolWindowTab>> + Send + Sync + 'static,
    {
        self.tabs.push(RegisteredTab {
            type_name: type_name.into(),
            factory: Box::new(factory),
        });
        self
    }

    pub fn registered_types(&self) -> Vec<&str> {
        self.tabs.iter().map(|tab| tab.type_name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Instantiate every registered tool and group those targeting `window_name`
    pub fn discover(&self, window_name: &str) -> Discovery {
        let mut discovery = Discovery::empty();
        let mut elements = Vec::new();

        for registered in &self.tabs {
            let tab = match construct(registered) {
                Ok(tab) => tab,
                Err(reason) => {
                    let warning = ToolWindowWarning::ConstructionFailed {
                        type_name: registered.type_name.clone(),
                        reason,
                    };
                    log_warn!("{}", warning);
                    discovery.failures.push(warning);
                    continue;
                }
            };

            if tab.window_name() != window_name {
                continue;
            }

            let index = discovery.instances.len();
            elements.push(TabElement::new(index, tab.tab_name(), tab.parent()));
            discovery.instances.push(tab);
        }

        discovery.hierarchy = TabHierarchy::from_elements(elements);

        trace_debug!(
            "Discovered {} of {} registered tabs for '{}'",
            discovery.instances.len(),
            self.tabs.len(),
            window_name
        );

        discovery
    }
}

thread_local! {
    static CONSTRUCTING_TAB: Cell<bool> = const { Cell::new(false) };
}

/// `true` while a tab factory runs on this thread.
///
/// Panics raised then are caught and reported as [`ToolWindowWarning::ConstructionFailed`],
/// so a process-wide panic hook can leave them out of its crash report.
pub fn is_constructing_tab() -> bool {
    CONSTRUCTING_TAB.with(|flag| flag.get())
}

fn construct(registered: &RegisteredTab) -> Result<Box<dyn ToolWindowTab>, String> {
    let was_constructing = CONSTRUCTING_TAB.with(|flag| flag.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(|| (registered.factory)()));
    CONSTRUCTING_TAB.with(|flag| flag.set(was_constructing));

    match result {
        Ok(Ok(tab)) => Ok(tab),
        Ok(Err(e)) => Err(format!("{:#}", e)),
        Err(payload) => Err(payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panicked".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tool_window::TabParent;
    use eframe::egui;

    struct StaticTab {
        window: &'static str,
        name: &'static str,
        parent: &'static str,
    }

    impl ToolWindowTab for StaticTab {
        fn window_name(&self) -> &str {
            self.window
        }

        fn tab_name(&self) -> &str {
            self.name
        }

        fn parent(&self) -> TabParent {
            TabParent::from_name(self.parent)
        }

        fn ui(&mut self, ui: &mut egui::Ui) {
            ui.label(self.name);
        }
    }

    fn register_static(
        registry: &mut TabRegistry,
        window: &'static str,
        name: &'static str,
        parent: &'static str,
    ) {
        registry.register(name, move || {
            Ok(Box::new(StaticTab {
                window,
                name,
                parent,
            }) as Box<dyn ToolWindowTab>)
        });
    }

    #[test]
    fn test_discover_filters_by_window() {
        let mut registry = TabRegistry::new();
        register_static(&mut registry, "W", "Alpha", "");
        register_static(&mut registry, "Other", "Elsewhere", "");
        register_static(&mut registry, "W", "Beta", "Alpha");
        register_static(&mut registry, "W", "Gamma", "");

        let discovery = registry.discover("W");

        assert_eq!(discovery.instances.len(), 3);
        assert_eq!(discovery.hierarchy.parent_keys(), ["Alpha", "Gamma"]);
        assert_eq!(discovery.hierarchy.top_level(), ["Alpha", "Gamma"]);
        assert_eq!(discovery.hierarchy.children_of("Alpha").len(), 1);
        assert!(discovery.failures.is_empty());
    }

    #[test]
    fn test_element_indices_point_at_instances() {
        let mut registry = TabRegistry::new();
        register_static(&mut registry, "W", "Zulu", "");
        register_static(&mut registry, "W", "Alpha", "");

        let discovery = registry.discover("W");
        for element in discovery.hierarchy.elements() {
            assert_eq!(
                discovery.instances[element.index()].tab_name(),
                element.display_name()
            );
        }
    }

    #[test]
    fn test_failing_factories_are_skipped() {
        let mut registry = TabRegistry::new();
        register_static(&mut registry, "W", "Alpha", "");
        registry.register("Broken", || Err(anyhow::anyhow!("missing config")));
        registry.register("Panicky", || -> anyhow::Result<Box<dyn ToolWindowTab>> {
            panic!("boom")
        });
        register_static(&mut registry, "W", "Gamma", "");

        let discovery = registry.discover("W");

        assert_eq!(discovery.hierarchy.top_level(), ["Alpha", "Gamma"]);
        assert_eq!(
            discovery.failures,
            vec![
                ToolWindowWarning::ConstructionFailed {
                    type_name: "Broken".to_string(),
                    reason: "missing config".to_string(),
                },
                ToolWindowWarning::ConstructionFailed {
                    type_name: "Panicky".to_string(),
                    reason: "boom".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_factories_run_inside_construction_scope() {
        let mut registry = TabRegistry::new();
        registry.register("ScopeCheck", || {
            if !is_constructing_tab() {
                anyhow::bail!("factory ran outside the construction scope");
            }
            Ok(Box::new(StaticTab {
                window: "W",
                name: "Alpha",
                parent: "",
            }) as Box<dyn ToolWindowTab>)
        });
        registry.register("Panicky", || -> anyhow::Result<Box<dyn ToolWindowTab>> {
            panic!("boom")
        });

        assert!(!is_constructing_tab());
        let discovery = registry.discover("W");

        assert_eq!(discovery.hierarchy.top_level(), ["Alpha"]);
        assert_eq!(discovery.failures.len(), 1);
        assert!(!is_constructing_tab());
    }

    #[test]
    fn test_no_matching_window_yields_empty_hierarchy() {
        let mut registry = TabRegistry::new();
        register_static(&mut registry, "W", "Alpha", "");

        let discovery = registry.discover("X");
        assert!(discovery.instances.is_empty());
        assert!(discovery.hierarchy.is_empty());
    }

    #[test]
    fn test_registered_types() {
        let mut registry = TabRegistry::new();
        assert!(registry.is_empty());
        register_static(&mut registry, "W", "Alpha", "");
        register_static(&mut registry, "W", "Beta", "");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.registered_types(), ["Alpha", "Beta"]);
    }
}
