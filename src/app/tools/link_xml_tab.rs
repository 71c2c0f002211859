use super::{lock, SharedLinkXmlState, LAZY_TOOLS_WINDOW, LINK_XML_TAB};
use crate::app::linker::{update_link_xml, LinkXmlSettings, LinkXmlUpdate, LINK_XML_PATH};
use crate::app::tool_window::ToolWindowTab;
use crate::log_error;
use eframe::egui;
use egui::RichText;
use std::path::PathBuf;

/// Linker settings shared between the editor tab and the host application
#[derive(Debug, Clone, PartialEq)]
pub struct LinkXmlState {
    pub settings: LinkXmlSettings,
    /// Directory holding `Assets/`
    pub project_dir: PathBuf,
    /// Outcome of the last update, kept for display
    pub last_update: Option<Result<LinkXmlUpdate, String>>,
    /// Outcome not yet reported to the host
    pub pending_report: Option<Result<LinkXmlUpdate, String>>,
    pub save_requested: bool,
}

impl LinkXmlState {
    pub fn new(settings: LinkXmlSettings, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            project_dir: project_dir.into(),
            last_update: None,
            pending_report: None,
            save_requested: false,
        }
    }

    /// Rewrite `link.xml` with the current settings
    pub fn run_update(&mut self) {
        let result = update_link_xml(&self.project_dir, &self.settings).map_err(|e| {
            log_error!("Failed to update link.xml: {:#}", e);
            format!("{:#}", e)
        });
        self.last_update = Some(result.clone());
        self.pending_report = Some(result);
    }

    pub fn take_report(&mut self) -> Option<Result<LinkXmlUpdate, String>> {
        self.pending_report.take()
    }

    pub fn take_save_request(&mut self) -> bool {
        std::mem::take(&mut self.save_requested)
    }
}

/// Editor for the prefixes and ignored names that drive `link.xml`
pub struct LinkXmlTab {
    state: SharedLinkXmlState,
}

impl LinkXmlTab {
    pub fn new(state: SharedLinkXmlState) -> Self {
        Self { state }
    }
}

impl ToolWindowTab for LinkXmlTab {
    fn window_name(&self) -> &str {
        LAZY_TOOLS_WINDOW
    }

    fn tab_name(&self) -> &str {
        LINK_XML_TAB
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        let mut state = lock(&self.state);

        ui.heading("Add Assemblies to link.xml");
        ui.label(RichText::new(state.project_dir.join(LINK_XML_PATH).display().to_string()).weak());
        ui.add_space(5.0);

        ui.label(RichText::new("Prefixes").strong());
        edit_list(ui, "link_xml_prefixes", "Prefix", &mut state.settings.prefixes);
        if ui.button("Add Prefix").clicked() {
            state.settings.prefixes.push(String::new());
        }

        ui.add_space(5.0);
        ui.label(RichText::new("Ignored Assemblies").strong());
        edit_list(
            ui,
            "link_xml_ignored",
            "Ignored Assembly",
            &mut state.settings.ignored_assemblies,
        );
        if ui.button("Add Ignored Assembly").clicked() {
            state.settings.ignored_assemblies.push(String::new());
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Update link.xml").clicked() {
                state.run_update();
            }
            if ui.button("Save").clicked() {
                state.save_requested = true;
            }
        });

        match &state.last_update {
            Some(Ok(update)) => {
                ui.label(update.to_string());
            }
            Some(Err(e)) => {
                ui.colored_label(ui.visuals().error_fg_color, e.as_str());
            }
            None => {}
        }
    }
}

/// One labelled text field per entry, each with a remove button
fn edit_list(ui: &mut egui::Ui, id: &str, label: &str, entries: &mut Vec<String>) {
    let mut remove = None;
    egui::Grid::new(id).num_columns(3).show(ui, |ui| {
        for (index, entry) in entries.iter_mut().enumerate() {
            ui.label(format!("{} {}", label, index + 1));
            ui.text_edit_singleline(entry);
            if ui.small_button("✖").clicked() {
                remove = Some(index);
            }
            ui.end_row();
        }
    });
    if let Some(index) = remove {
        entries.remove(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tools::shared_link_xml_state;
    use egui_kittest::kittest::Queryable;
    use egui_kittest::Harness;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_update_reports_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Assets")).unwrap();
        std::fs::write(
            dir.path().join("Assets/MyName.Core.asmdef"),
            r#"{ "name": "MyName.Core" }"#,
        )
        .unwrap();
        let mut state = LinkXmlState::new(LinkXmlSettings::default(), dir.path());

        state.run_update();

        let report = state.take_report().unwrap().unwrap();
        assert_eq!(report.added, vec!["MyName.Core"]);
        assert!(state.take_report().is_none());
        assert!(matches!(state.last_update, Some(Ok(_))));
    }

    #[test]
    fn test_update_failure_is_kept_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = LinkXmlState::new(LinkXmlSettings::default(), dir.path().join("absent"));

        state.run_update();

        assert!(matches!(state.take_report(), Some(Err(e)) if e.contains("not a directory")));
    }

    #[test]
    fn test_add_buttons_append_empty_entries() {
        let dir = tempfile::tempdir().unwrap();
        let shared = shared_link_xml_state(LinkXmlSettings::default(), dir.path());
        let mut harness = Harness::new_ui_state(
            |ui, tab: &mut LinkXmlTab| tab.ui(ui),
            LinkXmlTab::new(shared.clone()),
        );
        harness.run();

        harness.get_by_label("Add Prefix").click();
        harness.run();
        harness.get_by_label("Add Ignored Assembly").click();
        harness.run();

        let state = lock(&shared);
        assert_eq!(state.settings.prefixes, vec!["MyName", ""]);
        assert_eq!(state.settings.ignored_assemblies, vec!["IgnoredAssembly", ""]);
        drop(state);

        harness.get_by_label("Prefix 2");
        harness.get_by_label("Ignored Assembly 2");
    }

    #[test]
    fn test_update_button_writes_link_xml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Assets")).unwrap();
        std::fs::write(
            dir.path().join("Assets/MyName.Core.asmdef"),
            r#"{ "name": "MyName.Core" }"#,
        )
        .unwrap();
        let shared = shared_link_xml_state(LinkXmlSettings::default(), dir.path());
        let mut harness = Harness::new_ui_state(
            |ui, tab: &mut LinkXmlTab| tab.ui(ui),
            LinkXmlTab::new(shared.clone()),
        );
        harness.run();

        harness.get_by_label("Update link.xml").click();
        harness.run();

        assert!(dir.path().join(LINK_XML_PATH).exists());
        assert!(matches!(lock(&shared).take_report(), Some(Ok(_))));
    }
}
