//! `link.xml` maintenance for Unity projects.
//!
//! Assemblies are found through the `.asmdef` files under the project directory.
//! Those whose name starts with one of the configured prefixes get a
//! `<assembly fullname=".." preserve="all"/>` entry in `Assets/link.xml`, and
//! entries for ignored assemblies are dropped from it. Everything else already in
//! the file is kept.

use crate::{log_info, log_warn, trace_debug};
use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::{Reader, Writer, XmlVersion};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Location of the linker file, relative to the project directory
pub const LINK_XML_PATH: &str = "Assets/link.xml";

const EDITOR_SUFFIX: &str = ".Editor";
const ROOT_ELEMENT: &str = "linker";
const ASSEMBLY_ELEMENT: &str = "assembly";

/// Directories Unity regenerates; never scanned for assembly definitions
const SKIPPED_DIRS: [&str; 5] = ["Library", "Temp", "Logs", "obj", ".git"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkXmlSettings {
    /// Assemblies starting with any of these are preserved; empty entries match nothing
    pub prefixes: Vec<String>,
    pub ignored_assemblies: Vec<String>,
}

impl Default for LinkXmlSettings {
    fn default() -> Self {
        Self {
            prefixes: vec!["MyName".to_string()],
            ignored_assemblies: vec!["IgnoredAssembly".to_string()],
        }
    }
}

impl LinkXmlSettings {
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored_assemblies
            .iter()
            .any(|ignored| !ignored.is_empty() && ignored == name)
    }

    /// Whether `name` belongs in `link.xml`
    pub fn matches(&self, name: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && name.starts_with(prefix.as_str()))
            && !name.ends_with(EDITOR_SUFFIX)
            && !self.is_ignored(name)
    }

    /// Matching names, sorted and without duplicates
    pub fn select<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        names
            .into_iter()
            .filter(|name| self.matches(name))
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// What an update changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkXmlUpdate {
    pub path: PathBuf,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl std::fmt::Display for LinkXmlUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.added.is_empty() && self.removed.is_empty() {
            return write!(f, "{} is up to date", self.path.display());
        }
        write!(
            f,
            "Added {} and removed {} assemblies in {}",
            self.added.len(),
            self.removed.len(),
            self.path.display()
        )
    }
}

#[derive(Debug, Deserialize)]
struct AssemblyDefinition {
    name: String,
}

/// Names declared by the `.asmdef` files under `project_dir`, sorted
pub fn find_assemblies(project_dir: &Path) -> Result<Vec<String>> {
    if !project_dir.is_dir() {
        bail!("{} is not a directory", project_dir.display());
    }

    let mut names = BTreeSet::new();
    let walker = WalkDir::new(project_dir).into_iter().filter_entry(|entry| {
        !(entry.file_type().is_dir()
            && entry.depth() > 0
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
    });

    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some("asmdef")
        {
            continue;
        }

        match read_assembly_definition(path) {
            Ok(definition) => {
                trace_debug!("Found assembly {} in {:?}", definition.name, path);
                names.insert(definition.name);
            }
            Err(e) => {
                log_warn!("Skipping {:?}: {:#}", path, e);
            }
        }
    }

    Ok(names.into_iter().collect())
}

fn read_assembly_definition(path: &Path) -> Result<AssemblyDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(content.trim_start_matches('\u{feff}'))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Rewrite `Assets/link.xml` under `project_dir` for the assemblies found there
pub fn update_link_xml(project_dir: &Path, settings: &LinkXmlSettings) -> Result<LinkXmlUpdate> {
    let assemblies = find_assemblies(project_dir)?;
    let wanted = settings.select(assemblies.iter().map(String::as_str));
    let path = project_dir.join(LINK_XML_PATH);

    let existing = if path.exists() {
        Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        )
    } else {
        None
    };

    let (xml, mut update) = rewrite_link_xml(existing.as_deref(), &wanted, settings)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, xml).with_context(|| format!("Failed to write {}", path.display()))?;

    for name in &update.removed {
        log_info!("Removed ignored assembly {} from link.xml", name);
    }
    for name in &update.added {
        log_info!("Added {} to link.xml", name);
    }
    update.path = path;
    Ok(update)
}

/// Produce the new `link.xml` text from the current one (`None` when there is none).
///
/// `wanted` entries missing from the root are appended; entries for ignored
/// assemblies are removed together with their content.
pub fn rewrite_link_xml(
    existing: Option<&str>,
    wanted: &[String],
    settings: &LinkXmlSettings,
) -> Result<(String, LinkXmlUpdate)> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut update = LinkXmlUpdate::default();

    match existing.filter(|text| !text.trim().is_empty()) {
        Some(text) => copy_filtered(text, &mut writer, wanted, settings, &mut update)?,
        None => {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
            let root = BytesStart::new(ROOT_ELEMENT);
            let end = root.to_end().into_owned();
            writer.write_event(Event::Start(root))?;
            update.added = write_assemblies(&mut writer, wanted, &BTreeSet::new())?;
            writer.write_event(Event::End(end))?;
        }
    }

    let mut xml = String::from_utf8(writer.into_inner()).context("link.xml is not UTF-8")?;
    xml.push('\n');
    Ok((xml, update))
}

fn copy_filtered(
    text: &str,
    writer: &mut Writer<Vec<u8>>,
    wanted: &[String],
    settings: &LinkXmlSettings,
    update: &mut LinkXmlUpdate,
) -> Result<()> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut present = BTreeSet::new();
    let mut depth = 0usize;
    // Depth of the removed element whose content is being skipped
    let mut skipping: Option<usize> = None;
    let mut root_seen = false;

    loop {
        let event = reader.read_event().context("Failed to parse link.xml")?;
        match event {
            Event::Eof => break,
            Event::Start(start) => {
                depth += 1;
                if skipping.is_some() {
                    continue;
                }
                if depth == 1 {
                    check_root(&start)?;
                    root_seen = true;
                } else if depth == 2 {
                    if let Some(name) = assembly_name(&start)? {
                        if settings.is_ignored(&name) {
                            update.removed.push(name);
                            skipping = Some(depth);
                            continue;
                        }
                        present.insert(name);
                    }
                }
                writer.write_event(Event::Start(start))?;
            }
            Event::End(end) => {
                let closing = depth;
                depth = depth.saturating_sub(1);
                if let Some(start_depth) = skipping {
                    if closing == start_depth {
                        skipping = None;
                    }
                    continue;
                }
                if closing == 1 {
                    update.added = write_assemblies(writer, wanted, &present)?;
                }
                writer.write_event(Event::End(end))?;
            }
            Event::Empty(start) => {
                if skipping.is_some() {
                    continue;
                }
                if depth == 0 {
                    // <linker/>
                    check_root(&start)?;
                    root_seen = true;
                    let end = start.to_end().into_owned();
                    writer.write_event(Event::Start(start))?;
                    update.added = write_assemblies(writer, wanted, &present)?;
                    writer.write_event(Event::End(end))?;
                    continue;
                }
                if depth == 1 {
                    if let Some(name) = assembly_name(&start)? {
                        if settings.is_ignored(&name) {
                            update.removed.push(name);
                            continue;
                        }
                        present.insert(name);
                    }
                }
                writer.write_event(Event::Empty(start))?;
            }
            other => {
                if skipping.is_none() {
                    writer.write_event(other)?;
                }
            }
        }
    }

    if !root_seen {
        bail!("link.xml has no <{}> element", ROOT_ELEMENT);
    }
    Ok(())
}

fn check_root(start: &BytesStart<'_>) -> Result<()> {
    if start.name().as_ref() != ROOT_ELEMENT.as_bytes() {
        bail!(
            "link.xml root is <{}>, expected <{}>",
            String::from_utf8_lossy(start.name().as_ref()),
            ROOT_ELEMENT
        );
    }
    Ok(())
}

/// `fullname` of an `<assembly>` element, `None` for any other element
fn assembly_name(start: &BytesStart<'_>) -> Result<Option<String>> {
    if start.name().as_ref() != ASSEMBLY_ELEMENT.as_bytes() {
        return Ok(None);
    }
    let Some(attribute) = start.try_get_attribute("fullname")? else {
        return Ok(None);
    };
    let value = attribute.normalized_value(XmlVersion::Implicit1_0)?;
    Ok(Some(value.into_owned()))
}

/// Append entries for the `wanted` names not in `present`; returns the names written
fn write_assemblies(
    writer: &mut Writer<Vec<u8>>,
    wanted: &[String],
    present: &BTreeSet<String>,
) -> Result<Vec<String>> {
    let mut added = Vec::new();
    for name in wanted.iter().filter(|name| !present.contains(*name)) {
        let element = BytesStart::new(ASSEMBLY_ELEMENT)
            .with_attributes([("fullname", name.as_str()), ("preserve", "all")]);
        writer.write_event(Event::Empty(element))?;
        added.push(name.clone());
    }
    Ok(added)
}
