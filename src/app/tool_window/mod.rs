//! Discovery and composition of tabbed tool windows.
//!
//! Tools implement [`ToolWindowTab`] and are registered once in a [`TabRegistry`].
//! A [`ToolWindow`] asks the registry for every tab targeting its name, groups them
//! by parent into a [`TabHierarchy`] and draws them in one of two layouts:
//!
//! - [`WindowLayout::Tabs`]: a strip of top-level tabs; the selected tab is drawn
//!   followed by its children.
//! - [`WindowLayout::Sidebar`]: a [`TabTreeView`] on the left with a draggable
//!   divider ([`SidebarResize`]) and the selected tool on the right.
//!
//! Problems never interrupt drawing. They are logged and collected as
//! [`ToolWindowWarning`]s for the host to surface.

pub mod error;
pub mod hierarchy;
pub mod registry;
pub mod resize;
pub mod tab;
pub mod tree_view;
pub mod window;

pub use error::ToolWindowWarning;
pub use hierarchy::{TabElement, TabHierarchy};
pub use registry::{Discovery, TabFactory, TabRegistry};
pub use resize::{DividerInput, SidebarResize, WidthBounds};
pub use tab::{TabParent, ToolWindowTab};
pub use tree_view::{TabSelected, TabTreeView, TreeRow, ROOT_ID};
pub use window::{ScrollOffsets, SelectionState, ToolWindow, WindowLayout};
