//! Widgets and view state shared by the application shell.

pub mod about;
pub mod catalog;
pub mod contact;
/// Scrollbar and hit-testing helpers.
pub mod scrollbar;
pub mod selector;
pub mod shell;

pub use about::AboutView;
pub use catalog::{CatalogState, CatalogView, FETCH_ERROR_MESSAGE};
pub use contact::{
	ContactForm, ContactMessage, Field, FormFocus, SimulatedSubmitter, SubmitStatus, Submitter,
};
pub use scrollbar::{ScrollMetrics, point_in_rect, render_scrollbar};
pub use selector::{SelectorContext, SelectorOutcome, ThemeSelector};
pub use shell::{NavTargets, ShellLayout, shows_sidebar};
