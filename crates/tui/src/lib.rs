//! Terminal front end for `tinted-shop`.
//!
//! This crate contains the application shell (header, sidebar, footer and
//! the switching overlay), the home, about and contact views, the theme
//! selector, and the event loop that drives them. Everything it draws is
//! styled from the variables the theme store projects.

mod app;
pub mod components;
mod config;
mod runtime;
pub mod style;

pub use app::App;
pub use config::{DEFAULT_SIDEBAR_THEME, ShellOptions, View};
pub use runtime::run;

pub use crate::components::{ContactMessage, SimulatedSubmitter, Submitter};
pub use crate::style::ShellStyle;
