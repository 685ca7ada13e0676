//! Theming and catalogue core for the `tinted-shop` terminal storefront.
//!
//! The crate is front-end agnostic: themes are projected into any
//! [`StyleSink`], and products come from any [`CatalogClient`]. The terminal
//! UI lives in `tinted-shop-tui`.

pub mod app_dirs;
pub mod catalog;
pub mod storage;
pub mod theme;

pub use catalog::{CatalogClient, CatalogError, HttpCatalog, Product, Rating};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError, THEME_STORAGE_KEY};
pub use theme::{
	ActiveThemeState, StyleDocument, StyleSink, SwitchTimings, ThemeConfig, ThemeRegistry,
	ThemeStore,
};
