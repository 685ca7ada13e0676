//! Theme data, lookup, projection, and the store that switches between them.

mod builtins;
pub mod projector;
mod registry;
pub mod store;
mod types;

pub use projector::{StyleDocument, StyleSink, project, style_variables, theme_class};
pub use registry::ThemeRegistry;
pub use store::{SwitchTimings, ThemeStore};
pub use types::{
	ActiveThemeState, AnimationTokens, ColorTokens, FontTokens, LayoutTokens, ScaleTokens,
	ThemeConfig,
};
