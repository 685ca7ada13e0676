//! Application shell state and behaviour.
//!
//! The [`App`] type owns the theme store and the state of every view.
//! Supporting modules split the implementation into input handling and
//! rendering.

mod actions;
mod render;
mod state;

pub(crate) use state::Focus;
pub use state::App;
