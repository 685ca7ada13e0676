mod loader;

use std::sync::OnceLock;

use include_dir::{Dir, include_dir};
pub(crate) use loader::{BuiltinThemes, load_theme_documents};

const BUILTIN_THEME_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/theme/builtins/themes");

/// Parsed built-in themes, loaded once per process.
pub(crate) fn builtin_themes() -> &'static BuiltinThemes {
	static BUILTINS: OnceLock<BuiltinThemes> = OnceLock::new();
	BUILTINS.get_or_init(|| {
		load_theme_documents(&BUILTIN_THEME_DIR)
			.unwrap_or_else(|error| panic!("failed to load built-in themes: {error:#}"))
	})
}
