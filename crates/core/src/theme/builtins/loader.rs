use std::collections::HashSet;

use anyhow::{Context, Result, bail, ensure};
use include_dir::{Dir, File};
use serde::Deserialize;

use crate::theme::types::ThemeConfig;

pub(crate) struct BuiltinThemes {
	pub(crate) themes: Vec<ThemeConfig>,
	pub(crate) default_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeDocument {
	#[serde(default)]
	default: bool,
	theme: ThemeConfig,
}

pub(crate) fn load_theme_documents(dir: &Dir) -> Result<BuiltinThemes> {
	let mut themes: Vec<ThemeConfig> = Vec::new();
	let mut default_id: Option<String> = None;
	let mut seen = HashSet::new();

	let mut files: Vec<_> = dir
		.files()
		.filter(|file| file.path().extension().is_some_and(|ext| ext == "toml"))
		.collect();
	files.sort_by(|a, b| a.path().cmp(b.path()));

	for file in files {
		let document = parse_theme_document(file)?;
		let theme = document.theme;

		ensure!(
			seen.insert(theme.id.to_ascii_lowercase()),
			"duplicate built-in theme id `{}`",
			theme.id
		);

		if document.default {
			if let Some(existing) = &default_id {
				bail!(
					"multiple built-in themes are marked as default (`{existing}` and `{}`)",
					theme.id
				);
			}
			default_id = Some(theme.id.clone());
		}

		themes.push(theme);
	}

	if themes.is_empty() {
		bail!("no built-in theme definitions were found");
	}

	let default_id = match default_id {
		Some(id) => id,
		None => themes[0].id.clone(),
	};

	Ok(BuiltinThemes { themes, default_id })
}

fn parse_theme_document(file: &File) -> Result<ThemeDocument> {
	let path = file.path();
	let contents = file
		.contents_utf8()
		.with_context(|| format!("{path:?} is not valid UTF-8"))?;

	let document: ThemeDocument = toml::from_str(contents)
		.with_context(|| format!("failed to parse built-in theme definition in {path:?}"))?;

	for (key, value) in document.theme.colors.entries() {
		validate_hex_colour(value)
			.with_context(|| format!("{path:?}: invalid colour for `{key}`"))?;
	}

	Ok(document)
}

/// Accept `#rgb` and `#rrggbb` colour literals.
pub(crate) fn validate_hex_colour(input: &str) -> Result<()> {
	let Some(hex) = input.trim().strip_prefix('#') else {
		bail!("colours must start with `#`, found `{input}`");
	};
	ensure!(
		matches!(hex.len(), 3 | 6),
		"hex colours must be 3 or 6 characters long"
	);
	ensure!(
		hex.chars().all(|ch| ch.is_ascii_hexdigit()),
		"`{input}` contains non-hexadecimal digits"
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use include_dir::{DirEntry, File};

	use super::*;

	const MINIMAL: &str = r##"
[theme]
id = "solo"
name = "Solo"

[theme.colors]
primary = "#000"
secondary = "#111111"
background = "#222222"
surface = "#333333"
text = "#444444"
textSecondary = "#555555"
border = "#666666"
accent = "#777777"

[theme.fonts]
primary = "serif"
secondary = "sans-serif"

[theme.fonts.sizes]
small = "1rem"
medium = "1rem"
large = "1rem"
xlarge = "1rem"

[theme.spacing]
small = "1rem"
medium = "1rem"
large = "1rem"
xlarge = "1rem"

[theme.layout]
maxWidth = "100%"
headerHeight = "64px"
sidebarWidth = "0px"
borderRadius = "0px"

[theme.animations]
transition = "none"
duration = "0ms"
"##;

	#[test]
	fn first_document_is_default_when_none_is_marked() {
		let entries = [DirEntry::File(File::new("solo.toml", MINIMAL.as_bytes()))];
		let dir = Dir::new("", &entries);
		let loaded = load_theme_documents(&dir).expect("document should parse");
		assert_eq!(loaded.default_id, "solo");
		assert_eq!(loaded.themes.len(), 1);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let contents = MINIMAL.replace("accent = \"#777777\"", "accent = \"#777777\"\nglow = \"#888888\"");
		let entries = [DirEntry::File(File::new("solo.toml", contents.as_bytes()))];
		let dir = Dir::new("", &entries);
		assert!(load_theme_documents(&dir).is_err());
	}

	#[test]
	fn missing_keys_are_rejected() {
		let contents = MINIMAL.replace("duration = \"0ms\"", "");
		let entries = [DirEntry::File(File::new("solo.toml", contents.as_bytes()))];
		let dir = Dir::new("", &entries);
		assert!(load_theme_documents(&dir).is_err());
	}

	#[test]
	fn empty_directory_is_an_error() {
		let dir = Dir::new("", &[]);
		assert!(load_theme_documents(&dir).is_err());
	}

	#[test]
	fn hex_validation() {
		assert!(validate_hex_colour("#abc").is_ok());
		assert!(validate_hex_colour("#A1B2C3").is_ok());
		assert!(validate_hex_colour("abc").is_err());
		assert!(validate_hex_colour("#abcd").is_err());
		assert!(validate_hex_colour("#ggg").is_err());
	}
}
