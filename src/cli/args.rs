use std::fmt::Write;
use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{ArgAction, ColorChoice, Parser};
use tinted_shop_core::app_dirs;

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let data_dir = match app_dirs::get_data_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("tinted-shop {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "data directory: {data_dir}");

	Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}

/// Command-line arguments accepted by the `tinted-shop` binary.
#[derive(Parser, Debug)]
#[command(
	name = "tinted-shop",
	version,
	long_version = long_version(),
	about = "Terminal storefront with switchable layout themes",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "TINTED_SHOP_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short,
		long,
		value_name = "ID",
		help = "Switch to this theme on start (default: the persisted theme)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		short,
		long,
		value_name = "N",
		help = "Number of products to request (default: 6)"
	)]
	pub(crate) limit: Option<usize>,
	#[arg(
		long = "api-base",
		value_name = "URL",
		help = "Base URL of the product API (default: https://fakestoreapi.com)"
	)]
	pub(crate) api_base: Option<String>,
	#[arg(long = "list-themes", help = "List available themes and exit")]
	pub(crate) list_themes: bool,
	#[arg(
		long = "print-css",
		value_name = "ID",
		num_args = 0..=1,
		help = "Print the style variables of a theme and exit (default: the persisted theme)"
	)]
	pub(crate) print_css: Option<Option<String>>,
	#[arg(long = "print-config", help = "Print the effective configuration and exit")]
	pub(crate) print_config: bool,
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn command_definition_is_valid() {
		CliArgs::command().debug_assert();
	}

	#[test]
	fn print_css_takes_an_optional_id() {
		let bare = CliArgs::try_parse_from(["tinted-shop", "--print-css"]).unwrap();
		assert_eq!(bare.print_css, Some(None));

		let named = CliArgs::try_parse_from(["tinted-shop", "--print-css", "theme3"]).unwrap();
		assert_eq!(named.print_css, Some(Some("theme3".into())));

		let absent = CliArgs::try_parse_from(["tinted-shop"]).unwrap();
		assert_eq!(absent.print_css, None);
	}

	#[test]
	fn config_flag_repeats() {
		let cli = CliArgs::try_parse_from(["tinted-shop", "-c", "a.toml", "--config", "b.toml"])
			.unwrap();
		assert_eq!(cli.config, vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]);
	}
}
