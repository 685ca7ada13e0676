use anyhow::{Context, Result};
use tinted_shop_core::ThemeRegistry;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Load configuration by combining CLI arguments, config files and environment
/// variables.
pub fn load(cli: &CliArgs, registry: &ThemeRegistry) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.context("failed to deserialize configuration")?;
	raw.apply_cli_overrides(cli);
	raw.resolve(registry)
}
