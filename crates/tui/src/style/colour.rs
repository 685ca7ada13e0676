//! Parsing of colour literals found in style variables.

use std::borrow::Cow;

use anyhow::{Context, Result, bail};
use ratatui::style::Color;

/// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `ansi(n)`, a bare ANSI index, or a
/// named terminal colour.
pub fn parse_color(input: &str) -> Result<Color> {
	let value = input.trim();

	if let Some(hex) = value.strip_prefix('#') {
		return parse_hex_colour(hex);
	}

	if let Some(body) = value.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
		return parse_rgb_triplet(body);
	}

	if let Some(body) = value
		.strip_prefix("ansi(")
		.and_then(|s| s.strip_suffix(')'))
	{
		let index: u8 = body
			.trim()
			.parse()
			.with_context(|| format!("invalid ANSI colour index `{body}`"))?;
		return Ok(Color::Indexed(index));
	}

	if let Ok(index) = value.parse::<u8>() {
		return Ok(Color::Indexed(index));
	}

	match normalise_key(value).as_str() {
		"reset" | "none" | "default" | "transparent" => Ok(Color::Reset),
		"black" => Ok(Color::Black),
		"red" => Ok(Color::Red),
		"green" => Ok(Color::Green),
		"yellow" => Ok(Color::Yellow),
		"blue" => Ok(Color::Blue),
		"magenta" => Ok(Color::Magenta),
		"cyan" => Ok(Color::Cyan),
		"gray" | "grey" => Ok(Color::Gray),
		"dark_gray" | "dark_grey" => Ok(Color::DarkGray),
		"white" => Ok(Color::White),
		other => bail!("unknown colour `{other}`"),
	}
}

fn parse_hex_colour(hex: &str) -> Result<Color> {
	let expanded = match hex.len() {
		3 => {
			let mut expanded = String::with_capacity(6);
			for ch in hex.chars() {
				expanded.push(ch);
				expanded.push(ch);
			}
			Cow::Owned(expanded)
		}
		6 => Cow::Borrowed(hex),
		_ => bail!("hex colours must be 3 or 6 characters long"),
	};

	if !expanded.is_ascii() {
		bail!("invalid hex colour `{hex}`");
	}

	let channel = |range: std::ops::Range<usize>, name: &str| {
		u8::from_str_radix(&expanded[range], 16)
			.with_context(|| format!("invalid {name} component in `#{hex}`"))
	};

	Ok(Color::Rgb(
		channel(0..2, "red")?,
		channel(2..4, "green")?,
		channel(4..6, "blue")?,
	))
}

fn parse_rgb_triplet(body: &str) -> Result<Color> {
	let components = body.split(',').map(str::trim).collect::<Vec<_>>();

	if components.len() != 3 {
		bail!(
			"expected three components for rgb() colour, found {}",
			components.len()
		);
	}

	let component = |value: &str, name: char| {
		value.parse::<u8>().with_context(|| {
			format!("invalid {name}-component `{value}` in rgb() colour")
		})
	};

	Ok(Color::Rgb(
		component(components[0], 'r')?,
		component(components[1], 'g')?,
		component(components[2], 'b')?,
	))
}

fn normalise_key(value: &str) -> String {
	value
		.trim()
		.to_ascii_lowercase()
		.chars()
		.map(|ch| match ch {
			'-' | ' ' => '_',
			other => other,
		})
		.collect()
}
