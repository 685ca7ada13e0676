use std::time::Duration;

use tinted_shop_core::catalog::DEFAULT_PRODUCT_LIMIT;

/// Identifier of the theme that adds the sidebar unless configured otherwise.
pub const DEFAULT_SIDEBAR_THEME: &str = "theme2";

/// Page shown in the content column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
	/// Hero, theme showcase and product catalogue.
	#[default]
	Home,
	/// Static description of the app.
	About,
	/// Contact form and details.
	Contact,
}

impl View {
	/// Every view in navigation order.
	pub const ALL: [View; 3] = [View::Home, View::About, View::Contact];

	/// Navigation label.
	#[must_use]
	pub fn label(self) -> &'static str {
		match self {
			Self::Home => "Home",
			Self::About => "About",
			Self::Contact => "Contact",
		}
	}

	/// Digit that jumps to the view.
	#[must_use]
	pub fn shortcut(self) -> char {
		match self {
			Self::Home => '1',
			Self::About => '2',
			Self::Contact => '3',
		}
	}

	/// View bound to `key`, if any.
	#[must_use]
	pub fn from_shortcut(key: char) -> Option<Self> {
		Self::ALL.into_iter().find(|view| view.shortcut() == key)
	}

	/// The view after this one, wrapping around.
	#[must_use]
	pub fn next(self) -> Self {
		match self {
			Self::Home => Self::About,
			Self::About => Self::Contact,
			Self::Contact => Self::Home,
		}
	}
}

/// Knobs the binary passes down to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOptions {
	/// Name shown in the header and footer.
	pub app_name: String,
	/// Theme id that switches the layout to include a sidebar.
	pub sidebar_theme: String,
	/// Products requested when the home view mounts.
	pub product_limit: usize,
	/// Simulated delay before a contact message counts as sent.
	pub submit_delay: Duration,
}

impl Default for ShellOptions {
	fn default() -> Self {
		Self {
			app_name: "Multi-Theme Switcher".to_string(),
			sidebar_theme: DEFAULT_SIDEBAR_THEME.to_string(),
			product_limit: DEFAULT_PRODUCT_LIMIT,
			submit_delay: Duration::from_secs(2),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shortcuts_round_trip_through_views() {
		for view in View::ALL {
			assert_eq!(View::from_shortcut(view.shortcut()), Some(view));
		}
		assert_eq!(View::from_shortcut('9'), None);
	}

	#[test]
	fn next_cycles_through_every_view() {
		assert_eq!(View::Home.next().next().next(), View::Home);
	}
}
