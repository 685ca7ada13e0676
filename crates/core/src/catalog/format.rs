use super::Rating;

/// One glyph of a five-star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarKind {
	/// Whole star.
	Full,
	/// Fractional remainder.
	Half,
	/// Unearned star.
	Empty,
}

impl StarKind {
	/// Glyph used to draw the star.
	#[must_use]
	pub fn symbol(self) -> &'static str {
		match self {
			Self::Full | Self::Half => "★",
			Self::Empty => "☆",
		}
	}
}

/// Format a dollar amount as `$1,234.50`.
#[must_use]
pub fn format_price(price: f64) -> String {
	let cents = (price.abs() * 100.0).round() as u64;
	let dollars = cents / 100;
	let remainder = cents % 100;

	let digits = dollars.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (index, ch) in digits.chars().enumerate() {
		if index > 0 && (digits.len() - index) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(ch);
	}

	let sign = if price < 0.0 { "-" } else { "" };
	format!("{sign}${grouped}.{remainder:02}")
}

/// Stars for a 0-5 score: full stars, one half star for any fraction, then
/// empty stars up to five.
#[must_use]
pub fn rating_stars(rate: f64) -> Vec<StarKind> {
	let rate = rate.clamp(0.0, 5.0);
	let full = rate.floor() as usize;
	let has_half = rate.fract() != 0.0;
	let empty = 5 - rate.ceil() as usize;

	let mut stars = vec![StarKind::Full; full];
	if has_half {
		stars.push(StarKind::Half);
	}
	stars.extend(std::iter::repeat_n(StarKind::Empty, empty));
	stars
}

/// `4.1 (259 reviews)`.
#[must_use]
pub fn rating_summary(rating: &Rating) -> String {
	format!("{:.1} ({} reviews)", rating.rate, rating.count)
}

/// Cut `text` to `max_chars` characters, trimming and appending `...` when
/// anything was removed.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
	if text.chars().count() <= max_chars {
		return text.to_string();
	}
	let head: String = text.chars().take(max_chars).collect();
	format!("{}...", head.trim())
}
