//! Theme colors resolved from CSS custom properties.

use super::paint::unit;

/// Semantic color names the compositor asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorRole {
	/// Node bodies and edges.
	Primary,
	/// Accents: flows, waves, rays, glows.
	Secondary,
	/// Page background behind the canvas.
	Background,
}

impl ColorRole {
	/// CSS custom property holding this color.
	pub fn variable(self) -> &'static str {
		match self {
			ColorRole::Primary => "--color-primary",
			ColorRole::Secondary => "--color-secondary",
			ColorRole::Background => "--color-bg-body",
		}
	}

	/// RGB used when the runtime style source yields nothing usable.
	pub fn fallback_rgb(self) -> (u8, u8, u8) {
		match self {
			ColorRole::Primary => (26, 26, 26),
			ColorRole::Secondary => (0, 122, 255),
			ColorRole::Background => (255, 255, 255),
		}
	}

	/// Fallback color at `alpha`.
	pub fn fallback(self, alpha: f64) -> String {
		rgba(self.fallback_rgb(), alpha)
	}
}

/// Fallback background when no `--color-bg-body` is available.
pub const FALLBACK_BACKGROUND: &str = "#ffffff";

/// Color accessor consumed by the compositor.
///
/// Implementations may return an empty string when nothing is resolved yet; callers fall back
/// to [`ColorRole::fallback`].
pub trait Theme {
	/// Re-read the style source. Called once per frame before painting.
	fn refresh(&mut self) {}
	/// Color for `role` at `alpha`, or an empty string when unresolved.
	fn color(&self, role: ColorRole, alpha: f64) -> String;
	/// Opaque background fill, or an empty string when unresolved.
	fn background(&self) -> String;
}

/// Format an `rgba()` string with the alpha clamped into range.
pub fn rgba((r, g, b): (u8, u8, u8), alpha: f64) -> String {
	format!("rgba({r}, {g}, {b}, {})", unit(alpha))
}

/// Parse `#rrggbb`, `#rgb`, `rgb(..)` or `rgba(..)` into its RGB channels.
pub fn parse_rgb(raw: &str) -> Option<(u8, u8, u8)> {
	let raw = raw.trim();
	if let Some(hex) = raw.strip_prefix('#') {
		// Byte slicing below needs single-byte characters.
		if !hex.is_ascii() {
			return None;
		}
		let channel = |s: &str| u8::from_str_radix(s, 16).ok();
		return match hex.len() {
			6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
			3 => {
				let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
				Some((expand(0)?, expand(1)?, expand(2)?))
			}
			_ => None,
		};
	}

	let body = raw
		.strip_prefix("rgba(")
		.or_else(|| raw.strip_prefix("rgb("))?
		.strip_suffix(')')?;
	let mut parts = body
		.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
		.filter(|p| !p.is_empty())
		.map(|p| p.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8));
	Some((parts.next()??, parts.next()??, parts.next()??))
}

/// Theme backed by the document's computed style.
#[derive(Clone, Debug, Default)]
pub struct CssTheme {
	primary: String,
	secondary: String,
	background: String,
}

impl CssTheme {
	/// Theme primed with the document's current values.
	pub fn new() -> Self {
		let mut theme = Self::default();
		theme.refresh();
		theme
	}

	fn raw(&self, role: ColorRole) -> &str {
		match role {
			ColorRole::Primary => &self.primary,
			ColorRole::Secondary => &self.secondary,
			ColorRole::Background => &self.background,
		}
	}
}

impl Theme for CssTheme {
	fn refresh(&mut self) {
		let Some(style) = web_sys::window().and_then(|w| {
			let root = w.document()?.document_element()?;
			w.get_computed_style(&root).ok().flatten()
		}) else {
			return;
		};
		let read = |role: ColorRole| {
			style
				.get_property_value(role.variable())
				.map(|v| v.trim().to_string())
				.unwrap_or_default()
		};
		self.primary = read(ColorRole::Primary);
		self.secondary = read(ColorRole::Secondary);
		self.background = read(ColorRole::Background);
	}

	fn color(&self, role: ColorRole, alpha: f64) -> String {
		parse_rgb(self.raw(role))
			.map(|rgb| rgba(rgb, alpha))
			.unwrap_or_else(|| role.fallback(alpha))
	}

	fn background(&self) -> String {
		if self.background.is_empty() {
			FALLBACK_BACKGROUND.to_string()
		} else {
			self.background.clone()
		}
	}
}

/// Theme that always answers with the fallback palette.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackTheme;

impl Theme for FallbackTheme {
	fn color(&self, role: ColorRole, alpha: f64) -> String {
		role.fallback(alpha)
	}

	fn background(&self) -> String {
		FALLBACK_BACKGROUND.to_string()
	}
}
