use leptos::prelude::Callback;

/// One entry of the feature strip: an icon glyph and a short text.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureItem {
	/// Glyph shown in the icon box.
	pub icon: String,
	/// Feature text.
	pub text: String,
}

impl FeatureItem {
	/// Build from anything string-like.
	pub fn new(icon: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			icon: icon.into(),
			text: text.into(),
		}
	}
}

/// What the call-to-action does.
#[derive(Clone)]
pub enum CtaAction {
	/// Navigate to a link target.
	Href(String),
	/// Invoke a callback.
	OnClick(Callback<()>),
}

impl Default for CtaAction {
	fn default() -> Self {
		CtaAction::Href("#".into())
	}
}
