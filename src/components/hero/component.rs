use leptos::prelude::*;

use super::types::{CtaAction, FeatureItem};
use crate::components::network::{NetworkConfig, SpeedConfig, SpeedOverrides, use_network_background};

/// Full-bleed hero with the network animation painted behind its content.
#[component]
pub fn HeroSection(
	/// Main heading.
	#[prop(into)] title: String,
	/// Line under the heading.
	#[prop(into)] subtitle: String,
	/// Small label above the heading.
	#[prop(optional, into)] top_label: Option<String>,
	/// Feature strip entries; hidden when empty.
	#[prop(optional)] features: Vec<FeatureItem>,
	/// Call-to-action label.
	#[prop(default = "Get Started".into(), into)] cta_text: String,
	/// Call-to-action behavior.
	#[prop(optional)] cta: CtaAction,
	/// Animation variant.
	#[prop(optional)] config: NetworkConfig,
	/// Per-field overrides of the variant's speed.
	#[prop(optional)] speed: Option<SpeedOverrides>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let config = match speed {
		Some(overrides) => config.with_speed(SpeedConfig::merged(&overrides)),
		None => config,
	};
	use_network_background(canvas_ref, container_ref, config);

	let cta_view = match cta {
		CtaAction::Href(href) => view! {
			<a href=href class="hero-cta-link">
				<button class="hero-cta">{cta_text}</button>
			</a>
		}
		.into_any(),
		CtaAction::OnClick(callback) => view! {
			<button class="hero-cta" on:click=move |_| callback.run(())>
				{cta_text}
			</button>
		}
		.into_any(),
	};

	let features_view = (!features.is_empty()).then(|| {
		view! {
			<div class="hero-features">
				{features
					.into_iter()
					.map(|feature| {
						view! {
							<div class="hero-feature">
								<div class="hero-feature-icon">{feature.icon}</div>
								<div class="hero-feature-text">{feature.text}</div>
							</div>
						}
					})
					.collect_view()}
			</div>
		}
	});

	view! {
		<div
			node_ref=container_ref
			class="hero-container"
			style="position: relative; overflow: hidden; min-height: 100vh;"
		>
			<canvas
				node_ref=canvas_ref
				class="hero-canvas"
				style="position: absolute; inset: 0; display: block; pointer-events: none;"
			/>
			<div class="hero-content" style="position: relative;">
				{top_label.map(|label| view! { <div class="hero-top-label">{label}</div> })}
				<h1 class="hero-title">{title}</h1>
				<p class="hero-subtitle">{subtitle}</p>
				{features_view}
				{cta_view}
			</div>
		</div>
	}
}
