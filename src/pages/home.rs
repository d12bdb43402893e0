//! Demo pages, one per preset.

use leptos::prelude::*;

use crate::components::hero::{CtaAction, FeatureItem, HeroSection};
use crate::components::network::{NetworkConfig, SpeedConfig};

fn features() -> Vec<FeatureItem> {
	vec![
		FeatureItem::new("⬡", "Proximity graph"),
		FeatureItem::new("✦", "Pointer-reactive flows"),
		FeatureItem::new("◎", "Depth parallax"),
	]
}

/// Default Home Page: the hexagonal network.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<HeroSection
			top_label="Network"
			title="Hexagonal Network"
			subtitle="Move the pointer across the page. Fast strokes throw particles, hubs send flows."
			features=features()
			cta=CtaAction::Href("/mesh".into())
			cta_text="See the mesh"
		/>
	}
}

/// Quiet square mesh variant.
#[component]
pub fn MeshDemo() -> impl IntoView {
	view! {
		<HeroSection
			title="Subtle Mesh"
			subtitle="Grid layout, circle nodes, no hubs."
			config=NetworkConfig::mesh()
			cta=CtaAction::Href("/constellation".into())
			cta_text="See the constellation"
		/>
	}
}

/// Radial constellation variant, slowed down.
#[component]
pub fn ConstellationDemo() -> impl IntoView {
	let config = NetworkConfig::constellation().with_speed(SpeedConfig {
		time_increment: 10.0,
		magnetic_force: 0.5,
		..SpeedConfig::default()
	});
	let on_click = Callback::new(|_: ()| log::info!("constellation cta clicked"));

	view! {
		<HeroSection
			title="Neural Constellation"
			subtitle="Concentric rings around the center."
			config=config
			cta=CtaAction::OnClick(on_click)
		/>
	}
}

/// Drifting grain texture with a vignette, nothing else.
#[component]
pub fn TextureDemo() -> impl IntoView {
	view! {
		<HeroSection
			title="Noise Texture"
			subtitle="A slowly drifting grain behind the content."
			config=NetworkConfig::texture()
			cta=CtaAction::Href("/lines".into())
			cta_text="See the lines"
		/>
	}
}

/// Orbiting points linked by travelling pulses.
#[component]
pub fn LinesDemo() -> impl IntoView {
	view! {
		<HeroSection
			title="Animated Lines"
			subtitle="Points drift toward the center and trade pulses."
			config=NetworkConfig::lines()
			cta=CtaAction::Href("/hybrid".into())
			cta_text="See the hybrid"
		/>
	}
}

/// Texture, mesh and lines stacked together.
#[component]
pub fn HybridDemo() -> impl IntoView {
	view! {
		<HeroSection
			top_label="Hybrid"
			title="Texture, Mesh, Lines"
			subtitle="Three layers composed back to front."
			features=features()
			config=NetworkConfig::hybrid()
			cta=CtaAction::Href("/blueprint".into())
			cta_text="See the blueprint"
		/>
	}
}

/// Constellation over a drifting blueprint grid.
#[component]
pub fn BlueprintDemo() -> impl IntoView {
	view! {
		<HeroSection
			title="Blueprint"
			subtitle="Guide grid, crosshair and corner brackets under the rings."
			config=NetworkConfig::blueprint()
			cta=CtaAction::Href("/".into())
			cta_text="Back to the start"
		/>
	}
}
