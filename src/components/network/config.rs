//! Tunables for one network variant.
//!
//! Every variant of the background (hex network, quiet mesh, radial constellation, noise texture,
//! animated lines and their hybrids) is the same engine with a different [`NetworkConfig`]. Timing is frame-count driven: all rates below are
//! applied once per frame, not scaled by wall-clock time.

/// Anchor layout pattern used by the graph builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
	/// Staggered hexagonal tiling, `spacing` is the hexagon radius.
	Hexagonal,
	/// Uniform square grid with `spacing` between rows and columns.
	Grid,
	/// Concentric rings around the surface center, `spacing` apart.
	Radial,
}

/// Shape drawn for each node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
	/// Flat-top hexagon.
	Hex,
	/// Circle.
	Circle,
}

/// Which visual layers the compositor and simulator run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layers {
	/// Proximity edges between nodes.
	pub edges: bool,
	/// Long-lived hub-sourced flows.
	pub flows: bool,
	/// Short pulses along edges near the pointer.
	pub waves: bool,
	/// Pointer-to-node light rays.
	pub rays: bool,
	/// Halo and pulsing core around the pointer.
	pub pointer_glow: bool,
	/// Ambient particles emitted by fast pointer motion.
	pub particles: bool,
	/// Node shapes.
	pub nodes: bool,
	/// Drifting grayscale texture under everything.
	pub noise: bool,
	/// Ring of drifting points joined by travelling pulses, over everything.
	pub lines: bool,
	/// Drifting guide grid, center crosshair and corner brackets.
	pub guides: bool,
}

impl Layers {
	/// Nothing drawn except the background.
	pub const NONE: Layers = Layers {
		edges: false,
		flows: false,
		waves: false,
		rays: false,
		pointer_glow: false,
		particles: false,
		nodes: false,
		noise: false,
		lines: false,
		guides: false,
	};

	/// Every graph-driven layer; the ambient ones stay off.
	pub const NETWORK: Layers = Layers {
		edges: true,
		flows: true,
		waves: true,
		rays: true,
		pointer_glow: true,
		particles: true,
		nodes: true,
		..Layers::NONE
	};
}

impl Default for Layers {
	fn default() -> Self {
		Self::NETWORK
	}
}

/// Speed tuning accepted from the hosting view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedConfig {
	/// Scale of each node's idle float amplitude.
	pub node_velocity: f64,
	/// Time units added to the global accumulator per frame.
	pub time_increment: f64,
	/// Strength of the pointer attraction nudge.
	pub magnetic_force: f64,
	/// Frequency of the edge opacity pulse.
	pub connection_pulse: f64,
	/// Frequency of the node opacity pulse.
	pub node_pulse: f64,
}

impl SpeedConfig {
	/// Default float amplitude scale.
	pub const NODE_VELOCITY: f64 = 1.0;
	/// Default time units per frame (one 60Hz frame in milliseconds).
	pub const TIME_INCREMENT: f64 = 16.0;
	/// Default attraction strength.
	pub const MAGNETIC_FORCE: f64 = 0.3;
	/// Default edge pulse frequency.
	pub const CONNECTION_PULSE: f64 = 0.005;
	/// Default node pulse frequency.
	pub const NODE_PULSE: f64 = 0.003;

	/// Apply the keys present in `overrides` on top of the defaults.
	pub fn merged(overrides: &SpeedOverrides) -> Self {
		let base = Self::default();
		Self {
			node_velocity: overrides.node_velocity.unwrap_or(base.node_velocity),
			time_increment: overrides.time_increment.unwrap_or(base.time_increment),
			magnetic_force: overrides.magnetic_force.unwrap_or(base.magnetic_force),
			connection_pulse: overrides.connection_pulse.unwrap_or(base.connection_pulse),
			node_pulse: overrides.node_pulse.unwrap_or(base.node_pulse),
		}
	}
}

impl Default for SpeedConfig {
	fn default() -> Self {
		Self {
			node_velocity: Self::NODE_VELOCITY,
			time_increment: Self::TIME_INCREMENT,
			magnetic_force: Self::MAGNETIC_FORCE,
			connection_pulse: Self::CONNECTION_PULSE,
			node_pulse: Self::NODE_PULSE,
		}
	}
}

/// Partial speed configuration as supplied by the hosting view; missing keys keep defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpeedOverrides {
	/// See [`SpeedConfig::node_velocity`].
	pub node_velocity: Option<f64>,
	/// See [`SpeedConfig::time_increment`].
	pub time_increment: Option<f64>,
	/// See [`SpeedConfig::magnetic_force`].
	pub magnetic_force: Option<f64>,
	/// See [`SpeedConfig::connection_pulse`].
	pub connection_pulse: Option<f64>,
	/// See [`SpeedConfig::node_pulse`].
	pub node_pulse: Option<f64>,
}

/// Full variant configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
	/// Anchor layout.
	pub layout: Layout,
	/// Node shape.
	pub shape: NodeShape,
	/// Enabled layers.
	pub layers: Layers,
	/// Speed tuning.
	pub speed: SpeedConfig,

	/// Layout pitch in CSS pixels.
	pub spacing: f64,
	/// Nodes closer than this (strictly) are connected.
	pub connection_radius: f64,
	/// Anchors further than this outside the surface are discarded.
	pub margin: f64,
	/// Number of depth layers.
	pub depth_layers: usize,
	/// Fraction of the pointer's offset from the center applied to the deepest layer.
	pub parallax_strength: f64,

	/// Minimum center ratio for a node to be considered for hub status.
	pub hub_threshold: f64,
	/// Chance that an eligible node becomes a hub.
	pub hub_probability: f64,
	/// Hub cap.
	pub max_hubs: usize,

	/// Pointer attraction radius.
	pub influence_radius: f64,
	/// Light ray reach.
	pub ray_radius: f64,

	/// Particle cap.
	pub max_particles: usize,
	/// Ray cap at full intensity.
	pub max_rays: usize,
	/// Wave cap.
	pub max_waves: usize,
	/// Flow cap.
	pub max_flows: usize,

	/// Wave progress per frame.
	pub wave_step: f64,
	/// Flow progress per frame.
	pub flow_step: f64,
	/// Per-frame wave spawn chance at full intensity.
	pub wave_chance: f64,
	/// Per-frame flow spawn chance.
	pub flow_chance: f64,
	/// Probability of choosing the flow source among hubs when any exist.
	pub flow_hub_bias: f64,

	/// Intensity gained per frame while the pointer is fresh.
	pub intensity_recovery: f64,
	/// Intensity lost per frame while the pointer is stale (doubled when inactive).
	pub intensity_decay: f64,
	/// Time units after the last pointer sample before the pointer counts as stale.
	pub stale_after: f64,
	/// Minimum intensity for particle emission.
	pub particle_floor: f64,
	/// Intensity flows require (strictly above).
	pub flow_gate: f64,
	/// Intensity rays require.
	pub ray_gate: f64,
	/// Minimum per-event pointer travel that emits particles.
	pub movement_threshold: f64,
	/// Particle velocity multiplier per frame.
	pub particle_damping: f64,

	/// Seed shift of the noise texture per frame.
	pub noise_step: f64,
	/// Number of points in the animated-lines ring.
	pub line_points: usize,
	/// Animated-lines clock advance per frame.
	pub line_step: f64,
	/// Guide grid pitch in CSS pixels.
	pub guide_spacing: f64,
	/// Guide drift clock advance per frame.
	pub guide_step: f64,
}

impl NetworkConfig {
	/// Hub-forming hexagonal network with every layer enabled.
	pub fn hexagonal() -> Self {
		Self {
			layout: Layout::Hexagonal,
			shape: NodeShape::Hex,
			layers: Layers::NETWORK,
			speed: SpeedConfig::default(),
			spacing: 70.0,
			connection_radius: 140.0,
			margin: 50.0,
			depth_layers: 3,
			parallax_strength: 0.3,
			hub_threshold: 0.7,
			hub_probability: 0.15,
			max_hubs: 5,
			influence_radius: 200.0,
			ray_radius: 250.0,
			max_particles: 30,
			max_rays: 12,
			max_waves: 10,
			max_flows: 20,
			wave_step: 0.02,
			flow_step: 0.015,
			wave_chance: 0.15,
			flow_chance: 0.1,
			flow_hub_bias: 0.7,
			intensity_recovery: 0.05,
			intensity_decay: 0.02,
			stale_after: 100.0,
			particle_floor: 0.3,
			flow_gate: 0.5,
			ray_gate: 0.1,
			movement_threshold: 0.5,
			particle_damping: 0.98,
			noise_step: 0.1,
			line_points: 8,
			line_step: 0.01,
			guide_spacing: 60.0,
			guide_step: 0.03,
		}
	}

	/// Quiet square mesh: circles, no hubs and no flows.
	pub fn mesh() -> Self {
		Self {
			layout: Layout::Grid,
			shape: NodeShape::Circle,
			layers: Layers {
				flows: false,
				rays: false,
				..Layers::NETWORK
			},
			spacing: 80.0,
			connection_radius: 120.0,
			max_hubs: 0,
			depth_layers: 2,
			..Self::hexagonal()
		}
	}

	/// Radial constellation around the surface center.
	pub fn constellation() -> Self {
		Self {
			layout: Layout::Radial,
			shape: NodeShape::Circle,
			spacing: 90.0,
			connection_radius: 150.0,
			..Self::hexagonal()
		}
	}

	/// Grayscale noise texture alone.
	pub fn texture() -> Self {
		Self {
			layers: Layers {
				noise: true,
				..Layers::NONE
			},
			..Self::hexagonal()
		}
	}

	/// Animated lines alone.
	pub fn lines() -> Self {
		Self {
			layers: Layers {
				lines: true,
				..Layers::NONE
			},
			..Self::hexagonal()
		}
	}

	/// Noise texture, a static grid mesh and animated lines stacked together.
	pub fn hybrid() -> Self {
		Self {
			layers: Layers {
				noise: true,
				edges: true,
				nodes: true,
				lines: true,
				..Layers::NONE
			},
			line_step: 0.008,
			..Self::mesh()
		}
	}

	/// Constellation network over a drifting guide grid.
	pub fn blueprint() -> Self {
		Self {
			layers: Layers {
				guides: true,
				..Layers::NETWORK
			},
			..Self::constellation()
		}
	}

	/// Replace the speed tuning.
	pub fn with_speed(mut self, speed: SpeedConfig) -> Self {
		self.speed = speed;
		self
	}
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self::hexagonal()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn overrides_only_replace_present_keys() {
		let speed = SpeedConfig::merged(&SpeedOverrides {
			magnetic_force: Some(0.6),
			node_pulse: Some(0.01),
			..Default::default()
		});
		assert_eq!(speed.magnetic_force, 0.6);
		assert_eq!(speed.node_pulse, 0.01);
		assert_eq!(speed.node_velocity, SpeedConfig::NODE_VELOCITY);
		assert_eq!(speed.time_increment, SpeedConfig::TIME_INCREMENT);
		assert_eq!(speed.connection_pulse, SpeedConfig::CONNECTION_PULSE);
	}

	#[test]
	fn presets_differ_only_where_intended() {
		let mesh = NetworkConfig::mesh();
		assert_eq!(mesh.layout, Layout::Grid);
		assert_eq!(mesh.max_hubs, 0);
		assert!(!mesh.layers.flows);
		assert_eq!(mesh.max_particles, NetworkConfig::hexagonal().max_particles);
		assert_eq!(NetworkConfig::default(), NetworkConfig::hexagonal());
	}

	#[test]
	fn ambient_presets_enable_only_their_layers() {
		let texture = NetworkConfig::texture().layers;
		assert_eq!(texture, Layers { noise: true, ..Layers::NONE });

		let hybrid = NetworkConfig::hybrid();
		assert!(hybrid.layers.noise && hybrid.layers.lines && hybrid.layers.edges);
		assert!(!hybrid.layers.particles && !hybrid.layers.pointer_glow);
		assert_eq!(hybrid.layout, Layout::Grid);

		let blueprint = NetworkConfig::blueprint();
		assert!(blueprint.layers.guides && blueprint.layers.rays);
		assert_eq!(blueprint.layout, Layout::Radial);
		assert!(!NetworkConfig::hexagonal().layers.noise);
	}
}
