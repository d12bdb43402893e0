//! Per-frame simulation of nodes, particles, waves, flows and rays.

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::NetworkConfig;
use super::graph::{Graph, NodeId};
use super::lines::LineField;
use super::noise::NoiseTexture;
use super::pointer::{EffectIntensity, PointerSample, PointerState};
use super::surface::SurfaceSize;

/// Ambient emission from fast pointer motion.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Position.
	pub x: f64,
	/// Position.
	pub y: f64,
	/// Velocity per frame.
	pub vx: f64,
	/// Velocity per frame.
	pub vy: f64,
	/// `1.0` at spawn, removed once it reaches `0.0`.
	pub life: f64,
	/// Life lost per frame.
	pub decay: f64,
	/// Radius.
	pub size: f64,
	/// Peak opacity.
	pub opacity: f64,
}

/// Short pulse along an edge near the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct DataWave {
	/// Start node.
	pub source: NodeId,
	/// End node.
	pub target: NodeId,
	/// Position along the edge in `0.0..1.0`.
	pub progress: f64,
}

/// Slower directional pulse, preferably sourced at a hub.
#[derive(Clone, Debug, PartialEq)]
pub struct DataFlow {
	/// Start node.
	pub source: NodeId,
	/// End node.
	pub target: NodeId,
	/// Position along the edge in `0.0..1.0`.
	pub progress: f64,
	/// Brightness multiplier.
	pub intensity: f64,
}

/// Pointer-to-node ray, recomputed every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct LightRay {
	/// Target node position.
	pub target_x: f64,
	/// Target node position.
	pub target_y: f64,
	/// Brightness multiplier.
	pub intensity: f64,
}

/// All mutable animation state of one engine instance.
pub struct NetworkState {
	/// Variant configuration.
	pub config: NetworkConfig,
	/// Current surface size.
	pub size: SurfaceSize,
	/// Nodes and adjacency for the current size.
	pub graph: Graph,
	/// Live particles.
	pub particles: Vec<Particle>,
	/// Live waves.
	pub waves: Vec<DataWave>,
	/// Live flows.
	pub flows: Vec<DataFlow>,
	/// Rays for this frame.
	pub rays: Vec<LightRay>,
	/// Pointer as of this frame.
	pub pointer: PointerState,
	/// Effect intensity as of this frame.
	pub intensity: EffectIntensity,
	/// Global time accumulator, advanced by a fixed increment per frame.
	pub time: f64,
	/// Frames simulated since construction.
	pub frame: u64,
	/// Texture buffer, allocated only while the noise layer is on.
	pub noise: NoiseTexture,
	/// Animated-lines points, empty while that layer is off.
	pub lines: LineField,
	rng: SmallRng,
}

impl NetworkState {
	/// State seeded from entropy.
	pub fn new(config: NetworkConfig, size: SurfaceSize) -> Self {
		Self::with_rng(config, size, SmallRng::from_entropy())
	}

	/// Deterministic state for a given seed.
	pub fn seeded(config: NetworkConfig, size: SurfaceSize, seed: u64) -> Self {
		Self::with_rng(config, size, SmallRng::seed_from_u64(seed))
	}

	fn with_rng(config: NetworkConfig, size: SurfaceSize, mut rng: SmallRng) -> Self {
		let graph = Graph::build(&size, &config, &mut rng);
		let noise = NoiseTexture::new(rng.gen_range(0.0..1000.0));
		let mut state = Self {
			config,
			size,
			graph,
			particles: Vec::new(),
			waves: Vec::new(),
			flows: Vec::new(),
			rays: Vec::new(),
			pointer: PointerState::default(),
			intensity: EffectIntensity::default(),
			time: 0.0,
			frame: 0,
			noise,
			lines: LineField::default(),
			rng,
		};
		state.rebuild_ambient();
		state
	}

	fn rebuild_ambient(&mut self) {
		if self.config.layers.noise {
			let (width, height) = self.size.backing_size();
			self.noise.resize(width, height);
		}
		self.lines = if self.config.layers.lines {
			LineField::build(&self.size, self.config.line_points, &mut self.rng)
		} else {
			LineField::default()
		};
	}

	/// Rebuild the graph and ambient layers for a new size. Every entity collection is discarded with it.
	pub fn resize(&mut self, size: SurfaceSize) {
		self.size = size;
		self.graph = Graph::build(&size, &self.config, &mut self.rng);
		self.particles.clear();
		self.waves.clear();
		self.flows.clear();
		self.rays.clear();
		self.rebuild_ambient();
	}

	/// Advance one frame using the latest pointer sample.
	pub fn tick(&mut self, sample: PointerSample) {
		self.time += self.config.speed.time_increment;
		self.frame += 1;
		let burst = self.pointer.absorb(sample, self.time);
		self.intensity.update(&self.pointer, self.time, &self.config);
		if burst && self.config.layers.particles {
			self.emit_particles(self.pointer.x, self.pointer.y);
		}

		self.update_nodes();
		self.update_particles();
		self.update_waves();
		self.update_flows();
		self.update_rays();

		if self.config.layers.noise {
			self.noise.advance(self.config.noise_step);
		}
		if self.config.layers.lines {
			self.lines.step(&self.size, self.config.line_step);
		}
	}

	/// Spawn a burst at `(x, y)`; returns how many particles were added.
	pub fn emit_particles(&mut self, x: f64, y: f64) -> usize {
		let intensity = self.intensity.value();
		let room = self.config.max_particles.saturating_sub(self.particles.len());
		if room == 0 || intensity < self.config.particle_floor {
			return 0;
		}

		let count = (((2 + self.rng.gen_range(0..3)) as f64 * intensity).floor() as usize).min(room);
		for _ in 0..count {
			let angle = self.rng.gen_range(0.0..TAU);
			let speed = self.rng.gen_range(1.0..3.0);
			self.particles.push(Particle {
				x,
				y,
				vx: angle.cos() * speed,
				vy: angle.sin() * speed,
				life: 1.0,
				decay: self.rng.gen_range(0.02..0.04),
				size: self.rng.gen_range(1.0..3.0),
				opacity: self.rng.gen_range(0.6..1.0),
			});
		}
		count
	}

	fn update_nodes(&mut self) {
		let config = &self.config;
		let (t, pointer) = (self.time, self.pointer);
		let (cx, cy) = self.size.center();
		let (parallax_x, parallax_y) = if pointer.active {
			(
				(pointer.x - cx) * config.parallax_strength,
				(pointer.y - cy) * config.parallax_strength,
			)
		} else {
			(0.0, 0.0)
		};
		let depth = config.depth_layers.max(1) as f64;
		let influence_sq = config.influence_radius * config.influence_radius;

		for node in &mut self.graph.nodes {
			let layer_fraction = node.layer as f64 / depth;
			let float_amount = if node.is_hub { 1.0 } else { 2.0 } * config.speed.node_velocity;
			node.x = node.base_x + (t * 0.001 + node.phase).sin() * float_amount + parallax_x * layer_fraction;
			node.y = node.base_y + (t * 0.001 + node.phase).cos() * float_amount + parallax_y * layer_fraction;

			let pulse_amount = if node.is_hub { 0.15 } else { 0.1 };
			let cluster_pulse = (t * 0.002).sin() * pulse_amount;
			let drift = (t * 0.0015 + node.cluster_phase).sin() * cluster_pulse;
			node.x += node.cluster_phase.cos() * drift;
			node.y += node.cluster_phase.sin() * drift;

			let (base, variation) = if node.is_hub { (0.5, 0.4) } else { (0.3, 0.3) };
			node.opacity = (base + (t * config.speed.node_pulse + node.pulse_phase).sin() * variation).max(0.0);
			node.activity *= 0.95;
			node.active = false;

			if pointer.active {
				let (dx, dy) = (pointer.x - node.x, pointer.y - node.y);
				let dist_sq = dx * dx + dy * dy;
				if dist_sq < influence_sq {
					let dist = dist_sq.sqrt();
					if dist > f64::EPSILON {
						let force = (1.0 - dist / config.influence_radius) * config.speed.magnetic_force;
						node.x += dx / dist * force;
						node.y += dy / dist * force;
					}
					node.active = true;
					node.opacity = (node.opacity + 0.2).min(1.0);
					node.activity = (node.activity + 0.1).min(1.0);
				}
			}

			node.size = node.base_size * if node.active { 1.5 } else { 1.0 };
		}
	}

	fn update_particles(&mut self) {
		let (damping, size) = (self.config.particle_damping, self.size);
		self.particles.retain_mut(|p| {
			p.x += p.vx;
			p.y += p.vy;
			p.vx *= damping;
			p.vy *= damping;
			p.life = (p.life - p.decay).max(0.0);
			p.life > 0.0 && size.contains(p.x, p.y)
		});
	}

	fn update_waves(&mut self) {
		let (step, graph) = (self.config.wave_step, &self.graph);
		self.waves.retain_mut(|w| {
			w.progress += step;
			w.progress < 1.0 && graph.get(w.source).is_some() && graph.get(w.target).is_some()
		});

		let chance = (self.config.wave_chance * self.intensity.value()).clamp(0.0, 1.0);
		if !self.config.layers.waves || !self.pointer.active || !self.rng.gen_bool(chance) {
			return;
		}
		for (i, node) in self.graph.nodes.iter().enumerate() {
			if self.waves.len() >= self.config.max_waves {
				break;
			}
			if !node.active || node.neighbors.is_empty() {
				continue;
			}
			let target = node.neighbors[self.rng.gen_range(0..node.neighbors.len())];
			self.waves.push(DataWave {
				source: i,
				target,
				progress: 0.0,
			});
		}
	}

	fn update_flows(&mut self) {
		let (step, graph) = (self.config.flow_step, &self.graph);
		self.flows.retain_mut(|f| {
			f.progress += step;
			f.progress < 1.0 && graph.get(f.source).is_some() && graph.get(f.target).is_some()
		});

		let config = &self.config;
		if !config.layers.flows
			|| self.intensity.value() <= config.flow_gate
			|| self.flows.len() >= config.max_flows
			|| !self.rng.gen_bool(config.flow_chance.clamp(0.0, 1.0))
		{
			return;
		}

		let sources: Vec<NodeId> =
			if !self.graph.hubs.is_empty() && self.rng.gen_bool(config.flow_hub_bias.clamp(0.0, 1.0)) {
				self.graph.hubs.clone()
			} else {
				(0..self.graph.len())
					.filter(|&i| self.graph.nodes[i].active || self.graph.nodes[i].is_hub)
					.collect()
			};
		if sources.is_empty() {
			return;
		}

		let source = sources[self.rng.gen_range(0..sources.len())];
		let Some(node) = self.graph.get(source) else {
			return;
		};
		if node.neighbors.is_empty() {
			return;
		}
		let target = node.neighbors[self.rng.gen_range(0..node.neighbors.len())];
		self.flows.push(DataFlow {
			source,
			target,
			progress: 0.0,
			intensity: self.rng.gen_range(0.6..1.0),
		});
	}

	fn update_rays(&mut self) {
		self.rays.clear();
		let intensity = self.intensity.value();
		if !self.config.layers.rays || !self.pointer.active || intensity < self.config.ray_gate {
			return;
		}

		let (px, py, reach) = (self.pointer.x, self.pointer.y, self.config.ray_radius);
		let mut nearest: Vec<(f64, f64, f64)> = self
			.graph
			.nodes
			.iter()
			.map(|n| (n.x, n.y, (px - n.x).powi(2) + (py - n.y).powi(2)))
			.filter(|&(_, _, d)| d < reach * reach)
			.collect();
		nearest.sort_by(|a, b| a.2.total_cmp(&b.2));
		nearest.truncate((self.config.max_rays as f64 * intensity).floor() as usize);

		self.rays.extend(nearest.into_iter().map(|(x, y, d)| LightRay {
			target_x: x,
			target_y: y,
			intensity: (1.0 - d.sqrt() / reach).max(0.3) * intensity,
		}));
	}
}
