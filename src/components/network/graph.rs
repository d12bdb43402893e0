//! Node layouts, depth layers, hubs and proximity edges.

use std::f64::consts::{PI, TAU};

use rand::Rng;

use super::config::{Layout, NetworkConfig};
use super::surface::SurfaceSize;

/// Stable identity of a node within one graph generation.
pub type NodeId = usize;

#[derive(Clone, Debug, PartialEq)]
/// One vertex of the network.
pub struct Node {
	/// Drawn position after float, drift, parallax and attraction.
	pub x: f64,
	/// Drawn position after float, drift, parallax and attraction.
	pub y: f64,
	/// Layout position; never changes after construction.
	pub base_x: f64,
	/// Layout position; never changes after construction.
	pub base_y: f64,
	/// Depth bucket, growing toward the surface center. Painted from the highest down to `0`.
	pub layer: usize,
	/// Larger, brighter node that preferentially sources flows.
	pub is_hub: bool,
	/// Float phase offset.
	pub phase: f64,
	/// Opacity pulse phase offset.
	pub pulse_phase: f64,
	/// Direction and phase of the cluster drift.
	pub cluster_phase: f64,
	/// Current radius.
	pub size: f64,
	/// Radius at rest.
	pub base_size: f64,
	/// Current opacity before layer scaling.
	pub opacity: f64,
	/// Pointer within the influence radius this frame.
	pub active: bool,
	/// Decaying interaction level in `0.0..=1.0`.
	pub activity: f64,
	/// Adjacent nodes, symmetric across the graph.
	pub neighbors: Vec<NodeId>,
	/// Cluster tag in `0..5`.
	pub cluster: u8,
}

/// Nodes plus the proximity graph between their anchors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	/// All nodes, indexed by [`NodeId`].
	pub nodes: Vec<Node>,
	/// Ids of hub nodes in creation order.
	pub hubs: Vec<NodeId>,
}

impl Graph {
	/// Lay out anchors for `config.layout` over the surface and connect them.
	pub fn build<R: Rng + ?Sized>(size: &SurfaceSize, config: &NetworkConfig, rng: &mut R) -> Self {
		Self::from_anchors(&anchors(size, config), size, config, rng)
	}

	/// Build from explicit anchor positions.
	pub fn from_anchors<R: Rng + ?Sized>(
		anchors: &[(f64, f64)],
		size: &SurfaceSize,
		config: &NetworkConfig,
		rng: &mut R,
	) -> Self {
		let (cx, cy) = size.center();
		let max_dist = size.half_diagonal();
		let depth = config.depth_layers.max(1);
		let hub_probability = config.hub_probability.clamp(0.0, 1.0);
		let mut graph = Graph::default();

		for &(x, y) in anchors {
			let center_ratio = 1.0 - (x - cx).hypot(y - cy) / max_dist;
			let layer = ((center_ratio * depth as f64).floor().max(0.0) as usize).min(depth - 1);
			let is_hub = graph.hubs.len() < config.max_hubs
				&& center_ratio > config.hub_threshold
				&& rng.gen_bool(hub_probability);
			let base_size = if is_hub {
				6.0 + rng.gen_range(0.0..2.0)
			} else {
				3.0 + rng.gen_range(0.0..1.5)
			};

			if is_hub {
				graph.hubs.push(graph.nodes.len());
			}
			graph.nodes.push(Node {
				x,
				y,
				base_x: x,
				base_y: y,
				layer,
				is_hub,
				phase: rng.gen_range(0.0..TAU),
				pulse_phase: rng.gen_range(0.0..TAU),
				cluster_phase: rng.gen_range(0.0..TAU),
				size: base_size,
				base_size,
				opacity: 0.3 + rng.gen_range(0.0..0.4),
				active: false,
				activity: 0.0,
				neighbors: Vec::new(),
				cluster: rng.gen_range(0..5),
			});
		}

		graph.connect(config.connection_radius);
		graph
	}

	/// Exhaustive pairwise pass; nodes strictly closer than `radius` become neighbors.
	fn connect(&mut self, radius: f64) {
		let radius_sq = radius * radius;
		for node in &mut self.nodes {
			node.neighbors.clear();
		}
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let (dx, dy) = (
					self.nodes[i].base_x - self.nodes[j].base_x,
					self.nodes[i].base_y - self.nodes[j].base_y,
				);
				if dx * dx + dy * dy < radius_sq {
					self.nodes[i].neighbors.push(j);
					self.nodes[j].neighbors.push(i);
				}
			}
		}
	}

	/// Node count.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// No nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Node by id, `None` for stale ids.
	pub fn get(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id)
	}

	/// Every undirected edge once, as `(lower, higher)`.
	pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
		self.nodes.iter().enumerate().flat_map(|(i, node)| {
			node.neighbors
				.iter()
				.copied()
				.filter(move |&j| j > i)
				.map(move |j| (i, j))
		})
	}
}

/// Candidate anchors for the configured layout, limited to the surface plus margin.
pub fn anchors(size: &SurfaceSize, config: &NetworkConfig) -> Vec<(f64, f64)> {
	let (w, h, m) = (size.width, size.height, config.margin);
	let spacing = config.spacing.max(1.0);
	let inside = |&(x, y): &(f64, f64)| x > -m && x < w + m && y > -m && y < h + m;

	match config.layout {
		Layout::Hexagonal => {
			let (hex_w, hex_h) = (spacing * 2.0, spacing * 3f64.sqrt());
			let cols = (w / (hex_w * 0.75)).ceil() as i64 + 2;
			let rows = (h / hex_h).ceil() as i64 + 2;
			(-1..rows)
				.flat_map(|row| (-1..cols).map(move |col| (row, col)))
				.map(|(row, col)| {
					let stagger = if col.rem_euclid(2) == 0 { 0.0 } else { hex_h / 2.0 };
					(col as f64 * hex_w * 0.75, row as f64 * hex_h + stagger)
				})
				.filter(inside)
				.collect()
		}
		Layout::Grid => {
			let cols = (w / spacing).ceil() as i64;
			let rows = (h / spacing).ceil() as i64;
			(0..=rows)
				.flat_map(|row| (0..=cols).map(move |col| (col as f64 * spacing, row as f64 * spacing)))
				.filter(inside)
				.collect()
		}
		Layout::Radial => {
			let (cx, cy) = size.center();
			let reach = size.half_diagonal() + m;
			let mut points = vec![(cx, cy)];
			let mut ring = 1;
			while ring as f64 * spacing <= reach {
				let radius = ring as f64 * spacing;
				let count = ((TAU * radius / spacing).round() as usize).max(6);
				// Offset alternate rings so spokes don't line up.
				let offset = if ring % 2 == 0 { 0.0 } else { PI / count as f64 };
				points.extend((0..count).map(|k| {
					let angle = offset + TAU * k as f64 / count as f64;
					(cx + radius * angle.cos(), cy + radius * angle.sin())
				}));
				ring += 1;
			}
			points.into_iter().filter(inside).collect()
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn size(w: f64, h: f64) -> SurfaceSize {
		SurfaceSize::new(w, h, 1.0).unwrap()
	}

	fn build(config: &NetworkConfig, seed: u64) -> Graph {
		Graph::build(&size(800.0, 600.0), config, &mut SmallRng::seed_from_u64(seed))
	}

	fn presets() -> [NetworkConfig; 3] {
		[
			NetworkConfig::hexagonal(),
			NetworkConfig::mesh(),
			NetworkConfig::constellation(),
		]
	}

	#[test]
	fn adjacency_is_symmetric_without_self_loops() {
		for config in presets() {
			let graph = build(&config, 7);
			assert!(!graph.is_empty());
			for (i, node) in graph.nodes.iter().enumerate() {
				assert!(!node.neighbors.contains(&i));
				for &j in &node.neighbors {
					assert!(graph.nodes[j].neighbors.contains(&i), "{i} -> {j} not mirrored");
				}
			}
		}
	}

	#[test]
	fn edge_at_exact_radius_is_not_formed() {
		let config = NetworkConfig::hexagonal();
		let mut rng = SmallRng::seed_from_u64(1);
		let r = config.connection_radius;
		let graph = Graph::from_anchors(
			&[(100.0, 100.0), (100.0 + r, 100.0), (100.0, 100.0 + r - 0.001)],
			&size(800.0, 600.0),
			&config,
			&mut rng,
		);
		assert!(!graph.nodes[0].neighbors.contains(&1));
		assert!(graph.nodes[0].neighbors.contains(&2));
		assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 2)]);
	}

	#[test]
	fn same_seed_same_graph() {
		for config in presets() {
			assert_eq!(build(&config, 42), build(&config, 42));
		}
	}

	#[test]
	fn hubs_are_bounded_and_flagged() {
		let mut config = NetworkConfig::hexagonal();
		config.hub_probability = 1.0;
		config.max_hubs = 3;
		let graph = build(&config, 3);
		assert_eq!(graph.hubs.len(), config.max_hubs);
		assert_eq!(graph.nodes.iter().filter(|n| n.is_hub).count(), graph.hubs.len());
		for &hub in &graph.hubs {
			assert!(graph.nodes[hub].base_size >= 6.0);
		}

		let mesh = build(&NetworkConfig::mesh(), 3);
		assert!(mesh.hubs.is_empty());
	}

	#[test]
	fn layers_stay_in_range_and_center_is_deepest() {
		let config = NetworkConfig::constellation();
		let graph = build(&config, 11);
		assert!(graph.nodes.iter().all(|n| n.layer < config.depth_layers));
		// The radial layout puts its first node exactly at the center.
		assert_eq!(graph.nodes[0].layer, config.depth_layers - 1);
	}

	#[test]
	fn anchors_respect_margin() {
		for config in presets() {
			let s = size(640.0, 360.0);
			for (x, y) in anchors(&s, &config) {
				assert!(x > -config.margin && x < s.width + config.margin);
				assert!(y > -config.margin && y < s.height + config.margin);
			}
		}
	}
}
