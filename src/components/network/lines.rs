//! A ring of points drifting toward the center, linked by slow travelling pulses.

use std::f64::consts::TAU;

use rand::Rng;

use super::surface::SurfaceSize;

/// One drifting point.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitPoint {
	/// Drawn position: the base plus the float offset.
	pub x: f64,
	/// Drawn position: the base plus the float offset.
	pub y: f64,
	/// Position integrated from the velocity.
	pub base_x: f64,
	/// Position integrated from the velocity.
	pub base_y: f64,
	/// Velocity of the base position.
	pub vx: f64,
	/// Velocity of the base position.
	pub vy: f64,
	/// Float phase offset.
	pub phase: f64,
}

/// Link between two points with a pulse running from `from` to `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitLink {
	/// Index of the start point.
	pub from: usize,
	/// Index of the end point.
	pub to: usize,
	/// Pulse position, wraps back to `0.0` after passing `1.0`.
	pub progress: f64,
	/// Progress per frame.
	pub speed: f64,
	/// Peak opacity of the link.
	pub opacity: f64,
}

/// Points and links of the animated-lines layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineField {
	/// Points, initially evenly spaced on a ring.
	pub points: Vec<OrbitPoint>,
	/// Links between points that started close together.
	pub links: Vec<OrbitLink>,
	/// Local clock driving float and pulse phases.
	pub clock: f64,
}

impl LineField {
	/// Place `count` points on a ring of radius 0.3 × the shorter side and link close pairs.
	pub fn build<R: Rng + ?Sized>(size: &SurfaceSize, count: usize, rng: &mut R) -> Self {
		let min_side = size.width.min(size.height);
		let (cx, cy) = size.center();
		let radius = min_side * 0.3;

		let points: Vec<OrbitPoint> = (0..count)
			.map(|i| {
				let angle = i as f64 / count as f64 * TAU;
				let (x, y) = (cx + angle.cos() * radius, cy + angle.sin() * radius);
				OrbitPoint {
					x,
					y,
					base_x: x,
					base_y: y,
					vx: rng.gen_range(-0.05..0.05),
					vy: rng.gen_range(-0.05..0.05),
					phase: rng.gen_range(0.0..TAU),
				}
			})
			.collect();

		let link_reach = min_side * 0.5;
		let mut links = Vec::new();
		for i in 0..points.len() {
			for j in (i + 1)..points.len() {
				let (a, b) = (&points[i], &points[j]);
				if (a.base_x - b.base_x).hypot(a.base_y - b.base_y) < link_reach {
					links.push(OrbitLink {
						from: i,
						to: j,
						progress: rng.gen_range(0.0..1.0),
						speed: rng.gen_range(0.002..0.005),
						opacity: rng.gen_range(0.08..0.12),
					});
				}
			}
		}

		Self {
			points,
			links,
			clock: 0.0,
		}
	}

	/// Links longer than this are skipped when drawing.
	pub fn reach(size: &SurfaceSize) -> f64 {
		size.width.min(size.height) * 0.6
	}

	/// Advance one frame: pull points toward a minimum radius around the center, move pulses.
	pub fn step(&mut self, size: &SurfaceSize, clock_step: f64) {
		self.clock += clock_step;
		let t = self.clock;
		let (cx, cy) = size.center();
		let min_radius = size.width.min(size.height) * 0.12;

		for point in &mut self.points {
			point.base_x += point.vx;
			point.base_y += point.vy;

			let (dx, dy) = (cx - point.base_x, cy - point.base_y);
			let dist = dx.hypot(dy);
			if dist > min_radius {
				let force = (dist - min_radius) / min_radius * 0.002;
				point.vx += dx / dist * force;
				point.vy += dy / dist * force;
			} else if dist > 0.0 {
				let push = (min_radius - dist) / min_radius * 0.001;
				point.vx -= dx / dist * push;
				point.vy -= dy / dist * push;
			}
			point.vx *= 0.97;
			point.vy *= 0.97;

			point.x = point.base_x + (t * 0.2 + point.phase).sin() * 15.0;
			point.y = point.base_y + (t * 0.15 + point.phase).cos() * 15.0;
		}

		for link in &mut self.links {
			link.progress += link.speed;
			if link.progress > 1.0 {
				link.progress = 0.0;
			}
		}
	}
}
