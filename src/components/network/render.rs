//! Frame compositor over any [`Painter`](super::paint::Painter).

use std::f64::consts::{PI, TAU};

use super::config::NodeShape;
use super::lines::LineField;
use super::paint::{Gradient, Paint, Painter, unit};
use super::state::NetworkState;
use super::theme::{ColorRole, FALLBACK_BACKGROUND, Theme};

/// Theme accessor that substitutes fallbacks for empty answers.
struct Palette<'a, T: ?Sized> {
	theme: &'a T,
}

impl<T: Theme + ?Sized> Palette<'_, T> {
	fn color(&self, role: ColorRole, alpha: f64) -> String {
		let color = self.theme.color(role, unit(alpha));
		if color.trim().is_empty() {
			role.fallback(alpha)
		} else {
			color
		}
	}

	fn primary(&self, alpha: f64) -> Paint {
		Paint::Color(self.color(ColorRole::Primary, alpha))
	}

	fn secondary(&self, alpha: f64) -> Paint {
		Paint::Color(self.color(ColorRole::Secondary, alpha))
	}

	fn stop(&self, alpha: f64) -> String {
		self.color(ColorRole::Secondary, alpha)
	}

	fn background_color(&self) -> String {
		let color = self.theme.background();
		if color.trim().is_empty() {
			FALLBACK_BACKGROUND.to_string()
		} else {
			color
		}
	}

	fn background(&self) -> Paint {
		Paint::Color(self.background_color())
	}
}

/// Opacity of one edge; zero at or beyond `radius`, never negative.
pub fn edge_opacity(layer_opacity: f64, either_active: bool, dist: f64, radius: f64, pulse: f64) -> f64 {
	if dist >= radius {
		return 0.0;
	}
	let base = 0.15 * layer_opacity;
	let active = if either_active { 0.25 } else { 0.0 };
	let falloff = (1.0 - dist / radius).max(0.0) * 0.15;
	unit((base + active + falloff) * unit(pulse) * layer_opacity)
}

/// Paint one frame, back to front.
///
/// Edges and nodes are painted from the highest depth layer down to layer `0`.
pub fn render<P: Painter + ?Sized, T: Theme + ?Sized>(state: &NetworkState, ctx: &mut P, theme: &T) {
	let palette = Palette { theme };
	let layers = state.config.layers;

	ctx.clear_rect(0.0, 0.0, state.size.width, state.size.height);
	ctx.set_fill(&palette.background());
	ctx.fill_rect(0.0, 0.0, state.size.width, state.size.height);

	if layers.noise {
		draw_noise(state, ctx, &palette);
	}
	if layers.guides {
		draw_guides(state, ctx, &palette);
	}
	if layers.edges {
		draw_edges(state, ctx, &palette);
	}
	if layers.flows {
		draw_flows(state, ctx, &palette);
	}
	if layers.waves {
		draw_waves(state, ctx, &palette);
	}
	if state.pointer.active {
		if layers.rays {
			draw_rays(state, ctx, &palette);
		}
		if layers.pointer_glow {
			draw_pointer_glow(state, ctx, &palette);
		}
	}
	if layers.particles {
		draw_particles(state, ctx, &palette);
	}
	if layers.nodes {
		draw_nodes(state, ctx, &palette);
	}
	if layers.lines {
		draw_lines(state, ctx, &palette);
	}
	ctx.set_global_alpha(1.0);
}

/// Texture upload followed by a vignette fading into the background.
fn draw_noise<P: Painter + ?Sized, T: Theme + ?Sized>(
	state: &NetworkState,
	ctx: &mut P,
	palette: &Palette<'_, T>,
) {
	let noise = &state.noise;
	if !noise.is_empty() {
		ctx.put_pixels(noise.width(), noise.height(), noise.pixels());
	}

	let (w, h) = (state.size.width, state.size.height);
	let (cx, cy) = state.size.center();
	let vignette = Gradient::radial(cx, cy, 0.0, w.max(h) * 0.8)
		.stop(0.0, "transparent".to_string())
		.stop(0.5, "transparent".to_string())
		.stop(1.0, palette.background_color());
	ctx.set_fill(&vignette.into());
	ctx.fill_rect(0.0, 0.0, w, h);
}

/// Drifting grid, center crosshair and top corner brackets.
fn draw_guides<P: Painter + ?Sized, T: Theme + ?Sized>(
	state: &NetworkState,
	ctx: &mut P,
	palette: &Palette<'_, T>,
) {
	let (w, h) = (state.size.width, state.size.height);
	let spacing = state.config.guide_spacing.max(1.0);
	let clock = state.frame as f64 * state.config.guide_step;
	let offset_x = ((clock * 0.1).sin() * 2.0) % spacing;
	let offset_y = ((clock * 0.08).cos() * 2.0) % spacing;

	ctx.set_stroke(&palette.primary(0.08));
	ctx.set_line_width(0.5);
	let mut x = offset_x;
	while x < w {
		ctx.begin_path();
		ctx.move_to(x, 0.0);
		ctx.line_to(x, h);
		ctx.stroke();
		x += spacing;
	}
	let mut y = offset_y;
	while y < h {
		ctx.begin_path();
		ctx.move_to(0.0, y);
		ctx.line_to(w, y);
		ctx.stroke();
		y += spacing;
	}

	let (cx, cy) = state.size.center();
	ctx.set_stroke(&palette.primary(0.12));
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(cx - 30.0, cy);
	ctx.line_to(cx + 30.0, cy);
	ctx.move_to(cx, cy - 30.0);
	ctx.line_to(cx, cy + 30.0);
	ctx.stroke();

	const INSET: f64 = 40.0;
	const ARM: f64 = 20.0;
	ctx.set_stroke(&palette.primary(0.1));
	ctx.set_line_width(0.8);
	for (corner_x, dir) in [(INSET, 1.0), (w - INSET, -1.0)] {
		ctx.begin_path();
		ctx.move_to(corner_x, INSET);
		ctx.line_to(corner_x + ARM * dir, INSET);
		ctx.move_to(corner_x, INSET);
		ctx.line_to(corner_x, INSET + ARM);
		ctx.stroke();
	}
}

/// Links with a pulse travelling along them, then the points on top.
fn draw_lines<P: Painter + ?Sized, T: Theme + ?Sized>(
	state: &NetworkState,
	ctx: &mut P,
	palette: &Palette<'_, T>,
) {
	let field = &state.lines;
	let reach = LineField::reach(&state.size);
	ctx.set_line_width(1.0);

	for link in &field.links {
		let (Some(from), Some(to)) = (field.points.get(link.from), field.points.get(link.to)) else {
			continue;
		};
		let (dx, dy) = (to.x - from.x, to.y - from.y);
		let dist = dx.hypot(dy);
		if dist >= reach {
			continue;
		}
		let opacity = (1.0 - dist / reach) * link.opacity;

		ctx.set_stroke(&palette.secondary(opacity * 0.4));
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();

		let p = link.progress.clamp(0.0, 1.0);
		let (fx, fy) = (from.x + dx * p, from.y + dy * p);
		let pulse = ((field.clock * 2.0 + p * TAU).sin() + 1.0) / 2.0;
		let flow = opacity * (1.0 - p) * pulse;

		let glow = Gradient::radial(fx, fy, 0.0, 8.0)
			.stop(0.0, palette.stop(flow * 1.5))
			.stop(1.0, palette.stop(0.0));
		ctx.set_fill(&glow.into());
		ctx.begin_path();
		ctx.arc(fx, fy, 8.0);
		ctx.fill();

		ctx.set_fill(&palette.secondary(flow * 1.2));
		ctx.begin_path();
		ctx.arc(fx, fy, 2.0);
		ctx.fill();
	}

	for point in &field.points {
		let glow = Gradient::radial(point.x, point.y, 0.0, 8.0)
			.stop(0.0, palette.stop(0.4))
			.stop(0.5, palette.stop(0.15))
			.stop(1.0, palette.stop(0.0));
		ctx.set_fill(&glow.into());
		ctx.begin_path();
		ctx.arc(point.x, point.y, 8.0);
		ctx.fill();

		ctx.set_fill(&palette.secondary(0.8));
		ctx.begin_path();
		ctx.arc(point.x, point.y, 2.5);
		ctx.fill();
	}
}

fn draw_edges<P: Painter + ?Sized, T: Theme + ?Sized>(
	state: &NetworkState,
	ctx: &mut P,
	palette: &Palette<'_, T>,
) {
	let (graph, depth) = (&state.graph, state.config.depth_layers.max(1));
	let radius = state.config.connection_radius;
	ctx.set_line_width(1.0);

	for layer in (0..depth).rev() {
		let layer_opacity = 0.3 + (layer as f64 / depth as f64) * 0.7;
		for (i, j) in graph.edges() {
			let (a, b) = (&graph.nodes[i], &graph.nodes[j]);
			// Edges crossing layers are not drawn.
			if a.layer != layer || b.layer != layer {
				continue;
			}
			let pulse = (state.time * state.config.speed.connection_pulse + i as f64 * 0.1).sin() * 0.5 + 0.5;
			let dist = (b.x - a.x).hypot(b.y - a.y);
			let opacity = edge_opacity(layer_opacity, a.active || b.active, dist, radius, pulse);
			if opacity <= 0.0 {
				continue;
			}
			ctx.set_stroke(&palette.primary(opacity));
			ctx.begin_path();
			ctx.move_to(a.x, a.y);
			ctx.line_to(b.x, b.y);
			ctx.stroke();
		}
	}
}

fn draw_flows<P: Painter + ?Sized, T: Theme + ?Sized>(
	state: &NetworkState,
	ctx: &mut P,
	palette: &Palette<'_, T>,
) {
	for flow in &state.flows {
		let (Some(source), Some(target)) = (state.graph.get(flow.source), state.graph.get(flow.target)) else {
			continue;
		};
		let (dx, dy) = (target.x - source.x, target.y - source.y);
		let dist = dx.hypot(dy);
		if dist < 0.001 {
			continue;
		}

		let (fx, fy) = (source.x + dx * flow.progress, source.y + dy * flow.progress);
		let tail = (flow.progress - 30f64.min(dist * 0.2) / dist).max(0.0);
		let (sx, sy) = (source.x + dx * tail, source.y + dy * tail);
		let opacity = unit(flow.intensity * (1.0 - flow.progress) * 0.6);

		ctx.save();
		ctx.set_global_alpha(opacity);
		ctx.set_stroke(&palette.secondary(1.0));
		ctx.set_line_width(2.0);
		ctx.begin_path();
		ctx.move_to(sx, sy);
		ctx.line_to(fx, fy);
		ctx.stroke();

		let (angle, arrow) = (dy.atan2(dx), 6.0);
		ctx.begin_path();
		for side in [-PI / 6.0, PI / 6.0] {
			ctx.move_to(fx, fy);
			ctx.line_to(fx - arrow * (angle + side).cos(), fy - arrow * (angle + side).sin());
		}
		ctx.stroke();

		let glow = Gradient::radial(fx, fy, 0.0, 8.0)
			.stop(0.0, palette.stop(opacity * 0.8))
			.stop(1.0, palette.stop(0.0));
		ctx.set_fill(&glow.into());
		ctx.begin_path();
		ctx.arc(fx, fy, 8.0);
		ctx.fill();
		ctx.restore();
	}
}

fn draw_waves<P: Painter + ?Sized, T: Theme + ?Sized>(
	state: &NetworkState,
	ctx: &mut P,
	palette: &Palette<'_, T>,
) {
	let intensity = state.intensity.value();
	for wave in &state.waves {
		let (Some(a), Some(b)) = (state.graph.get(wave.source), state.graph.get(wave.target)) else {
			continue;
		};
		let p = wave.progress.clamp(0.0, 1.0);
		let (wx, wy) = (a.x + (b.x - a.x) * p, a.y + (b.y - a.y) * p);
		let size = 8.0 * (1.0 - p);

		ctx.save();
		ctx.set_global_alpha(unit((1.0 - p) * 0.6 * intensity));
		let blob = Gradient::radial(wx, wy, 0.0, size * 2.0)
			.stop(0.0, palette.stop(0.8))
			.stop(0.5, palette.stop(0.3))
			.stop(1.0, palette.stop(0.0));
		ctx.set_fill(&blob.into());
		ctx.begin_path();
		ctx.arc(wx, wy, size * 2.0);
		ctx.fill();

		ctx.set_fill(&palette.secondary(0.9));
		ctx.begin_path();
		ctx.arc(wx, wy, size * 0.5);
		ctx.fill();
		ctx.restore();
	}
}

fn draw_rays<P: Painter + ?Sized, T: Theme + ?Sized>(
	state: &NetworkState,
	ctx: &mut P,
	palette: &Palette<'_, T>,
) {
	if state.rays.is_empty() {
		return;
	}
	let (px, py) = (state.pointer.x, state.pointer.y);

	ctx.save();
	ctx.set_global_alpha(unit(0.4 * state.intensity.value()));
	ctx.set_line_width(2.0);
	for ray in &state.rays {
		let beam = Gradient::linear(px, py, ray.target_x, ray.target_y)
			.stop(0.0, palette.stop(ray.intensity * 0.6))
			.stop(0.5, palette.stop(ray.intensity * 0.3))
			.stop(1.0, palette.stop(0.0));
		ctx.set_stroke(&beam.into());
		ctx.begin_path();
		ctx.move_to(px, py);
		ctx.line_to(ray.target_x, ray.target_y);
		ctx.stroke();

		let spot = Gradient::radial(ray.target_x, ray.target_y, 0.0, 15.0)
			.stop(0.0, palette.stop(ray.intensity * 0.8))
			.stop(1.0, palette.stop(0.0));
		ctx.set_fill(&spot.into());
		ctx.begin_path();
		ctx.arc(ray.target_x, ray.target_y, 15.0);
		ctx.fill();
	}
	ctx.restore();
}

/// Wide halo plus a core pulsing on a sine.
fn draw_pointer_glow<P: Painter + ?Sized, T: Theme + ?Sized>(
	state: &NetworkState,
	ctx: &mut P,
	palette: &Palette<'_, T>,
) {
	const HALO: f64 = 250.0;
	let (x, y, i) = (state.pointer.x, state.pointer.y, state.intensity.value());

	let halo = Gradient::radial(x, y, 0.0, HALO)
		.stop(0.0, palette.stop(0.12 * i))
		.stop(0.3, palette.stop(0.06 * i))
		.stop(0.6, palette.stop(0.02 * i))
		.stop(1.0, palette.stop(0.0));
	ctx.set_fill(&halo.into());
	ctx.fill_rect(x - HALO, y - HALO, HALO * 2.0, HALO * 2.0);

	let pulse = ((8.0 + (state.time * 0.01).sin() * 3.0) * i).max(0.0);
	let core = Gradient::radial(x, y, 0.0, pulse)
		.stop(0.0, palette.stop(0.6 * i))
		.stop(1.0, palette.stop(0.0));
	ctx.set_fill(&core.into());
	ctx.begin_path();
	ctx.arc(x, y, pulse);
	ctx.fill();
}

fn draw_particles<P: Painter + ?Sized, T: Theme + ?Sized>(
	state: &NetworkState,
	ctx: &mut P,
	palette: &Palette<'_, T>,
) {
	let intensity = state.intensity.value();
	for p in &state.particles {
		let size = p.size.max(0.0);
		ctx.save();
		ctx.set_global_alpha(unit(p.opacity * p.life * intensity));
		ctx.set_fill(&palette.secondary(1.0));
		ctx.begin_path();
		ctx.arc(p.x, p.y, size);
		ctx.fill();

		let glow = Gradient::radial(p.x, p.y, 0.0, size * 3.0)
			.stop(0.0, palette.stop(p.life * 0.3 * intensity))
			.stop(1.0, palette.stop(0.0));
		ctx.set_fill(&glow.into());
		ctx.begin_path();
		ctx.arc(p.x, p.y, size * 3.0);
		ctx.fill();
		ctx.restore();
	}
}

fn draw_nodes<P: Painter + ?Sized, T: Theme + ?Sized>(
	state: &NetworkState,
	ctx: &mut P,
	palette: &Palette<'_, T>,
) {
	let depth = state.config.depth_layers.max(1);
	for layer in (0..depth).rev() {
		let layer_opacity = 0.4 + (layer as f64 / depth as f64) * 0.6;
		for node in state.graph.nodes.iter().filter(|n| n.layer.min(depth - 1) == layer) {
			let size = (node.size * if node.is_hub { 1.3 } else { 1.0 }).max(0.0);
			let base = if node.active { (node.opacity + 0.3).min(1.0) } else { node.opacity };

			ctx.save();
			ctx.translate(node.x, node.y);

			if node.activity > 0.1 {
				ctx.set_global_alpha(unit(node.activity * 0.2 * layer_opacity));
				ctx.set_fill(&palette.secondary(1.0));
				ctx.begin_path();
				ctx.arc(0.0, 0.0, size * 4.0);
				ctx.fill();
			}

			if node.active || node.is_hub {
				ctx.set_global_alpha(unit(if node.active { 0.15 } else { 0.08 } * layer_opacity));
				ctx.set_fill(&palette.secondary(1.0));
				ctx.begin_path();
				ctx.arc(0.0, 0.0, size * 3.0);
				ctx.fill();
			}

			ctx.set_global_alpha(unit(base * layer_opacity));
			ctx.begin_path();
			match state.config.shape {
				NodeShape::Hex => {
					for k in 0..6 {
						let angle = TAU / 6.0 * k as f64;
						let (x, y) = (angle.cos() * size, angle.sin() * size);
						if k == 0 {
							ctx.move_to(x, y);
						} else {
							ctx.line_to(x, y);
						}
					}
					ctx.close_path();
				}
				NodeShape::Circle => ctx.arc(0.0, 0.0, size),
			}
			ctx.set_fill(&palette.primary(1.0));
			ctx.fill();

			ctx.set_line_width(if node.is_hub || node.active { 2.0 } else { 1.0 });
			ctx.set_stroke(&if node.is_hub {
				palette.secondary(0.6)
			} else {
				palette.primary(0.8)
			});
			ctx.stroke();

			ctx.set_fill(&if node.is_hub {
				palette.secondary(0.8)
			} else {
				palette.primary(1.0)
			});
			ctx.begin_path();
			ctx.arc(0.0, 0.0, size * if node.is_hub { 0.4 } else { 0.3 });
			ctx.fill();
			ctx.restore();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network::config::{Layers, NetworkConfig};
	use crate::components::network::paint::GradientShape;
	use crate::components::network::paint::recorder::{Call, Recorder};
	use crate::components::network::pointer::{PointerMailbox, PointerSample, Region};
	use crate::components::network::state::{DataFlow, DataWave, Particle};
	use crate::components::network::surface::SurfaceSize;
	use crate::components::network::theme::FallbackTheme;

	/// Theme that has not resolved anything yet.
	struct EmptyTheme;

	impl Theme for EmptyTheme {
		fn color(&self, _: ColorRole, _: f64) -> String {
			String::new()
		}

		fn background(&self) -> String {
			String::new()
		}
	}

	fn busy_state() -> NetworkState {
		let size = SurfaceSize::new(800.0, 600.0, 1.0).unwrap();
		let mut state = NetworkState::seeded(NetworkConfig::hexagonal(), size, 21);
		let mut mailbox = PointerMailbox::new();
		let region = Region {
			left: 0.0,
			top: 0.0,
			right: 800.0,
			bottom: 600.0,
		};
		for i in 0..10 {
			mailbox.record_move(390.0 + i as f64 * 3.0, 300.0, region, 0.5);
			state.tick(mailbox.take());
		}
		let target = state.graph.nodes[5].neighbors[0];
		state.flows.push(DataFlow {
			source: 5,
			target,
			progress: 0.4,
			intensity: 0.9,
		});
		state.waves.push(DataWave {
			source: 5,
			target,
			progress: 0.5,
		});
		state.particles.push(Particle {
			x: 200.0,
			y: 200.0,
			vx: 0.0,
			vy: 0.0,
			life: 0.5,
			decay: 0.02,
			size: 2.0,
			opacity: 0.8,
		});
		state
	}

	fn position(rec: &Recorder, pred: impl Fn(&Call) -> bool) -> usize {
		rec.calls.iter().position(pred).expect("call not recorded")
	}

	#[test]
	fn edge_opacity_falls_off_and_stays_non_negative() {
		assert_eq!(edge_opacity(1.0, true, 140.0, 140.0, 1.0), 0.0);
		assert_eq!(edge_opacity(1.0, false, 200.0, 140.0, 1.0), 0.0);
		let near = edge_opacity(1.0, false, 20.0, 140.0, 1.0);
		let far = edge_opacity(1.0, false, 120.0, 140.0, 1.0);
		assert!(near > far && far > 0.0);
		assert!(edge_opacity(1.0, true, 120.0, 140.0, 1.0) > far);
		assert_eq!(edge_opacity(1.0, true, 10.0, 140.0, -0.5), 0.0);
		assert!(edge_opacity(1.0, true, 0.0, 140.0, 1.0) <= 1.0);
	}

	#[test]
	fn layers_paint_back_to_front() {
		let state = busy_state();
		assert!(!state.rays.is_empty());
		let mut rec = Recorder::default();
		render(&state, &mut rec, &FallbackTheme);

		assert_eq!(rec.calls[0], Call::ClearRect);
		assert_eq!(rec.calls[1], Call::Fill(Paint::Color(FALLBACK_BACKGROUND.into())));
		assert_eq!(rec.calls[2], Call::FillRect(0.0, 0.0, 800.0, 600.0));

		let edge = position(&rec, |c| matches!(c, Call::Stroke(Paint::Color(s)) if s.starts_with("rgba(26")));
		let flow = position(&rec, |c| *c == Call::LineWidth(2.0));
		let wave = position(&rec, |c| *c == Call::Fill(Paint::Color(ColorRole::Secondary.fallback(0.9))));
		let ray = position(&rec, |c| {
			matches!(c, Call::Stroke(Paint::Gradient(g)) if matches!(g.shape, GradientShape::Linear { .. }))
		});
		let halo = position(&rec, |c| matches!(c, Call::FillRect(_, _, w, _) if *w == 500.0));
		let particle = position(&rec, |c| *c == Call::Arc(200.0, 200.0, 2.0));
		let node = position(&rec, |c| matches!(c, Call::Translate(..)));
		assert!(edge < flow && flow < wave && wave < ray && ray < halo && halo < particle && particle < node);
		assert_eq!(rec.calls.last(), Some(&Call::Alpha(1.0)));
	}

	#[test]
	fn edges_stay_within_a_layer_and_deep_layers_paint_first() {
		let size = SurfaceSize::new(800.0, 600.0, 1.0).unwrap();
		let state = NetworkState::seeded(NetworkConfig::hexagonal(), size, 3);
		let graph = &state.graph;
		let crossing = graph.edges().filter(|&(i, j)| graph.nodes[i].layer != graph.nodes[j].layer).count();
		assert!(crossing > 0);

		let mut rec = Recorder::default();
		render(&state, &mut rec, &FallbackTheme);

		// Every edge stroke is followed by MoveTo(a) and LineTo(b).
		let mut strokes = 0;
		for window in rec.calls.windows(4) {
			let [Call::Stroke(Paint::Color(color)), Call::BeginPath, Call::MoveTo(ax, ay), Call::LineTo(bx, by)] = window
			else {
				continue;
			};
			if !color.starts_with("rgba(26") {
				continue;
			}
			let layer_at = |x: f64, y: f64| graph.nodes.iter().find(|n| n.x == x && n.y == y).map(|n| n.layer);
			let (a, b) = (layer_at(*ax, *ay), layer_at(*bx, *by));
			assert!(a.is_some() && a == b, "edge across layers {a:?} -> {b:?}");
			strokes += 1;
		}
		assert!(strokes > 0);

		let deepest = graph.nodes.iter().map(|n| n.layer).max().unwrap();
		let first = rec.calls.iter().find_map(|c| match c {
			Call::Translate(x, y) => graph.nodes.iter().find(|n| n.x == *x && n.y == *y),
			_ => None,
		});
		assert_eq!(first.map(|n| n.layer), Some(deepest));
		let last = rec.calls.iter().rev().find_map(|c| match c {
			Call::Translate(x, y) => graph.nodes.iter().find(|n| n.x == *x && n.y == *y),
			_ => None,
		});
		assert_eq!(last.map(|n| n.layer), Some(0));
	}

	#[test]
	fn paint_values_are_always_valid() {
		let mut state = busy_state();
		state.particles[0].life = 1.0;
		state.particles[0].opacity = 5.0;
		state.particles[0].size = -3.0;
		let mut rec = Recorder::default();
		render(&state, &mut rec, &FallbackTheme);

		let mut saves = 0i32;
		for call in &rec.calls {
			match call {
				Call::Alpha(a) => assert!((0.0..=1.0).contains(a), "alpha {a}"),
				Call::Arc(_, _, r) => assert!(*r >= 0.0, "radius {r}"),
				Call::Fill(Paint::Gradient(g)) | Call::Stroke(Paint::Gradient(g)) => {
					if let GradientShape::Radial { r0, r1, .. } = g.shape {
						assert!(r0 >= 0.0 && r1 >= 0.0);
					}
				}
				Call::Save => saves += 1,
				Call::Restore => saves -= 1,
				_ => {}
			}
			assert!(saves >= 0);
		}
		assert_eq!(saves, 0);
	}

	#[test]
	fn empty_theme_answers_fall_back() {
		let state = busy_state();
		let mut rec = Recorder::default();
		render(&state, &mut rec, &EmptyTheme);
		assert_eq!(rec.calls[1], Call::Fill(Paint::Color(FALLBACK_BACKGROUND.into())));
		assert!(rec.calls.iter().all(|c| !matches!(c, Call::Fill(Paint::Color(s)) | Call::Stroke(Paint::Color(s)) if s.is_empty())));
	}

	#[test]
	fn idle_frame_has_no_pointer_layers() {
		let size = SurfaceSize::new(800.0, 600.0, 1.0).unwrap();
		let mut state = NetworkState::seeded(NetworkConfig::constellation(), size, 4);
		state.tick(PointerSample::default());
		let mut rec = Recorder::default();
		render(&state, &mut rec, &FallbackTheme);
		assert_eq!(rec.count(|c| matches!(c, Call::FillRect(..))), 1);
		assert_eq!(rec.count(|c| matches!(c, Call::Stroke(Paint::Gradient(_)))), 0);
		// Circles only: no hexagon outlines.
		assert_eq!(rec.count(|c| *c == Call::ClosePath), 0);
		assert_eq!(rec.count(|c| matches!(c, Call::Translate(..))), state.graph.len());
	}

	#[test]
	fn hybrid_stacks_texture_under_mesh_under_lines() {
		let size = SurfaceSize::new(200.0, 150.0, 1.0).unwrap();
		let mut state = NetworkState::seeded(NetworkConfig::hybrid(), size, 8);
		state.tick(PointerSample::default());
		let mut rec = Recorder::default();
		render(&state, &mut rec, &FallbackTheme);

		assert_eq!(rec.calls[3], Call::Pixels(200, 150, 200 * 150 * 4));
		let vignette = Call::FillRect(0.0, 0.0, 200.0, 150.0);
		assert_eq!(rec.calls[5], vignette);

		let last_node = rec.calls.iter().rposition(|c| matches!(c, Call::Translate(..))).unwrap();
		let first_point = position(&rec, |c| matches!(c, Call::Arc(_, _, r) if *r == 2.5));
		assert!(last_node < first_point);
		assert_eq!(rec.count(|c| matches!(c, Call::Arc(_, _, r) if *r == 2.5)), state.lines.points.len());
		assert_eq!(rec.count(|c| matches!(c, Call::FillRect(..))), 2);
	}

	#[test]
	fn guides_draw_grid_crosshair_and_brackets() {
		let size = SurfaceSize::new(300.0, 200.0, 1.0).unwrap();
		let state = NetworkState::seeded(
			NetworkConfig {
				layers: Layers {
					guides: true,
					..Layers::NONE
				},
				..NetworkConfig::blueprint()
			},
			size,
			2,
		);
		let mut rec = Recorder::default();
		render(&state, &mut rec, &FallbackTheme);

		// Frame 0: the grid sits exactly on multiples of the pitch plus sin(0) and 2cos(0).
		let verticals = rec.count(|c| matches!(c, Call::LineTo(_, y) if *y == 200.0));
		let horizontals = rec.count(|c| matches!(c, Call::LineTo(x, _) if *x == 300.0));
		assert_eq!(verticals, 5);
		assert_eq!(horizontals, 4);
		assert!(rec.calls.contains(&Call::MoveTo(120.0, 100.0)));
		assert!(rec.calls.contains(&Call::LineTo(150.0, 130.0)));
		assert!(rec.calls.contains(&Call::LineTo(240.0, 40.0)));
		assert_eq!(rec.count(|c| matches!(c, Call::Translate(..))), 0);
	}
}
