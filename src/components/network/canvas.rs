use std::f64::consts::PI;

use wasm_bindgen::Clamped;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use super::error::EngineError;
use super::paint::{Gradient, GradientShape, Paint, Painter, unit};
use super::surface::{Surface, SurfaceSize};

/// [`Painter`] over a browser canvas' 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Fails when the canvas cannot provide a 2D context.
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EngineError> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
			.ok_or(EngineError::ContextUnavailable)?;
		Ok(Self { canvas, ctx })
	}

	fn gradient(&self, gradient: &Gradient) -> Option<CanvasGradient> {
		let built = match gradient.shape {
			GradientShape::Linear { x0, y0, x1, y1 } => self.ctx.create_linear_gradient(x0, y0, x1, y1),
			GradientShape::Radial { x, y, r0, r1 } => self.ctx.create_radial_gradient(x, y, r0, x, y, r1).ok()?,
		};
		for (offset, color) in &gradient.stops {
			let _ = built.add_color_stop(*offset as f32, color);
		}
		Some(built)
	}
}

impl Painter for CanvasSurface {
	fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
		self.ctx.clear_rect(x, y, w, h);
	}

	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
		self.ctx.fill_rect(x, y, w, h);
	}

	fn set_fill(&mut self, paint: &Paint) {
		match paint {
			Paint::Color(color) => self.ctx.set_fill_style_str(color),
			Paint::Gradient(gradient) => {
				if let Some(gradient) = self.gradient(gradient) {
					#[allow(deprecated)]
					self.ctx.set_fill_style(&gradient);
				}
			}
		}
	}

	fn set_stroke(&mut self, paint: &Paint) {
		match paint {
			Paint::Color(color) => self.ctx.set_stroke_style_str(color),
			Paint::Gradient(gradient) => {
				if let Some(gradient) = self.gradient(gradient) {
					#[allow(deprecated)]
					self.ctx.set_stroke_style(&gradient);
				}
			}
		}
	}

	fn set_line_width(&mut self, width: f64) {
		self.ctx.set_line_width(width.max(0.0));
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		self.ctx.set_global_alpha(unit(alpha));
	}

	fn save(&mut self) {
		self.ctx.save();
	}

	fn restore(&mut self) {
		self.ctx.restore();
	}

	fn translate(&mut self, x: f64, y: f64) {
		let _ = self.ctx.translate(x, y);
	}

	fn begin_path(&mut self) {
		self.ctx.begin_path();
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.ctx.move_to(x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.ctx.line_to(x, y);
	}

	fn arc(&mut self, x: f64, y: f64, radius: f64) {
		// Canvas throws on negative radii.
		let _ = self.ctx.arc(x, y, radius.max(0.0), 0.0, 2.0 * PI);
	}

	fn close_path(&mut self) {
		self.ctx.close_path();
	}

	fn fill(&mut self) {
		self.ctx.fill();
	}

	fn stroke(&mut self) {
		self.ctx.stroke();
	}

	fn put_pixels(&mut self, width: u32, height: u32, rgba: &[u8]) {
		if width == 0 || height == 0 || rgba.len() != width as usize * height as usize * 4 {
			return;
		}
		if let Ok(image) = ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba), width, height) {
			let _ = self.ctx.put_image_data(&image, 0.0, 0.0);
		}
	}
}

impl Surface for CanvasSurface {
	fn configure(&mut self, size: SurfaceSize) {
		let (w, h) = size.backing_size();
		self.canvas.set_width(w);
		self.canvas.set_height(h);
		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{}px", size.width));
		let _ = style.set_property("height", &format!("{}px", size.height));
		// Resizing the backing store resets the transform; draw in CSS pixels from here on.
		let _ = self.ctx.set_transform(size.dpr, 0.0, 0.0, size.dpr, 0.0, 0.0);
	}
}
