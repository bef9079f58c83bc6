//! Canvas 2D backend for [`Surface`]

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Surface, TextAlign};

/// Draws onto an HTML canvas through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, context })
    }

    /// Match the backing store to the element's layout size
    ///
    /// Returns the new size in canvas pixels.
    pub fn fit_to_client(&self) -> (f32, f32) {
        let width = self.canvas.client_width().max(1) as u32;
        let height = self.canvas.client_height().max(1) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        (width as f32, height as f32)
    }

    fn trace_polygon(&self, points: &[Vec2]) {
        self.context.begin_path();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.context.move_to(first.x as f64, first.y as f64);
        }
        for p in iter {
            self.context.line_to(p.x as f64, p.y as f64);
        }
        self.context.close_path();
    }

    fn trace_circle(&self, center: Vec2, radius: f32) -> bool {
        self.context.begin_path();
        match self
            .context
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
        {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Canvas arc failed: {:?}", e);
                false
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str) {
        self.context.set_fill_style_str(color);
        self.context
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        if self.trace_circle(center, radius) {
            self.context.set_fill_style_str(color);
            self.context.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32) {
        if self.trace_circle(center, radius) {
            self.context.set_stroke_style_str(color);
            self.context.set_line_width(line_width as f64);
            self.context.stroke();
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], fill: &str, stroke: Option<&str>) {
        if points.len() < 3 {
            return;
        }
        self.trace_polygon(points);
        self.context.set_fill_style_str(fill);
        self.context.fill();
        if let Some(stroke) = stroke {
            self.context.set_stroke_style_str(stroke);
            self.context.set_line_width(1.0);
            self.context.stroke();
        }
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str, align: TextAlign) {
        self.context.set_font(font);
        self.context.set_fill_style_str(color);
        self.context.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        if let Err(e) = self.context.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("Canvas fill_text failed: {:?}", e);
        }
    }
}
