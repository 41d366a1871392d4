//! [`DrawTarget`] over a browser `<canvas>` 2D context.
//!
//! This is the only module that touches [`web_sys::CanvasRenderingContext2d`].
//! Fallible calls propagate as `Result<(), JsValue>`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::render::{DrawTarget, Segment, TextAlign, TextBaseline};
use crate::viewport::{Point, Size};

/// Axis label font.
const LABEL_FONT: &str = "12px sans-serif";

/// One canvas element and its 2D context.
pub struct Canvas2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    /// Acquire the 2D context of `canvas`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Resize the backing store to whole pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_size(&self, size: Size) {
        self.canvas.set_width(size.width.max(0.0).round() as u32);
        self.canvas.set_height(size.height.max(0.0).round() as u32);
    }
}

impl DrawTarget for Canvas2d {
    type Error = JsValue;

    fn clear(&mut self) -> Result<(), JsValue> {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        Ok(())
    }

    fn stroke_segments(&mut self, segments: &[Segment], color: &str) -> Result<(), JsValue> {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(1.0);
        self.ctx.begin_path();
        for seg in segments {
            self.ctx.move_to(seg.from.x, seg.from.y);
            self.ctx.line_to(seg.to.x, seg.to.y);
        }
        self.ctx.stroke();
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point, align: TextAlign, baseline: TextBaseline) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str("black");
        self.ctx.set_font(LABEL_FONT);
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.ctx.set_text_baseline(match baseline {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
        });
        self.ctx.fill_text(text, at.x, at.y)
    }

    fn fill_polygon(&mut self, points: &[Point], fill: &str, stroke: &str) -> Result<(), JsValue> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.close_path();

        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
        self.ctx.set_stroke_style_str(stroke);
        self.ctx.set_line_width(1.0);
        self.ctx.stroke();
        Ok(())
    }
}
