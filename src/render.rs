use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::UiError;
use crate::scene::{Align, DrawOp};

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, UiError> {
    canvas
        .get_context("2d")?
        .ok_or(UiError::Context)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| UiError::Context)
}

pub fn size_canvas(canvas: &HtmlCanvasElement, side_px: u32) {
    canvas.set_width(side_px);
    canvas.set_height(side_px);
}

pub fn paint(ctx: &CanvasRenderingContext2d, ops: &[DrawOp]) -> Result<(), UiError> {
    for op in ops {
        match op {
            DrawOp::Clear { width, height } => {
                ctx.clear_rect(0.0, 0.0, *width, *height);
            }
            DrawOp::Stroke { color, segments } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(1.0);
                ctx.begin_path();
                for ((x0, y0), (x1, y1)) in segments {
                    ctx.move_to(*x0, *y0);
                    ctx.line_to(*x1, *y1);
                }
                ctx.stroke();
            }
            DrawOp::FillRect { color, x, y, w, h } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(*x, *y, *w, *h);
            }
            DrawOp::Text {
                text,
                font,
                color,
                x,
                y,
                align,
            } => {
                ctx.set_font(font);
                ctx.set_fill_style_str(color);
                ctx.set_text_align(match align {
                    Align::Left => "left",
                    Align::Center => "center",
                });
                ctx.set_text_baseline("middle");
                ctx.fill_text(text, *x, *y)?;
            }
        }
    }
    Ok(())
}
