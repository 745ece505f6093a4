//! Canvas 2D drawing of the table

use std::f64::consts::TAU;

use game_core::{BodyKind, BodyView, Layout, Shape, Side};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub fn fill_style(kind: BodyKind) -> &'static str {
    match kind {
        BodyKind::Ball => "yellow",
        BodyKind::Paddle(Side::Left) => "red",
        BodyKind::Paddle(Side::Right) => "blue",
        BodyKind::SideWall(_) => "rgba(0, 0, 0, 0.2)",
        BodyKind::EndWall(_) => "#808080",
    }
}

pub struct Painter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Painter {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Failed to get 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn resize(&self, layout: &Layout) {
        self.canvas.set_width(layout.width.round() as u32);
        self.canvas.set_height(layout.height.round() as u32);
    }

    /// Clear the canvas and draw every body at its pose
    pub fn draw(&self, scene: &[BodyView]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );

        for body in scene {
            let pos = body.transform.pos;
            ctx.save();
            ctx.translate(pos.x as f64, pos.y as f64)?;
            ctx.rotate(body.transform.angle as f64)?;
            ctx.set_fill_style_str(fill_style(body.kind));

            match body.shape {
                Shape::Rectangle { half_extents } => {
                    let (hx, hy) = (half_extents.x as f64, half_extents.y as f64);
                    ctx.fill_rect(-hx, -hy, 2.0 * hx, 2.0 * hy);
                }
                Shape::Circle { radius } => {
                    ctx.begin_path();
                    ctx.arc(0.0, 0.0, radius as f64, 0.0, TAU)?;
                    ctx.fill();
                }
            }
            ctx.restore();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Wall;

    #[test]
    fn test_player_colours() {
        assert_eq!(fill_style(BodyKind::Paddle(Side::Left)), "red");
        assert_eq!(fill_style(BodyKind::Paddle(Side::Right)), "blue");
        assert_eq!(
            fill_style(BodyKind::SideWall(Wall::Top)),
            fill_style(BodyKind::SideWall(Wall::Bottom))
        );
    }
}
