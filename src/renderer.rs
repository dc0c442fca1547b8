//! Canvas 2D renderer
//!
//! Targets are filled circles whose color fades from green to red as their
//! countdown runs out, optionally with a sprite drawn on top.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::sim::{GameManager, GameStatus, Target};

const BACKGROUND: &str = "#10131a";
const RIM: &str = "#f4f4f4";

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprite: Option<HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, sprite_url: Option<&str>) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let sprite = match sprite_url {
            Some(url) => {
                let img = HtmlImageElement::new()?;
                img.set_src(url);
                log::info!("Loading target sprite {url}");
                Some(img)
            }
            None => None,
        };

        Ok(Self {
            canvas,
            ctx,
            sprite,
        })
    }

    pub fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    /// Clear and redraw every live target
    pub fn draw(&self, game: &GameManager) {
        let (w, h) = self.size();
        self.ctx.set_fill_style(&JsValue::from_str(BACKGROUND));
        self.ctx.fill_rect(0.0, 0.0, w, h);

        let max_ttd = game.controller().config().initial_time_to_die.ceil() as u32;
        // Frozen targets are drawn dimmed
        let alpha = if game.status() == GameStatus::Playing {
            1.0
        } else {
            0.45
        };
        self.ctx.set_global_alpha(alpha);
        for target in game.controller().targets() {
            self.draw_target(target, max_ttd);
        }
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_target(&self, target: &Target, max_ttd: u32) {
        let (x, y, r) = (target.pos.x as f64, target.pos.y as f64, target.radius as f64);

        self.ctx.begin_path();
        if self.ctx.arc(x, y, r, 0.0, std::f64::consts::TAU).is_err() {
            return;
        }
        let color = lifetime_color(target.remaining_fraction(max_ttd));
        self.ctx.set_fill_style(&JsValue::from_str(&color));
        self.ctx.fill();
        self.ctx.set_stroke_style(&JsValue::from_str(RIM));
        self.ctx.set_line_width(2.0);
        self.ctx.stroke();

        if let Some(img) = self.sprite.as_ref().filter(|img| img.complete()) {
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                x - r,
                y - r,
                2.0 * r,
                2.0 * r,
            );
        }
    }
}

/// Green at full lifetime, red when about to expire
fn lifetime_color(fraction: f32) -> String {
    let f = fraction.clamp(0.0, 1.0);
    let red = (230.0 * (1.0 - f) + 40.0 * f) as u8;
    let green = (50.0 * (1.0 - f) + 200.0 * f) as u8;
    format!("rgb({red},{green},70)")
}
