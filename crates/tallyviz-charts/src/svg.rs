//! SVG drawing surface backed by the plotters SVG backend.

use crate::frame::{Scene, SceneBar};
use crate::mark::MarkPhase;
use crate::traits::MarkSurface;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tallyviz_common::{with_context, ChartError, Result};
use tallyviz_config::Config;
use tracing::{debug, info};

const BAR_COLOR: RGBColor = RGBColor(70, 130, 180);
const EXITING_COLOR: RGBColor = RGBColor(176, 196, 222);
const AXIS_COLOR: RGBColor = RGBColor(51, 51, 51);
const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE: i32 = 10;
const TICK_LENGTH: i32 = 6;

#[allow(clippy::cast_possible_truncation)]
fn px(value: f64) -> i32 {
    if value.is_finite() {
        value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    } else {
        0
    }
}

/// Renders scenes into an in-memory SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    document: String,
}

impl SvgSurface {
    /// Creates a surface of `width` x `height` pixels. A zero dimension is a
    /// surface error.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ChartError::surface(format!(
                "cannot draw on a {width}x{height} surface"
            )));
        }
        Ok(Self {
            width,
            height,
            document: String::new(),
        })
    }

    /// Creates a surface sized to the configured canvas.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.canvas.width, config.canvas.height)
    }

    /// Last drawn document, empty before the first draw.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Consumes the surface, returning the last drawn document.
    pub fn into_document(self) -> String {
        self.document
    }

    /// Writes the last drawn document to `path`.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tokio::fs::write(path, self.document.as_bytes())
            .await
            .map_err(|e| with_context!(e, "failed to write SVG to {}", path.display()))?;
        info!(path = %path.display(), bytes = self.document.len(), "saved SVG");
        Ok(())
    }
}

impl MarkSurface for SvgSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&mut self, scene: &Scene) -> Result<()> {
        let mut document = String::new();
        {
            let root =
                SVGBackend::with_string(&mut document, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE)?;
            draw_bars(&root, scene)?;
            draw_axes(&root, scene)?;
            root.present()?;
        }
        debug!(bars = scene.bars.len(), bytes = document.len(), "drew SVG scene");
        self.document = document;
        Ok(())
    }
}

fn bar_style(bar: &SceneBar) -> ShapeStyle {
    match bar.phase {
        MarkPhase::Exiting => EXITING_COLOR.filled(),
        MarkPhase::Entering | MarkPhase::Updating => BAR_COLOR.filled(),
    }
}

fn draw_bars<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let (left, top) = (scene.area.left, scene.area.top);
    for bar in &scene.bars {
        let g = bar.geometry;
        if g.width <= 0.0 || g.height <= 0.0 {
            continue;
        }
        root.draw(&Rectangle::new(
            [
                (px(left + g.x), px(top + g.y)),
                (px(left + g.x + g.width), px(top + g.bottom())),
            ],
            bar_style(bar),
        ))?;
    }
    Ok(())
}

fn draw_axes<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let area = scene.area;
    let left = px(area.left);
    let right = px(area.left + area.width);
    let top = px(area.top);
    let bottom = px(area.top + area.height);
    let font = (FONT_FAMILY, FONT_SIZE).into_font();

    // Category axis along the bottom edge.
    root.draw(&PathElement::new(vec![(left, bottom), (right, bottom)], AXIS_COLOR))?;
    let below = TextStyle::from(font.clone()).pos(Pos::new(HPos::Center, VPos::Top));
    for tick in &scene.category_ticks {
        let x = px(area.left + tick.x);
        root.draw(&PathElement::new(
            vec![(x, bottom), (x, bottom + TICK_LENGTH)],
            AXIS_COLOR,
        ))?;
        root.draw(&Text::new(
            tick.label.clone(),
            (x, bottom + TICK_LENGTH + 2),
            below.clone(),
        ))?;
    }

    // Value axis along the right edge.
    root.draw(&PathElement::new(vec![(right, top), (right, bottom)], AXIS_COLOR))?;
    let beside = TextStyle::from(font).pos(Pos::new(HPos::Left, VPos::Center));
    for tick in &scene.value_ticks {
        let y = px(area.top + tick.y);
        root.draw(&PathElement::new(
            vec![(right, y), (right + TICK_LENGTH, y)],
            AXIS_COLOR,
        ))?;
        root.draw(&Text::new(
            tick.label.clone(),
            (right + TICK_LENGTH + 2, y),
            beside.clone(),
        ))?;
    }

    Ok(())
}
