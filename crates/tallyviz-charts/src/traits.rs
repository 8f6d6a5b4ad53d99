//! Seams between the chart pipeline and the outside world.

use crate::frame::Scene;
use async_trait::async_trait;
use tallyviz_common::Result;

/// Supplies the raw text of a data table in one fetch.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches the whole document.
    async fn fetch(&self) -> Result<String>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// A fixed-size drawing surface that marks are drawn onto.
pub trait MarkSurface {
    /// Surface size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Draws a complete scene, replacing whatever was drawn before.
    fn draw(&mut self, scene: &Scene) -> Result<()>;
}
