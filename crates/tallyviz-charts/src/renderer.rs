//! Presents render frames on a single drawing surface.

use crate::frame::RenderFrame;
use crate::mark::MarkKey;
use crate::traits::MarkSurface;
use tallyviz_common::{ensure, ChartError, Result};
use tracing::{debug, instrument};

/// Owns exactly one surface and draws frames onto it.
#[derive(Debug)]
pub struct Renderer<S> {
    surface: S,
    presented: usize,
}

fn check_size<S: MarkSurface>(surface: &S) -> Result<()> {
    let (width, height) = surface.size();
    ensure!(
        width > 0 && height > 0,
        ChartError::surface(format!("drawing surface is {width}x{height}"))
    );
    Ok(())
}

impl<S: MarkSurface> Renderer<S> {
    /// Wraps `surface`, rejecting a zero-sized one.
    pub fn new(surface: S) -> Result<Self> {
        check_size(&surface)?;
        Ok(Self {
            surface,
            presented: 0,
        })
    }

    /// Picks the single surface among `candidates`. None, or more than one,
    /// is a surface error.
    pub fn locate(candidates: impl IntoIterator<Item = S>) -> Result<Self> {
        let mut candidates = candidates.into_iter();
        let surface = candidates
            .next()
            .ok_or_else(|| ChartError::surface("no drawing surface found"))?;
        let extra = candidates.count();
        ensure!(
            extra == 0,
            ChartError::surface(format!("expected one drawing surface, found {}", extra + 1))
        );
        Self::new(surface)
    }

    /// Draws `frame` at the marks' current geometry.
    #[instrument(level = "debug", skip_all, fields(marks = frame.marks.len()))]
    pub fn present<K: MarkKey>(&mut self, frame: &RenderFrame<K>) -> Result<()> {
        check_size(&self.surface)?;
        self.surface.draw(&frame.scene())?;
        self.presented += 1;
        debug!(presented = self.presented, "presented frame");
        Ok(())
    }

    /// Number of frames drawn so far.
    pub const fn presented(&self) -> usize {
        self.presented
    }

    /// The surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Consumes the renderer, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}
