//! Bar and stacked-bar charts that keep their marks across renders.

use crate::category::Category;
use crate::context::ChartContext;
use crate::frame::RenderFrame;
use crate::layout::{bar_targets, stack_max, stacked_targets, StackKey};
use crate::mark::{MarkKey, MarkSet, MarkTarget};
use crate::scale::value_bounds;
use crate::series::Series;
use std::time::Duration;
use tallyviz_common::Result;
use tallyviz_config::{Config, ConfigValidator};
use tracing::{debug, instrument};

/// Context and marks shared by both chart kinds. `C` is the band-axis
/// category, `M` the key marks are bound to.
#[derive(Debug, Clone)]
struct Plot<C, M> {
    config: Config,
    context: Option<ChartContext<C>>,
    marks: MarkSet<M>,
}

impl<C: MarkKey, M: MarkKey> Plot<C, M> {
    fn new(config: Config) -> Result<Self> {
        ConfigValidator::validate(&config)?;
        Ok(Self {
            config,
            context: None,
            marks: MarkSet::new(),
        })
    }

    /// Context for `domain`: a copy of the current one with its bands
    /// rebuilt, or a new one when the domain size changed. The chart keeps
    /// its current context until [`Plot::commit`].
    fn context_for(&self, domain: &[C]) -> Result<ChartContext<C>> {
        match &self.context {
            Some(current) if current.domain().len() == domain.len() => {
                let mut context = current.clone();
                if context.domain() != domain {
                    context.set_domain(domain)?;
                }
                Ok(context)
            }
            current => {
                if current.is_some() {
                    debug!(categories = domain.len(), "category domain resized, rebuilding chart context");
                }
                ChartContext::new(&self.config, domain)
            }
        }
    }

    /// Installs `context` and joins the bound marks against `targets`.
    /// Marks bound under an earlier context are reconciled like any other.
    fn commit(&mut self, context: ChartContext<C>, targets: &[MarkTarget<M>]) -> RenderFrame<M> {
        let reconciliation = self
            .marks
            .join(targets, context.baseline_y(), &self.config.transitions);
        debug!(
            entering = reconciliation.entering.len(),
            updating = reconciliation.updating.len(),
            exiting = reconciliation.exiting.len(),
            "joined marks"
        );
        let context: &ChartContext<C> = self.context.insert(context);
        RenderFrame::new(context, reconciliation, self.marks.snapshots())
    }

    fn frame(&self) -> Option<RenderFrame<M>> {
        let context = self.context.as_ref()?;
        Some(RenderFrame::new(
            context,
            Default::default(),
            self.marks.snapshots(),
        ))
    }
}

/// Declares the clock and accessor methods both chart kinds share.
macro_rules! chart_accessors {
    ($key:ty) => {
        /// Moves running transitions forward; returns keys of marks whose
        /// exit completed.
        pub fn advance(&mut self, elapsed: Duration) -> Vec<$key> {
            self.plot.marks.advance(elapsed)
        }

        /// Completes every running transition.
        pub fn finish_transitions(&mut self) -> Vec<$key> {
            self.plot.marks.finish()
        }

        /// Marks held by the chart.
        pub const fn marks(&self) -> &MarkSet<$key> {
            &self.plot.marks
        }

        /// Frame at the marks' current geometry, with an empty diff. `None`
        /// before the first render.
        pub fn frame(&self) -> Option<RenderFrame<$key>> {
            self.plot.frame()
        }

        /// Configuration the chart was built with.
        pub const fn config(&self) -> &Config {
            &self.plot.config
        }
    };
}

/// One bar per category.
#[derive(Debug, Clone)]
pub struct BarChart<K> {
    plot: Plot<K, K>,
}

impl<K: MarkKey> BarChart<K> {
    /// Creates a chart, validating `config`.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            plot: Plot::new(config)?,
        })
    }

    /// Renders `series` over the band domain `domain`.
    ///
    /// Marks bound by the previous render are reconciled against the keys
    /// of `series`, also when `domain` changed size. Keys outside `domain`
    /// are an error, and a failed render leaves the chart as it was.
    #[instrument(level = "debug", skip_all, fields(categories = domain.len(), observed = series.len()))]
    pub fn render(&mut self, domain: &[K], series: &Series<K>) -> Result<RenderFrame<K>> {
        let (_, max) = value_bounds(series);
        let mut context = self.plot.context_for(domain)?;
        context.rescale_values(max);
        let targets = bar_targets(&context, series)?;
        Ok(self.plot.commit(context, &targets))
    }

    /// Context of the last render.
    pub const fn context(&self) -> Option<&ChartContext<K>> {
        self.plot.context.as_ref()
    }

    chart_accessors!(K);
}

/// Bars split into layers, stacked in layer-domain order.
#[derive(Debug, Clone)]
pub struct StackedBarChart<K, S> {
    plot: Plot<K, StackKey<K, S>>,
}

impl<K, S> StackedBarChart<K, S>
where
    K: MarkKey,
    S: Category + MarkKey,
{
    /// Creates a chart, validating `config`.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            plot: Plot::new(config)?,
        })
    }

    /// Renders one stack per row. The value scale spans the tallest stack.
    #[instrument(level = "debug", skip_all, fields(categories = domain.len(), rows = rows.len()))]
    #[allow(clippy::cast_precision_loss)]
    pub fn render(
        &mut self,
        domain: &[K],
        rows: &[(K, Series<S>)],
    ) -> Result<RenderFrame<StackKey<K, S>>> {
        let mut context = self.plot.context_for(domain)?;
        context.rescale_values(stack_max(rows) as f64);
        let targets = stacked_targets(&context, rows)?;
        Ok(self.plot.commit(context, &targets))
    }

    /// Context of the last render.
    pub const fn context(&self) -> Option<&ChartContext<K>> {
        self.plot.context.as_ref()
    }

    chart_accessors!(StackKey<K, S>);
}
