//! End-to-end chart pipelines: letter frequencies from typed text and
//! passenger counts from a CSV table.

use crate::aggregate::{count_letters, PassengerTable};
use crate::category::{Category, Letter, Month, Region};
use crate::chart::{BarChart, StackedBarChart};
use crate::frame::RenderFrame;
use crate::layout::StackKey;
use crate::period::Period;
use crate::series::Series;
use crate::traits::DataSource;
use tallyviz_common::Result;
use tallyviz_config::{month_labels, Config};
use tracing::{info, instrument};

/// Bar chart of letter frequencies that re-renders on every input change.
#[derive(Debug, Clone)]
pub struct LetterFrequencyChart {
    chart: BarChart<Letter>,
    series: Series<Letter>,
    renders: usize,
}

impl LetterFrequencyChart {
    /// Creates the chart. Nothing is drawn until the first input.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            chart: BarChart::new(config)?,
            series: Series::new(),
            renders: 0,
        })
    }

    /// Aggregates `text` and reconciles the bars with the new counts.
    #[instrument(level = "debug", skip_all, fields(chars = text.chars().count()))]
    pub fn on_input(&mut self, text: &str) -> Result<RenderFrame<Letter>> {
        let series = count_letters(text);
        let frame = self.chart.render(Letter::domain(), &series)?;
        if self.renders == 0 {
            info!(letters = series.len(), "drew letter frequency chart");
        }
        self.renders += 1;
        self.series = series;
        Ok(frame)
    }

    /// Counts behind the last render.
    pub const fn series(&self) -> &Series<Letter> {
        &self.series
    }

    /// Number of inputs rendered.
    pub const fn renders(&self) -> usize {
        self.renders
    }

    /// Underlying chart.
    pub const fn chart(&self) -> &BarChart<Letter> {
        &self.chart
    }

    /// Underlying chart, for driving transitions.
    pub fn chart_mut(&mut self) -> &mut BarChart<Letter> {
        &mut self.chart
    }
}

/// Charts over an airline passenger table.
///
/// Monthly charts label their bands with month names unless the
/// configuration supplies its own labels. The per-period totals chart
/// derives its domain from the data and always labels bands by period.
#[derive(Debug, Clone)]
pub struct PassengerChart {
    table: PassengerTable,
    monthly: BarChart<Month>,
    stacked: StackedBarChart<Month, Region>,
    totals: BarChart<Period>,
}

impl PassengerChart {
    /// Fetches the table from `source` and builds the charts.
    #[instrument(level = "info", skip_all, fields(source = %source.describe()))]
    pub async fn load(source: &dyn DataSource, config: Config) -> Result<Self> {
        let content = source.fetch().await?;
        let table = PassengerTable::from_csv_str(&content, &config.passengers)?;
        info!(periods = table.len(), years = ?table.years(), "loaded passenger table");
        Self::from_table(table, config)
    }

    /// Builds the charts over an already aggregated table.
    pub fn from_table(table: PassengerTable, config: Config) -> Result<Self> {
        let mut monthly_config = config.clone();
        if monthly_config.axis.category_labels.is_none() {
            monthly_config.axis.category_labels = Some(month_labels());
        }
        let mut totals_config = config;
        totals_config.axis.category_labels = None;

        Ok(Self {
            table,
            monthly: BarChart::new(monthly_config.clone())?,
            stacked: StackedBarChart::new(monthly_config)?,
            totals: BarChart::new(totals_config)?,
        })
    }

    /// Aggregated table.
    pub const fn table(&self) -> &PassengerTable {
        &self.table
    }

    /// Twelve monthly bars of `region` passengers in `year`.
    pub fn monthly(&mut self, year: i32, region: Region) -> Result<RenderFrame<Month>> {
        let series = self.table.monthly(year, region);
        self.monthly.render(Month::domain(), &series)
    }

    /// Twelve monthly stacks of domestic then international passengers.
    pub fn stacked(&mut self, year: i32) -> Result<RenderFrame<StackKey<Month, Region>>> {
        let rows = self.table.monthly_stacks(year);
        self.stacked.render(Month::domain(), &rows)
    }

    /// One bar per period in the table: `region` passengers, or all
    /// passengers when `region` is `None`.
    pub fn totals(&mut self, region: Option<Region>) -> Result<RenderFrame<Period>> {
        let series = self.table.totals(region);
        let domain: Vec<Period> = series.keys().collect();
        self.totals.render(&domain, &series)
    }

    /// Monthly bar chart.
    pub fn monthly_chart_mut(&mut self) -> &mut BarChart<Month> {
        &mut self.monthly
    }

    /// Stacked monthly chart.
    pub fn stacked_chart_mut(&mut self) -> &mut StackedBarChart<Month, Region> {
        &mut self.stacked
    }

    /// Per-period totals chart.
    pub fn totals_chart_mut(&mut self) -> &mut BarChart<Period> {
        &mut self.totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallyviz_common::test_utils::csv_fixtures;

    fn table() -> PassengerTable {
        PassengerTable::from_csv_str(
            csv_fixtures::passengers_csv(),
            &tallyviz_config::PassengerColumnsConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_letter_chart_first_draw_then_update() {
        let mut chart = LetterFrequencyChart::new(Config::default()).unwrap();

        let first = chart.on_input("aab").unwrap();
        assert_eq!(first.reconciliation.entering.len(), 2);

        let second = chart.on_input("aab!").unwrap();
        assert!(second.reconciliation.is_stable());
        assert_eq!(second.reconciliation.updating.len(), 2);
        assert_eq!(chart.renders(), 2);
        assert_eq!(chart.series().total(), 3);
    }

    #[test]
    fn test_monthly_labels_default_to_month_names() {
        let mut chart = PassengerChart::from_table(table(), Config::default()).unwrap();
        let frame = chart.monthly(2019, Region::Domestic).unwrap();

        assert_eq!(frame.category_ticks.len(), 12);
        assert_eq!(frame.category_ticks[0].label, "Jan");
        assert_eq!(frame.active_keys().len(), 3);
    }

    #[test]
    fn test_totals_follow_data_domain() {
        let mut chart = PassengerChart::from_table(table(), Config::default()).unwrap();
        let frame = chart.totals(None).unwrap();

        let labels: Vec<&str> = frame.category_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["201812", "201901", "201902", "201903"]);
        assert_eq!(frame.marks.len(), 4);
    }

    #[test]
    fn test_stacked_year() {
        let mut chart = PassengerChart::from_table(table(), Config::default()).unwrap();
        let frame = chart.stacked(2019).unwrap();

        // Every record stacks both regions, zero-valued ones included.
        assert_eq!(frame.marks.len(), 6);
    }
}
