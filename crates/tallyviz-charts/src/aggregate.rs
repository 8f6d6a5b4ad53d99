//! Aggregation of raw inputs into series: letter frequencies from free text
//! and passenger counts from a CSV table.

use crate::category::{Category, Letter, Month, Region, LETTERS, REGIONS};
use crate::period::Period;
use crate::series::Series;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use tallyviz_common::{ChartError, Result};
use tallyviz_config::PassengerColumnsConfig;
use tracing::{debug, info, instrument};

/// Lowercases `text` and keeps only the characters `a..=z`.
///
/// Lowercasing follows `char::to_lowercase`, so characters whose lowercase
/// form is ASCII (the Kelvin sign becomes `k`) are kept.
pub fn keep_letters(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// Counts letter occurrences in `text`.
///
/// Only letters that occur appear in the returned series.
#[instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn count_letters(text: &str) -> Series<Letter> {
    let mut counters = [0u64; 26];
    for c in text.chars().flat_map(char::to_lowercase) {
        if let Some(letter) = Letter::from_char(c) {
            counters[letter.index()] += 1;
        }
    }

    LETTERS
        .iter()
        .zip(counters)
        .filter(|(_, count)| *count > 0)
        .map(|(letter, count)| (*letter, count))
        .collect()
}

/// Passenger totals for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodRecord {
    period: Period,
    domestic: u64,
    international: u64,
}

impl PeriodRecord {
    const fn new(period: Period) -> Self {
        Self {
            period,
            domestic: 0,
            international: 0,
        }
    }

    fn add(&mut self, region: Region, count: u64) {
        let slot = match region {
            Region::Domestic => &mut self.domestic,
            Region::International => &mut self.international,
        };
        *slot = slot.saturating_add(count);
    }

    /// Period this record covers.
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Domestic passengers.
    pub const fn domestic(&self) -> u64 {
        self.domestic
    }

    /// International passengers.
    pub const fn international(&self) -> u64 {
        self.international
    }

    /// Passengers for `region`.
    pub const fn get(&self, region: Region) -> u64 {
        match region {
            Region::Domestic => self.domestic,
            Region::International => self.international,
        }
    }

    /// Domestic plus international passengers.
    pub const fn total(&self) -> u64 {
        self.domestic.saturating_add(self.international)
    }

    /// Both regions as a series, in stacking order.
    pub fn series(&self) -> Series<Region> {
        REGIONS.iter().map(|r| (*r, self.get(*r))).collect()
    }
}

/// One unparsed row of the passenger table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassengerRow {
    /// Raw period text, e.g. `201901`.
    pub period: String,
    /// Raw geography label, e.g. `Domestic`.
    pub region: String,
    /// Raw passenger count.
    pub count: String,
}

impl PassengerRow {
    /// Builds a row from its three raw fields.
    pub fn new(
        period: impl Into<String>,
        region: impl Into<String>,
        count: impl Into<String>,
    ) -> Self {
        Self {
            period: period.into(),
            region: region.into(),
            count: count.into(),
        }
    }
}

/// Parses a passenger count, accepting thousands separators and
/// non-negative decimal values (rounded). `None` for anything else.
pub fn parse_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(value) = cleaned.parse::<u64>() {
        return Some(value);
    }
    let value: f64 = cleaned.parse().ok()?;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let count = (value.is_finite() && value >= 0.0 && value <= u64::MAX as f64)
        .then(|| value.round() as u64);
    count
}

/// Row accounting from a passenger aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregationReport {
    /// Rows read.
    pub rows: usize,
    /// Rows whose count was malformed and taken as zero.
    pub coerced_counts: usize,
    /// Rows dropped because their period or region was not recognised.
    pub skipped_rows: usize,
}

/// Passenger records keyed by period, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassengerTable {
    records: BTreeMap<Period, PeriodRecord>,
    report: AggregationReport,
}

impl PassengerTable {
    /// Aggregates raw rows. Repeated `(period, region)` pairs are summed.
    #[instrument(level = "debug", skip(rows))]
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = PassengerRow>,
    {
        let mut table = Self::default();
        for row in rows {
            table.push(&row);
        }

        info!(
            periods = table.records.len(),
            rows = table.report.rows,
            coerced = table.report.coerced_counts,
            skipped = table.report.skipped_rows,
            "aggregated passenger table"
        );
        table
    }

    fn push(&mut self, row: &PassengerRow) {
        self.report.rows += 1;
        let line = self.report.rows;

        let Ok(period) = row.period.parse::<Period>() else {
            debug!(line, period = %row.period, "skipping row with unrecognised period");
            self.report.skipped_rows += 1;
            return;
        };
        let Some(region) = Region::parse(&row.region) else {
            debug!(line, region = %row.region, "skipping row with unrecognised region");
            self.report.skipped_rows += 1;
            return;
        };
        let count = parse_count(&row.count).unwrap_or_else(|| {
            debug!(line, count = %row.count, "malformed passenger count taken as zero");
            self.report.coerced_counts += 1;
            0
        });

        self.records
            .entry(period)
            .or_insert_with(|| PeriodRecord::new(period))
            .add(region, count);
    }

    /// Reads a CSV table with a header row, locating the period, region and
    /// count columns by name (case-insensitive).
    pub fn from_csv_reader<R: Read>(reader: R, columns: &PassengerColumnsConfig) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv
            .headers()
            .map_err(|e| ChartError::data_with_source("unreadable CSV header", e))?
            .clone();
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| ChartError::data_at_line(format!("missing column '{name}'"), 1))
        };
        let period_idx = find(&columns.period_column)?;
        let region_idx = find(&columns.region_column)?;
        let count_idx = find(&columns.count_column)?;

        let mut rows = Vec::new();
        for record in csv.records() {
            let record = record.map_err(|e| ChartError::data_with_source("malformed CSV row", e))?;
            let field = |idx: usize| record.get(idx).unwrap_or_default();
            rows.push(PassengerRow::new(
                field(period_idx),
                field(region_idx),
                field(count_idx),
            ));
        }

        Ok(Self::from_rows(rows))
    }

    /// [`PassengerTable::from_csv_reader`] over an in-memory document.
    pub fn from_csv_str(content: &str, columns: &PassengerColumnsConfig) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes(), columns)
    }

    /// Records in chronological order.
    pub fn records(&self) -> impl Iterator<Item = &PeriodRecord> {
        self.records.values()
    }

    /// Record for `period`, if any row named it.
    pub fn get(&self, period: Period) -> Option<&PeriodRecord> {
        self.records.get(&period)
    }

    /// Number of distinct periods.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no row could be placed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row accounting from aggregation.
    pub const fn report(&self) -> AggregationReport {
        self.report
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.keys().map(|p| p.year()).collect();
        years.dedup();
        years
    }

    /// Per-month counts for `region` in `year`, one entry per month present.
    pub fn monthly(&self, year: i32, region: Region) -> Series<Month> {
        self.records_in(year)
            .map(|record| (record.period.month(), record.get(region)))
            .collect()
    }

    /// Per-month regional breakdown for `year`, in calendar order.
    pub fn monthly_stacks(&self, year: i32) -> Vec<(Month, Series<Region>)> {
        self.records_in(year)
            .map(|record| (record.period.month(), record.series()))
            .collect()
    }

    /// One entry per period: the count for `region`, or the total when
    /// `region` is `None`.
    pub fn totals(&self, region: Option<Region>) -> Series<Period> {
        self.records
            .values()
            .map(|record| {
                let value = region.map_or_else(|| record.total(), |r| record.get(r));
                (record.period, value)
            })
            .collect()
    }

    fn records_in(&self, year: i32) -> impl Iterator<Item = &PeriodRecord> {
        self.records.values().filter(move |r| r.period.year() == year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallyviz_common::test_utils::csv_fixtures;

    fn columns() -> PassengerColumnsConfig {
        PassengerColumnsConfig::default()
    }

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    #[test]
    fn test_count_letters_hello_world() {
        let series = count_letters("Hello World!");
        let expected: Vec<(Letter, u64)> = [
            ('d', 1),
            ('e', 1),
            ('h', 1),
            ('l', 3),
            ('o', 2),
            ('r', 1),
            ('w', 1),
        ]
        .into_iter()
        .map(|(c, n)| (letter(c), n))
        .collect();

        assert_eq!(series.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_count_letters_empty_and_filtered() {
        assert!(count_letters("").is_empty());
        assert!(count_letters("123 !? éü").is_empty());
    }

    #[test]
    fn test_keep_letters_folds_case() {
        assert_eq!(keep_letters("AbC-1 x"), "abcx");
        assert_eq!(keep_letters("\u{212A}elvin"), "kelvin");
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("42"), Some(42));
        assert_eq!(parse_count(" 1,234 "), Some(1234));
        assert_eq!(parse_count("2.6"), Some(3));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-4"), None);
        assert_eq!(parse_count("NaN"), None);
        assert_eq!(parse_count("many"), None);
    }

    #[test]
    fn test_fixture_table() {
        let table = PassengerTable::from_csv_str(csv_fixtures::passengers_csv(), &columns()).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.years(), vec![2018, 2019]);

        let january = table.get(Period::new(2019, 1).unwrap()).unwrap();
        assert_eq!(january.domestic(), 10);
        assert_eq!(january.international(), 5);
        assert_eq!(january.total(), 15);

        let february = table.get(Period::new(2019, 2).unwrap()).unwrap();
        assert_eq!(february.domestic(), 0);
        assert_eq!(february.international(), 7);

        let report = table.report();
        assert_eq!(report.rows, 7);
        assert_eq!(report.coerced_counts, 1);
        assert_eq!(report.skipped_rows, 0);
    }

    #[test]
    fn test_monthly_and_totals() {
        let table = PassengerTable::from_csv_str(csv_fixtures::passengers_csv(), &columns()).unwrap();

        let domestic = table.monthly(2019, Region::Domestic);
        assert_eq!(domestic.len(), 3);
        assert_eq!(domestic.get(&Month::new(1).unwrap()), 10);
        assert_eq!(domestic.get(&Month::new(3).unwrap()), 12);

        let totals = table.totals(None);
        assert_eq!(totals.keys().next(), Some(Period::new(2018, 12).unwrap()));
        assert_eq!(totals.total(), 3 + 15 + 7 + 12);

        let stacks = table.monthly_stacks(2019);
        assert_eq!(stacks.len(), 3);
        assert_eq!(stacks[0].1.get(&Region::International), 5);
    }

    #[test]
    fn test_unplaceable_rows_are_skipped() {
        let table = PassengerTable::from_rows([
            PassengerRow::new("201901", "Domestic", "5"),
            PassengerRow::new("not a period", "Domestic", "5"),
            PassengerRow::new("201901", "Orbital", "5"),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.report().skipped_rows, 2);
        assert_eq!(table.totals(None).total(), 5);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = PassengerTable::from_csv_str(csv_fixtures::missing_count_column_csv(), &columns())
            .unwrap_err();
        assert!(matches!(err, ChartError::Data { .. }));
        assert!(err.to_string().contains("missing column"));
    }

    #[test]
    fn test_custom_columns() {
        let columns = PassengerColumnsConfig {
            period_column: "period".to_string(),
            region_column: "region".to_string(),
            count_column: "count".to_string(),
        };
        let table = PassengerTable::from_csv_str(
            "Period,Region,Count\n2020-03,international,\"1,500\"\n",
            &columns,
        )
        .unwrap();

        assert_eq!(table.totals(Some(Region::International)).total(), 1500);
    }
}
