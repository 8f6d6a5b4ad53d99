//! Integration tests for tallyviz-charts crate.
//!
//! These tests drive the public pipeline end to end: aggregation, scaling,
//! reconciliation and drawing.

use mockall::mock;
use mockall::predicate::function;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::io::Write;
use std::time::Duration;
use tallyviz_charts::{
    count_letters, keep_letters, reconcile, value_bounds, BandScale, BarChart, Category, FileSource,
    InlineSource, Letter, LetterFrequencyChart, LinearScale, MarkPhase, MarkSurface, Month,
    PassengerChart, Region, Renderer, Scene, Series, StackedBarChart, SvgSurface,
};
use tallyviz_common::test_utils::{assert_approx_eq, csv_fixtures, init_test_logging};
use tallyviz_common::test_utils::property_testing::{counts_strategy, free_text_strategy};
use tallyviz_common::{ChartError, Result};
use tallyviz_config::{Config, EnterMode};

mock! {
    pub Surface {}

    impl MarkSurface for Surface {
        fn size(&self) -> (u32, u32);
        fn draw(&mut self, scene: &Scene) -> Result<()>;
    }
}

fn letter(c: char) -> Letter {
    Letter::from_char(c).unwrap()
}

#[test]
fn test_hello_world_frequencies() {
    let series = count_letters("Hello World!");
    let expected = [('h', 1), ('e', 1), ('l', 3), ('o', 2), ('w', 1), ('r', 1), ('d', 1)];

    assert_eq!(series.len(), expected.len());
    for (c, count) in expected {
        assert_eq!(series.get(&letter(c)), count, "count for {c}");
    }
    assert!(count_letters("").is_empty());
}

#[test]
fn test_nice_domain_and_fractional_ticks() {
    let scale = LinearScale::new([0.0, 97.0], [455.0, 0.0]).nice(10);
    assert_eq!(scale.domain(), [0.0, 100.0]);

    let ticks = LinearScale::new([0.0, 3.0], [455.0, 0.0]).nice(10).ticks(10);
    for pair in ticks.windows(2) {
        assert_approx_eq(pair[1] - pair[0], 0.2, 1e-9);
    }
}

#[test]
fn test_twenty_six_bands_fit_without_overlap() {
    let config = Config::default();
    let plot_width = f64::from(config.plot_width());
    let scale = BandScale::new(Letter::domain().iter().copied(), [0.0, plot_width])
        .padding_inner(config.bands.padding_inner)
        .unwrap()
        .round(true);

    let expected = plot_width / 26.0 * (1.0 - config.bands.padding_inner);
    assert!((scale.bandwidth() - expected).abs() <= 1.0);

    let starts: Vec<f64> = Letter::domain().iter().map(|l| scale.map(l).unwrap()).collect();
    for pair in starts.windows(2) {
        assert!(pair[0] + scale.bandwidth() <= pair[1]);
    }
    assert!(starts[0] >= 0.0);
    assert!(starts[25] + scale.bandwidth() <= plot_width);
}

#[test]
fn test_stacked_heights_add_up() {
    init_test_logging();
    let mut chart: StackedBarChart<Month, Region> = StackedBarChart::new(Config::default()).unwrap();
    let january = Month::new(1).unwrap();
    let row: Series<Region> = [(Region::Domestic, 10), (Region::International, 5)]
        .into_iter()
        .collect();

    let frame = chart.render(Month::domain(), &[(january, row)]).unwrap();
    let context = chart.context().unwrap();
    let full = context.baseline_y() - context.values().map(15.0);
    let stacked: f64 = frame.marks.iter().map(|m| m.target.height).sum();

    assert!((stacked - full).abs() <= 1.0);
    let domestic = frame.marks.iter().find(|m| m.key.layer == Region::Domestic).unwrap();
    let international = frame.marks.iter().find(|m| m.key.layer == Region::International).unwrap();
    assert_approx_eq(international.target.bottom(), domestic.target.y, 1e-9);
}

#[test]
fn test_rendering_twice_is_idempotent() {
    let mut chart = LetterFrequencyChart::new(Config::default()).unwrap();
    chart.on_input("the quick brown fox").unwrap();
    let frame = chart.on_input("the quick brown fox").unwrap();

    assert!(frame.reconciliation.is_stable());
    let keys: Vec<Letter> = chart.series().keys().collect();
    assert_eq!(frame.reconciliation.updating, keys);
}

#[test]
fn test_grow_transition_reaches_target() {
    let mut config = Config::default();
    config.transitions.enter = EnterMode::Grow;
    config.transitions.duration_ms = 400;
    let mut chart = BarChart::new(config).unwrap();
    let series: Series<Letter> = [(letter('x'), 8)].into_iter().collect();

    chart.render(Letter::domain(), &series).unwrap();
    chart.advance(Duration::from_millis(200));
    let midway = chart.frame().unwrap().marks[0];
    assert!(midway.current.height > 0.0);
    assert!(!midway.settled);

    chart.advance(Duration::from_millis(200));
    let done = chart.frame().unwrap().marks[0];
    assert_eq!(done.current, done.target);
}

#[test]
fn test_exiting_marks_leave_after_transition() {
    let mut config = Config::default();
    config.transitions.duration_ms = 100;
    let mut chart = LetterFrequencyChart::new(config).unwrap();
    chart.on_input("ab").unwrap();
    let frame = chart.on_input("b").unwrap();

    assert_eq!(frame.reconciliation.exiting, vec![letter('a')]);
    let exiting = frame.mark(&letter('a')).unwrap();
    assert_eq!(exiting.phase, MarkPhase::Exiting);
    assert_eq!(exiting.target.height, 0.0);

    let removed = chart.chart_mut().advance(Duration::from_millis(100));
    assert_eq!(removed, vec![letter('a')]);
    assert_eq!(chart.chart().marks().bound_keys(), vec![letter('b')]);
}

#[test]
fn test_renderer_draws_through_surface_trait() {
    let mut surface = MockSurface::new();
    surface.expect_size().return_const((960u32, 500u32));
    surface
        .expect_draw()
        .with(function(|scene: &Scene| scene.bars.len() == 3 && scene.category_ticks.len() == 26))
        .times(1)
        .returning(|_| Ok(()));

    let mut renderer = Renderer::new(surface).unwrap();
    let mut chart = LetterFrequencyChart::new(Config::default()).unwrap();
    let frame = chart.on_input("abc").unwrap();

    renderer.present(&frame).unwrap();
    assert_eq!(renderer.presented(), 1);
}

#[test]
fn test_zero_sized_surface_fails_before_drawing() {
    let mut surface = MockSurface::new();
    surface.expect_size().return_const((0u32, 500u32));
    surface.expect_draw().never();

    let Err(err) = Renderer::new(surface) else {
        panic!("zero-sized surface was accepted");
    };
    assert!(matches!(err, ChartError::Surface { .. }));
}

#[test]
fn test_svg_end_to_end() {
    let config = Config::default();
    let mut renderer = Renderer::new(SvgSurface::from_config(&config).unwrap()).unwrap();
    let mut chart = LetterFrequencyChart::new(config).unwrap();

    let frame = chart.on_input("Hello World!").unwrap();
    renderer.present(&frame).unwrap();

    let svg = renderer.into_surface().into_document();
    assert!(svg.contains("<svg"));
    assert!(svg.matches("<rect").count() >= 7);
}

#[tokio::test]
async fn test_passenger_chart_from_file() {
    init_test_logging();
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(csv_fixtures::passengers_csv().as_bytes()).unwrap();

    let source = FileSource::new(file.path());
    let mut chart = PassengerChart::load(&source, Config::default()).await.unwrap();
    assert_eq!(chart.table().report().coerced_counts, 1);

    let frame = chart.monthly(2019, Region::Domestic).unwrap();
    let january = frame.mark(&Month::new(1).unwrap()).unwrap();
    assert_eq!(january.value, 10);

    let frame = chart.totals(Some(Region::International)).unwrap();
    assert_eq!(frame.marks.len(), 4);
}

#[tokio::test]
async fn test_passenger_chart_missing_column() {
    let source = InlineSource::new(csv_fixtures::missing_count_column_csv());
    let err = PassengerChart::load(&source, Config::default()).await.unwrap_err();
    assert!(matches!(err, ChartError::Data { .. }));
}

proptest! {
    #[test]
    fn prop_letter_counts_sum_to_filtered_length(text in free_text_strategy()) {
        let series = count_letters(&text);
        let total: u64 = series.iter().map(|(_, count)| count).sum();
        prop_assert_eq!(total, keep_letters(&text).len() as u64);
    }

    #[test]
    fn prop_value_bounds_start_at_zero(counts in counts_strategy()) {
        let series: Series<u8> = counts.into_iter().collect();
        let (min, max) = value_bounds(&series);
        prop_assert_eq!(min, 0.0);
        prop_assert!(max >= 0.0);
        prop_assert!(!max.is_nan());
    }

    #[test]
    fn prop_active_keys_match_latest_series(first in "[a-z ]{0,40}", second in "[a-z ]{0,40}") {
        let mut chart = LetterFrequencyChart::new(Config::default()).unwrap();
        chart.on_input(&first).unwrap();
        let frame = chart.on_input(&second).unwrap();

        let active: BTreeSet<Letter> = frame.active_keys().into_iter().collect();
        let expected: BTreeSet<Letter> = count_letters(&second).keys().collect();
        prop_assert_eq!(active, expected);
    }

    #[test]
    fn prop_reconcile_twice_is_stable(keys in proptest::collection::vec(0u8..26, 0..26)) {
        let first = reconcile(Vec::new(), keys.iter().copied());
        let second = reconcile(first.entering.iter().copied(), keys.iter().copied());
        prop_assert!(second.entering.is_empty());
        prop_assert!(second.exiting.is_empty());
    }
}
