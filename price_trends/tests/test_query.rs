use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use price_trends::aggregate::aggregate_by_year;
use price_trends::areas::{scope_records, AreaHierarchy, AreaScope, District};
use price_trends::error::ForecastError;
use price_trends::{CleanDataset, CleanRecord, ForecastHorizon, TrendOutcome, TrendService};
use std::collections::HashSet;

const CITYWIDE: &str = "Zurich (Total)";

fn create_hierarchy() -> AreaHierarchy {
    AreaHierarchy {
        citywide: CITYWIDE.to_string(),
        districts: vec![
            District {
                name: "Kreis 1".to_string(),
                children: vec!["Rathaus".to_string(), "Lindenhof".to_string()],
            },
            District {
                name: "Kreis 2".to_string(),
                children: vec!["Enge".to_string()],
            },
            District {
                name: "Kreis 3".to_string(),
                children: vec![],
            },
        ],
    }
}

fn record(year: i32, area: &str, price_per_m2: f64) -> CleanRecord {
    CleanRecord::new(year, area, price_per_m2, 1_000_000.0, 8_000_000.0, 4.0).unwrap()
}

fn create_dataset() -> CleanDataset {
    CleanDataset::from_records(vec![
        record(2020, CITYWIDE, 12_000.0),
        record(2021, CITYWIDE, 12_500.0),
        record(2020, "Kreis 1", 15_000.0),
        record(2021, "Kreis 1", 15_600.0),
        record(2022, "Kreis 1", 16_100.0),
        record(2020, "Lindenhof", 17_000.0),
        record(2021, "Lindenhof", 17_500.0),
        record(2022, "Kreis 2", 11_000.0),
        record(2022, "Kreis 2", 13_000.0),
    ])
}

#[test]
fn test_selectable_areas_order_and_omission() {
    let dataset = create_dataset();
    let hierarchy = create_hierarchy();
    let service = TrendService::new(&dataset, &hierarchy);

    let areas = service.list_selectable_areas();
    let labels: Vec<&str> = areas.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec![CITYWIDE, "Kreis 1", "Lindenhof", "Kreis 2"]);

    let displays: Vec<String> = areas.iter().map(|a| a.display()).collect();
    assert_eq!(displays[2], " • Lindenhof");
    assert_eq!(displays[1], "Kreis 1");
}

#[test]
fn test_empty_dataset_offers_nothing() {
    let dataset = CleanDataset::from_records(Vec::new());
    let hierarchy = create_hierarchy();
    let service = TrendService::new(&dataset, &hierarchy);

    assert!(service.list_selectable_areas().is_empty());
}

#[test]
fn test_citywide_needs_its_own_records() {
    let dataset = CleanDataset::from_records(vec![
        record(2020, "Kreis 1", 15_000.0),
        record(2021, "Kreis 1", 15_600.0),
    ]);
    let hierarchy = create_hierarchy();
    let service = TrendService::new(&dataset, &hierarchy);

    let labels: Vec<String> = service
        .list_selectable_areas()
        .into_iter()
        .map(|a| a.label)
        .collect();
    assert_eq!(labels, vec!["Kreis 1"]);

    let result = service.compute_trend_series(CITYWIDE, &ForecastHorizon::default());
    assert!(matches!(result, Err(ForecastError::UnknownArea(_))));
}

#[test]
fn test_unlabelled_records_count_toward_citywide() {
    let dataset = CleanDataset::from_records(vec![
        record(2020, CITYWIDE, 12_000.0),
        record(2021, CITYWIDE, 12_000.0),
        record(2021, "", 15_000.0),
    ]);
    let hierarchy = create_hierarchy();
    let service = TrendService::new(&dataset, &hierarchy);

    let labels: Vec<String> = service
        .list_selectable_areas()
        .into_iter()
        .map(|a| a.label)
        .collect();
    assert_eq!(labels, vec![CITYWIDE]);

    let outcome = service
        .compute_trend_series(CITYWIDE, &ForecastHorizon::default())
        .unwrap();
    let series = outcome.series().unwrap();
    assert_relative_eq!(series.historical()[1].mean_price_per_m2, 13_500.0);
}

#[test]
fn test_forecast_past_last_representable_year_is_an_error() {
    let dataset = CleanDataset::from_records(vec![
        record(i32::MAX - 1, "Kreis 1", 15_000.0),
        record(i32::MAX, "Kreis 1", 15_600.0),
    ]);
    let hierarchy = create_hierarchy();
    let service = TrendService::new(&dataset, &hierarchy);

    let result = service.compute_trend_series("Kreis 1", &ForecastHorizon::default());
    assert!(matches!(result, Err(ForecastError::ValidationError(_))));
}

#[test]
fn test_area_trend_series() {
    let dataset = create_dataset();
    let hierarchy = create_hierarchy();
    let service = TrendService::new(&dataset, &hierarchy);

    let outcome = service
        .compute_trend_series("Kreis 1", &ForecastHorizon::default())
        .unwrap();
    let series = outcome.series().expect("Kreis 1 has three years");

    assert_eq!(series.historical().len(), 3);
    assert_eq!(series.forecast().len(), 2);
    assert_eq!(series.forecast()[0].year, 2023);
    assert!(series.forecast()[1].predicted_price_per_m2 > 16_100.0);
}

#[test]
fn test_single_year_area_is_insufficient() {
    let dataset = create_dataset();
    let hierarchy = create_hierarchy();
    let service = TrendService::new(&dataset, &hierarchy);

    let outcome = service
        .compute_trend_series("Kreis 2", &ForecastHorizon::default())
        .unwrap();

    assert_eq!(
        outcome,
        TrendOutcome::InsufficientData {
            area: "Kreis 2".to_string(),
            distinct_years: 1,
        }
    );
}

#[test]
fn test_unknown_area_is_rejected() {
    let dataset = create_dataset();
    let hierarchy = create_hierarchy();
    let service = TrendService::new(&dataset, &hierarchy);

    // In the hierarchy but without records
    let result = service.compute_trend_series("Rathaus", &ForecastHorizon::default());
    assert!(matches!(result, Err(ForecastError::UnknownArea(_))));

    // Not in the hierarchy at all
    let result = service.compute_trend_series("Atlantis", &ForecastHorizon::default());
    assert!(matches!(result, Err(ForecastError::UnknownArea(_))));
}

#[test]
fn test_citywide_is_union_of_areas() {
    let dataset = create_dataset();
    let hierarchy = create_hierarchy();

    let citywide = scope_records(&AreaScope::from_label(CITYWIDE, &hierarchy), &dataset);
    assert_eq!(citywide.len(), dataset.len());

    let union: usize = dataset
        .areas()
        .iter()
        .map(|area| scope_records(&AreaScope::Area(area.to_string()), &dataset).len())
        .sum();
    assert_eq!(union, citywide.len());

    let service = TrendService::new(&dataset, &hierarchy);
    let outcome = service
        .compute_trend_series(CITYWIDE, &ForecastHorizon::YearsAfterLast(1))
        .unwrap();
    let series = outcome.series().unwrap();

    let expected = aggregate_by_year(dataset.records());
    assert_eq!(series.historical().len(), 3);
    for (got, want) in series.historical().iter().zip(&expected) {
        assert_eq!(got.year, want.year);
        assert_relative_eq!(got.mean_price_per_m2, want.mean_price_per_m2);
    }

    // 2022 mixes Kreis 1 and both Kreis 2 records
    assert_relative_eq!(
        series.historical()[2].mean_price_per_m2,
        13_366.666_666_666_666,
        epsilon = 1e-6
    );
}

#[test]
fn test_precompute_matches_single_queries() {
    let dataset = create_dataset();
    let hierarchy = create_hierarchy();
    let service = TrendService::new(&dataset, &hierarchy);
    let horizon = ForecastHorizon::default();

    let all = service.precompute_all(&horizon).unwrap();

    let labels: Vec<&str> = all.iter().map(|(label, _)| label.as_str()).collect();
    assert_eq!(labels, vec![CITYWIDE, "Kreis 1", "Lindenhof", "Kreis 2"]);

    for (label, outcome) in &all {
        let single = service.compute_trend_series(label, &horizon).unwrap();
        assert_eq!(&single, outcome);
    }

    let insufficient: HashSet<&str> = all
        .iter()
        .filter(|(_, o)| o.series().is_none())
        .map(|(label, _)| label.as_str())
        .collect();
    assert_eq!(insufficient, HashSet::from(["Kreis 2"]));
}
