use approx::assert_relative_eq;
use price_trends::{
    CleanDataset, ForecastHorizon, PipelineConfig, TrainedForecastModel, TrendOutcome,
    TrendService,
};
use std::io::Write;
use tempfile::NamedTempFile;

const ROW_PREFIX: &str = "D,1,ETW,Stockwerkeigentum,1,1,Alle";

fn write_row(file: &mut NamedTempFile, year: i32, area: (&str, &str, &str), values: &str) {
    let (sort, code, label) = area;
    writeln!(file, "{},{},{},{},{},{}", year, ROW_PREFIX, sort, code, label, values).unwrap();
}

// Helper function to create a raw dataset shaped like the city's export
fn create_sample_data() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(
        file,
        "{}{}{}",
        "Stichtagdatjahr,DatenstandCd,HAArtLevel1Sort,HAArtLevel1Cd,HAArtLevel1Lang,",
        "HASTWESort,HASTWECd,HASTWELang,RaumSort,RaumCd,RaumLang,",
        "AnzHA,HAPreisWohnflaeche,HAMedianPreis,HASumPreis"
    )
    .unwrap();

    // Citywide rows sit exactly on price = 500 * year - 998000
    let citywide = ("0", "0", "Ganze Stadt");
    for (year, price) in [(2019, 11_500), (2020, 12_000), (2021, 12_500), (2022, 13_000)] {
        let values = format!("50-99,{},1000000,90000000", price);
        write_row(&mut file, year, citywide, &values);
    }

    write_row(&mut file, 2021, ("11", "1", "Kreis 1"), "3–5,16000,1500000,7000000");
    write_row(&mut file, 2022, ("11", "1", "Kreis 1"), "6,17000,1550000,9000000");
    write_row(&mut file, 2022, ("12", "1", "Rathaus"), "3,18000,1600000,5000000");
    write_row(&mut file, 2022, ("21", "2", "Kreis 2"), "1-2,9000,700000,1500000");
    write_row(&mut file, 2022, ("31", "3", "Kreis 3"), "4,,700000,1500000");

    file
}

#[test]
fn test_full_forecast_workflow() {
    // 1. Ingest the raw file
    let config = PipelineConfig::builtin().unwrap();
    let raw = create_sample_data();
    let (dataset, summary) = CleanDataset::ingest_csv(raw.path(), &config.schema).unwrap();
    assert_eq!(summary.rows_read, 9);
    assert_eq!(summary.rows_kept, 7);

    // 2. Write and reload the clean file
    let clean = NamedTempFile::new().unwrap();
    dataset.write_csv(clean.path()).unwrap();
    let dataset = CleanDataset::from_clean_csv(clean.path()).unwrap();
    assert_eq!(dataset.len(), 7);

    // 3. Only areas with data are offered
    let service = TrendService::new(&dataset, &config.areas);
    let labels: Vec<String> = service
        .list_selectable_areas()
        .into_iter()
        .map(|a| a.label)
        .collect();
    assert_eq!(labels, vec!["Zurich (Total)", "Kreis 1", "Rathaus"]);

    // 4. District with two years gets a forecast
    let outcome = service
        .compute_trend_series("Kreis 1", &ForecastHorizon::default())
        .unwrap();
    let series = outcome.series().unwrap();
    assert_eq!(series.forecast()[0].year, 2023);
    assert_relative_eq!(series.forecast()[0].predicted_price_per_m2, 18_000.0, epsilon = 1e-6);

    // 5. Sub-area with a single year is insufficient
    let outcome = service
        .compute_trend_series("Rathaus", &ForecastHorizon::default())
        .unwrap();
    assert!(matches!(outcome, TrendOutcome::InsufficientData { distinct_years: 1, .. }));
}

#[test]
fn test_citywide_forecast_on_exact_line() {
    let config = PipelineConfig::builtin().unwrap();
    let raw = create_sample_data();
    let (dataset, _) = CleanDataset::ingest_csv(raw.path(), &config.schema).unwrap();

    // Restrict to the literal citywide rows to check the fit itself
    let citywide_rows: Vec<_> = dataset
        .records()
        .iter()
        .filter(|r| r.area() == "Zurich (Total)")
        .cloned()
        .collect();
    let only_citywide = CleanDataset::from_records(citywide_rows);
    let service = TrendService::new(&only_citywide, &config.areas);

    let outcome = service
        .compute_trend_series("Zurich (Total)", &ForecastHorizon::Years(vec![2025, 2026]))
        .unwrap();
    let series = outcome.series().unwrap();

    assert_eq!(series.historical().len(), 4);
    assert_relative_eq!(series.forecast()[0].predicted_price_per_m2, 14_500.0, epsilon = 1e-6);
    assert_relative_eq!(series.forecast()[1].predicted_price_per_m2, 15_000.0, epsilon = 1e-6);

    let model = price_trends::LinearTrend::new();
    let fitted = price_trends::ForecastModel::train(&model, series.historical())
        .unwrap()
        .fitted()
        .unwrap();
    assert_relative_eq!(fitted.slope(), 500.0, epsilon = 1e-9);
    assert_eq!(fitted.last_observed_year(), 2022);
}
