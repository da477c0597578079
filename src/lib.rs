//! # Zurich Trends
//!
//! Workspace facade re-exporting the price pipeline and its math crate.
//!
//! ## Example
//!
//! ```
//! use zurich_trends::price_trends::{CleanDataset, CleanRecord, PipelineConfig, TrendService};
//!
//! let config = PipelineConfig::builtin().unwrap();
//! let dataset = CleanDataset::from_records(vec![
//!     CleanRecord::new(2020, "Zurich (Total)", 12_000.0, 900_000.0, 60_000_000.0, 50.0).unwrap(),
//!     CleanRecord::new(2020, "Kreis 1", 15_000.0, 1_200_000.0, 6_000_000.0, 4.0).unwrap(),
//! ]);
//! let service = TrendService::new(&dataset, &config.areas);
//! assert_eq!(service.list_selectable_areas().len(), 2);
//! ```

pub use price_trends;
pub use trend_math;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_loads() {
        let config = price_trends::PipelineConfig::builtin().unwrap();
        assert_eq!(config.areas.citywide, "Zurich (Total)");
    }

    #[test]
    fn test_math_reexport() {
        let fit = trend_math::LinearFit::fit(&[1.0, 2.0], &[3.0, 5.0]).unwrap();
        assert!((fit.slope() - 2.0).abs() < 1e-12);
    }
}
