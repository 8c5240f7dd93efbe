use crate::api::FeeAccrual;

use super::format_listing;

/// Accrued fees summed across bins.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeSummary {
    pub total_x: f64,
    pub total_y: f64,
    /// `(binId: feeX, feeY; ...)`
    pub per_bin: String,
}

impl FeeSummary {
    pub fn from_accruals(accruals: &[FeeAccrual]) -> Self {
        let (total_x, total_y) = accruals.iter().fold((0.0, 0.0), |(x, y), fee| {
            (x + fee.accrued_fees_x, y + fee.accrued_fees_y)
        });

        let per_bin = format_listing(accruals.iter().map(|fee| {
            let bin_id = fee
                .bin_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "None".to_string());
            format!("{}: {:?}, {:?}", bin_id, fee.accrued_fees_x, fee.accrued_fees_y)
        }));

        Self {
            total_x,
            total_y,
            per_bin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accrual(bin_id: Option<u64>, x: f64, y: f64) -> FeeAccrual {
        FeeAccrual {
            bin_id,
            accrued_fees_x: x,
            accrued_fees_y: y,
        }
    }

    #[test]
    fn test_fee_summary_totals_and_listing() {
        let summary = FeeSummary::from_accruals(&[
            accrual(Some(8_388_608), 0.5, 1.25),
            accrual(Some(8_388_609), 0.25, 0.0),
        ]);

        assert_eq!(summary.total_x, 0.75);
        assert_eq!(summary.total_y, 1.25);
        assert_eq!(summary.per_bin, "(8388608: 0.5, 1.25; 8388609: 0.25, 0.0)");
    }

    #[test]
    fn test_fee_summary_missing_bin_id() {
        let summary = FeeSummary::from_accruals(&[accrual(None, 1.0, 2.0)]);
        assert_eq!(summary.per_bin, "(None: 1.0, 2.0)");
    }

    #[test]
    fn test_no_fees() {
        let summary = FeeSummary::from_accruals(&[]);
        assert_eq!(summary.total_x, 0.0);
        assert_eq!(summary.total_y, 0.0);
        assert_eq!(summary.per_bin, "()");
    }
}
