use serde::{Deserialize, Serialize};

use crate::filter::FilterMask;

/// Summary of one filtering run.
///
/// The `rejected_*` counters are per condition; a row failing several
/// conditions is counted under each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub rejected_code: usize,
    pub rejected_prefix: usize,
    pub rejected_description: usize,
    pub rejected_quantity: usize,
}

impl FilterReport {
    pub fn from_mask(mask: &FilterMask) -> Self {
        let report = Self {
            rows_in: mask.len(),
            rows_out: mask.retained_count(),
            ..Self::default()
        };
        mask.verdicts()
            .iter()
            .fold(report, |mut report, verdict| {
                report.rejected_code += usize::from(!verdict.code_eligible);
                report.rejected_prefix += usize::from(!verdict.prefix_allowed);
                report.rejected_description += usize::from(!verdict.description_allowed);
                report.rejected_quantity += usize::from(!verdict.quantity_negative);
                report
            })
    }

    pub fn rows_dropped(&self) -> usize {
        self.rows_in - self.rows_out
    }
}

impl core::fmt::Display for FilterReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "rows read:     {}", self.rows_in)?;
        writeln!(f, "rows kept:     {}", self.rows_out)?;
        writeln!(f, "rows dropped:  {}", self.rows_dropped())?;
        writeln!(f, "  ineligible code:       {}", self.rejected_code)?;
        writeln!(f, "  excluded prefix:       {}", self.rejected_prefix)?;
        writeln!(f, "  restricted description: {}", self.rejected_description)?;
        write!(f, "  non-negative quantity: {}", self.rejected_quantity)
    }
}
