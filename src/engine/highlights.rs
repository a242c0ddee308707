use crate::models::{Month, MonthlyBreakdown};

const HIGHLIGHT_COUNT: usize = 3;

/// Months tied at the highest count, calendar order, first three.
pub fn best_months(breakdown: &MonthlyBreakdown) -> Vec<Month> {
    let max = breakdown.iter().map(|(_, c)| c).max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }
    breakdown
        .iter()
        .filter(|&(_, c)| c == max)
        .map(|(m, _)| m)
        .take(HIGHLIGHT_COUNT)
        .collect()
}

/// Months tied at the lowest count, calendar order, LAST three.
///
/// With many zero months this picks the tail of the year.
pub fn worst_months(breakdown: &MonthlyBreakdown) -> Vec<Month> {
    let min = breakdown.iter().map(|(_, c)| c).min().unwrap_or(0);
    let tied: Vec<Month> = breakdown
        .iter()
        .filter(|&(_, c)| c == min)
        .map(|(m, _)| m)
        .collect();
    let skip = tied.len().saturating_sub(HIGHLIGHT_COUNT);
    tied.into_iter().skip(skip).collect()
}

/// Months ordered by count, highest first, calendar order on ties.
pub fn months_by_count(breakdown: &MonthlyBreakdown) -> Vec<(Month, u32)> {
    let mut months: Vec<(Month, u32)> = breakdown.iter().collect();
    months.sort_by(|a, b| b.1.cmp(&a.1));
    months
}
