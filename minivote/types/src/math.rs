use alloy_primitives::U256;

/// Scale factor that yields two decimal places of precision: a share is first
/// computed in hundredths of a percent using integer arithmetic, then divided
/// down to a percentage. Floating point only enters after the division, so
/// wei-scale tallies don't accumulate drift.
const HUNDREDTHS_OF_PERCENT: u64 = 10_000;

/// The share of `total` that `part` represents, in percent, floored to two
/// decimal places. Returns `0.0` when `total` is zero.
pub fn percentage(part: U256, total: U256) -> f64 {
    if total.is_zero() {
        return 0.0;
    }

    let scale = U256::from(HUNDREDTHS_OF_PERCENT);
    let scaled = match part.checked_mul(scale) {
        Some(scaled) => scaled / total,
        // `part * 10_000` only overflows 256 bits for absurdly large tallies.
        // Dividing the denominator instead loses a little precision but stays
        // exact to well under the two decimals we report.
        None => {
            let denom = total / scale;
            if denom.is_zero() {
                return 100.0;
            }

            part / denom
        },
    };

    scaled.saturating_to::<u64>() as f64 / 100.0
}

/// Yes/no percentages for a pair of tallies, measured against their sum.
pub fn vote_percentages(yes: U256, no: U256) -> (f64, f64) {
    match yes.checked_add(no) {
        Some(total) => (percentage(yes, total), percentage(no, total)),
        // Halving both sides preserves the split and cannot overflow.
        None => {
            let (yes, no) = (yes >> 1, no >> 1);
            let total = yes + no;

            (percentage(yes, total), percentage(no, total))
        },
    }
}

// ----------------------------------- tests -----------------------------------
