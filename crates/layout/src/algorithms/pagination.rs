/// Collapses the bottom margin of one element with the top margin of the next.
///
/// Two non-negative margins collapse to the larger one; as soon as either is
/// negative they add up.
pub fn margin_max(previous_bottom: f32, next_top: f32) -> f32 {
    if previous_bottom >= 0.0 && next_top >= 0.0 {
        previous_bottom.max(next_top)
    } else {
        previous_bottom + next_top
    }
}

pub struct FitAnalysis {
    pub fits: bool,
    pub remaining_height: f32,
}

/// Checks whether `required` more points fit below `used` in an area `available` tall.
pub fn check_fit(used: f32, required: f32, available: f32, tolerance: f32) -> FitAnalysis {
    let remaining = available - used;
    FitAnalysis {
        fits: required <= remaining + tolerance,
        remaining_height: remaining.max(0.0),
    }
}
