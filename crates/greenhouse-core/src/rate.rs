//! Rate derivation: the one place floating-point yield math lives.
//!
//! Rates are always computed from the raw integer cycle fields and cached by
//! the resolver; downstream code never re-derives them from rounded values.

const MINUTES_PER_HOUR: f64 = 60.0;

/// Units yielded per hour: `yield_per_cycle / cycle_time * 60`.
pub fn per_hour(yield_per_cycle: u32, cycle_time: u32) -> f64 {
    per_minute(yield_per_cycle, cycle_time) * MINUTES_PER_HOUR
}

/// Units yielded per minute of growth.
pub fn per_minute(yield_per_cycle: u32, cycle_time: u32) -> f64 {
    f64::from(yield_per_cycle) / f64::from(cycle_time)
}

/// Market value earned per hour for a producer with the given rate.
pub fn value_per_hour(per_hour: f64, market_value: u32) -> f64 {
    per_hour * f64::from(market_value)
}

/// Producer units needed to cover `demand` units per harvest interval.
///
/// Always rounds up: fractional producer counts are not allowed, so the
/// achieved output may exceed demand.
pub fn required_units(
    demand: u64,
    harvest_interval: u32,
    yield_per_cycle: u32,
    cycle_time: u32,
) -> u64 {
    let demand_per_minute = demand as f64 / f64::from(harvest_interval);
    (demand_per_minute / per_minute(yield_per_cycle, cycle_time)).ceil() as u64
}

/// Units actually produced over one harvest interval by `units` producers.
pub fn interval_output(
    yield_per_cycle: u32,
    cycle_time: u32,
    harvest_interval: u32,
    units: u64,
) -> f64 {
    per_minute(yield_per_cycle, cycle_time) * f64::from(harvest_interval) * units as f64
}

// ===========================================================================
// Tests
// ===========================================================================
