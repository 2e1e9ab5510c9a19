/// Numeric policy constants used throughout the budget engine
///
/// This module centralizes the magic numbers of the calculation contract so
/// the policy is readable in one place and consistent across components.
/// Client-mode convergence solve constants
pub mod solver {
    /// Fraction of the target client budget used to seed the media-budget
    /// estimate. Fees rarely exceed a fifth of the client budget, so this
    /// starts the loop close to the fixed point.
    pub const SEED_FACTOR: f64 = 0.8;

    /// Fraction of the residual error fed back into the next estimate.
    /// A full Newton step oscillates when fees are non-linear in the media
    /// budget; the damped correction does not.
    pub const DAMPING: f64 = 0.8;

    /// Absolute tolerance, in buy-currency units, under which the estimate
    /// counts as converged.
    pub const TOLERANCE: f64 = 0.01;

    /// Hard bound on solve iterations. Exhaustion is a soft failure: the
    /// best estimate is returned flagged as non-converged.
    pub const MAX_ITERATIONS: u32 = 10;
}

/// Unit-volume conversion constants
pub mod volume {
    /// Impression-like unit prices are quoted per mille.
    pub const PER_MILLE: f64 = 1000.0;

    /// Case-insensitive substrings marking a unit type as impression-like.
    pub const IMPRESSION_MARKERS: [&str; 2] = ["impression", "cpm"];
}

/// Fee cascade constants
pub mod cascade {
    /// Scale used to round fee amounts to 2 decimal places.
    pub const AMOUNT_SCALE: f64 = 100.0;
}
