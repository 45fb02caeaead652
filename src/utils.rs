use bigdecimal::BigDecimal;
use num_traits::One;

/// Default angular tolerance, in radians, for parallelism checks.
pub const ANGLE_TOLERANCE: f64 = 1e-10;

/// Default tolerance for zero and orthogonality checks: `1e-10`.
pub fn default_tolerance() -> BigDecimal {
    BigDecimal::new(1.into(), 10)
}

/// Clamp a cosine into `[-1, 1]`, the domain of `acos`.
pub fn clamp_cosine(cosine: BigDecimal) -> BigDecimal {
    let one = BigDecimal::one();
    if cosine > one {
        log::debug!("clamped cosine {} to 1", cosine);
        one
    } else if cosine < -one.clone() {
        log::debug!("clamped cosine {} to -1", cosine);
        -one
    } else {
        cosine
    }
}
