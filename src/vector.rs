use bigdecimal::BigDecimal;
use ndarray::{Array1, ArrayView1, Ix1, Zip};
use num_traits::{One, ToPrimitive, Zero};
use std::f64::consts::PI;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::config::DecimalContext;
use crate::decimal::IntoDecimal;
use crate::utils::{clamp_cosine, default_tolerance, ANGLE_TOLERANCE};
use crate::{InvalidArgument, Result, VectorError};

/// An immutable, fixed-dimension vector of exact decimal coordinates.
///
/// Every operation returns a new value. Arithmetic is rounded to the
/// significant digits of the vector's [`DecimalContext`]; binary operations use
/// the context of the left operand.
#[derive(Debug, Clone)]
pub struct Vector {
    coordinates: Array1<BigDecimal>,
    context: DecimalContext,
}

impl Vector {
    /// Build a vector with the default [`DecimalContext`].
    ///
    /// ```
    /// use decimal_vector::{BigDecimal, Vector};
    ///
    /// let v = Vector::new([3, 4]).unwrap();
    /// assert_eq!(v.dimension(), 2);
    /// assert_eq!(v.magnitude(), BigDecimal::from(5));
    /// ```
    pub fn new<I>(coordinates: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: IntoDecimal,
    {
        Self::with_context(coordinates, DecimalContext::default())
    }

    pub fn with_context<I>(coordinates: I, context: DecimalContext) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: IntoDecimal,
    {
        let data = coordinates
            .into_iter()
            .map(IntoDecimal::into_decimal)
            .collect::<Result<Vec<_>>>()?;
        if data.is_empty() {
            return Err(InvalidArgument::Empty.into());
        }
        Ok(Self::from_array(Array1::from_vec(data), context))
    }

    /// The zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Result<Self> {
        Self::zeros_with_context(dimension, DecimalContext::default())
    }

    pub fn zeros_with_context(dimension: usize, context: DecimalContext) -> Result<Self> {
        if dimension == 0 {
            return Err(InvalidArgument::Empty.into());
        }
        Ok(Self::from_array(
            Array1::from_elem(dimension, BigDecimal::zero()),
            context,
        ))
    }

    // Callers guarantee `coordinates` is nonempty.
    fn from_array(coordinates: Array1<BigDecimal>, context: DecimalContext) -> Self {
        Self {
            coordinates,
            context,
        }
    }

    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    pub fn coordinates(&self) -> ArrayView1<'_, BigDecimal> {
        self.coordinates.view()
    }

    pub fn get(&self, index: usize) -> Option<&BigDecimal> {
        self.coordinates.get(index)
    }

    pub fn iter(&self) -> ndarray::iter::Iter<'_, BigDecimal, Ix1> {
        self.coordinates.iter()
    }

    pub fn context(&self) -> DecimalContext {
        self.context
    }

    pub fn plus(&self, other: &Vector) -> Result<Vector> {
        self.check_dimension(other)?;
        let context = self.context;
        let coordinates = Zip::from(&self.coordinates)
            .and(&other.coordinates)
            .map_collect(|a, b| context.round(a + b));
        Ok(Self::from_array(coordinates, context))
    }

    pub fn minus(&self, other: &Vector) -> Result<Vector> {
        self.check_dimension(other)?;
        let context = self.context;
        let coordinates = Zip::from(&self.coordinates)
            .and(&other.coordinates)
            .map_collect(|a, b| context.round(a - b));
        Ok(Self::from_array(coordinates, context))
    }

    /// Multiply every coordinate by `scale`.
    ///
    /// Fails only when `scale` cannot be converted to a decimal.
    pub fn mult_scalar<S: IntoDecimal>(&self, scale: S) -> Result<Vector> {
        let scale = scale.into_decimal()?;
        Ok(self.scaled_by(&scale))
    }

    fn scaled_by(&self, scale: &BigDecimal) -> Vector {
        let context = self.context;
        let coordinates = self.coordinates.map(|x| context.round(scale * x));
        Self::from_array(coordinates, context)
    }

    pub fn dot(&self, other: &Vector) -> Result<BigDecimal> {
        self.check_dimension(other)?;
        let context = self.context;
        let sum = self
            .coordinates
            .iter()
            .zip(other.coordinates.iter())
            .fold(BigDecimal::zero(), |acc, (a, b)| {
                context.round(acc + context.round(a * b))
            });
        Ok(sum)
    }

    /// Euclidean norm, computed with a decimal square root.
    pub fn magnitude(&self) -> BigDecimal {
        let context = self.context;
        let sum_of_squares = self.coordinates.iter().fold(BigDecimal::zero(), |acc, x| {
            context.round(acc + context.round(x * x))
        });
        // A sum of squares is never negative, so the root always exists.
        sum_of_squares
            .sqrt_with_context(&context.arithmetic())
            .map(|root| context.round(root))
            .unwrap_or_else(BigDecimal::zero)
    }

    /// Scale to unit magnitude.
    ///
    /// Fails with [`VectorError::DomainError`] for the zero vector.
    pub fn normalized(&self) -> Result<Vector> {
        let magnitude = self.magnitude();
        if magnitude.is_zero() {
            return Err(VectorError::DomainError(
                "cannot normalize the zero vector".to_string(),
            ));
        }
        let inverse = self
            .context
            .round(magnitude.inverse_with_context(&self.context.arithmetic()));
        Ok(self.scaled_by(&inverse))
    }

    /// Angle between `self` and `other`, in radians unless `in_degrees` is set.
    ///
    /// The cosine of the normalized vectors is computed in decimal and clamped
    /// into `[-1, 1]`, so rounding on near-parallel inputs yields an angle close
    /// to 0 or π instead of NaN. Only the final arcsine runs in `f64`.
    pub fn angle_with(&self, other: &Vector, in_degrees: bool) -> Result<f64> {
        let cosine = self.cosine_with(other)?;
        let angle = if cosine < BigDecimal::zero() {
            PI - self.angle_from_gap(BigDecimal::one() + cosine)?
        } else {
            self.angle_from_gap(BigDecimal::one() - cosine)?
        };
        Ok(if in_degrees { angle.to_degrees() } else { angle })
    }

    fn cosine_with(&self, other: &Vector) -> Result<BigDecimal> {
        self.check_dimension(other)?;
        let cosine = self.normalized()?.dot(&other.normalized()?)?;
        Ok(clamp_cosine(cosine))
    }

    // The angle whose cosine is `1 - gap`, as 2·asin(√(gap/2)). Taking the root
    // in decimal keeps angles far below f64 resolution of the cosine itself.
    fn angle_from_gap(&self, gap: BigDecimal) -> Result<f64> {
        let half_gap = gap * BigDecimal::new(5.into(), 1);
        let sine = half_gap
            .sqrt_with_context(&self.context.arithmetic())
            .unwrap_or_else(BigDecimal::zero);
        let sine = sine.to_f64().ok_or_else(|| {
            VectorError::DomainError(format!("half-angle sine {} is not representable as f64", sine))
        })?;
        Ok(2.0 * sine.min(1.0).asin())
    }

    /// True when the magnitude is below `1e-10`.
    pub fn is_zero(&self) -> bool {
        self.is_zero_within(&default_tolerance())
    }

    pub fn is_zero_within(&self, tolerance: &BigDecimal) -> bool {
        self.magnitude() < *tolerance
    }

    /// True when `|self · other|` is below `1e-10`.
    pub fn is_orthogonal_to(&self, other: &Vector) -> Result<bool> {
        self.is_orthogonal_to_within(other, &default_tolerance())
    }

    pub fn is_orthogonal_to_within(&self, other: &Vector, tolerance: &BigDecimal) -> Result<bool> {
        Ok(self.dot(other)?.abs() < *tolerance)
    }

    /// True when either vector is zero or the angle between them is within
    /// [`ANGLE_TOLERANCE`] radians of 0 or π. The deviation is evaluated from
    /// the decimal cosine, so tolerances far below `f64` cosine resolution hold.
    pub fn is_parallel_to(&self, other: &Vector) -> Result<bool> {
        self.is_parallel_to_within(other, ANGLE_TOLERANCE)
    }

    pub fn is_parallel_to_within(&self, other: &Vector, tolerance: f64) -> Result<bool> {
        self.check_dimension(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(true);
        }
        let cosine = self.cosine_with(other)?;
        // Distance from whichever of 0 and π is nearer.
        let deviation = self.angle_from_gap(BigDecimal::one() - cosine.abs())?;
        Ok(deviation < tolerance)
    }

    fn check_dimension(&self, other: &Vector) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimension(),
                got: other.dimension(),
            });
        }
        Ok(())
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates == other.coordinates
    }
}

impl Eq for Vector {}

impl Hash for Vector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension().hash(state);
        for x in self.coordinates.iter() {
            x.hash(state);
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector: (")?;
        for (i, x) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, ")")
    }
}

/// Parses `"Vector: (1, 2, 3)"`, `"(1, 2, 3)"` or `"[1, 2, 3]"`.
impl FromStr for Vector {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_prefix("Vector:")
            .map(str::trim_start)
            .unwrap_or(trimmed);
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .or_else(|| {
                trimmed
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
            })
            .ok_or(InvalidArgument::NotIterable)?;
        if inner.trim().is_empty() {
            return Err(InvalidArgument::Empty.into());
        }
        Vector::new(inner.split(','))
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a BigDecimal;
    type IntoIter = ndarray::iter::Iter<'a, BigDecimal, Ix1>;

    fn into_iter(self) -> Self::IntoIter {
        self.coordinates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equal_vectors_hash_alike() {
        let a = Vector::new(["1.0", "2"]).unwrap();
        let b = Vector::new([1, 2]).unwrap();
        assert_eq!(a, b);

        let set: HashSet<Vector> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_results_keep_left_context() {
        let wide = DecimalContext::new(50).unwrap();
        let a = Vector::with_context([1, 2], wide).unwrap();
        let b = Vector::new([3, 4]).unwrap();
        assert_eq!(a.plus(&b).unwrap().context(), wide);
        assert_eq!(b.plus(&a).unwrap().context(), DecimalContext::default());
    }

    #[test]
    fn test_precision_controls_rounding() {
        let x = "1.0000000000000000001";

        let rounded = Vector::new([x]).unwrap().mult_scalar(x).unwrap();
        assert_eq!(
            rounded.get(0),
            Some(&BigDecimal::from_str("1.0000000000000000002").unwrap())
        );

        let wide = DecimalContext::new(50).unwrap();
        let exact = Vector::with_context([x], wide).unwrap().mult_scalar(x).unwrap();
        assert_eq!(
            exact.get(0),
            Some(&BigDecimal::from_str("1.00000000000000000020000000000000000001").unwrap())
        );
    }

    #[test]
    fn test_dimension_check_reports_both_sides() {
        let a = Vector::new([1, 2]).unwrap();
        let b = Vector::new([1, 2, 3]).unwrap();
        match a.check_dimension(&b) {
            Err(VectorError::DimensionMismatch { expected, got }) => {
                assert_eq!(expected, 2);
                assert_eq!(got, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
