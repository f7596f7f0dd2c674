//! Immutable double precision 3D vector and its algebra
//!
//! Conventions: right is +X, depth runs along +Z and +Y maps to screen rows
//! growing downwards. Yaw, pitch and roll are rotations about Y, X and Z.
//!
//! Two equality notions coexist. `==` is exact IEEE component equality, so a
//! vector holding NaN never equals anything. [`Vector3::approx_eq`] and
//! [`Vector3::same_components`] treat matching NaN components as equal. The
//! `approx` traits compare component-wise with IEEE rules, so NaN never matches.
//!
//! Vectors are deliberately not `PartialOrd`. Magnitude comparisons are exposed
//! through the `magnitude_*` predicates and [`Vector3::compare_magnitude`];
//! they compare squared magnitude and are a proxy, not a lexicographic order.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::error::{Result, VectorError};

/// Midpoint behaviour for [`Vector3::round_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Banker's rounding, 2.5 -> 2
    #[default]
    ToEven,
    /// 2.5 -> 3, -2.5 -> -3
    AwayFromZero,
}

/// Largest number of fractional digits accepted by [`Vector3::round_with`]
pub const MAX_ROUNDING_DIGITS: u32 = 15;

/// A 3-component vector of `f64`.
///
/// Components may be finite, infinite or NaN. Every operation returns a new
/// value; there is no in-place mutation of components.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Vector3 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);
    pub const ZERO: Self = Self::ORIGIN;
    pub const X_AXIS: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y_AXIS: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z_AXIS: Self = Self::new(0.0, 0.0, 1.0);
    pub const NAN: Self = Self::new(f64::NAN, f64::NAN, f64::NAN);
    pub const MIN: Self = Self::new(f64::MIN, f64::MIN, f64::MIN);
    pub const MAX: Self = Self::new(f64::MAX, f64::MAX, f64::MAX);
    /// Smallest positive subnormal in every component
    pub const EPSILON: Self = Self::new(5e-324, 5e-324, 5e-324);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn x(&self) -> f64 {
        self.x
    }

    pub const fn y(&self) -> f64 {
        self.y
    }

    pub const fn z(&self) -> f64 {
        self.z
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Component by index, 0 = x, 1 = y, 2 = z
    pub fn component(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(VectorError::InvalidArgument(format!(
                "component index must be 0, 1 or 2, got {index}"
            ))),
        }
    }

    // ===== MAGNITUDE =====

    pub fn magnitude(self) -> f64 {
        self.sum_component_squares().sqrt()
    }

    /// Same as [`Vector3::magnitude`]
    pub fn abs(self) -> f64 {
        self.magnitude()
    }

    /// Returns a vector with the same direction and the requested magnitude.
    pub fn scale(self, magnitude: f64) -> Result<Self> {
        if magnitude < 0.0 {
            return Err(VectorError::out_of_range(
                "magnitude",
                magnitude,
                "the magnitude of a vector must not be negative",
            ));
        }
        if self == Self::ORIGIN {
            return Err(VectorError::InvalidArgument(
                "cannot change the magnitude of vector (0, 0, 0)".into(),
            ));
        }
        Ok(self * (magnitude / self.magnitude()))
    }

    // ===== COMPONENT OPERATIONS =====

    pub fn sum_components(self) -> f64 {
        self.x + self.y + self.z
    }

    pub fn sum_component_squares(self) -> f64 {
        self.square_components().sum_components()
    }

    pub fn pow_components(self, power: f64) -> Self {
        Self::new(self.x.powf(power), self.y.powf(power), self.z.powf(power))
    }

    pub fn sqrt_components(self) -> Self {
        Self::new(self.x.sqrt(), self.y.sqrt(), self.z.sqrt())
    }

    pub fn square_components(self) -> Self {
        Self::new(self.x * self.x, self.y * self.y, self.z * self.z)
    }

    /// Rounds every component to a whole number, ties to even.
    pub fn round(self) -> Self {
        Self::new(
            self.x.round_ties_even(),
            self.y.round_ties_even(),
            self.z.round_ties_even(),
        )
    }

    /// Rounds every component to `digits` fractional digits.
    pub fn round_with(self, digits: u32, mode: RoundingMode) -> Result<Self> {
        if digits > MAX_ROUNDING_DIGITS {
            return Err(VectorError::out_of_range(
                "digits",
                digits as f64,
                "rounding digits must be between 0 and 15",
            ));
        }
        Ok(Self::new(
            round_component(self.x, digits, mode),
            round_component(self.y, digits, mode),
            round_component(self.z, digits, mode),
        ))
    }

    // ===== PRODUCTS =====

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product, `a.cross(b) == -(b.cross(a))`
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Signed volume of the parallelepiped spanned by the three vectors.
    pub fn mixed_product(self, b: Self, c: Self) -> f64 {
        self.cross(b).dot(c)
    }

    // ===== NORMALIZATION =====

    /// Unit vector in the same direction.
    ///
    /// Vectors made only of zero and infinite components resolve to their
    /// sign pattern first, so (∞, 0, -∞) normalizes like (1, 0, -1). Fails
    /// for zero, NaN and any other infinite magnitude.
    pub fn normalize(self) -> Result<Self> {
        let mut v = self.rescale_extremes();

        if v.magnitude().is_infinite() {
            v = v.resolve_infinite_components();
            if v.is_nan() {
                return Err(VectorError::InfiniteMagnitude);
            }
        }
        if v.magnitude() == 0.0 {
            return Err(VectorError::ZeroMagnitude);
        }
        if v.is_nan() {
            return Err(VectorError::NaNMagnitude);
        }

        Ok(v.normalize_unchecked())
    }

    /// Unit vector in the same direction, or a sentinel instead of an error:
    /// [`Vector3::ORIGIN`] for zero magnitude and [`Vector3::NAN`] when the
    /// magnitude is NaN. This is the variant used on the per-frame path.
    pub fn normalize_or_default(self) -> Self {
        let v = self.rescale_extremes().resolve_infinite_components();
        let magnitude = v.magnitude();

        if magnitude == 0.0 {
            return Self::ORIGIN;
        }
        if magnitude.is_nan() {
            return Self::NAN;
        }

        v.normalize_unchecked()
    }

    fn normalize_unchecked(self) -> Self {
        let inverse = 1.0 / self.magnitude();
        Self::new(self.x * inverse, self.y * inverse, self.z * inverse)
    }

    /// Sign-only resolution for vectors whose magnitude is infinite.
    /// Zero components keep their sign, ±∞ become ±1, anything else is NaN.
    fn resolve_infinite_components(self) -> Self {
        if !self.magnitude().is_infinite() {
            return self;
        }
        Self::new(
            sign_of_infinite(self.x),
            sign_of_infinite(self.y),
            sign_of_infinite(self.z),
        )
    }

    /// Finite vectors whose squared magnitude overflows or underflows are
    /// divided by their largest component so the direction survives.
    fn rescale_extremes(self) -> Self {
        let finite = self.x.is_finite() && self.y.is_finite() && self.z.is_finite();
        if !finite || self == Self::ORIGIN {
            return self;
        }

        let magnitude = self.magnitude();
        if magnitude != 0.0 && magnitude.is_finite() {
            return self;
        }

        let largest = self.x.abs().max(self.y.abs()).max(self.z.abs());
        self / largest
    }

    // ===== INTERPOLATION =====

    /// Linear interpolation, `control` 0 gives `self`, 1 gives `other`.
    pub fn interpolate(self, other: Self, control: f64, allow_extrapolation: bool) -> Result<Self> {
        if !allow_extrapolation && !(0.0..=1.0).contains(&control) {
            return Err(VectorError::out_of_range(
                "control",
                control,
                "control parameter must be a value between 0 and 1",
            ));
        }

        Ok(Self::new(
            self.x * (1.0 - control) + other.x * control,
            self.y * (1.0 - control) + other.y * control,
            self.z * (1.0 - control) + other.z * control,
        ))
    }

    // ===== DISTANCE AND ANGLE =====

    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    /// Angle between two vectors in radians.
    ///
    /// Equal vectors give 0 even when their components are infinite.
    pub fn angle(self, other: Self) -> f64 {
        if self == other {
            return 0.0;
        }

        let cos = self.normalize_or_default().dot(other.normalize_or_default());
        if cos.is_nan() {
            return f64::NAN;
        }
        cos.clamp(-1.0, 1.0).acos()
    }

    // ===== MAGNITUDE COMPARISON =====

    pub fn magnitude_lt(self, other: Self) -> bool {
        self.sum_component_squares() < other.sum_component_squares()
    }

    pub fn magnitude_le(self, other: Self) -> bool {
        self.sum_component_squares() <= other.sum_component_squares()
    }

    pub fn magnitude_gt(self, other: Self) -> bool {
        self.sum_component_squares() > other.sum_component_squares()
    }

    pub fn magnitude_ge(self, other: Self) -> bool {
        self.sum_component_squares() >= other.sum_component_squares()
    }

    /// Orders by magnitude. Incomparable (NaN) magnitudes report `Equal`.
    pub fn compare_magnitude(self, other: Self) -> Ordering {
        if self.magnitude_lt(other) {
            Ordering::Less
        } else if self.magnitude_gt(other) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Like [`Vector3::compare_magnitude`], but tolerance-equal vectors and
    /// pairs of infinite vectors compare `Equal`.
    pub fn compare_magnitude_within(self, other: Self, tolerance: f64) -> Ordering {
        let both_infinite =
            self.sum_component_squares().is_infinite() && other.sum_component_squares().is_infinite();

        if both_infinite || self.approx_eq(other, tolerance) {
            Ordering::Equal
        } else if self.magnitude_lt(other) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Magnitude ordering against a dynamically typed value.
    pub fn compare_to_any(&self, other: &dyn Any) -> Result<Ordering> {
        match other.downcast_ref::<Vector3>() {
            Some(v) => Ok(self.compare_magnitude(*v)),
            None => Err(VectorError::InvalidArgument(
                "cannot compare a vector to a non-vector".into(),
            )),
        }
    }

    /// Operand with the greater magnitude, `self` on ties.
    pub fn max(self, other: Self) -> Self {
        if self.magnitude_ge(other) {
            self
        } else {
            other
        }
    }

    /// Operand with the lesser magnitude, `self` on ties.
    pub fn min(self, other: Self) -> Self {
        if self.magnitude_le(other) {
            self
        } else {
            other
        }
    }

    // ===== EQUALITY =====

    /// Component equality where NaN matches NaN.
    pub fn same_components(self, other: Self) -> bool {
        same_value(self.x, other.x) && same_value(self.y, other.y) && same_value(self.z, other.z)
    }

    /// Component equality within an absolute tolerance; NaN matches NaN.
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        close_or_same(self.x, other.x, tolerance)
            && close_or_same(self.y, other.y, tolerance)
            && close_or_same(self.z, other.z, tolerance)
    }

    // ===== ROTATION =====

    /// Rotation about the X axis.
    pub fn rotate_x(self, rad: f64) -> Self {
        let (sin, cos) = rad.sin_cos();
        Self::new(
            self.x,
            self.y * cos - self.z * sin,
            self.y * sin + self.z * cos,
        )
    }

    /// Rotation about the Y axis.
    pub fn rotate_y(self, rad: f64) -> Self {
        let (sin, cos) = rad.sin_cos();
        Self::new(
            self.z * sin + self.x * cos,
            self.y,
            self.z * cos - self.x * sin,
        )
    }

    /// Rotation about the Z axis.
    pub fn rotate_z(self, rad: f64) -> Self {
        let (sin, cos) = rad.sin_cos();
        Self::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
            self.z,
        )
    }

    /// Rotation about the line parallel to X through (·, y_off, z_off).
    pub fn rotate_x_about(self, y_off: f64, z_off: f64, rad: f64) -> Self {
        let (sin, cos) = rad.sin_cos();
        Self::new(
            self.x,
            self.y * cos - self.z * sin + (y_off * (1.0 - cos) + z_off * sin),
            self.y * sin + self.z * cos + (z_off * (1.0 - cos) - y_off * sin),
        )
    }

    /// Rotation about the line parallel to Y through (x_off, ·, z_off).
    pub fn rotate_y_about(self, x_off: f64, z_off: f64, rad: f64) -> Self {
        let (sin, cos) = rad.sin_cos();
        Self::new(
            self.z * sin + self.x * cos + (x_off * (1.0 - cos) - z_off * sin),
            self.y,
            self.z * cos - self.x * sin + (z_off * (1.0 - cos) + x_off * sin),
        )
    }

    /// Rotation about the line parallel to Z through (x_off, y_off, ·).
    pub fn rotate_z_about(self, x_off: f64, y_off: f64, rad: f64) -> Self {
        let (sin, cos) = rad.sin_cos();
        Self::new(
            self.x * cos - self.y * sin + (x_off * (1.0 - cos) + y_off * sin),
            self.x * sin + self.y * cos + (y_off * (1.0 - cos) - x_off * sin),
            self.z,
        )
    }

    pub fn yaw(self, rad: f64) -> Self {
        self.rotate_y(rad)
    }

    pub fn pitch(self, rad: f64) -> Self {
        self.rotate_x(rad)
    }

    pub fn roll(self, rad: f64) -> Self {
        self.rotate_z(rad)
    }

    // ===== PROJECTION, REJECTION, REFLECTION =====

    /// Vector resolute of `self` along `direction`.
    pub fn projection(self, direction: Self) -> Self {
        direction * (self.dot(direction) / direction.sum_component_squares())
    }

    /// Component of `self` perpendicular to `direction`.
    pub fn rejection(self, direction: Self) -> Self {
        self - self.projection(direction)
    }

    /// Mirror image of `self` about `reflector`, keeping the original magnitude.
    /// A vector at a right angle to the reflector is simply negated.
    pub fn reflection(self, reflector: Self) -> Result<Self> {
        if self.angle(reflector).abs().abs_diff_eq(&std::f64::consts::FRAC_PI_2, f64::EPSILON) {
            return Ok(-self);
        }

        let reflected = 2.0 * self.projection(reflector) - self;
        reflected.scale(self.magnitude())
    }

    // ===== DECISIONS =====

    pub fn is_unit_vector(self) -> bool {
        self.magnitude() == 1.0
    }

    pub fn is_unit_vector_within(self, tolerance: f64) -> bool {
        self.magnitude().abs_diff_eq(&1.0, tolerance)
    }

    /// Exactly perpendicular. The zero vector is never perpendicular to anything.
    pub fn is_perpendicular(self, other: Self) -> bool {
        match Self::perpendicular_dot(self, other) {
            Some(dot) => dot == 0.0,
            None => false,
        }
    }

    pub fn is_perpendicular_within(self, other: Self, tolerance: f64) -> bool {
        match Self::perpendicular_dot(self, other) {
            Some(dot) => dot.abs_diff_eq(&0.0, tolerance),
            None => false,
        }
    }

    fn perpendicular_dot(a: Self, b: Self) -> Option<f64> {
        let a = a.resolve_infinite_components();
        let b = b.resolve_infinite_components();
        if a == Self::ZERO || b == Self::ZERO {
            return None;
        }
        Some(a.dot(b))
    }

    /// A face whose normal points away from the line of sight.
    pub fn is_back_face(self, line_of_sight: Self) -> bool {
        self.dot(line_of_sight) < 0.0
    }

    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    pub fn to_verbose_string(self) -> String {
        let kind = if self.is_unit_vector() {
            "unit vector"
        } else {
            "positional vector"
        };
        format!(
            "{kind} (x={}, y={}, z={}) of magnitude {}",
            self.x,
            self.y,
            self.z,
            self.magnitude()
        )
    }
}

fn sign_of_infinite(component: f64) -> f64 {
    if component == 0.0 {
        component
    } else if component == f64::INFINITY {
        1.0
    } else if component == f64::NEG_INFINITY {
        -1.0
    } else {
        f64::NAN
    }
}

fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Matching infinities and NaN pairs count as equal regardless of tolerance.
fn close_or_same(a: f64, b: f64, tolerance: f64) -> bool {
    same_value(a, b) || a.abs_diff_eq(&b, tolerance)
}

fn round_component(value: f64, digits: u32, mode: RoundingMode) -> f64 {
    let round = |v: f64| match mode {
        RoundingMode::ToEven => v.round_ties_even(),
        RoundingMode::AwayFromZero => v.round(),
    };

    if digits == 0 {
        return round(value);
    }

    let power = 10f64.powi(digits as i32);
    let scaled = value * power;
    if !scaled.is_finite() {
        return value;
    }
    round(scaled) / power
}

impl TryFrom<&[f64]> for Vector3 {
    type Error = VectorError;

    fn try_from(components: &[f64]) -> Result<Self> {
        match components {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(VectorError::InvalidArgument(format!(
                "array must contain exactly three components (x, y, z), got {}",
                components.len()
            ))),
        }
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for nalgebra::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl AbsDiffEq for Vector3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vector3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl UlpsEq for Vector3 {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.x.ulps_eq(&other.x, epsilon, max_ulps)
            && self.y.ulps_eq(&other.y, epsilon, max_ulps)
            && self.z.ulps_eq(&other.z, epsilon, max_ulps)
    }
}

impl Index<usize> for Vector3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of range: {index}"),
        }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "({:.p$}, {:.p$}, {:.p$})", self.x, self.y, self.z),
            None => write!(f, "({}, {}, {})", self.x, self.y, self.z),
        }
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs * self
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
