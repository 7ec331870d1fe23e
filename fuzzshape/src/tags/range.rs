use core::str::FromStr;

/// Length range used when a field carries no length tag.
pub const DEFAULT_LENGTH: (u64, u64) = (0, 20);

/// Parses `"min,max"`, tolerating whitespace around each number.
fn parse_pair<T: FromStr>(value: &str) -> Option<(T, T)> {
    let (min, max) = value.split_once(',')?;
    Some((min.trim().parse().ok()?, max.trim().parse().ok()?))
}

/// `|v|`, except that `i64::MIN` maps to `i64::MAX`.
fn abs_saturating(v: i64) -> i64 {
    v.checked_abs().unwrap_or(i64::MAX)
}

/// Inclusive range for signed integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntRange {
    bounds: Option<(i64, i64)>,
}

impl IntRange {
    /// A range that is set.
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            bounds: Some((min, max)),
        }
    }

    /// Parses a tag value; anything malformed leaves the range unset.
    pub fn parse(value: &str) -> Self {
        Self {
            bounds: parse_pair(value),
        }
    }

    /// `(min, max)` if the range is set.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        self.bounds
    }

    /// Maps `v` into the range.
    ///
    /// Unset and inverted ranges pass `v` through; `min == max` clamps.
    pub fn fit(&self, v: i64) -> i64 {
        let Some((min, max)) = self.bounds else {
            return v;
        };
        if min == max {
            return max;
        }
        if max < min {
            return v;
        }
        let spread = i128::from(max) - i128::from(min) + 1;
        let fitted = i128::from(abs_saturating(v)) % spread + i128::from(min);
        // always within [min, max], so the conversion cannot fail
        i64::try_from(fitted).unwrap_or(max)
    }
}

/// Inclusive range for unsigned integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UintRange {
    bounds: Option<(u64, u64)>,
}

impl UintRange {
    /// A range that is set.
    pub const fn new(min: u64, max: u64) -> Self {
        Self {
            bounds: Some((min, max)),
        }
    }

    /// Parses a tag value; anything malformed leaves the range unset.
    pub fn parse(value: &str) -> Self {
        Self {
            bounds: parse_pair(value),
        }
    }

    /// `(min, max)` if the range is set.
    pub fn bounds(&self) -> Option<(u64, u64)> {
        self.bounds
    }

    /// Maps `v` into the range.
    pub fn fit(&self, v: u64) -> u64 {
        let Some((min, max)) = self.bounds else {
            return v;
        };
        if min == max {
            return max;
        }
        if max < min {
            return v;
        }
        let spread = u128::from(max) - u128::from(min) + 1;
        let fitted = u128::from(v) % spread + u128::from(min);
        u64::try_from(fitted).unwrap_or(max)
    }
}

/// Range for floats. The upper bound is reachable only through `+inf`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FloatRange {
    bounds: Option<(f64, f64)>,
}

impl FloatRange {
    /// A range that is set.
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            bounds: Some((min, max)),
        }
    }

    /// Parses a tag value; anything malformed leaves the range unset.
    pub fn parse(value: &str) -> Self {
        Self {
            bounds: parse_pair(value),
        }
    }

    /// `(min, max)` if the range is set.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.bounds
    }

    /// Maps `v` into the range. NaN lands on the midpoint, infinities on
    /// the matching bound.
    pub fn fit(&self, v: f64) -> f64 {
        let Some((min, max)) = self.bounds else {
            return v;
        };
        if min == max {
            return max;
        }
        if max <= min || min.is_nan() || max.is_nan() {
            return v;
        }
        let spread = max - min;
        if v.is_nan() {
            if spread.is_finite() {
                return min + spread / 2.0;
            }
            return min / 2.0 + max / 2.0;
        }
        if v == f64::INFINITY {
            return max;
        }
        if v == f64::NEG_INFINITY {
            return min;
        }
        // rounding in the addition can overshoot by an ulp
        (v.abs() % spread + min).min(max)
    }
}

/// Range for string lengths and collection sizes.
///
/// Always has bounds; remembers whether they came from a tag, since an
/// explicit slice length switches off open-ended growth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthRange {
    range: UintRange,
    explicit: bool,
}

impl Default for LengthRange {
    fn default() -> Self {
        Self {
            range: UintRange::new(DEFAULT_LENGTH.0, DEFAULT_LENGTH.1),
            explicit: false,
        }
    }
}

impl LengthRange {
    /// An explicit range.
    pub const fn new(min: u64, max: u64) -> Self {
        Self {
            range: UintRange::new(min, max),
            explicit: true,
        }
    }

    /// Parses a tag value, falling back to the default when malformed.
    pub fn parse(value: &str) -> Self {
        match parse_pair(value) {
            Some((min, max)) => Self::new(min, max),
            None => Self::default(),
        }
    }

    /// Parses an optional tag value.
    pub fn from_tag(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }

    /// Whether the bounds came from a tag.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// `(min, max)`.
    pub fn bounds(&self) -> (u64, u64) {
        self.range.bounds().unwrap_or(DEFAULT_LENGTH)
    }

    /// Maps a raw length into the range. Negative lengths give `min`, and
    /// lengths beyond `usize` give `usize::MAX`.
    pub fn fit_length(&self, raw: i64) -> usize {
        let fitted = match u64::try_from(raw) {
            Ok(raw) => self.range.fit(raw),
            Err(_) => self.bounds().0,
        };
        usize::try_from(fitted).unwrap_or(usize::MAX)
    }
}
