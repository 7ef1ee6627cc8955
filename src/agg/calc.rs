use super::Point;
use crate::Value;

/// The aggregate function applied within a bucket.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Calculation {
    /// Arithmetic mean of the bucket's numeric values.
    Mean,

    /// Sum of the bucket's numeric values.
    Sum,

    /// Number of samples in the bucket, gaps included.
    Count,

    /// Smallest numeric value in the bucket.
    Min,

    /// Largest numeric value in the bucket.
    Max,

    /// First sample, by input order.
    First,

    /// Last sample, by input order.
    Last,
}

impl Calculation {
    /// Applies the calculation to a bucket's samples.
    ///
    /// NaN samples do not participate, except in [`Calculation::Count`],
    /// which counts them. Returns `None` when nothing is left to
    /// aggregate, so an empty bucket is never mistaken for a zero one.
    pub(crate) fn apply(self, points: &[Point]) -> Option<Value> {
        let numeric = points.iter().map(|point| point.value).filter(|v| !v.is_nan());

        match self {
            Self::Mean => {
                let (sum, n) = numeric.fold((0.0, 0_u32), |(sum, n), v| (sum + v, n + 1));
                (n > 0).then(|| sum / Value::from(n))
            }
            Self::Sum => {
                let (sum, n) = numeric.fold((0.0, 0_u32), |(sum, n), v| (sum + v, n + 1));
                (n > 0).then_some(sum)
            }
            Self::Count => Some(points.len() as Value),
            Self::Min => numeric.reduce(Value::min),
            Self::Max => numeric.reduce(Value::max),
            Self::First => points.first().map(|point| point.value).filter(|v| !v.is_nan()),
            Self::Last => points.last().map(|point| point.value).filter(|v| !v.is_nan()),
        }
    }
}

impl TryFrom<&str> for Calculation {
    type Error = crate::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "mean" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            "count" => Ok(Self::Count),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            _ => Err(crate::Error::UnknownCalculation(value.to_string())),
        }
    }
}

impl std::fmt::Display for Calculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Mean => "mean",
            Self::Sum => "sum",
            Self::Count => "count",
            Self::Min => "min",
            Self::Max => "max",
            Self::First => "first",
            Self::Last => "last",
        })
    }
}
