use crate::{agg::Builder, Timestamp, Value};
use std::sync::Arc;

/// A displayable rendering of a single value.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayValue {
    /// Numeric form, for the color scale.
    pub numeric: Value,

    /// Text form, for labels and tooltips.
    pub text: String,
}

/// Formats values for display.
///
/// The default processor renders the plain numeric text.
#[derive(Clone)]
pub struct DisplayProcessor(Arc<dyn Fn(Value) -> DisplayValue + Send + Sync>);

impl DisplayProcessor {
    /// Wraps a custom formatting function.
    pub fn new<F>(format: F) -> Self
    where
        F: Fn(Value) -> DisplayValue + Send + Sync + 'static,
    {
        Self(Arc::new(format))
    }

    /// Formats a single value.
    #[must_use]
    pub fn apply(&self, value: Value) -> DisplayValue {
        (self.0)(value)
    }
}

impl Default for DisplayProcessor {
    fn default() -> Self {
        Self::new(|value| DisplayValue {
            numeric: value,
            text: value.to_string(),
        })
    }
}

impl std::fmt::Debug for DisplayProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DisplayProcessor")
    }
}

/// Bucketing options carried on a value field.
///
/// This is the host-provided field configuration; the calculation arrives
/// as a name and is validated when the aggregation runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketOptions {
    /// Bucket size in minutes.
    pub group_by: u32,

    /// Name of the calculation to apply per bucket
    /// (`mean`, `sum`, `count`, `min`, `max`, `first`, `last`).
    pub calculation: String,
}

/// Display and bucketing configuration attached to a field.
#[derive(Clone, Debug, Default)]
pub struct FieldConfig {
    /// Lower bound of the renderable scale.
    pub min: Option<Value>,

    /// Upper bound of the renderable scale.
    pub max: Option<Value>,

    /// Bucketing options, if the host provided them.
    pub custom: Option<BucketOptions>,
}

#[derive(Clone, Debug)]
enum Values {
    Time(Vec<Timestamp>),
    Number(Vec<Option<Value>>),
}

/// A single column of a [`Frame`].
#[derive(Clone, Debug)]
pub struct Field {
    /// Column name.
    pub name: String,

    /// Display and bucketing configuration.
    pub config: FieldConfig,

    /// Formatter for this column's values, if the host supplied one.
    pub display: Option<DisplayProcessor>,

    values: Values,
}

impl Field {
    /// Creates a time column from unix millisecond timestamps.
    #[must_use]
    pub fn time(name: impl Into<String>, values: Vec<Timestamp>) -> Self {
        Self {
            name: name.into(),
            config: FieldConfig::default(),
            display: None,
            values: Values::Time(values),
        }
    }

    /// Creates a number column; `None` marks a gap in the series.
    #[must_use]
    pub fn number(name: impl Into<String>, values: Vec<Option<Value>>) -> Self {
        Self {
            name: name.into(),
            config: FieldConfig::default(),
            display: None,
            values: Values::Number(values),
        }
    }

    /// Attaches a field configuration.
    #[must_use]
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches a display processor.
    #[must_use]
    pub fn with_display(mut self, display: DisplayProcessor) -> Self {
        self.display = Some(display);
        self
    }

    /// Number of rows in this column.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.values {
            Values::Time(values) => values.len(),
            Values::Number(values) => values.len(),
        }
    }

    /// Whether this column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn is_time(&self) -> bool {
        matches!(self.values, Values::Time(_))
    }

    pub(crate) fn is_number(&self) -> bool {
        matches!(self.values, Values::Number(_))
    }

    pub(crate) fn time_values(&self) -> Option<&[Timestamp]> {
        match &self.values {
            Values::Time(values) => Some(values),
            Values::Number(_) => None,
        }
    }

    pub(crate) fn number_values(&self) -> Option<&[Option<Value>]> {
        match &self.values {
            Values::Time(_) => None,
            Values::Number(values) => Some(values),
        }
    }
}

/// A columnar time series frame, the input to [`Frame::bucketize`].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Frame name, used for diagnostics only.
    pub name: String,

    /// The frame's columns.
    pub fields: Vec<Field>,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// The first time column, if any.
    #[must_use]
    pub fn time_field(&self) -> Option<&Field> {
        self.fields.iter().find(|field| field.is_time())
    }

    /// The first number column, if any.
    #[must_use]
    pub fn value_field(&self) -> Option<&Field> {
        self.fields.iter().find(|field| field.is_number())
    }

    /// Starts building a bucketed aggregation over this frame.
    #[must_use]
    pub fn bucketize(&self) -> Builder<'_> {
        Builder::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn first_field_of_each_type_wins() {
        let frame = Frame::new("test")
            .with_field(Field::number("a", vec![Some(1.0)]))
            .with_field(Field::time("b", vec![0]))
            .with_field(Field::number("c", vec![Some(2.0)]))
            .with_field(Field::time("d", vec![1]));

        assert_eq!(Some("b"), frame.time_field().map(|f| f.name.as_str()));
        assert_eq!(Some("a"), frame.value_field().map(|f| f.name.as_str()));
    }

    #[test_log::test]
    fn default_display_is_numeric_text() {
        let display = DisplayProcessor::default();
        let rendered = display.apply(4.2);

        assert_eq!(4.2, rendered.numeric);
        assert_eq!("4.2", rendered.text);
    }

    #[test_log::test]
    fn field_len() {
        let field = Field::number("value", vec![Some(1.0), None, Some(3.0)]);

        assert_eq!(3, field.len());
        assert!(!field.is_empty());
        assert!(Field::time("time", vec![]).is_empty());
    }
}
