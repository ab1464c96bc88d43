// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw records to slice descriptors.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use peniko::Color;

use crate::color::ColorSpec;
use crate::format::ValueFormat;
use crate::log;
use crate::record::{Accessor, Record, Value};

/// A record that cannot become a slice.
#[derive(Clone, Debug, PartialEq)]
pub enum DataError {
    /// The id accessor produced `null` (or the field is missing).
    MissingId {
        /// Input position of the record.
        index: usize,
    },
    /// The value accessor produced something that is not a finite number.
    InvalidValue {
        /// Input position of the record.
        index: usize,
        /// Resolved id of the record.
        id: Arc<str>,
        /// The offending value.
        value: Value,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId { index } => write!(f, "record {index} has no id"),
            Self::InvalidValue { index, id, value } => {
                write!(f, "record {index} ({id}) has a non-numeric value: {value}")
            }
        }
    }
}

impl core::error::Error for DataError {}

/// What [`normalize`] does with a record that fails validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InvalidDataPolicy {
    /// Drop the record and keep going.
    #[default]
    Skip,
    /// Stop at the first bad record and return its error.
    Abort,
}

/// Normalization inputs: how to read ids/values, format values, and color slices.
#[derive(Clone, Debug)]
pub struct NormalizeSpec {
    /// Reads the slice id.
    pub id: Accessor,
    /// Reads the slice value.
    pub value: Accessor,
    /// Formats the value for labels and legends.
    pub value_format: ValueFormat,
    /// Chooses slice fill colors.
    pub colors: ColorSpec,
    /// Handling of malformed records.
    pub invalid: InvalidDataPolicy,
}

impl Default for NormalizeSpec {
    fn default() -> Self {
        Self {
            id: Accessor::field("id"),
            value: Accessor::field("value"),
            value_format: ValueFormat::Default,
            colors: ColorSpec::default(),
            invalid: InvalidDataPolicy::Skip,
        }
    }
}

impl NormalizeSpec {
    /// Sets the id accessor.
    pub fn with_id(mut self, id: Accessor) -> Self {
        self.id = id;
        self
    }

    /// Sets the value accessor.
    pub fn with_value(mut self, value: Accessor) -> Self {
        self.value = value;
        self
    }

    /// Sets the value format.
    pub fn with_value_format(mut self, value_format: ValueFormat) -> Self {
        self.value_format = value_format;
        self
    }

    /// Sets the color spec.
    pub fn with_colors(mut self, colors: ColorSpec) -> Self {
        self.colors = colors;
        self
    }

    /// Sets the invalid-data policy.
    pub fn with_invalid(mut self, invalid: InvalidDataPolicy) -> Self {
        self.invalid = invalid;
        self
    }
}

/// One normalized slice.
#[derive(Clone, Debug, PartialEq)]
pub struct SliceDescriptor {
    /// Slice id (string-coerced).
    pub id: Arc<str>,
    /// Position of the source record in the raw input.
    pub index: usize,
    /// Numeric value.
    pub value: f64,
    /// Display form of `value`.
    pub formatted_value: String,
    /// Fill color.
    pub color: Color,
    /// The source record.
    pub data: Record,
}

/// Turns raw records into slice descriptors, in input order.
///
/// Records with a missing id or a non-finite value are handled per `spec.invalid`.
pub fn normalize(
    records: &[Record],
    spec: &NormalizeSpec,
) -> Result<Vec<SliceDescriptor>, DataError> {
    let mut colors = spec.colors.resolver();
    let mut out = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let slice = read_slice(index, record, spec).map(|(id, value)| {
            let color = colors.resolve(&id, index, record);
            SliceDescriptor {
                formatted_value: spec.value_format.format(value),
                id,
                index,
                value,
                color,
                data: record.clone(),
            }
        });
        match (slice, spec.invalid) {
            (Ok(slice), _) => out.push(slice),
            (Err(err), InvalidDataPolicy::Abort) => return Err(err),
            (Err(_err), InvalidDataPolicy::Skip) => {
                log::debug!(err = %_err, "skipping record");
            }
        }
    }

    Ok(out)
}

fn read_slice(
    index: usize,
    record: &Record,
    spec: &NormalizeSpec,
) -> Result<(Arc<str>, f64), DataError> {
    let id = spec
        .id
        .get(record)
        .to_id()
        .ok_or(DataError::MissingId { index })?;
    let raw = spec.value.get(record);
    match raw.as_f64() {
        Some(value) => Ok((id, value)),
        None => Err(DataError::InvalidValue {
            index,
            id,
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use peniko::color::palette::css;

    use super::*;

    fn rec(id: impl Into<Value>, value: impl Into<Value>) -> Record {
        Record::id_value(id, value)
    }

    #[test]
    fn keeps_input_order_and_formats_values() {
        let spec = NormalizeSpec::default().with_value_format(ValueFormat::Fixed { precision: 1 });
        let slices = normalize(&[rec("b", 70), rec("a", 30)], &spec).unwrap();
        let ids: vec::Vec<_> = slices.iter().map(|s| &*s.id).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(slices[0].formatted_value, "70.0");
        assert_eq!(slices[1].index, 1);
    }

    #[test]
    fn bad_records_are_skipped_by_default() {
        let records = [
            rec("a", 1),
            rec(Value::Null, 2),
            rec("c", "n/a"),
            rec("d", f64::INFINITY),
            rec("e", "4.5"),
        ];
        let slices = normalize(&records, &NormalizeSpec::default()).unwrap();
        let ids: vec::Vec<_> = slices.iter().map(|s| &*s.id).collect();
        assert_eq!(ids, ["a", "e"]);
        assert_eq!(slices[1].value, 4.5);
        assert_eq!(slices[1].index, 4);
    }

    #[test]
    fn abort_policy_returns_first_error() {
        let spec = NormalizeSpec::default().with_invalid(InvalidDataPolicy::Abort);
        let err = normalize(&[rec("a", 1), rec("b", "x"), rec(Value::Null, 1)], &spec)
            .unwrap_err();
        assert_eq!(
            err,
            DataError::InvalidValue {
                index: 1,
                id: Arc::from("b"),
                value: Value::from("x"),
            }
        );
    }

    #[test]
    fn numeric_ids_are_coerced_and_colors_follow_ids() {
        let spec = NormalizeSpec::default().with_colors(ColorSpec::Scheme(Arc::from(
            [css::RED, css::BLUE].as_slice(),
        )));
        let slices = normalize(&[rec(1, 5), rec(2, 5), rec(1, 5)], &spec).unwrap();
        assert_eq!(&*slices[0].id, "1");
        assert_eq!(slices[0].color, css::RED);
        assert_eq!(slices[1].color, css::BLUE);
        assert_eq!(slices[2].color, css::RED);
    }

    #[test]
    fn custom_accessors_read_other_fields() {
        let spec = NormalizeSpec::default()
            .with_id(Accessor::field("name"))
            .with_value(Accessor::custom(|r| {
                let n = r.get("count").and_then(Value::as_f64).unwrap_or(0.0);
                Value::Number(n * 2.0)
            }));
        let records = [Record::new().with("name", "x").with("count", 4)];
        let slices = normalize(&records, &spec).unwrap();
        assert_eq!(&*slices[0].id, "x");
        assert_eq!(slices[0].value, 8.0);
        assert_eq!(slices[0].data, records[0]);
    }
}
