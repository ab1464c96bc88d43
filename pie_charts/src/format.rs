// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slice value formatting.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt;

/// How a slice value is turned into its display string.
#[derive(Clone, Default)]
pub enum ValueFormat {
    /// Shortest round-trip decimal (`30`, `0.25`, `1e21`).
    #[default]
    Default,
    /// Fixed number of decimals (`30.00`).
    Fixed {
        /// Digits after the decimal point.
        precision: usize,
    },
    /// Value times 100 with a `%` suffix (`0.256` -> `25.6%` with precision 1).
    Percent {
        /// Digits after the decimal point.
        precision: usize,
    },
    /// Fixed decimals with `,` thousands grouping (`12,345.6`).
    Grouped {
        /// Digits after the decimal point.
        precision: usize,
    },
    /// A caller-supplied formatter. Returning `None` falls back to [`ValueFormat::Default`].
    Custom(Arc<dyn Fn(f64) -> Option<String> + Send + Sync>),
}

impl ValueFormat {
    /// Creates a [`ValueFormat::Custom`] from a closure.
    pub fn custom(f: impl Fn(f64) -> Option<String> + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Formats `value`.
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Default => default_format(value),
            Self::Fixed { precision } => format!("{value:.precision$}"),
            Self::Percent { precision } => format!("{:.precision$}%", value * 100.0),
            Self::Grouped { precision } => group_thousands(&format!("{value:.precision$}")),
            Self::Custom(f) => f(value).unwrap_or_else(|| default_format(value)),
        }
    }
}

impl fmt::Debug for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Fixed { precision } => {
                f.debug_struct("Fixed").field("precision", precision).finish()
            }
            Self::Percent { precision } => {
                f.debug_struct("Percent").field("precision", precision).finish()
            }
            Self::Grouped { precision } => {
                f.debug_struct("Grouped").field("precision", precision).finish()
            }
            Self::Custom(_) => f.debug_tuple("Custom").finish_non_exhaustive(),
        }
    }
}

fn default_format(value: f64) -> String {
    // `-0` reads oddly on a chart.
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int, frac) = match rest.find('.') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    // Non-digit content (`inf`, `NaN`) is left alone.
    if !int.bytes().all(|b| b.is_ascii_digit()) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + int.len() / 3);
    out.push_str(sign);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_shortest_round_trip() {
        assert_eq!(ValueFormat::Default.format(30.0), "30");
        assert_eq!(ValueFormat::Default.format(0.25), "0.25");
        assert_eq!(ValueFormat::Default.format(-0.0), "0");
    }

    #[test]
    fn fixed_percent_and_grouped() {
        assert_eq!(ValueFormat::Fixed { precision: 2 }.format(1.23456), "1.23");
        assert_eq!(ValueFormat::Percent { precision: 1 }.format(0.256), "25.6%");
        assert_eq!(
            ValueFormat::Grouped { precision: 1 }.format(1_234_567.3),
            "1,234,567.3"
        );
        assert_eq!(ValueFormat::Grouped { precision: 0 }.format(-999.0), "-999");
        assert_eq!(ValueFormat::Grouped { precision: 0 }.format(-1000.0), "-1,000");
    }

    #[test]
    fn failing_custom_formatter_falls_back_to_raw_value() {
        let fmt = ValueFormat::custom(|v| (v >= 0.0).then(|| alloc::format!("${v}")));
        assert_eq!(fmt.format(5.0), "$5");
        assert_eq!(fmt.format(-2.5), "-2.5");
    }
}
