//! Cashflow input parsing
//!
//! Numeric parsing is permissive throughout: a value that is not a number
//! contributes its leading numeric prefix, or 0.0 when there is none.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use super::CashflowSeries;
use crate::error::{IrrError, Result};

/// Parse a single cashflow value, never failing
///
/// Leading whitespace is skipped and the longest numeric prefix is used,
/// so `"12abc"` reads as 12.0 and `"abc"` as 0.0. Besides decimals the
/// prefix may be `inf`/`infinity`, `nan` (any case) or a hexadecimal
/// number such as `0x1A` or `0x1.8p3`.
pub fn parse_cashflow(raw: &str) -> f64 {
    let s = raw.trim_start();
    if let Ok(value) = s.trim_end().parse::<f64>() {
        return value;
    }
    if let Some(value) = parse_non_decimal_prefix(s) {
        return value;
    }

    let end = numeric_prefix_len(s);
    s[..end].parse().unwrap_or(0.0)
}

fn starts_with_ignore_case(bytes: &[u8], prefix: &[u8]) -> bool {
    bytes.len() >= prefix.len() && bytes[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Value of an `inf`, `nan` or `0x` hexadecimal prefix, if `s` has one
fn parse_non_decimal_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let (sign, body) = match bytes.first() {
        Some(b'-') => (-1.0, &bytes[1..]),
        Some(b'+') => (1.0, &bytes[1..]),
        _ => (1.0, bytes),
    };

    if starts_with_ignore_case(body, b"inf") {
        return Some(sign * f64::INFINITY);
    }
    if starts_with_ignore_case(body, b"nan") {
        return Some(f64::NAN);
    }
    if !starts_with_ignore_case(body, b"0x") {
        return None;
    }

    let digits = &body[2..];
    let hex_digit = |i: usize| digits.get(i).and_then(|&b| (b as char).to_digit(16));

    let mut value = 0.0_f64;
    let mut seen_digit = false;
    let mut i = 0;
    while let Some(d) = hex_digit(i) {
        value = value * 16.0 + f64::from(d);
        seen_digit = true;
        i += 1;
    }
    if digits.get(i) == Some(&b'.') {
        i += 1;
        let mut scale = 1.0 / 16.0;
        while let Some(d) = hex_digit(i) {
            value += f64::from(d) * scale;
            scale /= 16.0;
            seen_digit = true;
            i += 1;
        }
    }
    if !seen_digit {
        // "0x" alone reads as the decimal 0
        return None;
    }

    if matches!(digits.get(i), Some(b'p') | Some(b'P')) {
        let mut j = i + 1;
        let exp_sign = match digits.get(j) {
            Some(b'-') => {
                j += 1;
                -1
            }
            Some(b'+') => {
                j += 1;
                1
            }
            _ => 1,
        };
        let mut exponent: i32 = 0;
        let mut seen_exp = false;
        while let Some(d) = digits.get(j).filter(|b| b.is_ascii_digit()) {
            exponent = exponent.saturating_mul(10).saturating_add(i32::from(d - b'0'));
            seen_exp = true;
            j += 1;
        }
        if seen_exp {
            value *= 2.0_f64.powi(exp_sign * exponent);
        }
    }

    Some(sign * value)
}

/// Length in bytes of the `[+-]digits[.digits][e[+-]digits]` prefix of `s`
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    i = int_end;

    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        mantissa_digits += frac_end - (i + 1);
        i = frac_end;
    }

    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }

    i
}

/// Read cashflows from headerless CSV data
///
/// Every non-empty field of every record is taken in reading order, so a
/// single row, a single column, or any mix of both is accepted. Lines
/// starting with `#` are ignored.
pub fn load_cashflows_from_reader<R: Read>(reader: R) -> Result<CashflowSeries> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut values = Vec::new();
    for result in reader.records() {
        let record = result?;
        values.extend(
            record
                .iter()
                .filter(|field| !field.is_empty())
                .map(parse_cashflow),
        );
    }

    Ok(CashflowSeries::new(values))
}

/// Read cashflows from a CSV file on disk
pub fn load_cashflows(path: &Path) -> Result<CashflowSeries> {
    let file = File::open(path).map_err(|source| IrrError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let series = load_cashflows_from_reader(file)?;
    log::debug!("Loaded {} cashflows from {}", series.len(), path.display());
    Ok(series)
}
