//! Part-scan payload parsing and the record submitted to the collector.
//!
//! DESIGN
//! ======
//! A part label decodes to `order|phase|part|qty`. Fields are positional;
//! anything after the fourth is ignored. Payloads with fewer than four
//! fields are not rejected: the missing text fields are left out of the JSON
//! body and the collector decides what to do with it.

use serde::Serialize;

pub const PART_FIELD_DELIMITER: char = '|';
pub const DEFAULT_QTY: i64 = 1;

/// One part scan, tagged with the pallet that was current when it was handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRecord {
    pub pallet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    pub qty: i64,
}

impl ScanRecord {
    /// Parse a decoded part label against the given pallet.
    #[must_use]
    pub fn from_part_payload(pallet: &str, decoded: &str) -> Self {
        let mut fields = decoded.split(PART_FIELD_DELIMITER);
        let order_no = fields.next().map(str::to_owned);
        let phase = fields.next().map(str::to_owned);
        let part = fields.next().map(str::to_owned);
        let qty = parse_qty(fields.next());

        Self { pallet: pallet.to_owned(), order_no, phase, part, qty }
    }

    /// True when all three text fields were present in the payload.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.order_no.is_some() && self.phase.is_some() && self.part.is_some()
    }
}

/// Leading-integer parse of the quantity field.
///
/// Leading whitespace and a sign are accepted. A `0x`/`0X` prefix switches
/// to hexadecimal. The leading run of digits is taken and anything after it
/// ignored (`"7pcs"` is 7, `"0x10"` is 16). A missing field, no digits,
/// overflow, or zero all yield [`DEFAULT_QTY`].
#[must_use]
pub fn parse_qty(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_QTY;
    };

    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits_len = digits.bytes().take_while(|b| char::from(*b).is_digit(radix)).count();
    let Ok(magnitude) = i64::from_str_radix(&digits[..digits_len], radix) else {
        return DEFAULT_QTY;
    };

    match if negative { -magnitude } else { magnitude } {
        0 => DEFAULT_QTY,
        qty => qty,
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
