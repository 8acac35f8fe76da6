//! Fixed-width field formatting.
//!
//! Every helper here either produces a value of exactly the requested width or
//! fails. Nothing is silently truncated, with the single exception of the
//! entry hash (see [`format_entry_hash`]).

use crate::amount::Amount;
use crate::codes::TransactionKind;
use crate::error::{AchError, Result};
use log::warn;

/// Width of every record in an ACH file.
pub const RECORD_LENGTH: usize = 94;

/// Separator written after every record line.
pub const LINE_TERMINATOR: &str = "\n";

/// Width of the entry hash field in batch and file control records.
pub const ENTRY_HASH_WIDTH: usize = 10;

const CHECK_DIGIT_WEIGHTS: [u32; 8] = [3, 7, 1, 3, 7, 1, 3, 7];

fn ensure_fits(field: &'static str, value: &str, width: usize) -> Result<()> {
    if !value.bytes().all(|b| matches!(b, b' '..=b'~')) {
        return Err(AchError::InvalidField {
            field,
            value: value.to_string(),
            reason: "must be printable ASCII",
        });
    }
    if value.len() > width {
        return Err(AchError::FieldTooLong {
            field,
            width,
            len: value.len(),
        });
    }
    Ok(())
}

/// Left-justifies `value` in a space-filled field of `width` characters.
pub fn pad_right(field: &'static str, value: &str, width: usize) -> Result<String> {
    ensure_fits(field, value, width)?;
    Ok(format!("{:<width$}", value, width = width))
}

/// Right-justifies `value` in a field of `width` characters filled with `fill`.
pub fn pad_left(field: &'static str, value: &str, width: usize, fill: char) -> Result<String> {
    ensure_fits(field, value, width)?;
    let mut padded: String = std::iter::repeat(fill).take(width - value.len()).collect();
    padded.push_str(value);
    Ok(padded)
}

/// Zero-fills a purely numeric value to `width` digits.
pub fn numeric(field: &'static str, value: &str, width: usize) -> Result<String> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AchError::InvalidField {
            field,
            value: value.to_string(),
            reason: "must contain only digits",
        });
    }
    pad_left(field, value, width, '0')
}

/// Zero-fills a count to `width` digits.
pub fn format_count(field: &'static str, count: u64, width: usize) -> Result<String> {
    pad_left(field, &count.to_string(), width, '0')
}

/// Renders an amount as zero-filled cents in a field of `width` digits.
pub fn format_cents(field: &'static str, amount: Amount, width: usize) -> Result<String> {
    let overflow = || AchError::AmountOverflow {
        field,
        amount: amount.to_string(),
        width,
    };

    let cents = amount.cents().ok_or_else(overflow)?.to_string();
    if cents.len() > width {
        return Err(overflow());
    }
    pad_left(field, &cents, width, '0')
}

/// Renders an entry amount as 10 digits of cents: `100.00` becomes `0000010000`.
///
/// Fractions of a cent are dropped, never rounded.
pub fn format_amount(amount: Amount) -> Result<String> {
    format_cents("amount", amount, 10)
}

/// Renders an entry hash in its 10-digit field.
///
/// Hashes are accumulated unreduced; only the low 10 digits are written.
pub fn format_entry_hash(hash: u64) -> String {
    let modulus = 10u64.pow(ENTRY_HASH_WIDTH as u32);
    if hash >= modulus {
        warn!(
            "Entry hash {} exceeds {} digits, writing low-order digits only",
            hash, ENTRY_HASH_WIDTH
        );
    }
    format!("{:0width$}", hash % modulus, width = ENTRY_HASH_WIDTH)
}

/// Computes the 9th (check) digit of a routing number from its first 8 digits.
///
/// ```
/// use nacha_writer::format::calculate_check_digit;
///
/// assert_eq!(calculate_check_digit("12345678").unwrap(), 0);
/// assert_eq!(calculate_check_digit("87654321").unwrap(), 2);
/// ```
pub fn calculate_check_digit(routing: &str) -> Result<u8> {
    if routing.len() != 8 || !routing.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AchError::InvalidRoutingNumber(routing.to_string()));
    }

    let sum: u32 = routing
        .bytes()
        .zip(CHECK_DIGIT_WEIGHTS)
        .map(|(b, weight)| u32::from(b - b'0') * weight)
        .sum();

    Ok(((10 - sum % 10) % 10) as u8)
}

/// Classifies a 2-digit transaction code.
///
/// Returns `Ok(None)` for well-formed codes that are neither a debit nor a credit.
pub fn classify_transaction_code(code: &str) -> Result<Option<TransactionKind>> {
    let bytes = code.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(AchError::InvalidTransactionCode(code.to_string()));
    }

    let kind = match (bytes[0], bytes[1]) {
        (b'2' | b'3', b'7' | b'8' | b'9') => Some(TransactionKind::Debit),
        (b'2' | b'3', b'2' | b'3' | b'4') => Some(TransactionKind::Credit),
        _ => None,
    };
    Ok(kind)
}

/// Normalizes a WEB/TEL payment type code to its 2-character field.
///
/// Blank input yields two spaces; otherwise the code must be `R` or `S`.
pub fn format_payment_type_code(code: &str) -> Result<String> {
    let normalized = code.trim().to_ascii_uppercase();
    match normalized.as_str() {
        "" => Ok("  ".to_string()),
        "R" | "S" => pad_right("payment type code", &normalized, 2),
        _ => Err(AchError::InvalidPaymentTypeCode(code.to_string())),
    }
}
