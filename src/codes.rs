//! Typed codes and identifiers that appear in ACH records.

use crate::error::{AchError, Result};
use crate::format::{calculate_check_digit, classify_transaction_code, format_payment_type_code};
use std::fmt;
use std::str::FromStr;

/// Whether an entry moves money out of (debit) or into (credit) the receiver's account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Debit,
    Credit,
}

/// Two-digit transaction code, e.g. `22` (checking credit) or `27` (checking debit).
///
/// Any two digits are accepted here; codes that classify as neither debit nor
/// credit are rejected when the owning batch is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionCode(String);

impl TransactionCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Debit/credit classification, `None` if the code is neither.
    pub fn kind(&self) -> Option<TransactionKind> {
        // Shape was checked on construction.
        classify_transaction_code(&self.0).ok().flatten()
    }
}

impl FromStr for TransactionCode {
    type Err = AchError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim();
        classify_transaction_code(code)?;
        Ok(TransactionCode(code.to_string()))
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Service class code of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceClass {
    /// `200`: debits and credits.
    Mixed,
    /// `220`: credits only.
    CreditsOnly,
    /// `225`: debits only.
    DebitsOnly,
}

impl ServiceClass {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceClass::Mixed => "200",
            ServiceClass::CreditsOnly => "220",
            ServiceClass::DebitsOnly => "225",
        }
    }

    /// Whether entries of `kind` belong in a batch of this class.
    pub fn admits(&self, kind: TransactionKind) -> bool {
        match self {
            ServiceClass::Mixed => true,
            ServiceClass::CreditsOnly => kind == TransactionKind::Credit,
            ServiceClass::DebitsOnly => kind == TransactionKind::Debit,
        }
    }
}

impl FromStr for ServiceClass {
    type Err = AchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "200" => Ok(ServiceClass::Mixed),
            "220" => Ok(ServiceClass::CreditsOnly),
            "225" => Ok(ServiceClass::DebitsOnly),
            other => Err(AchError::InvalidField {
                field: "service class code",
                value: other.to_string(),
                reason: "expected 200, 220 or 225",
            }),
        }
    }
}

impl fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Standard Entry Class code: which entry detail layout a batch carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardEntryClass {
    /// Prearranged payment and deposit (consumer).
    Ppd,
    /// Corporate credit or debit.
    Ccd,
    /// Internet-initiated entry.
    Web,
    /// Telephone-initiated entry.
    Tel,
}

impl StandardEntryClass {
    pub fn code(&self) -> &'static str {
        match self {
            StandardEntryClass::Ppd => "PPD",
            StandardEntryClass::Ccd => "CCD",
            StandardEntryClass::Web => "WEB",
            StandardEntryClass::Tel => "TEL",
        }
    }

    /// TEL entries never carry an addenda record.
    pub fn allows_addenda(&self) -> bool {
        !matches!(self, StandardEntryClass::Tel)
    }
}

impl FromStr for StandardEntryClass {
    type Err = AchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PPD" => Ok(StandardEntryClass::Ppd),
            "CCD" => Ok(StandardEntryClass::Ccd),
            "WEB" => Ok(StandardEntryClass::Web),
            "TEL" => Ok(StandardEntryClass::Tel),
            _ => Err(AchError::InvalidField {
                field: "standard entry class code",
                value: s.to_string(),
                reason: "expected PPD, CCD, WEB or TEL",
            }),
        }
    }
}

impl fmt::Display for StandardEntryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Payment type of a WEB or TEL entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentType {
    Recurring,
    Single,
    #[default]
    Unspecified,
}

impl PaymentType {
    /// The 2-character field value.
    pub fn field(&self) -> &'static str {
        match self {
            PaymentType::Recurring => "R ",
            PaymentType::Single => "S ",
            PaymentType::Unspecified => "  ",
        }
    }
}

impl FromStr for PaymentType {
    type Err = AchError;

    fn from_str(s: &str) -> Result<Self> {
        match format_payment_type_code(s)?.as_str() {
            "R " => Ok(PaymentType::Recurring),
            "S " => Ok(PaymentType::Single),
            _ => Ok(PaymentType::Unspecified),
        }
    }
}

/// First 8 digits of a routing number, with its derived check digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutingPrefix {
    digits: String,
    check_digit: u8,
}

impl RoutingPrefix {
    /// Parses an 8-digit DFI identification and derives its check digit.
    pub fn new(digits: &str) -> Result<Self> {
        let digits = digits.trim();
        let check_digit = calculate_check_digit(digits)?;
        Ok(RoutingPrefix {
            digits: digits.to_string(),
            check_digit,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn check_digit(&self) -> u8 {
        self.check_digit
    }

    /// The prefix as a plain integer, as summed into the entry hash.
    pub fn value(&self) -> u64 {
        self.digits
            .bytes()
            .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
    }
}

/// 15-digit trace number, unique within a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceNumber(String);

impl TraceNumber {
    /// Width of the trace number field.
    pub const WIDTH: usize = 15;

    /// Parses up to 15 digits, zero-filling on the left.
    pub fn new(value: &str) -> Result<Self> {
        crate::format::numeric("trace number", value.trim(), Self::WIDTH).map(TraceNumber)
    }

    /// Builds a trace number from the originating DFI and a per-file sequence.
    pub fn from_parts(odfi: &RoutingPrefix, sequence: u32) -> Result<Self> {
        let sequence = crate::format::format_count("trace sequence", u64::from(sequence), 7)?;
        Ok(TraceNumber(format!("{}{}", odfi.as_str(), sequence)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last 7 digits, which an addenda echoes as its entry detail sequence number.
    pub fn sequence(&self) -> &str {
        &self.0[Self::WIDTH - 7..]
    }
}

impl fmt::Display for TraceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_code_kind() {
        let credit = TransactionCode::from_str("22").unwrap();
        assert_eq!(credit.kind(), Some(TransactionKind::Credit));

        let debit = TransactionCode::from_str(" 27 ").unwrap();
        assert_eq!(debit.as_str(), "27");
        assert_eq!(debit.kind(), Some(TransactionKind::Debit));

        let neither = TransactionCode::from_str("99").unwrap();
        assert_eq!(neither.kind(), None);
    }

    #[test]
    fn test_transaction_code_must_be_two_digits() {
        assert!(TransactionCode::from_str("2").is_err());
        assert!(TransactionCode::from_str("").is_err());
        assert!(TransactionCode::from_str("AB").is_err());
    }

    #[test]
    fn test_service_class_round_trip() {
        for code in ["200", "220", "225"] {
            assert_eq!(ServiceClass::from_str(code).unwrap().code(), code);
        }
        assert!(ServiceClass::from_str("280").is_err());
    }

    #[test]
    fn test_service_class_admits() {
        assert!(ServiceClass::Mixed.admits(TransactionKind::Debit));
        assert!(ServiceClass::Mixed.admits(TransactionKind::Credit));
        assert!(ServiceClass::CreditsOnly.admits(TransactionKind::Credit));
        assert!(!ServiceClass::CreditsOnly.admits(TransactionKind::Debit));
        assert!(ServiceClass::DebitsOnly.admits(TransactionKind::Debit));
        assert!(!ServiceClass::DebitsOnly.admits(TransactionKind::Credit));
    }

    #[test]
    fn test_sec_code_parse_is_case_insensitive() {
        assert_eq!(
            StandardEntryClass::from_str("web").unwrap(),
            StandardEntryClass::Web
        );
        assert!(StandardEntryClass::from_str("ARC").is_err());
        assert!(!StandardEntryClass::Tel.allows_addenda());
        assert!(StandardEntryClass::Ccd.allows_addenda());
    }

    #[test]
    fn test_payment_type_parse() {
        assert_eq!(PaymentType::from_str("r").unwrap(), PaymentType::Recurring);
        assert_eq!(PaymentType::from_str("").unwrap(), PaymentType::Unspecified);
        assert_eq!(PaymentType::Single.field(), "S ");
        assert!(PaymentType::from_str("Q").is_err());
    }

    #[test]
    fn test_routing_prefix_value_and_check_digit() {
        let routing = RoutingPrefix::new("87654321").unwrap();
        assert_eq!(routing.value(), 87_654_321);
        assert_eq!(routing.check_digit(), 2);

        let leading_zero = RoutingPrefix::new("02100002").unwrap();
        assert_eq!(leading_zero.value(), 2_100_002);
        assert_eq!(leading_zero.as_str(), "02100002");
    }

    #[test]
    fn test_routing_prefix_rejects_bad_length() {
        assert!(matches!(
            RoutingPrefix::new("123456789"),
            Err(AchError::InvalidRoutingNumber(_))
        ));
    }

    #[test]
    fn test_trace_number_padding_and_sequence() {
        let trace = TraceNumber::new("123456780000001").unwrap();
        assert_eq!(trace.sequence(), "0000001");

        let short = TraceNumber::new("42").unwrap();
        assert_eq!(short.as_str(), "000000000000042");
        assert_eq!(short.sequence(), "0000042");

        assert!(TraceNumber::new("1234567800000001").is_err());
        assert!(TraceNumber::new("12345678000000X").is_err());
    }

    #[test]
    fn test_trace_number_from_parts() {
        let odfi = RoutingPrefix::new("12345678").unwrap();
        let trace = TraceNumber::from_parts(&odfi, 3).unwrap();
        assert_eq!(trace.as_str(), "123456780000003");
        assert!(TraceNumber::from_parts(&odfi, 10_000_000).is_err());
    }
}
