//! Entry Detail records (type `6`) for the PPD, CCD, WEB and TEL entry classes.
//!
//! All four classes share one 94-character layout:
//!
//! | Pos   | Len | Field                                  |
//! |-------|-----|----------------------------------------|
//! | 01    | 1   | Record type code `6`                   |
//! | 02-03 | 2   | Transaction code                       |
//! | 04-11 | 8   | Receiving DFI identification           |
//! | 12    | 1   | Check digit (derived)                  |
//! | 13-29 | 17  | DFI account number                     |
//! | 30-39 | 10  | Amount in cents                        |
//! | 40-54 | 15  | Identification number                  |
//! | 55-76 | 22  | Receiver name                          |
//! | 77-78 | 2   | Discretionary data / payment type code |
//! | 79    | 1   | Addenda record indicator               |
//! | 80-94 | 15  | Trace number                           |
//!
//! They differ only in what the name and the 2-character slot mean, and in
//! whether an addenda may follow. TEL entries have no way to carry one.

use crate::amount::Amount;
use crate::codes::{
    PaymentType, RoutingPrefix, StandardEntryClass, TraceNumber, TransactionCode,
};
use crate::error::{AchError, Result};
use crate::format::{format_amount, pad_right, RECORD_LENGTH};
use crate::records::addenda::Addenda;
use std::str::FromStr;

const RECORD_TYPE_CODE: &str = "6";

/// Fields every entry class carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCommon {
    transaction_code: TransactionCode,
    receiving_dfi: RoutingPrefix,
    account_number: String,
    amount: Amount,
    amount_field: String,
    trace_number: TraceNumber,
}

impl EntryCommon {
    /// Validates the shared fields. The check digit is derived from `receiving_dfi`.
    pub fn new(
        transaction_code: &str,
        receiving_dfi: &str,
        account_number: &str,
        amount: Amount,
        trace_number: &str,
    ) -> Result<Self> {
        Ok(EntryCommon {
            transaction_code: TransactionCode::from_str(transaction_code)?,
            receiving_dfi: RoutingPrefix::new(receiving_dfi)?,
            account_number: pad_right("DFI account number", account_number.trim(), 17)?,
            amount,
            amount_field: format_amount(amount)?,
            trace_number: TraceNumber::new(trace_number)?,
        })
    }

    pub fn transaction_code(&self) -> &TransactionCode {
        &self.transaction_code
    }

    pub fn receiving_dfi(&self) -> &RoutingPrefix {
        &self.receiving_dfi
    }

    pub fn account_number(&self) -> &str {
        self.account_number.trim_end()
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn trace_number(&self) -> &TraceNumber {
        &self.trace_number
    }

    /// Checks that `addenda` belongs to this entry before it is attached.
    fn accept_addenda(&self, addenda: Addenda) -> Result<Addenda> {
        let expected = self.trace_number.sequence();
        if addenda.entry_detail_sequence() != expected {
            return Err(AchError::AddendaSequenceMismatch {
                expected: expected.to_string(),
                actual: addenda.entry_detail_sequence().to_string(),
            });
        }
        Ok(addenda)
    }

    fn render(&self, identification: &str, name: &str, slot: &str, has_addenda: bool) -> String {
        let mut record = String::with_capacity(RECORD_LENGTH);

        record.push_str(RECORD_TYPE_CODE);
        record.push_str(self.transaction_code.as_str());
        record.push_str(self.receiving_dfi.as_str());
        record.push(char::from(b'0' + self.receiving_dfi.check_digit()));
        record.push_str(&self.account_number);
        record.push_str(&self.amount_field);
        record.push_str(identification);
        record.push_str(name);
        record.push_str(slot);
        record.push(if has_addenda { '1' } else { '0' });
        record.push_str(self.trace_number.as_str());

        debug_assert_eq!(record.len(), RECORD_LENGTH);
        record
    }
}

fn identification_field(value: &str) -> Result<String> {
    pad_right("identification number", value.trim(), 15)
}

fn name_field(field: &'static str, value: &str) -> Result<String> {
    pad_right(field, value.trim(), 22)
}

fn discretionary_field(value: &str) -> Result<String> {
    pad_right("discretionary data", value.trim(), 2)
}

/// Prearranged payment or deposit to a consumer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PpdEntry {
    common: EntryCommon,
    identification: String,
    individual_name: String,
    discretionary_data: String,
    addenda: Option<Addenda>,
}

impl PpdEntry {
    pub fn new(common: EntryCommon, individual_name: &str) -> Result<Self> {
        Ok(PpdEntry {
            common,
            identification: identification_field("")?,
            individual_name: name_field("individual name", individual_name)?,
            discretionary_data: discretionary_field("")?,
            addenda: None,
        })
    }

    pub fn with_identification(mut self, identification: &str) -> Result<Self> {
        self.identification = identification_field(identification)?;
        Ok(self)
    }

    pub fn with_discretionary_data(mut self, data: &str) -> Result<Self> {
        self.discretionary_data = discretionary_field(data)?;
        Ok(self)
    }

    pub fn with_addenda(mut self, addenda: Addenda) -> Result<Self> {
        self.addenda = Some(self.common.accept_addenda(addenda)?);
        Ok(self)
    }

    pub fn render(&self) -> String {
        self.common.render(
            &self.identification,
            &self.individual_name,
            &self.discretionary_data,
            self.addenda.is_some(),
        )
    }
}

/// Corporate credit or debit between business accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CcdEntry {
    common: EntryCommon,
    identification: String,
    receiving_company_name: String,
    discretionary_data: String,
    addenda: Option<Addenda>,
}

impl CcdEntry {
    pub fn new(common: EntryCommon, receiving_company_name: &str) -> Result<Self> {
        Ok(CcdEntry {
            common,
            identification: identification_field("")?,
            receiving_company_name: name_field("receiving company name", receiving_company_name)?,
            discretionary_data: discretionary_field("")?,
            addenda: None,
        })
    }

    /// Invoice or purchase order number shown to the receiver.
    pub fn with_identification(mut self, identification: &str) -> Result<Self> {
        self.identification = identification_field(identification)?;
        Ok(self)
    }

    pub fn with_discretionary_data(mut self, data: &str) -> Result<Self> {
        self.discretionary_data = discretionary_field(data)?;
        Ok(self)
    }

    pub fn with_addenda(mut self, addenda: Addenda) -> Result<Self> {
        self.addenda = Some(self.common.accept_addenda(addenda)?);
        Ok(self)
    }

    pub fn render(&self) -> String {
        self.common.render(
            &self.identification,
            &self.receiving_company_name,
            &self.discretionary_data,
            self.addenda.is_some(),
        )
    }
}

/// Internet-initiated entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebEntry {
    common: EntryCommon,
    identification: String,
    individual_name: String,
    payment_type: PaymentType,
    addenda: Option<Addenda>,
}

impl WebEntry {
    pub fn new(common: EntryCommon, individual_name: &str, payment_type: PaymentType) -> Result<Self> {
        Ok(WebEntry {
            common,
            identification: identification_field("")?,
            individual_name: name_field("individual name", individual_name)?,
            payment_type,
            addenda: None,
        })
    }

    pub fn with_identification(mut self, identification: &str) -> Result<Self> {
        self.identification = identification_field(identification)?;
        Ok(self)
    }

    pub fn with_addenda(mut self, addenda: Addenda) -> Result<Self> {
        self.addenda = Some(self.common.accept_addenda(addenda)?);
        Ok(self)
    }

    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    pub fn render(&self) -> String {
        self.common.render(
            &self.identification,
            &self.individual_name,
            self.payment_type.field(),
            self.addenda.is_some(),
        )
    }
}

/// Telephone-initiated entry. Never carries an addenda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelEntry {
    common: EntryCommon,
    identification: String,
    individual_name: String,
    payment_type: PaymentType,
}

impl TelEntry {
    pub fn new(common: EntryCommon, individual_name: &str, payment_type: PaymentType) -> Result<Self> {
        Ok(TelEntry {
            common,
            identification: identification_field("")?,
            individual_name: name_field("individual name", individual_name)?,
            payment_type,
        })
    }

    pub fn with_identification(mut self, identification: &str) -> Result<Self> {
        self.identification = identification_field(identification)?;
        Ok(self)
    }

    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    pub fn render(&self) -> String {
        self.common.render(
            &self.identification,
            &self.individual_name,
            self.payment_type.field(),
            false,
        )
    }
}

/// An entry of any supported class.
///
/// Batches hold a list of these and read only the shared surface: transaction
/// code, receiving DFI, amount, optional addenda and the rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryDetail {
    Ppd(PpdEntry),
    Ccd(CcdEntry),
    Web(WebEntry),
    Tel(TelEntry),
}

impl EntryDetail {
    pub fn sec(&self) -> StandardEntryClass {
        match self {
            EntryDetail::Ppd(_) => StandardEntryClass::Ppd,
            EntryDetail::Ccd(_) => StandardEntryClass::Ccd,
            EntryDetail::Web(_) => StandardEntryClass::Web,
            EntryDetail::Tel(_) => StandardEntryClass::Tel,
        }
    }

    pub fn common(&self) -> &EntryCommon {
        match self {
            EntryDetail::Ppd(entry) => &entry.common,
            EntryDetail::Ccd(entry) => &entry.common,
            EntryDetail::Web(entry) => &entry.common,
            EntryDetail::Tel(entry) => &entry.common,
        }
    }

    pub fn transaction_code(&self) -> &TransactionCode {
        self.common().transaction_code()
    }

    pub fn receiving_dfi(&self) -> &RoutingPrefix {
        self.common().receiving_dfi()
    }

    pub fn amount(&self) -> Amount {
        self.common().amount()
    }

    pub fn trace_number(&self) -> &TraceNumber {
        self.common().trace_number()
    }

    pub fn addenda(&self) -> Option<&Addenda> {
        match self {
            EntryDetail::Ppd(entry) => entry.addenda.as_ref(),
            EntryDetail::Ccd(entry) => entry.addenda.as_ref(),
            EntryDetail::Web(entry) => entry.addenda.as_ref(),
            EntryDetail::Tel(_) => None,
        }
    }

    /// Renders the 94-character entry line (without its addenda).
    pub fn render(&self) -> String {
        match self {
            EntryDetail::Ppd(entry) => entry.render(),
            EntryDetail::Ccd(entry) => entry.render(),
            EntryDetail::Web(entry) => entry.render(),
            EntryDetail::Tel(entry) => entry.render(),
        }
    }
}

impl From<PpdEntry> for EntryDetail {
    fn from(entry: PpdEntry) -> Self {
        EntryDetail::Ppd(entry)
    }
}

impl From<CcdEntry> for EntryDetail {
    fn from(entry: CcdEntry) -> Self {
        EntryDetail::Ccd(entry)
    }
}

impl From<WebEntry> for EntryDetail {
    fn from(entry: WebEntry) -> Self {
        EntryDetail::Web(entry)
    }
}

impl From<TelEntry> for EntryDetail {
    fn from(entry: TelEntry) -> Self {
        EntryDetail::Tel(entry)
    }
}
