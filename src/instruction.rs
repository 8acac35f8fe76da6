//! Payment instruction rows as read from CSV.

use crate::amount::Amount;
use crate::codes::{PaymentType, RoutingPrefix, ServiceClass, StandardEntryClass, TraceNumber};
use crate::error::{AchError, Result};
use crate::records::{Addenda, BatchHeader, CcdEntry, EntryCommon, EntryDetail, PpdEntry, TelEntry, WebEntry};
use chrono::NaiveDate;
use serde::Deserialize;
use std::str::FromStr;

/// One payment instruction, as read from CSV.
///
/// Batch-level columns are repeated on every row; rows with identical
/// batch-level values end up in the same batch.
#[derive(Debug, Clone, Deserialize)]
pub struct InstructionRecord {
    /// Standard Entry Class: PPD, CCD, WEB or TEL
    pub sec: String,
    /// 200, 220 or 225
    pub service_class: String,
    pub company_name: String,
    pub company_id: String,
    pub description: String,
    /// YYYY-MM-DD
    pub effective_date: String,
    #[serde(default)]
    pub descriptive_date: Option<String>,
    pub originating_dfi: String,

    pub transaction_code: String,
    /// First 8 digits of the receiver's routing number
    pub routing: String,
    pub account: String,
    pub amount: Amount,
    /// Individual name, or receiving company name for CCD
    pub name: String,
    #[serde(default)]
    pub identification: Option<String>,
    /// PPD and CCD only
    #[serde(default)]
    pub discretionary: Option<String>,
    /// WEB and TEL only: R, S or blank
    #[serde(default)]
    pub payment_type: Option<String>,
    /// Payment related information; PPD, CCD and WEB only
    #[serde(default)]
    pub addenda: Option<String>,
    /// Generated from the originating DFI when blank
    #[serde(default)]
    pub trace: Option<String>,
}

/// Batch-level values that decide which batch a row belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchKey {
    pub sec: StandardEntryClass,
    pub service_class: ServiceClass,
    pub company_name: String,
    pub company_id: String,
    pub description: String,
    pub effective_date: NaiveDate,
    pub descriptive_date: String,
    pub originating_dfi: RoutingPrefix,
}

impl BatchKey {
    /// Builds the header for a batch with this key.
    pub fn header(&self, batch_number: u32) -> Result<BatchHeader> {
        BatchHeader::new(
            self.service_class,
            &self.company_name,
            &self.company_id,
            self.sec,
            &self.description,
            self.effective_date,
            self.originating_dfi.as_str(),
            batch_number,
        )?
        .with_descriptive_date(&self.descriptive_date)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn not_applicable(field: &'static str, value: &str, reason: &'static str) -> AchError {
    AchError::InvalidField {
        field,
        value: value.to_string(),
        reason,
    }
}

impl InstructionRecord {
    /// Parses the batch-level columns.
    pub fn batch_key(&self) -> Result<BatchKey> {
        let effective_date = NaiveDate::parse_from_str(self.effective_date.trim(), "%Y-%m-%d")
            .map_err(|_| AchError::InvalidField {
                field: "effective entry date",
                value: self.effective_date.clone(),
                reason: "expected YYYY-MM-DD",
            })?;

        Ok(BatchKey {
            sec: StandardEntryClass::from_str(&self.sec)?,
            service_class: ServiceClass::from_str(&self.service_class)?,
            company_name: self.company_name.trim().to_string(),
            company_id: self.company_id.trim().to_string(),
            description: self.description.trim().to_string(),
            effective_date,
            descriptive_date: present(&self.descriptive_date).unwrap_or_default().to_string(),
            originating_dfi: RoutingPrefix::new(&self.originating_dfi)?,
        })
    }

    /// Builds the entry (and its addenda) for this row.
    pub fn to_entry(&self, sec: StandardEntryClass, trace: &TraceNumber) -> Result<EntryDetail> {
        let common = EntryCommon::new(
            &self.transaction_code,
            &self.routing,
            &self.account,
            self.amount,
            trace.as_str(),
        )?;
        let identification = present(&self.identification).unwrap_or_default();
        let addenda = present(&self.addenda)
            .map(|info| Addenda::for_trace(info, trace))
            .transpose()?;

        if matches!(sec, StandardEntryClass::Ppd | StandardEntryClass::Ccd) {
            if let Some(payment_type) = present(&self.payment_type) {
                return Err(not_applicable(
                    "payment type code",
                    payment_type,
                    "applies to WEB and TEL entries only",
                ));
            }
        } else if let Some(data) = present(&self.discretionary) {
            return Err(not_applicable(
                "discretionary data",
                data,
                "applies to PPD and CCD entries only",
            ));
        }
        let discretionary = present(&self.discretionary).unwrap_or_default();
        let payment_type = PaymentType::from_str(present(&self.payment_type).unwrap_or_default())?;

        let entry = match sec {
            StandardEntryClass::Ppd => {
                let mut entry = PpdEntry::new(common, &self.name)?
                    .with_identification(identification)?
                    .with_discretionary_data(discretionary)?;
                if let Some(addenda) = addenda {
                    entry = entry.with_addenda(addenda)?;
                }
                EntryDetail::Ppd(entry)
            }
            StandardEntryClass::Ccd => {
                let mut entry = CcdEntry::new(common, &self.name)?
                    .with_identification(identification)?
                    .with_discretionary_data(discretionary)?;
                if let Some(addenda) = addenda {
                    entry = entry.with_addenda(addenda)?;
                }
                EntryDetail::Ccd(entry)
            }
            StandardEntryClass::Web => {
                let mut entry =
                    WebEntry::new(common, &self.name, payment_type)?.with_identification(identification)?;
                if let Some(addenda) = addenda {
                    entry = entry.with_addenda(addenda)?;
                }
                EntryDetail::Web(entry)
            }
            StandardEntryClass::Tel => {
                if let Some(info) = present(&self.addenda) {
                    return Err(not_applicable(
                        "addenda",
                        info,
                        "TEL entries cannot carry an addenda",
                    ));
                }
                EntryDetail::Tel(
                    TelEntry::new(common, &self.name, payment_type)?.with_identification(identification)?,
                )
            }
        };
        Ok(entry)
    }
}
