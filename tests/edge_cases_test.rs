//! End-to-end tests of the library: building files in code and checking the
//! rendered text and control totals.

use chrono::{NaiveDate, NaiveDateTime};
use nacha_writer::{
    AchError, AchFile, Addenda, Amount, Batch, BatchHeader, CcdEntry, ControlTotals, EntryCommon,
    FileHeader, PaymentType, PpdEntry, ServiceClass, StandardEntryClass, TelEntry, TraceNumber,
    WebEntry,
};
use std::fs;
use std::str::FromStr;

fn created() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(9, 5, 0)
        .unwrap()
}

fn file_header() -> FileHeader {
    FileHeader::new(" 123456789", " 987654321", created())
        .unwrap()
        .with_destination_name("DEST BANK")
        .unwrap()
        .with_origin_name("YOUR COMPANY")
        .unwrap()
}

fn batch_header(
    service_class: ServiceClass,
    sec: StandardEntryClass,
    description: &str,
    batch_number: u32,
) -> BatchHeader {
    BatchHeader::new(
        service_class,
        "YOUR COMPANY",
        "9876543210",
        sec,
        description,
        NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(),
        "12345678",
        batch_number,
    )
    .unwrap()
}

fn common(code: &str, account: &str, amount: &str, trace: &str) -> EntryCommon {
    EntryCommon::new(
        code,
        "87654321",
        account,
        Amount::from_str(amount).unwrap(),
        trace,
    )
    .unwrap()
}

/// The four-batch file: one PPD credit, one CCD debit with an addenda,
/// one WEB debit and one TEL debit.
fn sample_file() -> AchFile {
    let mut ppd = Batch::new(batch_header(
        ServiceClass::CreditsOnly,
        StandardEntryClass::Ppd,
        "PAYROLL",
        1,
    ));
    ppd.add_entry(
        PpdEntry::new(
            common("22", "123456789", "100.00", "123456780000001"),
            "JOHN DOE",
        )
        .unwrap(),
    )
    .unwrap();

    let ccd_trace = TraceNumber::new("123456780000002").unwrap();
    let mut ccd = Batch::new(batch_header(
        ServiceClass::DebitsOnly,
        StandardEntryClass::Ccd,
        "VENDOR PAY",
        2,
    ));
    ccd.add_entry(
        CcdEntry::new(
            common("27", "987654321", "250.00", ccd_trace.as_str()),
            "ACME CORP",
        )
        .unwrap()
        .with_addenda(Addenda::for_trace("INVOICE 1001", &ccd_trace).unwrap())
        .unwrap(),
    )
    .unwrap();

    let mut web = Batch::new(batch_header(
        ServiceClass::DebitsOnly,
        StandardEntryClass::Web,
        "ONLINE PAY",
        3,
    ));
    web.add_entry(
        WebEntry::new(
            common("27", "111222333", "75.00", "123456780000003"),
            "JANE SMITH",
            PaymentType::from_str("").unwrap(),
        )
        .unwrap(),
    )
    .unwrap();

    let mut tel = Batch::new(batch_header(
        ServiceClass::DebitsOnly,
        StandardEntryClass::Tel,
        "PHONE PAY",
        4,
    ));
    tel.add_entry(
        TelEntry::new(
            common("27", "222333444", "50.00", "123456780000004"),
            "BOB JOHNSON",
            PaymentType::Unspecified,
        )
        .unwrap(),
    )
    .unwrap();

    let mut file = AchFile::new(file_header());
    for batch in [ppd, ccd, web, tel] {
        file.add_batch(batch).unwrap();
    }
    file
}

// ==================== FULL FILE ====================

#[test]
fn test_sample_file_is_bit_exact() {
    let expected = fs::read_to_string("tests/data/expected_sample.ach").unwrap();
    assert_eq!(sample_file().generate().unwrap(), expected);
}

#[test]
fn test_sample_file_control_totals() {
    let rendered = sample_file().render().unwrap();
    let control = rendered.control();

    assert_eq!(control.batch_count(), 4);
    assert_eq!(control.block_count(), 2);
    assert_eq!(control.totals().entry_addenda_count, 5);
    assert_eq!(control.totals().entry_hash, 4 * 87_654_321);
    assert_eq!(control.totals().total_debit.to_string(), "375.00");
    assert_eq!(control.totals().total_credit.to_string(), "100.00");
}

#[test]
fn test_file_totals_equal_sum_of_batch_totals() {
    let rendered = sample_file().render().unwrap();
    let summed = rendered
        .batches()
        .iter()
        .fold(ControlTotals::default(), |acc, b| acc.merge(b.totals()));
    assert_eq!(rendered.totals(), &summed);
}

#[test]
fn test_batch_totals_equal_sum_of_entry_amounts() {
    let file = sample_file();
    let rendered = file.render().unwrap();

    for (batch, output) in file.batches().iter().zip(rendered.batches()) {
        let entry_sum: Amount = batch.entries().iter().map(|e| e.amount()).sum();
        assert_eq!(output.totals().total_amount(), entry_sum);
    }
}

#[test]
fn test_rendering_twice_is_identical() {
    let file = sample_file();
    assert_eq!(file.generate().unwrap(), file.generate().unwrap());
}

// ==================== COUNTS AND BLOCKS ====================

#[test]
fn test_block_count_one_batch_two_records() {
    let trace = TraceNumber::new("1").unwrap();
    let mut batch = Batch::new(batch_header(
        ServiceClass::CreditsOnly,
        StandardEntryClass::Ppd,
        "PAYROLL",
        1,
    ));
    batch
        .add_entry(
            PpdEntry::new(common("22", "1", "1.00", "1"), "JOHN DOE")
                .unwrap()
                .with_addenda(Addenda::for_trace("NOTE", &trace).unwrap())
                .unwrap(),
        )
        .unwrap();

    let mut file = AchFile::new(file_header());
    file.add_batch(batch).unwrap();
    let rendered = file.render().unwrap();

    assert_eq!(rendered.totals().entry_addenda_count, 2);
    assert_eq!(rendered.control().block_count(), 1);
    assert_eq!(rendered.text().lines().count(), 6);
}

#[test]
fn test_block_boundary_at_ten_records() {
    // 1 + 2 + 7 + 1 = 11 records needs two blocks; 6 entries fit in one.
    for (entries, blocks) in [(6u32, 1u64), (7, 2)] {
        let mut batch = Batch::new(batch_header(
            ServiceClass::CreditsOnly,
            StandardEntryClass::Ppd,
            "PAYROLL",
            1,
        ));
        for n in 1..=entries {
            batch
                .add_entry(PpdEntry::new(common("22", "1", "1.00", &n.to_string()), "X").unwrap())
                .unwrap();
        }
        let mut file = AchFile::new(file_header());
        file.add_batch(batch).unwrap();

        let rendered = file.render().unwrap();
        assert_eq!(rendered.control().block_count(), blocks, "{} entries", entries);
    }
}

// ==================== AMOUNTS ====================

#[test]
fn test_sub_cent_amounts_truncate_consistently() {
    let mut batch = Batch::new(batch_header(
        ServiceClass::Mixed,
        StandardEntryClass::Ppd,
        "PAYROLL",
        1,
    ));
    batch
        .add_entry(PpdEntry::new(common("22", "1", "0.005", "1"), "A").unwrap())
        .unwrap();
    batch
        .add_entry(PpdEntry::new(common("22", "1", "0.005", "2"), "B").unwrap())
        .unwrap();

    let rendered = batch.render().unwrap();
    for entry_line in &rendered.lines()[1..3] {
        assert_eq!(&entry_line[29..39], "0000000000");
    }
    // Two truncated half-cents add up to zero, matching the entry lines.
    assert!(rendered.totals().total_credit.is_zero());
}

#[test]
fn test_zero_amount_entry_is_allowed() {
    let mut batch = Batch::new(batch_header(
        ServiceClass::Mixed,
        StandardEntryClass::Ccd,
        "PRENOTE",
        1,
    ));
    batch
        .add_entry(CcdEntry::new(common("23", "1", "0", "1"), "ACME CORP").unwrap())
        .unwrap();

    let rendered = batch.render().unwrap();
    assert_eq!(rendered.totals().entry_addenda_count, 1);
    assert!(rendered.totals().total_amount().is_zero());
}

#[test]
fn test_batch_total_overflow_is_an_error() {
    let mut batch = Batch::new(batch_header(
        ServiceClass::DebitsOnly,
        StandardEntryClass::Ppd,
        "PAYROLL",
        1,
    ));
    // 10,001 entries of 99,999,999.99 exceed 12 digits of cents.
    for n in 1..=10_001u32 {
        batch
            .add_entry(PpdEntry::new(common("27", "1", "99999999.99", &n.to_string()), "X").unwrap())
            .unwrap();
    }

    assert!(matches!(
        batch.render(),
        Err(AchError::AmountOverflow { width: 12, .. })
    ));
}

// ==================== ERRORS ====================

#[test]
fn test_unclassifiable_code_in_any_batch_fails_file() {
    let mut bad = Batch::new(batch_header(
        ServiceClass::Mixed,
        StandardEntryClass::Ppd,
        "PAYROLL",
        5,
    ));
    bad.add_entry(PpdEntry::new(common("99", "1", "1.00", "9"), "X").unwrap())
        .unwrap();

    let mut file = sample_file();
    file.add_batch(bad).unwrap();

    assert!(matches!(
        file.render(),
        Err(AchError::UnclassifiableTransactionCode { .. })
    ));
}

#[test]
fn test_max_width_descriptive_fields_render_exactly() {
    let header = BatchHeader::new(
        ServiceClass::Mixed,
        "SIXTEEN CHARS CO",
        "ABCDEFGHIJ",
        StandardEntryClass::Ppd,
        "TEN CHARSX",
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        "12345678",
        BatchHeader::MAX_BATCH_NUMBER,
    )
    .unwrap()
    .with_discretionary_data("TWENTY CHARACTERS XX")
    .unwrap()
    .with_descriptive_date("DEC 24")
    .unwrap();

    let mut batch = Batch::new(header);
    batch
        .add_entry(
            PpdEntry::new(
                common("22", "ACCOUNT0123456789", "12.34", "999999999999999"),
                "TWENTY TWO CHARS NAME.",
            )
            .unwrap(),
        )
        .unwrap();

    let mut file = AchFile::new(
        file_header()
            .with_reference_code("REF00001")
            .unwrap()
            .with_file_id_modifier('Z')
            .unwrap(),
    );
    file.add_batch(batch).unwrap();

    let text = file.generate().unwrap();
    for line in text.lines() {
        assert_eq!(line.len(), 94, "{:?}", line);
    }
}

#[test]
fn test_control_characters_never_reach_output() {
    assert!(matches!(
        PpdEntry::new(common("22", "1", "1.00", "1"), "JOHN\nDOE"),
        Err(AchError::InvalidField { .. })
    ));
    assert!(matches!(
        BatchHeader::new(
            ServiceClass::Mixed,
            "YOUR\rCOMPANY",
            "9876543210",
            StandardEntryClass::Ppd,
            "PAYROLL",
            NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(),
            "12345678",
            1,
        ),
        Err(AchError::InvalidField { .. })
    ));
    assert!(file_header().with_origin_name("YOUR\tCOMPANY").is_err());
}

#[test]
fn test_huge_amount_is_an_error_not_a_panic() {
    assert!(Amount::from_str("79228162514264337593543950335").is_err());
    assert!(Amount::from_str("99999999999999999999.99").is_err());
}

#[test]
fn test_same_trace_and_batch_number_twice_rejected() {
    let batch = || {
        let mut batch = Batch::new(batch_header(
            ServiceClass::CreditsOnly,
            StandardEntryClass::Ppd,
            "PAYROLL",
            1,
        ));
        batch
            .add_entry(PpdEntry::new(common("22", "1", "1.00", "123456780000001"), "X").unwrap())
            .unwrap();
        batch
    };

    let mut file = AchFile::new(file_header());
    file.add_batch(batch()).unwrap();
    assert!(matches!(
        file.add_batch(batch()),
        Err(AchError::BatchNumberOutOfOrder {
            previous: 1,
            batch_number: 1
        })
    ));

    // Renumbered, the batch still carries a trace already in the file.
    let mut renumbered = Batch::new(batch_header(
        ServiceClass::CreditsOnly,
        StandardEntryClass::Ppd,
        "PAYROLL",
        2,
    ));
    renumbered
        .add_entry(PpdEntry::new(common("22", "1", "1.00", "123456780000001"), "X").unwrap())
        .unwrap();
    assert!(matches!(
        file.add_batch(renumbered),
        Err(AchError::TraceNumberInUse(_))
    ));

    assert_eq!(file.render().unwrap().control().batch_count(), 1);
}
