//! Pipe-delimited transfer file parser and serializer.
//!
//! The bank's bulk-load layout is one record per line, eleven `|`-separated
//! columns, and a header line that is always skipped. There is no quoting:
//! a `|` inside a value is a column separator.

use crate::error::{Error, ImportError, Result};
use crate::types::{Currency, RecordId, TransactionRecord, TransferType};
use rust_decimal::Decimal;
use std::io::{Read, Write};
use std::str::FromStr;
use tracing::debug;

/// Minimum number of columns a data line must have. Extra columns are ignored.
pub const COLUMN_COUNT: usize = 11;

/// Canonical header line written by [`PipeBatch::write_to`].
pub const HEADER: &str = "cuenta_cargo|importe|nombre_razon_social_destinatario|cuenta_destinatario|divisa|referencia_numerica|alias|concepto_referencia|iva|rfc_destinatario|tipo";

/// A batch of records loaded from (or destined for) a pipe-delimited file.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeBatch {
    /// Records in file order.
    pub records: Vec<TransactionRecord>,
}

impl PipeBatch {
    /// Parse a batch from the full text of a file.
    ///
    /// # Examples
    ///
    /// ```
    /// use spei_batch::pipe_format::PipeBatch;
    /// use spei_batch::types::Currency;
    ///
    /// let text = "header\nA1|100.50|Jane Doe|B2|mxp|REF1|alias1|concept1|0|TAX1|Pago\n";
    /// let batch = PipeBatch::parse(text)?;
    /// assert_eq!(batch.records.len(), 1);
    /// assert_eq!(batch.records[0].currency, Currency::Mxn);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let records = parse_records(text)?;
        Ok(PipeBatch { records })
    }

    /// Parse a batch from any source implementing `Read`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use spei_batch::pipe_format::PipeBatch;
    ///
    /// let mut file = File::open("transfers.txt")?;
    /// let batch = PipeBatch::from_read(&mut file)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Write the batch back in the pipe layout, header first.
    ///
    /// Fails with [`Error::DelimiterInField`] if a text field would split
    /// into extra columns or lines on re-import.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for record in &self.records {
            check_writable(record)?;
        }

        writeln!(writer, "{}", HEADER)?;
        for r in &self.records {
            writeln!(
                writer,
                "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
                r.source_account,
                r.amount,
                r.beneficiary_name,
                r.beneficiary_account,
                r.currency,
                r.numeric_reference,
                r.alias,
                r.reference_concept,
                r.vat,
                r.beneficiary_tax_id,
                r.transfer_type,
            )?;
        }

        Ok(())
    }
}

/// Parse the full text of a pipe-delimited file into normalized records.
///
/// Blank lines are dropped before anything else, so the line numbers in
/// [`ImportError::MalformedLine`] count non-blank lines only (header = 1).
/// The first malformed line aborts the whole import.
pub fn parse_records(raw_text: &str) -> std::result::Result<Vec<TransactionRecord>, ImportError> {
    let text = raw_text.strip_prefix('\u{feff}').unwrap_or(raw_text);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(ImportError::TooFewLines);
    }

    let timestamp = chrono::Utc::now().timestamp_millis();
    let records = lines
        .iter()
        .enumerate()
        .skip(1)
        .map(|(index, line)| parse_line(line, index, timestamp))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!(records = records.len(), "parsed pipe-delimited batch");
    Ok(records)
}

fn parse_line(
    line: &str,
    index: usize,
    timestamp: i64,
) -> std::result::Result<TransactionRecord, ImportError> {
    let cols: Vec<&str> = line.split('|').collect();
    if cols.len() < COLUMN_COUNT {
        return Err(ImportError::MalformedLine {
            line_number: index + 1,
            found: cols.len(),
        });
    }

    Ok(TransactionRecord {
        id: RecordId::for_line(timestamp, index),
        source_account: cols[0].trim().to_string(),
        amount: parse_amount(cols[1]),
        beneficiary_name: cols[2].trim().to_string(),
        beneficiary_account: cols[3].trim().to_string(),
        currency: Currency::normalize(cols[4]),
        numeric_reference: cols[5].trim().to_string(),
        alias: cols[6].trim().to_string(),
        reference_concept: cols[7].trim().to_string(),
        vat: parse_amount(cols[8]),
        beneficiary_tax_id: cols[9].trim().to_string(),
        transfer_type: TransferType::normalize(cols[10].trim()),
    })
}

/// Lenient amount parse: reads the leading number and ignores the rest.
///
/// `"12.5 MXN"` gives 12.5; text with no leading number, or a number that
/// does not fit a `Decimal`, gives zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let prefix = numeric_prefix(raw.trim_start());
    if prefix.is_empty() {
        return Decimal::ZERO;
    }

    let (mantissa, exponent) = match prefix.find(['e', 'E']) {
        Some(pos) => (&prefix[..pos], Some(&prefix[pos + 1..])),
        None => (prefix, None),
    };

    let (negative, digits) = match mantissa.as_bytes().first() {
        Some(b'-') => (true, &mantissa[1..]),
        Some(b'+') => (false, &mantissa[1..]),
        _ => (false, mantissa),
    };
    let digits = digits.trim_end_matches('.');
    let mut cleaned = String::with_capacity(digits.len() + 2);
    if negative {
        cleaned.push('-');
    }
    if digits.starts_with('.') {
        cleaned.push('0');
    }
    cleaned.push_str(digits);

    let parsed = match exponent {
        Some(exp) => Decimal::from_scientific(&format!("{}e{}", cleaned, exp)),
        None => Decimal::from_str(&cleaned),
    };
    parsed.unwrap_or(Decimal::ZERO)
}

/// Longest prefix shaped like `[+-]digits[.digits][e[+-]digits]`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_digits = count_digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if end < len && bytes[end] == b'.' {
        frac_digits = count_digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return "";
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    &s[..end]
}

fn check_writable(record: &TransactionRecord) -> Result<()> {
    for (field, value) in record.text_fields() {
        if value.contains(['|', '\n', '\r']) {
            return Err(Error::DelimiterInField {
                record_id: record.id.to_string(),
                field,
            });
        }
    }
    Ok(())
}
