//! CSV export of a record batch.

use crate::error::Result;
use crate::types::TransactionRecord;
use csv::Writer;
use serde::Serialize;
use std::io::Write;

/// Records to be written as CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub records: Vec<TransactionRecord>,
}

/// CSV row layout; column names follow the pipe file header.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    cuenta_cargo: &'a str,
    importe: String,
    nombre_razon_social_destinatario: &'a str,
    cuenta_destinatario: &'a str,
    divisa: &'static str,
    referencia_numerica: &'a str,
    alias: &'a str,
    concepto_referencia: &'a str,
    iva: String,
    rfc_destinatario: &'a str,
    tipo: &'static str,
}

impl<'a> From<&'a TransactionRecord> for CsvRow<'a> {
    fn from(r: &'a TransactionRecord) -> Self {
        CsvRow {
            cuenta_cargo: &r.source_account,
            importe: r.amount.to_string(),
            nombre_razon_social_destinatario: &r.beneficiary_name,
            cuenta_destinatario: &r.beneficiary_account,
            divisa: r.currency.code(),
            referencia_numerica: &r.numeric_reference,
            alias: &r.alias,
            concepto_referencia: &r.reference_concept,
            iva: r.vat.to_string(),
            rfc_destinatario: &r.beneficiary_tax_id,
            tipo: r.transfer_type.label(),
        }
    }
}

impl CsvExport {
    /// Write the records to any destination implementing `Write`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use spei_batch::csv_format::CsvExport;
    /// use spei_batch::types::TransactionRecord;
    ///
    /// let export = CsvExport { records: vec![TransactionRecord::default()] };
    /// let mut file = File::create("transfers.csv")?;
    /// export.write_to(&mut file)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut csv_writer = Writer::from_writer(writer);

        // serialize() only emits the header with the first row
        if self.records.is_empty() {
            csv_writer.write_record(crate::pipe_format::HEADER.split('|'))?;
        }

        for record in &self.records {
            csv_writer.serialize(CsvRow::from(record))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
