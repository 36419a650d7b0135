//! Record types shared by the importer and the exporters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identifier of a record, unique within one import batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

static FRESH_IDS: AtomicU64 = AtomicU64::new(0);

impl RecordId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    /// Identifier for the row at `index` of a batch parsed at `timestamp_millis`.
    ///
    /// The index keeps ids distinct when many rows share one timestamp.
    pub fn for_line(timestamp_millis: i64, index: usize) -> Self {
        RecordId(format!("{}-{}", timestamp_millis, index))
    }

    /// Identifier for a row created outside of an import (e.g. a blank grid row).
    pub fn fresh() -> Self {
        let seq = FRESH_IDS.fetch_add(1, Ordering::Relaxed);
        RecordId(format!("new-{}-{}", chrono::Utc::now().timestamp_millis(), seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settlement currency of a transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Mexican peso; also the fallback for anything unrecognised.
    #[default]
    Mxn,
    Usd,
    Eur,
    Cad,
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            // MXP is the pre-1993 peso code, still found in legacy exports.
            "MXN" | "MXP" => Ok(Currency::Mxn),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "CAD" => Ok(Currency::Cad),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

impl Currency {
    /// All supported currencies, in display order.
    pub const ALL: [Currency; 4] = [Currency::Mxn, Currency::Usd, Currency::Eur, Currency::Cad];

    /// Lenient parse: unknown or empty values fall back to MXN.
    pub fn normalize(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Mxn => "MXN",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Cad => "CAD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Kind of movement a row describes.
///
/// Labels are matched exactly as they appear in the bank's files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferType {
    #[default]
    #[serde(rename = "Transferencia")]
    Transfer,
    #[serde(rename = "Pago")]
    Payment,
    #[serde(rename = "Depósito")]
    Deposit,
    #[serde(rename = "Retiro")]
    Withdrawal,
}

impl FromStr for TransferType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Transferencia" => Ok(TransferType::Transfer),
            "Pago" => Ok(TransferType::Payment),
            "Depósito" => Ok(TransferType::Deposit),
            "Retiro" => Ok(TransferType::Withdrawal),
            _ => Err(format!("Invalid transfer type: {}", s)),
        }
    }
}

impl TransferType {
    pub const ALL: [TransferType; 4] = [
        TransferType::Transfer,
        TransferType::Payment,
        TransferType::Deposit,
        TransferType::Withdrawal,
    ];

    /// Lenient parse: anything but an exact label becomes `Transfer`.
    pub fn normalize(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransferType::Transfer => "Transferencia",
            TransferType::Payment => "Pago",
            TransferType::Deposit => "Depósito",
            TransferType::Withdrawal => "Retiro",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One transfer row after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Identifier assigned at creation time.
    pub id: RecordId,

    /// Account the transfer is charged to.
    pub source_account: String,

    /// Transfer amount.
    pub amount: Decimal,

    /// Beneficiary name or company name.
    pub beneficiary_name: String,

    /// Beneficiary account (CLABE, card or account number).
    pub beneficiary_account: String,

    pub currency: Currency,

    /// Numeric reference sent with the transfer.
    pub numeric_reference: String,

    pub alias: String,

    /// Free-text payment concept.
    pub reference_concept: String,

    /// VAT amount.
    pub vat: Decimal,

    /// Beneficiary tax id (RFC).
    pub beneficiary_tax_id: String,

    pub transfer_type: TransferType,
}

impl Default for TransactionRecord {
    /// A blank row: empty text, zero amounts, MXN transfer.
    fn default() -> Self {
        Self {
            id: RecordId::fresh(),
            source_account: String::new(),
            amount: Decimal::ZERO,
            beneficiary_name: String::new(),
            beneficiary_account: String::new(),
            currency: Currency::default(),
            numeric_reference: String::new(),
            alias: String::new(),
            reference_concept: String::new(),
            vat: Decimal::ZERO,
            beneficiary_tax_id: String::new(),
            transfer_type: TransferType::default(),
        }
    }
}

impl TransactionRecord {
    /// Text fields paired with their column names, in file order.
    pub(crate) fn text_fields(&self) -> [(&'static str, &str); 7] {
        [
            ("cuenta_cargo", self.source_account.as_str()),
            ("nombre_razon_social_destinatario", self.beneficiary_name.as_str()),
            ("cuenta_destinatario", self.beneficiary_account.as_str()),
            ("referencia_numerica", self.numeric_reference.as_str()),
            ("alias", self.alias.as_str()),
            ("concepto_referencia", self.reference_concept.as_str()),
            ("rfc_destinatario", self.beneficiary_tax_id.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_normalize() {
        for raw in ["mxp", "MXP", "xyz", "", "  mxn "] {
            assert_eq!(Currency::normalize(raw), Currency::Mxn, "input {:?}", raw);
        }
        assert_eq!(Currency::normalize("usd"), Currency::Usd);
        assert_eq!(Currency::normalize("EUR"), Currency::Eur);
        assert_eq!(Currency::normalize("cad"), Currency::Cad);
        assert!("GBP".parse::<Currency>().is_err());
    }

    #[test]
    fn test_currency_code() {
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::normalize("cad").code(), "CAD");
    }

    #[test]
    fn test_transfer_type_exact_match() {
        assert_eq!(TransferType::normalize("Pago"), TransferType::Payment);
        assert_eq!(TransferType::normalize("Depósito"), TransferType::Deposit);
        assert_eq!(TransferType::normalize("Retiro"), TransferType::Withdrawal);
        assert_eq!(TransferType::normalize("pago"), TransferType::Transfer);
        assert_eq!(TransferType::normalize("RETIRO"), TransferType::Transfer);
        assert_eq!(TransferType::normalize("Deposito"), TransferType::Transfer);
        assert_eq!(TransferType::normalize(""), TransferType::Transfer);
    }

    #[test]
    fn test_labels_roundtrip() {
        for kind in TransferType::ALL {
            assert_eq!(kind.label().parse::<TransferType>(), Ok(kind));
        }
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>(), Ok(currency));
        }
    }

    #[test]
    fn test_default_record() {
        let a = TransactionRecord::default();
        let b = TransactionRecord::default();
        assert_eq!(a.currency, Currency::Mxn);
        assert_eq!(a.transfer_type, TransferType::Transfer);
        assert_eq!(a.amount, Decimal::ZERO);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_record_id_for_line() {
        assert_eq!(RecordId::for_line(1700000000000, 3).as_str(), "1700000000000-3");
        assert_ne!(RecordId::for_line(5, 1), RecordId::for_line(5, 2));
    }
}
