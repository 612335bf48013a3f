use serde::{Deserialize, Serialize};

/// One product line of a storage or processing document drawn against a foreign catch
/// certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForeignCertificateRow {
    pub document_number: String,
    pub certificate_number: String,
    pub product: String,
    pub weight_on_document: f64,
    /// Weight exported against the certificate across every document, this one included.
    pub weight_on_all_documents: f64,
    pub weight_on_certificate: f64,
    pub status: Option<ForeignDocumentStatus>,
}

impl ForeignCertificateRow {
    pub fn is_over_allocated(&self) -> bool {
        self.weight_on_all_documents > self.weight_on_certificate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForeignDocumentStatus {
    Pending,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignRowFailure {
    pub certificate_number: String,
    pub product: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ForeignBatchOutcome {
    Valid,
    Invalid { failures: Vec<ForeignRowFailure> },
}

impl ForeignBatchOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ForeignBatchOutcome::Valid)
    }
}

/// Splits a batch into valid or invalid. Rows are stamped `COMPLETE` only when every row
/// passes; an invalid batch is left untouched.
pub fn classify_foreign_document_batch(rows: &mut [ForeignCertificateRow]) -> ForeignBatchOutcome {
    let failures: Vec<ForeignRowFailure> = rows
        .iter()
        .filter(|row| row.is_over_allocated())
        .map(|row| ForeignRowFailure {
            certificate_number: row.certificate_number.clone(),
            product: row.product.clone(),
        })
        .collect();

    if !failures.is_empty() {
        return ForeignBatchOutcome::Invalid { failures };
    }

    for row in rows.iter_mut() {
        row.status = Some(ForeignDocumentStatus::Complete);
    }

    ForeignBatchOutcome::Valid
}
