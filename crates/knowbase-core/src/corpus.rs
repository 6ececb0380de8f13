//! Knowledge corpus: the ordered, immutable set of documents ingested once
//! at startup.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::Document;

/// Bundled storefront help articles, the corpus served when no directory is
/// configured. Ordered; ingestion preserves this order.
const BUILTIN_ARTICLES: &[(&str, &str)] = &[
    (
        "orders",
        "Orders are confirmed as soon as payment is authorized. You will \
         receive a confirmation email with the order number and a summary of \
         the purchased items. An order can be cancelled free of charge until \
         it enters the packing stage; after that, use the returns process \
         instead. Order status is visible under My Account at any time.",
    ),
    (
        "shipping",
        "Standard shipping takes three to five business days within the EU. \
         Express shipping is delivered on the next business day when the \
         order is placed before noon. Tracking numbers are sent by email as \
         soon as the parcel leaves the warehouse. Shipping is free for \
         orders above fifty euros.",
    ),
    (
        "invoices",
        "An invoice is generated automatically for every completed order and \
         attached to the confirmation email as a PDF. Corrected invoices can \
         be requested within thirty days, for example to change the billing \
         address or add a VAT identification number. All invoices remain \
         downloadable from the account area.",
    ),
    (
        "vouchers",
        "Vouchers are redeemed in the checkout by entering the voucher code \
         before payment. Only one voucher can be applied per order, and \
         vouchers cannot be exchanged for cash. A voucher that was not \
         applied cannot be credited retroactively to a completed order. \
         Expired voucher codes are rejected at checkout.",
    ),
    (
        "returns",
        "Items can be returned within fourteen days of delivery without \
         giving a reason. Start a return from the order detail page to get a \
         prepaid shipping label. Refunds are issued to the original payment \
         method within five business days after the returned items arrive at \
         the warehouse. Damaged deliveries are replaced free of charge.",
    ),
    (
        "account",
        "A customer account stores addresses, payment methods, and the order \
         history. The password can be reset from the sign-in page via the \
         registered email address. Deleting an account removes all personal \
         data after the statutory retention period for invoices has passed.",
    ),
];

/// The full set of source documents. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// The bundled help-article corpus.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_ARTICLES
                .iter()
                .map(|(id, body)| Document::new(*id, *body))
                .collect(),
        )
    }

    /// Load every `.txt` file under `root` as one document each, sorted by
    /// path for a deterministic ingestion order. Files that are not valid
    /// UTF-8 are decoded lossily rather than skipped.
    pub fn from_dir(root: &Path) -> Result<Self> {
        let mut documents = Vec::new();
        for path in list_txt_files(root) {
            let body = read_file_content(&path)?;
            documents.push(Document::new(doc_id_for(&path), body));
        }
        Ok(Self::new(documents))
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn list_txt_files(root: &Path) -> Vec<PathBuf> {
    let mut txt_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("txt"))
        .collect();
    txt_files.sort();
    txt_files
}

fn read_file_content(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(_) => Ok(String::from_utf8_lossy(&fs::read(path)?).to_string()),
    }
}

fn doc_id_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
