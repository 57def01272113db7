//! The record store the handler reads purchase orders from and creates defects in.
//!
//! `RecordStore` is the only seam to persistence. Every call is a single
//! synchronous read or write; nothing is cached or retried here.

pub mod sqlite;

#[cfg(test)]
pub mod fake;

use common::model::defect::DefectRecord;
use common::model::fault_issue::FaultIssueOption;
use common::model::order::RecordRef;
use thiserror::Error;

/// Record type name used in "not found" errors for purchase orders.
pub const PURCHASE_ORDER_TYPE: &str = "purchaseorder";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("That record does not exist ({record_type} {id}).")]
    NotFound { record_type: &'static str, id: String },
    #[error("record store error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// A purchase order as the store returns it, before any defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseOrderRecord {
    pub id: String,
    pub tran_id: Option<String>,
    /// The vendor (`entity`), with the entity's own display text.
    pub entity: RecordRef,
    pub plot: RecordRef,
    pub department: RecordRef,
    pub location: RecordRef,
    pub lines: Vec<OrderLineRecord>,
}

/// One row of the item sublist. Numeric columns stay textual and optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderLineRecord {
    pub item: RecordRef,
    pub quantity: Option<String>,
    pub description: Option<String>,
    pub width: Option<String>,
    pub length: Option<String>,
    pub amount: Option<String>,
}

pub trait RecordStore: Send + Sync {
    /// Loads a purchase order with its full item sublist.
    fn load_purchase_order(&self, po_id: &str) -> Result<PurchaseOrderRecord, StoreError>;

    /// The vendor's company name, if the vendor has one on file.
    fn vendor_company_name(&self, vendor_id: &str) -> Result<Option<String>, StoreError>;

    /// Active fault-issue list values, in display order.
    fn active_fault_issues(&self) -> Result<Vec<FaultIssueOption>, StoreError>;

    /// Saves a new Manufacturing Defect in one call and returns its id.
    ///
    /// Either the whole record is stored or nothing is.
    fn create_defect(&self, record: &DefectRecord) -> Result<String, StoreError>;
}
