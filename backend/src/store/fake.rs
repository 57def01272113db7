use crate::store::{
    OrderLineRecord, PurchaseOrderRecord, RecordStore, StoreError, PURCHASE_ORDER_TYPE,
};
use common::model::defect::DefectRecord;
use common::model::fault_issue::FaultIssueOption;
use common::model::order::RecordRef;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory store for handler tests. Records every create call and can be
/// told to fail individual operations.
#[derive(Default)]
pub struct FakeStore {
    pub orders: HashMap<String, PurchaseOrderRecord>,
    pub company_names: HashMap<String, String>,
    pub fault_issues: Vec<FaultIssueOption>,
    pub created: Mutex<Vec<DefectRecord>>,
    pub fail_load: bool,
    pub fail_vendor_lookup: bool,
    pub fail_fault_issues: bool,
    pub fail_create: bool,
}

impl FakeStore {
    /// Order `123` with two lines, vendor `45`, and fault issues `9` and `10`.
    pub fn with_order_123() -> Self {
        let text = |value: &str| Some(value.to_string());
        let order = PurchaseOrderRecord {
            id: "123".to_string(),
            tran_id: text("PO1042"),
            entity: RecordRef::new(text("45"), text("V0045 Hartley Timber")),
            plot: RecordRef::new(text("7"), text("North Field")),
            department: RecordRef::new(text("3"), text("Joinery")),
            location: RecordRef::new(None, None),
            lines: vec![
                OrderLineRecord {
                    item: RecordRef::new(text("501"), text("Oak Board 30mm")),
                    quantity: text("12"),
                    description: text("Kiln dried oak"),
                    width: text("150"),
                    length: text("2400"),
                    amount: text("384.00"),
                },
                OrderLineRecord {
                    item: RecordRef::new(text("502"), text("Pine Batten")),
                    quantity: None,
                    description: None,
                    width: None,
                    length: None,
                    amount: None,
                },
            ],
        };

        Self {
            orders: HashMap::from([(order.id.clone(), order)]),
            company_names: HashMap::from([("45".to_string(), "Hartley Timber Ltd".to_string())]),
            fault_issues: vec![
                FaultIssueOption::new("9", "Surface damage"),
                FaultIssueOption::new("10", "Split or cracked"),
            ],
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<DefectRecord> {
        self.created.lock().unwrap().clone()
    }
}

impl RecordStore for FakeStore {
    fn load_purchase_order(&self, po_id: &str) -> Result<PurchaseOrderRecord, StoreError> {
        if self.fail_load {
            return Err(StoreError::Unavailable("load failed".to_string()));
        }
        self.orders
            .get(po_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                record_type: PURCHASE_ORDER_TYPE,
                id: po_id.to_string(),
            })
    }

    fn vendor_company_name(&self, vendor_id: &str) -> Result<Option<String>, StoreError> {
        if self.fail_vendor_lookup {
            return Err(StoreError::Unavailable("vendor lookup failed".to_string()));
        }
        Ok(self.company_names.get(vendor_id).cloned())
    }

    fn active_fault_issues(&self) -> Result<Vec<FaultIssueOption>, StoreError> {
        if self.fail_fault_issues {
            return Err(StoreError::Unavailable("list search failed".to_string()));
        }
        Ok(self.fault_issues.clone())
    }

    fn create_defect(&self, record: &DefectRecord) -> Result<String, StoreError> {
        if self.fail_create {
            return Err(StoreError::Unavailable("save failed".to_string()));
        }
        let mut created = self.created.lock().unwrap();
        created.push(record.clone());
        Ok((800 + created.len()).to_string())
    }
}
