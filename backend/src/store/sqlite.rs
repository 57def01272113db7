//! SQLite-backed `RecordStore`.
//!
//! A new connection is opened for every operation, so no connection or
//! statement state is shared between requests. The schema mirrors the ERP
//! records the handler touches: purchase orders with their item sublist,
//! vendors, the fault-issue list and the Manufacturing Defect record type,
//! whose columns are named after `DefectField::field_id`.

use crate::store::{
    OrderLineRecord, PurchaseOrderRecord, RecordStore, StoreError, PURCHASE_ORDER_TYPE,
};
use common::model::defect::{DefectRecord, DEFECT_RECORD_TYPE};
use common::model::fault_issue::FaultIssueOption;
use common::model::order::RecordRef;
use log::debug;
use rusqlite::{params, params_from_iter, Connection};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS vendors (
    id TEXT PRIMARY KEY,
    company_name TEXT
);
CREATE TABLE IF NOT EXISTS purchase_orders (
    id TEXT PRIMARY KEY,
    tran_id TEXT,
    entity_id TEXT,
    entity_name TEXT,
    plot_id TEXT,
    plot_name TEXT,
    department_id TEXT,
    department_name TEXT,
    location_id TEXT,
    location_name TEXT
);
CREATE TABLE IF NOT EXISTS purchase_order_lines (
    po_id TEXT NOT NULL REFERENCES purchase_orders(id),
    line INTEGER NOT NULL,
    item_id TEXT,
    item_name TEXT,
    quantity TEXT,
    description TEXT,
    width TEXT,
    length TEXT,
    amount TEXT,
    PRIMARY KEY (po_id, line)
);
CREATE TABLE IF NOT EXISTS fault_issues (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    is_inactive INTEGER NOT NULL DEFAULT 0,
    sort_order INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS customrecord_manufacturing_defect (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    custrecordman_defect_purchaseorder TEXT,
    custrecordman_defect_supplier TEXT,
    custrecord_man_defect_plot TEXT,
    custrecord_man_defect_department TEXT,
    custrecord_man_defect_location TEXT,
    custrecord_man_defect_issue TEXT,
    custrecord_man_defect_item TEXT,
    custrecord_man_defect_width TEXT,
    custrecord_man_defect_length TEXT,
    custrecord_man_defect_quantity TEXT,
    custrecord_man_defect_cost TEXT,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
";

pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and applies the schema.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        store.connect()?.execute_batch(SCHEMA)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    pub fn insert_vendor(&self, id: &str, company_name: Option<&str>) -> Result<(), StoreError> {
        self.connect()?.execute(
            "INSERT OR REPLACE INTO vendors (id, company_name) VALUES (?1, ?2)",
            params![id, company_name],
        )?;
        Ok(())
    }

    pub fn insert_fault_issue(
        &self,
        option: &FaultIssueOption,
        active: bool,
        sort_order: i64,
    ) -> Result<(), StoreError> {
        self.connect()?.execute(
            "INSERT OR REPLACE INTO fault_issues (id, name, is_inactive, sort_order) VALUES (?1, ?2, ?3, ?4)",
            params![option.id, option.name, !active, sort_order],
        )?;
        Ok(())
    }

    /// Inserts or replaces an order together with its whole item sublist.
    pub fn insert_purchase_order(&self, order: &PurchaseOrderRecord) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO purchase_orders (
                id, tran_id, entity_id, entity_name, plot_id, plot_name,
                department_id, department_name, location_id, location_name
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                order.id,
                order.tran_id,
                order.entity.id,
                order.entity.text,
                order.plot.id,
                order.plot.text,
                order.department.id,
                order.department.text,
                order.location.id,
                order.location.text,
            ],
        )?;
        tx.execute(
            "DELETE FROM purchase_order_lines WHERE po_id = ?1",
            params![order.id],
        )?;
        for (line, item) in order.lines.iter().enumerate() {
            tx.execute(
                "INSERT INTO purchase_order_lines (
                    po_id, line, item_id, item_name, quantity, description, width, length, amount
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    order.id,
                    line as i64,
                    item.item.id,
                    item.item.text,
                    item.quantity,
                    item.description,
                    item.width,
                    item.length,
                    item.amount,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Loads the demo purchase order `123` and its supporting records.
    pub fn seed_demo(&self) -> Result<(), StoreError> {
        self.insert_vendor("45", Some("Hartley Timber Ltd"))?;
        self.insert_purchase_order(&demo_order())?;

        let issues = [
            ("9", "Surface damage", true),
            ("10", "Split or cracked", true),
            ("11", "Warped", true),
            ("12", "Wrong dimensions", true),
            ("13", "Legacy: other", false),
        ];
        for (sort_order, (id, name, active)) in issues.into_iter().enumerate() {
            self.insert_fault_issue(&FaultIssueOption::new(id, name), active, sort_order as i64)?;
        }
        debug!("Seeded demo purchase order 123 into {}", self.path.display());
        Ok(())
    }
}

fn demo_order() -> PurchaseOrderRecord {
    let text = |value: &str| Some(value.to_string());
    PurchaseOrderRecord {
        id: "123".to_string(),
        tran_id: text("PO1042"),
        entity: RecordRef::new(text("45"), text("V0045 Hartley Timber")),
        plot: RecordRef::new(text("7"), text("North Field")),
        department: RecordRef::new(text("3"), text("Joinery")),
        location: RecordRef::new(text("2"), text("Main Yard")),
        lines: vec![
            OrderLineRecord {
                item: RecordRef::new(text("501"), text("Oak Board 30mm")),
                quantity: text("12"),
                description: text("Kiln dried oak, planed all round"),
                width: text("150"),
                length: text("2400"),
                amount: text("384.00"),
            },
            OrderLineRecord {
                item: RecordRef::new(text("502"), text("Pine Batten")),
                quantity: text("40"),
                description: None,
                width: None,
                length: None,
                amount: text("96.00"),
            },
        ],
    }
}

impl RecordStore for SqliteStore {
    fn load_purchase_order(&self, po_id: &str) -> Result<PurchaseOrderRecord, StoreError> {
        let conn = self.connect()?;
        let header = conn.query_row(
            "SELECT id, tran_id, entity_id, entity_name, plot_id, plot_name,
                    department_id, department_name, location_id, location_name
             FROM purchase_orders WHERE id = ?1",
            params![po_id],
            |row| {
                Ok(PurchaseOrderRecord {
                    id: row.get(0)?,
                    tran_id: row.get(1)?,
                    entity: RecordRef::new(row.get(2)?, row.get(3)?),
                    plot: RecordRef::new(row.get(4)?, row.get(5)?),
                    department: RecordRef::new(row.get(6)?, row.get(7)?),
                    location: RecordRef::new(row.get(8)?, row.get(9)?),
                    lines: Vec::new(),
                })
            },
        );

        let mut order = match header {
            Ok(order) => order,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(StoreError::NotFound {
                    record_type: PURCHASE_ORDER_TYPE,
                    id: po_id.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let mut stmt = conn.prepare(
            "SELECT item_id, item_name, quantity, description, width, length, amount
             FROM purchase_order_lines WHERE po_id = ?1 ORDER BY line",
        )?;
        order.lines = stmt
            .query_map(params![po_id], |row| {
                Ok(OrderLineRecord {
                    item: RecordRef::new(row.get(0)?, row.get(1)?),
                    quantity: row.get(2)?,
                    description: row.get(3)?,
                    width: row.get(4)?,
                    length: row.get(5)?,
                    amount: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(order)
    }

    fn vendor_company_name(&self, vendor_id: &str) -> Result<Option<String>, StoreError> {
        let conn = self.connect()?;
        let result = conn.query_row(
            "SELECT company_name FROM vendors WHERE id = ?1",
            params![vendor_id],
            |row| row.get::<_, Option<String>>(0),
        );
        match result {
            Ok(name) => Ok(name),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn active_fault_issues(&self) -> Result<Vec<FaultIssueOption>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, name FROM fault_issues WHERE is_inactive = 0 ORDER BY sort_order, name",
        )?;
        let options = stmt
            .query_map([], |row| Ok(FaultIssueOption::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(options)
    }

    fn create_defect(&self, record: &DefectRecord) -> Result<String, StoreError> {
        let values = record.values();
        let conn = self.connect()?;

        if values.is_empty() {
            conn.execute(&format!("INSERT INTO {DEFECT_RECORD_TYPE} DEFAULT VALUES"), [])?;
        } else {
            let columns = values
                .iter()
                .map(|(field, _)| field.field_id())
                .collect::<Vec<_>>()
                .join(", ");
            let placeholders = (1..=values.len())
                .map(|i| format!("?{i}"))
                .collect::<Vec<_>>()
                .join(", ");
            conn.execute(
                &format!("INSERT INTO {DEFECT_RECORD_TYPE} ({columns}) VALUES ({placeholders})"),
                params_from_iter(values.iter().map(|(_, value)| *value)),
            )?;
        }

        Ok(conn.last_insert_rowid().to_string())
    }
}
