//! Types shared between the defect handler (`backend`) and the report button (`frontend`).
//!
//! - `model`: the source-order snapshot, the selected line item, and the
//!   Manufacturing Defect record with its fixed field map.
//! - `requests`: the wire payloads (form submission, JSON trigger body, JSON acknowledgement).
//! - `trigger`: what the report button does when it is clicked.
//! - `error`: validation and trigger failures.

pub mod error;
pub mod model;
pub mod requests;
pub mod trigger;
