// ==========================================
// Station Registry - employee entity
// ==========================================

use crate::domain::types::Region;
use serde::{Deserialize, Serialize};

// ==========================================
// Employee - stored row
// ==========================================
// Business key: tabel_number (unique among live rows).
// hire_date is deliberately free text; legacy rows carry values that do
// not parse as dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub tabel_number: String,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: String,
    pub region: Region,
    pub hire_date: String,
    pub position: String,
    pub phone: String,
    pub contract_no: String,
    pub pdf_path: Option<String>,
    pub photo_path: Option<String>,
}

// ==========================================
// EmployeeDraft - upsert payload
// ==========================================
// Named fields instead of a positional tuple: adding a column cannot
// silently reorder the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub tabel_number: String,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: String,
    pub region: Region,
    pub hire_date: String,
    pub position: String,
    pub phone: String,
    pub contract_no: String,
    pub pdf_path: Option<String>,
    pub photo_path: Option<String>,
}

impl Employee {
    /// The draft that would reproduce this row on update.
    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            tabel_number: self.tabel_number.clone(),
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            patronymic: self.patronymic.clone(),
            region: self.region.clone(),
            hire_date: self.hire_date.clone(),
            position: self.position.clone(),
            phone: self.phone.clone(),
            contract_no: self.contract_no.clone(),
            pdf_path: self.pdf_path.clone(),
            photo_path: self.photo_path.clone(),
        }
    }
}
