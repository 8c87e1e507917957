// ==========================================
// Station Registry - employee repository
// ==========================================
// Data access only; validation and role gating live in the API layer.
// All queries are parameterized.
// ==========================================

use crate::domain::employee::{Employee, EmployeeDraft};
use crate::domain::types::{Region, RegionFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const EMPLOYEE_COLUMNS: &str = "id, tabel_number, last_name, first_name, patronymic, region, \
     hire_date, position, phone, contract_no, pdf_path, photo_path";

/// Employee repository over the `employees` table.
pub struct EmployeeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_connection(db_path)
            .map_err(|e| RepositoryError::StoreUnavailable(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<Employee> {
        Ok(Employee {
            id: row.get(0)?,
            tabel_number: row.get(1)?,
            last_name: row.get(2)?,
            first_name: row.get(3)?,
            patronymic: row.get(4)?,
            region: Region::from_db_str(&row.get::<_, String>(5)?),
            hire_date: row.get(6)?,
            position: row.get(7)?,
            phone: row.get(8)?,
            contract_no: row.get(9)?,
            pdf_path: row.get(10)?,
            photo_path: row.get(11)?,
        })
    }

    /// True if a live row carries this tabel number, optionally excluding
    /// one id (edit-in-place keeps its own unchanged key valid).
    pub fn exists(&self, tabel_number: &str, exclude_id: Option<i64>) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let hit: Option<i64> = match exclude_id {
            None => conn
                .query_row(
                    "SELECT 1 FROM employees WHERE tabel_number = ?1 LIMIT 1",
                    params![tabel_number],
                    |row| row.get(0),
                )
                .optional()?,
            Some(id) => conn
                .query_row(
                    "SELECT 1 FROM employees WHERE tabel_number = ?1 AND id <> ?2 LIMIT 1",
                    params![tabel_number, id],
                    |row| row.get(0),
                )
                .optional()?,
        };
        Ok(hit.is_some())
    }

    /// Filtered fetch, ordered by tabel number ascending.
    ///
    /// Search does substring match (LIKE) OR-combined across the text
    /// columns: tabel_number, last_name, first_name, patronymic, phone.
    /// An empty search returns every row matching the region filter.
    pub fn fetch(
        &self,
        search: &str,
        region_filter: &RegionFilter,
    ) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;

        let mut sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees");
        let mut clauses: Vec<&str> = Vec::new();
        let mut bind: Vec<String> = Vec::new();

        if let Some(region) = region_filter.as_db_str() {
            clauses.push("region = ?");
            bind.push(region.to_string());
        }

        let search = search.trim();
        if !search.is_empty() {
            clauses.push(
                "(tabel_number LIKE ? OR last_name LIKE ? OR first_name LIKE ? \
                 OR patronymic LIKE ? OR phone LIKE ?)",
            );
            let like = format!("%{search}%");
            bind.extend(std::iter::repeat(like).take(5));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY tabel_number ASC");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(bind.iter()), |row| Self::map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Employee>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"
        ))?;
        match stmt.query_row(params![id], |row| Self::map_row(row)) {
            Ok(emp) => Ok(Some(emp)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a new employee and return the assigned id.
    ///
    /// The UNIQUE constraint on tabel_number is the fail-safe behind the
    /// API layer's advisory pre-check; a violation surfaces as
    /// `DuplicateKey` and writes nothing.
    pub fn add(&self, draft: &EmployeeDraft) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO employees (
                tabel_number, last_name, first_name, patronymic, region,
                hire_date, position, phone, contract_no, pdf_path, photo_path
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                draft.tabel_number,
                draft.last_name,
                draft.first_name,
                draft.patronymic,
                draft.region.to_db_str(),
                draft.hire_date,
                draft.position,
                draft.phone,
                draft.contract_no,
                draft.pdf_path,
                draft.photo_path,
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, tabel = %draft.tabel_number, "employee added");
        Ok(id)
    }

    /// Replace every mutable field of the row.
    pub fn update(&self, id: i64, draft: &EmployeeDraft) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            r#"
            UPDATE employees
            SET tabel_number = ?1, last_name = ?2, first_name = ?3, patronymic = ?4,
                region = ?5, hire_date = ?6, position = ?7, phone = ?8,
                contract_no = ?9, pdf_path = ?10, photo_path = ?11
            WHERE id = ?12
            "#,
            params![
                draft.tabel_number,
                draft.last_name,
                draft.first_name,
                draft.patronymic,
                draft.region.to_db_str(),
                draft.hire_date,
                draft.position,
                draft.phone,
                draft.contract_no,
                draft.pdf_path,
                draft.photo_path,
                id,
            ],
        )?;
        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity: "employee",
                id,
            });
        }
        Ok(())
    }

    /// Hard delete. Never cascades.
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM employees WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity: "employee",
                id,
            });
        }
        tracing::debug!(id, "employee deleted");
        Ok(())
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        Ok(n)
    }
}
