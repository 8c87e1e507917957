// ==========================================
// Station Registry - employee API
// ==========================================
// Owns validation, the advisory uniqueness pre-check and the role
// gate; delegates data access to the repository. Mutations require
// the admin role from the request context.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::context::RequestContext;
use crate::domain::employee::{Employee, EmployeeDraft};
use crate::domain::types::RegionFilter;
use crate::repository::EmployeeRepository;
use crate::storage::{AttachmentKind, AttachmentStore};

pub struct EmployeeApi {
    repo: EmployeeRepository,
    attachments: AttachmentStore,
}

impl EmployeeApi {
    pub fn new(repo: EmployeeRepository, attachments: AttachmentStore) -> Self {
        Self { repo, attachments }
    }

    fn require_admin(ctx: &RequestContext, action: &str) -> ApiResult<()> {
        if ctx.is_admin() {
            Ok(())
        } else {
            Err(ApiError::PermissionDenied(format!(
                "{action} requires the admin role"
            )))
        }
    }

    /// Draft with a trimmed, validated business key.
    fn checked_draft(draft: &EmployeeDraft) -> ApiResult<EmployeeDraft> {
        let tabel = draft.tabel_number.trim();
        if tabel.is_empty() {
            return Err(ApiError::Validation("tabel number is required".into()));
        }
        let mut checked = draft.clone();
        checked.tabel_number = tabel.to_string();
        Ok(checked)
    }

    /// Filtered listing, ordered by tabel number.
    pub fn list(&self, search: &str, region_filter: &RegionFilter) -> ApiResult<Vec<Employee>> {
        Ok(self.repo.fetch(search, region_filter)?)
    }

    pub fn get(&self, id: i64) -> ApiResult<Option<Employee>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Create an employee. The pre-check is an advisory fast-fail; the
    /// store's UNIQUE constraint still rejects a concurrent duplicate.
    pub fn add(&self, ctx: &RequestContext, draft: &EmployeeDraft) -> ApiResult<i64> {
        Self::require_admin(ctx, "adding an employee")?;
        let draft = Self::checked_draft(draft)?;

        if self.repo.exists(&draft.tabel_number, None)? {
            return Err(ApiError::DuplicateKey(draft.tabel_number));
        }
        Ok(self.repo.add(&draft)?)
    }

    /// Full-record update; the unchanged key of the row itself stays
    /// valid via exclude_id.
    pub fn update(&self, ctx: &RequestContext, id: i64, draft: &EmployeeDraft) -> ApiResult<()> {
        Self::require_admin(ctx, "updating an employee")?;
        let draft = Self::checked_draft(draft)?;

        if self.repo.exists(&draft.tabel_number, Some(id))? {
            return Err(ApiError::DuplicateKey(draft.tabel_number));
        }
        Ok(self.repo.update(id, &draft)?)
    }

    pub fn delete(&self, ctx: &RequestContext, id: i64) -> ApiResult<()> {
        Self::require_admin(ctx, "deleting an employee")?;
        Ok(self.repo.delete(id)?)
    }

    /// Store a photo and point the row at it. The file is written
    /// first; a storage failure leaves the row untouched.
    pub fn attach_photo(
        &self,
        ctx: &RequestContext,
        id: i64,
        filename_hint: &str,
        bytes: &[u8],
    ) -> ApiResult<String> {
        self.attach(ctx, id, AttachmentKind::Photo, filename_hint, bytes)
    }

    /// Store a PDF document and point the row at it.
    pub fn attach_pdf(
        &self,
        ctx: &RequestContext,
        id: i64,
        filename_hint: &str,
        bytes: &[u8],
    ) -> ApiResult<String> {
        self.attach(ctx, id, AttachmentKind::Pdf, filename_hint, bytes)
    }

    fn attach(
        &self,
        ctx: &RequestContext,
        id: i64,
        kind: AttachmentKind,
        filename_hint: &str,
        bytes: &[u8],
    ) -> ApiResult<String> {
        Self::require_admin(ctx, "attaching a file")?;

        let employee = self
            .repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("employee (id={id})")))?;

        let stored = self.attachments.store(kind, filename_hint, bytes)?;

        let mut draft = employee.to_draft();
        match kind {
            AttachmentKind::Photo => draft.photo_path = Some(stored.clone()),
            AttachmentKind::Pdf => draft.pdf_path = Some(stored.clone()),
        }
        self.repo.update(id, &draft)?;
        Ok(stored)
    }
}
