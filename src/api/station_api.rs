// ==========================================
// Station Registry - station API
// ==========================================
// Same shape as the employee API; the one deliberate difference is
// update_notes, which any authenticated role may call.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::context::RequestContext;
use crate::domain::station::{Station, StationDraft};
use crate::domain::types::RegionFilter;
use crate::repository::StationRepository;
use crate::storage::{AttachmentKind, AttachmentStore};

pub struct StationApi {
    repo: StationRepository,
    attachments: AttachmentStore,
}

impl StationApi {
    pub fn new(repo: StationRepository, attachments: AttachmentStore) -> Self {
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

    fn checked_draft(draft: &StationDraft) -> ApiResult<StationDraft> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("station name is required".into()));
        }
        let mut checked = draft.clone();
        checked.name = name.to_string();
        Ok(checked)
    }

    /// Filtered listing, ordered by name.
    pub fn list(&self, search: &str, region_filter: &RegionFilter) -> ApiResult<Vec<Station>> {
        Ok(self.repo.fetch(search, region_filter)?)
    }

    pub fn get(&self, id: i64) -> ApiResult<Option<Station>> {
        Ok(self.repo.find_by_id(id)?)
    }

    pub fn add(&self, ctx: &RequestContext, draft: &StationDraft) -> ApiResult<i64> {
        Self::require_admin(ctx, "adding a station")?;
        let draft = Self::checked_draft(draft)?;

        if self.repo.exists(&draft.name, None)? {
            return Err(ApiError::DuplicateKey(draft.name));
        }
        Ok(self.repo.add(&draft)?)
    }

    pub fn update(&self, ctx: &RequestContext, id: i64, draft: &StationDraft) -> ApiResult<()> {
        Self::require_admin(ctx, "updating a station")?;
        let draft = Self::checked_draft(draft)?;

        if self.repo.exists(&draft.name, Some(id))? {
            return Err(ApiError::DuplicateKey(draft.name));
        }
        Ok(self.repo.update(id, &draft)?)
    }

    /// Update only the notes field. Deliberately open to the viewer
    /// role: field technicians annotate stations without admin rights.
    pub fn update_notes(&self, ctx: &RequestContext, id: i64, notes: &str) -> ApiResult<()> {
        self.repo.update_notes(id, notes)?;
        tracing::debug!(id, by = %ctx.user_label, "station notes updated");
        Ok(())
    }

    /// Hard delete. Maintenance history stays behind as orphaned
    /// journal rows.
    pub fn delete(&self, ctx: &RequestContext, id: i64) -> ApiResult<()> {
        Self::require_admin(ctx, "deleting a station")?;
        Ok(self.repo.delete(id)?)
    }

    pub fn attach_photo(
        &self,
        ctx: &RequestContext,
        id: i64,
        filename_hint: &str,
        bytes: &[u8],
    ) -> ApiResult<String> {
        self.attach(ctx, id, AttachmentKind::Photo, filename_hint, bytes)
    }

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

        let station = self
            .repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("station (id={id})")))?;

        let stored = self.attachments.store(kind, filename_hint, bytes)?;

        let mut draft = station.to_draft();
        match kind {
            AttachmentKind::Photo => draft.photo_path = Some(stored.clone()),
            AttachmentKind::Pdf => draft.pdf_path = Some(stored.clone()),
        }
        self.repo.update(id, &draft)?;
        Ok(stored)
    }
}
