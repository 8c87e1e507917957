// ==========================================
// Station Registry - request context
// ==========================================
// Authorization state is passed explicitly into every repository and
// aggregator call instead of living in ambient session state; the
// admin gate becomes a plain function argument.
// ==========================================

use crate::domain::types::Role;
use serde::{Deserialize, Serialize};

/// Request-scoped context: who is acting and with which role.
///
/// `user_label` is a display string (role label by convention), not a
/// true user identity; it is stamped onto maintenance journal rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub role: Role,
    pub user_label: String,
}

impl RequestContext {
    pub fn new(role: Role, user_label: impl Into<String>) -> Self {
        Self {
            role,
            user_label: user_label.into(),
        }
    }

    /// Admin context labeled with the role name.
    pub fn admin() -> Self {
        Self::new(Role::Admin, Role::Admin.label())
    }

    /// Viewer context labeled with the role name.
    pub fn viewer() -> Self {
        Self::new(Role::Viewer, Role::Viewer.label())
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
