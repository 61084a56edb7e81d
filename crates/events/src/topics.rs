//! Well-known invalidation topic names.
//!
//! Mutations publish these; presentation consumers subscribe and re-fetch
//! whatever they were displaying under that topic. Names are plain strings
//! so subscribers outside this workspace can match on them without linking
//! any type.

use lollyshoppe_core::types::DbId;

/// The admin overview dashboard.
pub fn admin_dashboard() -> String {
    "admin-dashboard".to_string()
}

/// The client-facing dashboard (all clients re-derive their own slice).
pub fn client_dashboard() -> String {
    "client-dashboard".to_string()
}

/// The project list view.
pub fn projects_list() -> String {
    "projects-list".to_string()
}

/// A single project's detail view (milestones and deliverables included).
pub fn project_detail(id: DbId) -> String {
    format!("project-detail:{id}")
}

/// The invoice list view.
pub fn invoices_list() -> String {
    "invoices-list".to_string()
}

/// The user/client list views.
pub fn users_list() -> String {
    "users-list".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_topic_embeds_the_id() {
        assert_eq!(project_detail(17), "project-detail:17");
    }
}
