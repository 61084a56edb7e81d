//! Integration tests for entity CRUD operations.
//!
//! Exercises the repository layer against a real database:
//! - Field fidelity on create and round-trip reads
//! - Full-replace update semantics
//! - Cascade delete from project to milestones/deliverables
//! - Invoice detachment (SET NULL) on project delete
//! - Identity-sync idempotency

use assert_matches::assert_matches;
use lollyshoppe_core::status::{InvoiceStatus, ProjectStatus, UserRole};
use lollyshoppe_db::models::deliverable::DeliverableForm;
use lollyshoppe_db::models::invoice::InvoiceForm;
use lollyshoppe_db::models::milestone::MilestoneForm;
use lollyshoppe_db::models::project::ProjectForm;
use lollyshoppe_db::models::user::SyncUser;
use lollyshoppe_db::repositories::{
    DeliverableRepo, InvoiceRepo, MilestoneRepo, ProjectRepo, UserRepo,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sync_user(external_id: &str) -> SyncUser {
    SyncUser {
        external_id: external_id.to_string(),
        email: format!("{external_id}@example.com"),
        first_name: Some("Ada".to_string()),
        last_name: None,
    }
}

fn new_project(client_id: i64, title: &str) -> ProjectForm {
    ProjectForm {
        title: title.to_string(),
        description: "Build and launch MVP for client X".to_string(),
        status: ProjectStatus::Pending,
        budget: None,
        start_date: None,
        end_date: None,
        client_id,
    }
}

fn new_milestone(project_id: i64, title: &str, sort_order: i32) -> MilestoneForm {
    MilestoneForm {
        title: title.to_string(),
        description: None,
        due_date: None,
        sort_order,
        project_id,
    }
}

fn new_deliverable(project_id: i64, title: &str) -> DeliverableForm {
    DeliverableForm {
        title: title.to_string(),
        description: None,
        file_url: Some("https://files.example.com/proposal.pdf".to_string()),
        project_id,
    }
}

fn new_invoice(client_id: i64, project_id: Option<i64>, number: &str) -> InvoiceForm {
    InvoiceForm {
        invoice_number: number.to_string(),
        amount: "1000".parse().unwrap(),
        status: InvoiceStatus::Draft,
        due_date: None,
        client_id,
        project_id,
    }
}

// ---------------------------------------------------------------------------
// Identity sync
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn sync_creates_client_on_first_sight(pool: PgPool) {
    let user = UserRepo::find_or_create(&pool, &sync_user("sub_new"))
        .await
        .unwrap();

    assert_eq!(user.external_id, "sub_new");
    assert_eq!(user.email, "sub_new@example.com");
    assert_eq!(user.role, UserRole::Client);
}

#[sqlx::test(migrations = "./migrations")]
async fn sync_is_idempotent_and_never_rewrites(pool: PgPool) {
    let first = UserRepo::find_or_create(&pool, &sync_user("sub_idem"))
        .await
        .unwrap();

    // Second sync with changed attributes must return the stored row as-is.
    let changed = SyncUser {
        email: "changed@example.com".to_string(),
        first_name: Some("Grace".to_string()),
        ..sync_user("sub_idem")
    };
    let second = UserRepo::find_or_create(&pool, &changed).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.email, "sub_idem@example.com");
    assert_eq!(second.first_name.as_deref(), Some("Ada"));

    let all = UserRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_by_role_filters_clients(pool: PgPool) {
    let user = UserRepo::find_or_create(&pool, &sync_user("sub_role"))
        .await
        .unwrap();
    sqlx::query("UPDATE users SET role = 'ADMIN' WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    UserRepo::find_or_create(&pool, &sync_user("sub_client"))
        .await
        .unwrap();

    let clients = UserRepo::list_by_role(&pool, UserRole::Client).await.unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].external_id, "sub_client");
}

// ---------------------------------------------------------------------------
// Project CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_then_get_returns_identical_fields(pool: PgPool) {
    let client = UserRepo::find_or_create(&pool, &sync_user("sub_p1"))
        .await
        .unwrap();

    let mut form = new_project(client.id, "MVP Build");
    form.budget = Some("12500.50".parse().unwrap());
    form.start_date = Some("2026-08-10".parse().unwrap());

    let created = ProjectRepo::create(&pool, &form).await.unwrap();
    let fetched = ProjectRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("project should exist");

    assert_eq!(fetched.title, "MVP Build");
    assert_eq!(fetched.description, form.description);
    assert_eq!(fetched.status, ProjectStatus::Pending);
    assert_eq!(fetched.budget, form.budget);
    assert_eq!(fetched.start_date, form.start_date);
    assert_eq!(fetched.end_date, None);
    assert_eq!(fetched.client_id, client.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_is_full_replace(pool: PgPool) {
    let client = UserRepo::find_or_create(&pool, &sync_user("sub_p2"))
        .await
        .unwrap();

    let mut form = new_project(client.id, "With Budget");
    form.budget = Some("9000".parse().unwrap());
    let created = ProjectRepo::create(&pool, &form).await.unwrap();

    // Replace with a form that omits the budget; the stored value clears.
    let mut replacement = new_project(client.id, "Without Budget");
    replacement.status = ProjectStatus::InProgress;
    let updated = ProjectRepo::update(&pool, created.id, &replacement)
        .await
        .unwrap()
        .expect("project should exist");

    assert_eq!(updated.title, "Without Budget");
    assert_eq!(updated.status, ProjectStatus::InProgress);
    assert_eq!(updated.budget, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_missing_project_returns_none(pool: PgPool) {
    let client = UserRepo::find_or_create(&pool, &sync_user("sub_p3"))
        .await
        .unwrap();
    let result = ProjectRepo::update(&pool, 999_999, &new_project(client.id, "Ghost"))
        .await
        .unwrap();
    assert_matches!(result, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_joins_client_and_counts_children(pool: PgPool) {
    let client = UserRepo::find_or_create(&pool, &sync_user("sub_p4"))
        .await
        .unwrap();
    let project = ProjectRepo::create(&pool, &new_project(client.id, "Counted"))
        .await
        .unwrap();
    MilestoneRepo::create(&pool, &new_milestone(project.id, "Wireframes", 0))
        .await
        .unwrap();
    MilestoneRepo::create(&pool, &new_milestone(project.id, "Launch", 1))
        .await
        .unwrap();
    DeliverableRepo::create(&pool, &new_deliverable(project.id, "Proposal"))
        .await
        .unwrap();

    let items = ProjectRepo::list(&pool).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].client_email, "sub_p4@example.com");
    assert_eq!(items[0].client_first_name.as_deref(), Some("Ada"));
    assert_eq!(items[0].milestone_count, 2);
    assert_eq!(items[0].deliverable_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_by_client_scopes_rows(pool: PgPool) {
    let one = UserRepo::find_or_create(&pool, &sync_user("sub_c1"))
        .await
        .unwrap();
    let two = UserRepo::find_or_create(&pool, &sync_user("sub_c2"))
        .await
        .unwrap();
    ProjectRepo::create(&pool, &new_project(one.id, "For One"))
        .await
        .unwrap();
    ProjectRepo::create(&pool, &new_project(two.id, "For Two"))
        .await
        .unwrap();

    let scoped = ProjectRepo::list_by_client(&pool, one.id).await.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].title, "For One");
}

// ---------------------------------------------------------------------------
// Cascade delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deleting_project_cascades_to_children(pool: PgPool) {
    let client = UserRepo::find_or_create(&pool, &sync_user("sub_del"))
        .await
        .unwrap();
    let project = ProjectRepo::create(&pool, &new_project(client.id, "Doomed"))
        .await
        .unwrap();
    let milestone = MilestoneRepo::create(&pool, &new_milestone(project.id, "Wireframes", 0))
        .await
        .unwrap();
    DeliverableRepo::create(&pool, &new_deliverable(project.id, "Mockups"))
        .await
        .unwrap();

    let deleted = ProjectRepo::delete(&pool, project.id).await.unwrap();
    assert!(deleted);

    let milestones = MilestoneRepo::list_by_project(&pool, project.id)
        .await
        .unwrap();
    assert!(milestones.is_empty());

    let deliverables = DeliverableRepo::list_by_project(&pool, project.id)
        .await
        .unwrap();
    assert!(deliverables.is_empty());

    let gone = MilestoneRepo::find_by_id(&pool, milestone.id, project.id)
        .await
        .unwrap();
    assert_matches!(gone, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_project_detaches_invoices(pool: PgPool) {
    let client = UserRepo::find_or_create(&pool, &sync_user("sub_inv"))
        .await
        .unwrap();
    let project = ProjectRepo::create(&pool, &new_project(client.id, "Billed"))
        .await
        .unwrap();
    let invoice = InvoiceRepo::create(&pool, &new_invoice(client.id, Some(project.id), "INV-1"))
        .await
        .unwrap();

    ProjectRepo::delete(&pool, project.id).await.unwrap();

    let survivor = InvoiceRepo::find_by_id(&pool, invoice.id)
        .await
        .unwrap()
        .expect("invoice must survive project deletion");
    assert_eq!(survivor.project_id, None);
    assert_eq!(survivor.amount, Decimal::from(1000));
}

// ---------------------------------------------------------------------------
// Invoice CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn invoice_list_carries_display_references(pool: PgPool) {
    let client = UserRepo::find_or_create(&pool, &sync_user("sub_refs"))
        .await
        .unwrap();
    let project = ProjectRepo::create(&pool, &new_project(client.id, "Referenced"))
        .await
        .unwrap();
    InvoiceRepo::create(&pool, &new_invoice(client.id, Some(project.id), "INV-2"))
        .await
        .unwrap();
    InvoiceRepo::create(&pool, &new_invoice(client.id, None, "INV-3"))
        .await
        .unwrap();

    let items = InvoiceRepo::list(&pool).await.unwrap();
    assert_eq!(items.len(), 2);

    let linked = items.iter().find(|i| i.invoice_number == "INV-2").unwrap();
    assert_eq!(linked.project_title.as_deref(), Some("Referenced"));
    assert_eq!(linked.client_email, "sub_refs@example.com");

    let unlinked = items.iter().find(|i| i.invoice_number == "INV-3").unwrap();
    assert_eq!(unlinked.project_title, None);
}
