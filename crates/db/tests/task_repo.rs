//! Integration tests for `TaskRepo`: positions, completion and percentage
//! recomputation.

use chrono::NaiveDate;
use perfectme_core::task_rules::TaskChanges;
use perfectme_core::types::DbId;
use perfectme_db::models::task::NewTask;
use perfectme_db::repositories::{TaskListRepo, TaskRepo};
use sqlx::{PgConnection, PgPool};

async fn new_list(conn: &mut PgConnection, owner_id: DbId) -> DbId {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    TaskListRepo::get_or_create_locked(conn, owner_id, today)
        .await
        .unwrap()
        .id
}

async fn add_task(conn: &mut PgConnection, task_list_id: DbId, title: &str) -> DbId {
    let position = TaskRepo::max_position(&mut *conn, task_list_id)
        .await
        .unwrap()
        .unwrap_or(0)
        + 1;
    TaskRepo::insert(
        conn,
        &NewTask {
            task_list_id,
            title: title.to_string(),
            description: String::new(),
            position,
        },
    )
    .await
    .unwrap()
    .id
}

fn total(percentages: impl IntoIterator<Item = f64>) -> f64 {
    percentages.into_iter().sum()
}

// ---------------------------------------------------------------------------
// Insert and lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_starts_with_zero_percentage(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let list_id = new_list(&mut conn, 1).await;

    let id = add_task(&mut conn, list_id, "Write report").await;
    let task = TaskRepo::find_owned(&mut *conn, id, 1).await.unwrap().unwrap();

    assert_eq!(task.percentage, 0.0);
    assert_eq!(task.position, 1);
    assert!(!task.is_completed);
    assert_eq!(TaskRepo::count_for_list(&mut *conn, list_id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_owned_hides_other_owners_tasks(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let list_id = new_list(&mut conn, 1).await;
    let id = add_task(&mut conn, list_id, "Private").await;

    assert!(TaskRepo::find_owned(&mut *conn, id, 2).await.unwrap().is_none());

    let memberships = TaskRepo::find_owned_memberships(&mut *conn, &[id, 9_999], 1)
        .await
        .unwrap();
    assert_eq!(memberships, vec![(id, list_id)]);
}

// ---------------------------------------------------------------------------
// Recompute
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_follows_position_order(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let list_id = new_list(&mut conn, 1).await;
    for title in ["A", "B", "C"] {
        add_task(&mut conn, list_id, title).await;
    }

    TaskRepo::recompute_percentages(&mut *conn, list_id).await.unwrap();
    let tasks = TaskRepo::list_for_list(&mut *conn, list_id).await.unwrap();

    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    assert!(tasks[0].percentage > tasks[1].percentage);
    assert!(tasks[1].percentage > tasks[2].percentage);
    assert!((total(tasks.iter().map(|t| t.percentage)) - 100.0).abs() <= 0.01);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_after_delete_gives_the_survivor_everything(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let list_id = new_list(&mut conn, 1).await;
    let first = add_task(&mut conn, list_id, "First").await;
    let second = add_task(&mut conn, list_id, "Second").await;
    TaskRepo::recompute_percentages(&mut *conn, list_id).await.unwrap();

    assert!(TaskRepo::delete(&mut *conn, first).await.unwrap());
    TaskRepo::recompute_percentages(&mut *conn, list_id).await.unwrap();

    let survivor = TaskRepo::find_owned(&mut *conn, second, 1).await.unwrap().unwrap();
    assert_eq!(survivor.percentage, 100.0);
    // Positions are not compacted by a delete.
    assert_eq!(survivor.position, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_on_empty_list_is_a_no_op(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let list_id = new_list(&mut conn, 1).await;

    TaskRepo::recompute_percentages(&mut *conn, list_id).await.unwrap();
    assert!(TaskRepo::list_for_list(&mut *conn, list_id).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Positions, completion and field updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_positions_rewrites_the_order(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let list_id = new_list(&mut tx, 1).await;
    let a = add_task(&mut tx, list_id, "A").await;
    let b = add_task(&mut tx, list_id, "B").await;
    let c = add_task(&mut tx, list_id, "C").await;

    let updated = TaskRepo::set_positions(&mut *tx, list_id, &[c, a, b]).await.unwrap();
    assert_eq!(updated, 3);
    tx.commit().await.unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let order: Vec<DbId> = TaskRepo::list_for_list(&mut *conn, list_id)
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(order, vec![c, a, b]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_stamps_and_clears_completed_at(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let list_id = new_list(&mut conn, 1).await;
    let id = add_task(&mut conn, list_id, "Ship it").await;

    let done = TaskRepo::set_completion(&mut *conn, id, true).await.unwrap();
    assert!(done.is_completed);
    assert!(done.completed_at.is_some());

    let undone = TaskRepo::set_completion(&mut *conn, id, false).await.unwrap();
    assert!(!undone.is_completed);
    assert!(undone.completed_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_fields_leaves_missing_fields_alone(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let list_id = new_list(&mut conn, 1).await;
    let id = add_task(&mut conn, list_id, "Original").await;

    let changes = TaskChanges {
        title: None,
        description: Some("details".to_string()),
    };
    let updated = TaskRepo::update_fields(&mut *conn, id, &changes).await.unwrap();
    assert_eq!(updated.title, "Original");
    assert_eq!(updated.description, "details");
}
