use memopad_core::db::migrations::latest_version;
use memopad_core::db::{open_db, open_db_in_memory};
use memopad_core::{MemoDraft, MemoRepository, MemoStore, RepoError, SqliteMemoRepository};
use rusqlite::{params, Connection};
use uuid::Uuid;

#[test]
fn insert_returns_canonical_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&conn).unwrap();

    let memo = repo
        .insert(&MemoDraft::new("Groceries", "Milk, eggs"))
        .unwrap();

    assert_eq!(memo.title, "Groceries");
    assert_eq!(memo.content, "Milk, eggs");
    assert!(memo.created_at > 0);
    assert_eq!(memo.updated_at, memo.created_at);

    let loaded = repo.load_all().unwrap();
    assert_eq!(loaded, vec![memo]);
}

#[test]
fn insert_rejects_empty_title_without_touching_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&conn).unwrap();

    // Bypass MemoDraft::new trimming to hit the repository-side guard.
    let draft = MemoDraft {
        title: String::new(),
        content: "orphan content".to_string(),
    };
    let err = repo.insert(&draft).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.load_all().unwrap().is_empty());
}

#[test]
fn load_all_orders_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&conn).unwrap();

    let older = repo.insert(&MemoDraft::new("older", "")).unwrap();
    let newer = repo.insert(&MemoDraft::new("newer", "")).unwrap();

    set_timestamps(&conn, older.id, 1_000);
    set_timestamps(&conn, newer.id, 2_000);

    let loaded = repo.load_all().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, newer.id);
    assert_eq!(loaded[1].id, older.id);
}

#[test]
fn update_replaces_fields_and_stamps_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&conn).unwrap();

    let memo = repo.insert(&MemoDraft::new("Recipe", "flour")).unwrap();
    set_timestamps(&conn, memo.id, 1_000);

    let updated = repo
        .update_by_id(memo.id, &MemoDraft::new("Recipe v2", "flour, sugar"))
        .unwrap();

    assert_eq!(updated.id, memo.id);
    assert_eq!(updated.title, "Recipe v2");
    assert_eq!(updated.content, "flour, sugar");
    assert_eq!(updated.created_at, 1_000);
    assert!(updated.updated_at > updated.created_at);
}

#[test]
fn update_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&conn).unwrap();

    let missing = Uuid::new_v4();
    let err = repo
        .update_by_id(missing, &MemoDraft::new("ghost", ""))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn delete_removes_row_and_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&conn).unwrap();

    let memo = repo.insert(&MemoDraft::new("ephemeral", "")).unwrap();
    repo.delete_by_id(memo.id).unwrap();
    assert!(repo.load_all().unwrap().is_empty());

    let err = repo.delete_by_id(memo.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == memo.id));
}

#[test]
fn records_survive_reopening_a_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memopad.db");

    let created_id = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteMemoRepository::try_new(&conn).unwrap();
        repo.insert(&MemoDraft::new("persisted", "across reopen"))
            .unwrap()
            .id
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteMemoRepository::try_new(&conn).unwrap();
    let loaded = repo.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, created_id);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteMemoRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_memos_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteMemoRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("memos"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_memos_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE memos (
            uuid TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT '',
            created_at INTEGER NOT NULL DEFAULT 0
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteMemoRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "memos",
            column: "updated_at"
        })
    ));
}

#[test]
fn memo_serializes_with_stable_field_names() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&conn).unwrap();

    let memo = repo.insert(&MemoDraft::new("Trip plan", "pack passport")).unwrap();
    let json = serde_json::to_value(&memo).unwrap();

    assert_eq!(json["id"], serde_json::json!(memo.id.to_string()));
    assert_eq!(json["title"], "Trip plan");
    assert_eq!(json["content"], "pack passport");
    assert_eq!(json["created_at"], serde_json::json!(memo.created_at));
    assert_eq!(json["updated_at"], serde_json::json!(memo.updated_at));
}

#[test]
fn store_wraps_repository_calls_end_to_end() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&conn).unwrap();
    let mut store = MemoStore::new(repo);

    store.load().unwrap();
    assert!(store.memos().is_empty());

    let memo = store.create("Groceries", "Milk, eggs").unwrap();
    store
        .update(memo.id, "Groceries", "Milk, eggs, butter")
        .unwrap();
    assert_eq!(store.memos()[0].content, "Milk, eggs, butter");

    store.delete(memo.id).unwrap();
    assert!(store.memos().is_empty());
}

fn set_timestamps(conn: &Connection, id: Uuid, epoch_ms: i64) {
    conn.execute(
        "UPDATE memos SET created_at = ?2, updated_at = ?2 WHERE uuid = ?1;",
        params![id.to_string(), epoch_ms],
    )
    .unwrap();
}
