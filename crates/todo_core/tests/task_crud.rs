use chrono::NaiveDate;
use todo_core::db::open_db_in_memory;
use todo_core::{
    FileRef, NewTask, RepoError, SqliteTaskRepository, TaskPatch, TaskRepository,
};
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn file(uid: &str, name: &str) -> FileRef {
    FileRef {
        uid: uid.to_string(),
        name: name.to_string(),
        url: format!("file:///store/files/{uid}-{name}"),
    }
}

#[test]
fn add_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let new_task = NewTask::new("Dentist", "Call to reschedule", day(2024, 6, 3))
        .with_files(vec![file("u1", "card.pdf"), file("u2", "map.png")]);
    let id = repo.add_task(&new_task).unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.title, "Dentist");
    assert_eq!(loaded.text, "Call to reschedule");
    assert_eq!(loaded.due_date, day(2024, 6, 3));
    assert!(!loaded.is_done);
    assert_eq!(loaded.files, new_task.files);
}

#[test]
fn get_unknown_task_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    assert!(repo.get_task(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn update_merges_patch_and_keeps_files_unless_given() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let id = repo
        .add_task(
            &NewTask::new("Draft", "first pass", day(2024, 6, 3))
                .with_files(vec![file("u1", "notes.txt")]),
        )
        .unwrap();

    repo.update_task(
        id,
        &TaskPatch {
            title: Some("Final".to_string()),
            is_done: Some(true),
            ..TaskPatch::default()
        },
    )
    .unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded.title, "Final");
    assert_eq!(loaded.text, "first pass");
    assert!(loaded.is_done);
    assert_eq!(loaded.files, vec![file("u1", "notes.txt")]);

    repo.update_task(
        id,
        &TaskPatch {
            files: Some(vec![file("u2", "b.txt"), file("u3", "a.txt")]),
            ..TaskPatch::default()
        },
    )
    .unwrap();
    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded.files, vec![file("u2", "b.txt"), file("u3", "a.txt")]);
}

#[test]
fn update_unknown_task_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let missing = Uuid::new_v4();
    let err = repo
        .update_task(missing, &TaskPatch::default())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn validation_failure_blocks_add_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo
        .add_task(&NewTask::new("  ", "text", day(2024, 6, 3)))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let id = repo
        .add_task(&NewTask::new("ok", "text", day(2024, 6, 3)))
        .unwrap();
    let err = repo
        .update_task(
            id,
            &TaskPatch {
                text: Some(String::new()),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.get_task(id).unwrap().unwrap().text, "text");
}

#[test]
fn delete_returns_removed_task_and_cascades_files() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let id = repo
        .add_task(
            &NewTask::new("Trip", "pack", day(2024, 7, 1)).with_files(vec![file("u1", "ticket")]),
        )
        .unwrap();

    let removed = repo.delete_task(id).unwrap();
    assert_eq!(removed.files, vec![file("u1", "ticket")]);
    assert!(repo.get_task(id).unwrap().is_none());

    let orphan_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM task_files;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(orphan_rows, 0);

    let err = repo.delete_task(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn list_orders_by_due_date_then_insertion() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let late = repo
        .add_task(&NewTask::new("late", "x", day(2024, 9, 1)))
        .unwrap();
    let early_first = repo
        .add_task(&NewTask::new("early 1", "x", day(2024, 1, 1)))
        .unwrap();
    let early_second = repo
        .add_task(&NewTask::new("early 2", "x", day(2024, 1, 1)))
        .unwrap();

    let ids = repo
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![early_first, early_second, late]);
}

#[test]
fn list_orders_five_digit_years_after_four_digit_years() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    repo.add_task(&NewTask::new("far", "x", day(10000, 1, 1)))
        .unwrap();
    repo.add_task(&NewTask::new("near", "x", day(2024, 1, 1)))
        .unwrap();
    repo.add_task(&NewTask::new("ancient", "x", day(1, 1, 1)))
        .unwrap();

    let titles = repo
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["ancient", "near", "far"]);

    let far = repo.list_tasks().unwrap().pop().unwrap();
    assert_eq!(far.due_date, day(10000, 1, 1));
}

#[test]
fn corrupted_due_date_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let id = repo
        .add_task(&NewTask::new("t", "x", day(2024, 1, 1)))
        .unwrap();

    conn.execute(
        "UPDATE tasks SET due_day = 99999999999 WHERE uuid = ?1;",
        [id.to_string()],
    )
    .unwrap();

    let err = repo.get_task(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("99999999999")));
}
