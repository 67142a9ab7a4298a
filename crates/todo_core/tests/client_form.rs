use chrono::NaiveDate;
use rusqlite::Connection;
use todo_core::db::open_db_in_memory;
use todo_core::{
    Attachment, FormError, FormField, FsObjectStore, NewTask, Notification, ObjectStore,
    SqliteTaskRepository, StaticConnectivity, StorageError, StorageResult, SubmitOutcome,
    TaskForm, TodoService,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    day(2024, 5, 10)
}

fn service<'conn>(
    conn: &'conn Connection,
    root: &std::path::Path,
) -> TodoService<SqliteTaskRepository<'conn>, FsObjectStore> {
    TodoService::new(
        SqliteTaskRepository::new(conn),
        FsObjectStore::open(root).unwrap(),
    )
}

fn filled_form() -> TaskForm {
    let mut form = TaskForm::new();
    form.set_title("Pay rent");
    form.set_text("Transfer before noon");
    form.choose_due_date(day(2024, 5, 31), today()).unwrap();
    form
}

struct RejectingStore;

impl ObjectStore for RejectingStore {
    fn put(&self, key: &str, _bytes: &[u8]) -> StorageResult<String> {
        Err(StorageError::InvalidKey(key.to_string()))
    }

    fn delete(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }

    fn is_reachable(&self) -> bool {
        true
    }
}

#[test]
fn submit_creates_task_and_resets_form() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = service(&conn, dir.path());

    let mut form = filled_form();
    form.stage_file(Attachment::pending("receipt.pdf", b"%PDF".to_vec()));

    let id = match form.submit(&service, &StaticConnectivity(true)) {
        SubmitOutcome::Saved(id) => id,
        other => panic!("unexpected outcome: {other:?}"),
    };

    let task = service.get_todo(id).unwrap().unwrap();
    assert_eq!(task.title, "Pay rent");
    assert_eq!(task.due_date, day(2024, 5, 31));
    assert!(!task.is_done);
    assert_eq!(task.files.len(), 1);
    assert_eq!(task.files[0].name, "receipt.pdf");

    assert_eq!(form, TaskForm::new());
}

#[test]
fn submit_with_blank_fields_sends_nothing() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = service(&conn, dir.path());

    let mut form = TaskForm::new();
    form.set_title("Only a title");
    let outcome = form.submit(&service, &StaticConnectivity(true));

    assert_eq!(
        outcome,
        SubmitOutcome::Invalid(FormError::Required(vec![
            FormField::Text,
            FormField::DueDate
        ]))
    );
    assert!(service.list_todos().unwrap().is_empty());
    assert_eq!(form.title(), "Only a title");
}

#[test]
fn offline_submit_notifies_and_keeps_fields() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = service(&conn, dir.path());

    let mut form = filled_form();
    let outcome = form.submit(&service, &StaticConnectivity(false));

    assert_eq!(outcome, SubmitOutcome::Failed(Notification::offline()));
    assert_eq!(form.title(), "Pay rent");
    assert!(service.list_todos().unwrap().is_empty());
}

#[test]
fn upload_failure_notifies_and_keeps_staged_files() {
    let conn = open_db_in_memory().unwrap();
    let service = TodoService::new(SqliteTaskRepository::new(&conn), RejectingStore);

    let mut form = filled_form();
    form.stage_file(Attachment::pending("big.iso", vec![0; 16]));
    let outcome = form.submit(&service, &StaticConnectivity(true));

    assert_eq!(outcome, SubmitOutcome::Failed(Notification::upload_failed()));
    assert_eq!(form.attachments().len(), 1);
    assert!(service.list_todos().unwrap().is_empty());
}

#[test]
fn save_failure_notifies_with_generic_message() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = service(&conn, dir.path());
    let id = match filled_form().submit(&service, &StaticConnectivity(true)) {
        SubmitOutcome::Saved(id) => id,
        other => panic!("unexpected outcome: {other:?}"),
    };
    let task = service.get_todo(id).unwrap().unwrap();

    let mut form = TaskForm::for_edit(&task);
    service.delete_todo(id).unwrap();

    let outcome = form.submit(&service, &StaticConnectivity(true));
    assert_eq!(outcome, SubmitOutcome::Failed(Notification::save_failed()));
    assert_eq!(form.editing(), Some(id));
}

#[test]
fn edit_updates_fields_keeps_completion_and_existing_files() {
    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = service(&conn, dir.path());

    let mut form = filled_form();
    form.stage_file(Attachment::pending("a.txt", b"a".to_vec()));
    let id = match form.submit(&service, &StaticConnectivity(true)) {
        SubmitOutcome::Saved(id) => id,
        other => panic!("unexpected outcome: {other:?}"),
    };
    service.toggle_done(id).unwrap();
    let task = service.get_todo(id).unwrap().unwrap();

    let mut form = TaskForm::for_edit(&task);
    assert!(form.is_edit_mode());
    assert_eq!(form.attachments().len(), 1);
    assert!(!form.attachments()[0].is_pending());

    form.set_text("Transfer before 10am");
    form.stage_file(Attachment::pending("b.txt", b"b".to_vec()));
    assert_eq!(
        form.submit(&service, &StaticConnectivity(true)),
        SubmitOutcome::Saved(id)
    );

    let updated = service.get_todo(id).unwrap().unwrap();
    assert_eq!(updated.text, "Transfer before 10am");
    assert!(updated.is_done);
    assert_eq!(updated.files.len(), 2);
    assert_eq!(updated.files[0], task.files[0]);
    assert_eq!(updated.files[1].name, "b.txt");
    assert_eq!(service.list_todos().unwrap().len(), 1);
}

#[test]
fn past_dates_cannot_be_picked_but_loaded_ones_are_kept() {
    let mut form = TaskForm::new();
    let err = form.choose_due_date(day(2024, 5, 9), today()).unwrap_err();
    assert_eq!(err, FormError::DateDisabled(day(2024, 5, 9)));
    assert_eq!(form.due_date(), None);

    form.choose_due_date(today(), today()).unwrap();
    assert_eq!(form.due_date(), Some(today()));

    let conn = open_db_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let service = service(&conn, dir.path());
    let id = service
        .add_todo(NewTask::new("Old", "still open", day(2024, 1, 1)))
        .unwrap();
    let task = service.get_todo(id).unwrap().unwrap();
    let form = TaskForm::for_edit(&task);
    assert_eq!(form.validate(), Ok(day(2024, 1, 1)));
}

#[test]
fn remove_file_drops_staged_entry() {
    let mut form = filled_form();
    form.stage_file(Attachment::pending("a.txt", Vec::new()));
    form.stage_file(Attachment::pending("b.txt", Vec::new()));

    let removed = form.remove_file(0).unwrap();
    assert_eq!(removed.name(), "a.txt");
    assert_eq!(form.attachments().len(), 1);
    assert_eq!(form.attachments()[0].name(), "b.txt");

    assert_eq!(form.remove_file(5), Err(FormError::NoSuchAttachment(5)));
}
