//! Task store contract tests against an embedded `PostgreSQL` database.

use crate::postgres::helpers::{
    CleanupGuard, PostgresCluster, base_time, ensure_template, postgres_cluster,
    setup_repository, task_at, test_runtime, user,
};
use chrono::TimeDelta;
use flexido::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{
        Category, CompletionChange, PersistedTaskData, Task, TaskId, TaskPatch, TaskTitle, UserId,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

struct RepositoryContext {
    guard: CleanupGuard<'static>,
    repo: PostgresTaskRepository,
    rt: Runtime,
}

impl RepositoryContext {
    fn cleanup(self) {
        drop(self.repo);
        self.guard.cleanup().expect("cleanup database");
    }
}

#[fixture]
fn repository_context(postgres_cluster: PostgresCluster) -> RepositoryContext {
    let cluster = postgres_cluster;
    ensure_template(cluster).expect("template setup");
    let db_name = format!("test_tasks_{}", uuid::Uuid::new_v4());
    let guard = CleanupGuard::new(cluster, db_name.clone());
    let repo = setup_repository(cluster, &db_name).expect("repository setup");
    let rt = test_runtime().expect("tokio runtime");
    RepositoryContext { guard, repo, rt }
}

fn scheduled_work_task(title: &str) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: TaskTitle::new(title).expect("valid title"),
        description: Some("agenda attached".to_owned()),
        category: Some(Category::new(Category::WORK).expect("valid category")),
        due_at: Some(base_time() + TimeDelta::hours(4)),
        completed: false,
        created_at: base_time(),
        updated_at: base_time(),
    })
}

#[rstest]
fn stored_tasks_read_back_unchanged(repository_context: RepositoryContext) {
    let context = repository_context;
    let owner = user("alice");
    let task = scheduled_work_task("Quarterly review");

    context
        .rt
        .block_on(context.repo.store(&owner, &task))
        .expect("store should succeed");
    let found = context
        .rt
        .block_on(context.repo.find_by_id(&owner, task.id()))
        .expect("find_by_id should succeed");

    assert_eq!(found, Some(task));
    context.cleanup();
}

#[rstest]
fn storing_the_same_id_twice_is_a_duplicate(repository_context: RepositoryContext) {
    let context = repository_context;
    let owner = user("alice");
    let task = task_at("Once only", base_time());
    context
        .rt
        .block_on(context.repo.store(&owner, &task))
        .expect("first store");

    let again = context.rt.block_on(context.repo.store(&owner, &task));

    assert!(matches!(
        again,
        Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()
    ));
    context.cleanup();
}

#[rstest]
fn listing_orders_newest_first_with_id_tie_break(repository_context: RepositoryContext) {
    let context = repository_context;
    let owner = user("alice");
    let oldest = task_at("oldest", base_time());
    let newest = task_at("newest", base_time() + TimeDelta::minutes(30));
    let tied_a = task_at("tied", base_time() + TimeDelta::minutes(10));
    let tied_b = task_at("tied", base_time() + TimeDelta::minutes(10));
    for task in [&oldest, &tied_a, &newest, &tied_b] {
        context
            .rt
            .block_on(context.repo.store(&owner, task))
            .expect("store task");
    }

    let listed = context
        .rt
        .block_on(context.repo.list_for_user(&owner))
        .expect("list tasks");

    let (first_tied, second_tied) = if tied_a.id() < tied_b.id() {
        (tied_a.id(), tied_b.id())
    } else {
        (tied_b.id(), tied_a.id())
    };
    let order: Vec<TaskId> = listed.iter().map(Task::id).collect();
    assert_eq!(order, vec![newest.id(), first_tied, second_tied, oldest.id()]);
    context.cleanup();
}

#[rstest]
fn other_users_cannot_read_patch_or_delete(repository_context: RepositoryContext) {
    let context = repository_context;
    let alice = user("alice");
    let bob = user("bob");
    let task = task_at("Private", base_time());
    context
        .rt
        .block_on(context.repo.store(&alice, &task))
        .expect("store for alice");

    let lookup = context
        .rt
        .block_on(context.repo.find_by_id(&bob, task.id()))
        .expect("lookup for bob");
    let listing = context
        .rt
        .block_on(context.repo.list_for_user(&bob))
        .expect("listing for bob");
    let patched = context.rt.block_on(context.repo.update(
        &bob,
        task.id(),
        &TaskPatch::new().with_completion(CompletionChange::Toggle),
        base_time(),
    ));
    let deleted = context.rt.block_on(context.repo.delete(&bob, task.id()));

    assert_eq!(lookup, None);
    assert!(listing.is_empty());
    assert!(matches!(patched, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
    assert!(matches!(deleted, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
    assert_eq!(
        context
            .rt
            .block_on(context.repo.find_by_id(&alice, task.id()))
            .expect("lookup for alice"),
        Some(task)
    );
    context.cleanup();
}

#[rstest]
fn unknown_ids_are_not_found_for_update_and_delete(repository_context: RepositoryContext) {
    let context = repository_context;
    let owner = user("alice");
    let missing = TaskId::new();

    let patched = context.rt.block_on(context.repo.update(
        &owner,
        missing,
        &TaskPatch::new(),
        base_time(),
    ));
    let deleted = context.rt.block_on(context.repo.delete(&owner, missing));

    assert!(matches!(patched, Err(TaskRepositoryError::NotFound(id)) if id == missing));
    assert!(matches!(deleted, Err(TaskRepositoryError::NotFound(id)) if id == missing));
    context.cleanup();
}

#[rstest]
fn patches_clear_due_time_and_category(repository_context: RepositoryContext) {
    let context = repository_context;
    let owner = user("alice");
    let task = scheduled_work_task("Board meeting");
    context
        .rt
        .block_on(context.repo.store(&owner, &task))
        .expect("store task");
    let stamp = base_time() + TimeDelta::minutes(20);

    let updated = context
        .rt
        .block_on(context.repo.update(
            &owner,
            task.id(),
            &TaskPatch::new().with_due_at(None).with_category(None),
            stamp,
        ))
        .expect("clear fields");
    let reloaded = context
        .rt
        .block_on(context.repo.find_by_id(&owner, task.id()))
        .expect("reload task");

    assert_eq!(updated.due_at(), None);
    assert_eq!(updated.category(), None);
    assert_eq!(updated.description(), Some("agenda attached"));
    assert_eq!(updated.title().as_str(), "Board meeting");
    assert_eq!(updated.updated_at(), stamp);
    assert_eq!(reloaded, Some(updated));
    context.cleanup();
}

#[rstest]
fn toggles_flip_the_stored_flag_and_keep_other_edits(repository_context: RepositoryContext) {
    let context = repository_context;
    let owner = user("alice");
    let task = task_at("Draft", base_time());
    context
        .rt
        .block_on(context.repo.store(&owner, &task))
        .expect("store task");

    context
        .rt
        .block_on(context.repo.update(
            &owner,
            task.id(),
            &TaskPatch::new().with_title(TaskTitle::new("Final").expect("valid title")),
            base_time(),
        ))
        .expect("rename");
    let toggled = context
        .rt
        .block_on(context.repo.update(
            &owner,
            task.id(),
            &TaskPatch::new().with_completion(CompletionChange::Toggle),
            base_time(),
        ))
        .expect("toggle");
    let toggled_back = context
        .rt
        .block_on(context.repo.update(
            &owner,
            task.id(),
            &TaskPatch::new().with_completion(CompletionChange::Toggle),
            base_time(),
        ))
        .expect("toggle back");

    assert!(toggled.is_completed());
    assert_eq!(toggled.title().as_str(), "Final");
    assert!(!toggled_back.is_completed());
    context.cleanup();
}

#[rstest]
fn deleted_tasks_disappear(repository_context: RepositoryContext) {
    let context = repository_context;
    let owner = user("alice");
    let task = task_at("Temporary", base_time());
    context
        .rt
        .block_on(context.repo.store(&owner, &task))
        .expect("store task");

    context
        .rt
        .block_on(context.repo.delete(&owner, task.id()))
        .expect("delete task");

    assert_eq!(
        context
            .rt
            .block_on(context.repo.find_by_id(&owner, task.id()))
            .expect("lookup"),
        None
    );
    context.cleanup();
}

#[rstest]
fn values_at_the_domain_limits_fit_the_columns(repository_context: RepositoryContext) {
    let context = repository_context;
    let owner = user(&"u".repeat(UserId::MAX_CHARS));
    let task = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: TaskTitle::new("\u{e9}".repeat(TaskTitle::MAX_CHARS)).expect("valid title"),
        description: None,
        category: Some(Category::new("c".repeat(Category::MAX_CHARS)).expect("valid category")),
        due_at: None,
        completed: false,
        created_at: base_time(),
        updated_at: base_time(),
    });

    context
        .rt
        .block_on(context.repo.store(&owner, &task))
        .expect("limit-sized values are stored");
    let found = context
        .rt
        .block_on(context.repo.find_by_id(&owner, task.id()))
        .expect("lookup");

    assert_eq!(found, Some(task));
    context.cleanup();
}
