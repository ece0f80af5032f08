//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{Category, PersistedTaskData, Task, TaskId, TaskPatch, TaskTitle, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, owner: &UserId, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(owner, task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        owner: &UserId,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let user_id = owner.as_str().to_owned();
        let owned_patch = patch.clone();

        self.run_blocking(move |connection| {
            let row = connection
                .transaction::<_, DieselError, _>(|conn| {
                    let stored_completed = tasks::table
                        .filter(tasks::id.eq(id.into_inner()))
                        .filter(tasks::user_id.eq(user_id.as_str()))
                        .select(tasks::completed)
                        .for_update()
                        .first::<bool>(conn)
                        .optional()?;
                    let Some(completed) = stored_completed else {
                        return Ok(None);
                    };

                    let changeset = to_changeset(&owned_patch, completed, updated_at);
                    diesel::update(
                        tasks::table
                            .filter(tasks::id.eq(id.into_inner()))
                            .filter(tasks::user_id.eq(user_id.as_str())),
                    )
                    .set(&changeset)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(conn)
                    .map(Some)
                })
                .map_err(TaskRepositoryError::persistence)?;

            let updated = row.ok_or(TaskRepositoryError::NotFound(id))?;
            row_to_task(updated)
        })
        .await
    }

    async fn delete(&self, owner: &UserId, id: TaskId) -> TaskRepositoryResult<()> {
        let user_id = owner.as_str().to_owned();

        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::user_id.eq(user_id.as_str())),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if removed == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, owner: &UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let user_id = owner.as_str().to_owned();

        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::user_id.eq(user_id.as_str()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_for_user(&self, owner: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        let user_id = owner.as_str().to_owned();

        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::user_id.eq(user_id.as_str()))
                .order((tasks::created_at.desc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(owner: &UserId, task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        user_id: owner.as_str().to_owned(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        category: task.category().map(|category| category.as_str().to_owned()),
        due_at: task.due_at(),
        completed: task.is_completed(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

/// Builds the changeset for `patch` against the locked row's completion
/// flag.
fn to_changeset(
    patch: &TaskPatch,
    stored_completed: bool,
    updated_at: DateTime<Utc>,
) -> TaskChangeset {
    TaskChangeset {
        title: patch.title().map(|title| title.as_str().to_owned()),
        description: patch
            .description()
            .map(|description| description.map(str::to_owned)),
        category: patch
            .category()
            .map(|category| category.map(|label| label.as_str().to_owned())),
        due_at: patch.due_at(),
        completed: patch
            .completion()
            .map(|change| change.apply(stored_completed)),
        updated_at,
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        category: persisted_category,
        due_at,
        completed,
        created_at,
        updated_at,
        ..
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let category = persisted_category
        .map(Category::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        category,
        due_at,
        completed,
        created_at,
        updated_at,
    }))
}
