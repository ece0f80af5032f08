//! End-to-end board flows over the in-memory adapters.

use super::helpers::{BoardContext, board, start_time, user};
use chrono::TimeDelta;
use flexido::task::{
    categorizer::{
        Bucket, CategorySelector, DueWindow, Indicator, TaskFilter, due_time_label,
        tasks_due_on,
    },
    domain::Category,
    ports::TaskRepository,
    services::{CreateTaskRequest, EditTaskRequest, TaskServiceError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_tracks_tasks_through_their_lifecycle(board: BoardContext) {
    let now = start_time();
    let deadline = board
        .service
        .create_task(
            CreateTaskRequest::new("Submit grant report")
                .with_category(Category::WORK)
                .with_due_at(now + TimeDelta::hours(3)),
        )
        .await
        .expect("create deadline task");
    let errand = board
        .service
        .create_task(CreateTaskRequest::new("Buy stamps").with_category(Category::PERSONAL))
        .await
        .expect("create errand");

    let morning = board.service.board(None).await.expect("morning board");
    assert_eq!(morning.bucket_of(deadline.id()), Some(Bucket::Upcoming));
    assert_eq!(morning.bucket_of(errand.id()), Some(Bucket::Today));
    assert_eq!(
        board.service.categorizer().indicator(&deadline, now),
        Indicator::Today
    );

    board.clock.advance(TimeDelta::hours(4));
    let afternoon = board.service.board(None).await.expect("afternoon board");
    assert_eq!(afternoon.bucket_of(deadline.id()), Some(Bucket::Overdue));

    board
        .service
        .set_completed(deadline.id(), true)
        .await
        .expect("complete deadline task");
    let evening = board.service.board(None).await.expect("evening board");
    assert_eq!(evening.bucket_of(deadline.id()), Some(Bucket::Completed));
    assert_eq!(evening.bucket_of(errand.id()), Some(Bucket::Today));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_narrow_the_board_before_bucketing(board: BoardContext) {
    let now = start_time();
    for (title, category, due_hours) in [
        ("Team sync", Some(Category::WORK), Some(-1)),
        ("Budget review", Some(Category::WORK), Some(5)),
        ("Pick up dry cleaning", None, None),
        ("Concert", Some(Category::EVENTS), Some(30)),
    ] {
        let mut request = CreateTaskRequest::new(title);
        if let Some(label) = category {
            request = request.with_category(label);
        }
        if let Some(hours) = due_hours {
            request = request.with_due_at(now + TimeDelta::hours(hours));
        }
        board
            .service
            .create_task(request)
            .await
            .expect("create task");
    }

    let work = TaskFilter::new().with_category(CategorySelector::Named(
        Category::new(Category::WORK).expect("valid category"),
    ));
    let uncategorized = TaskFilter::new().with_category(CategorySelector::Uncategorized);
    let searched = TaskFilter::new().with_search("CONCERT");

    let work_board = board.service.board(Some(&work)).await.expect("work board");
    let loose_board = board
        .service
        .board(Some(&uncategorized))
        .await
        .expect("uncategorized board");
    let search_board = board
        .service
        .board(Some(&searched))
        .await
        .expect("search board");

    assert_eq!(work_board.overdue.len(), 1);
    assert_eq!(work_board.upcoming.len(), 1);
    assert_eq!(work_board.len(), 2);
    assert_eq!(loose_board.today.len(), 1);
    assert_eq!(loose_board.len(), 1);
    assert_eq!(search_board.upcoming.len(), 1);
    assert_eq!(search_board.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_views_read_from_the_listing(board: BoardContext) {
    let now = start_time();
    let tomorrow = board
        .service
        .create_task(CreateTaskRequest::new("Dentist").with_due_at(now + TimeDelta::days(1)))
        .await
        .expect("create dentist");
    board
        .service
        .create_task(CreateTaskRequest::new("Holiday").with_due_at(now + TimeDelta::days(20)))
        .await
        .expect("create holiday");
    let done = board
        .service
        .create_task(CreateTaskRequest::new("Stretch"))
        .await
        .expect("create stretch");
    board
        .service
        .toggle_completion(done.id())
        .await
        .expect("complete stretch");

    let tasks = board.service.list_tasks().await.expect("list tasks");
    let summary = board.service.summary().await.expect("summary");
    let week = DueWindow::next_days(7).apply(&tasks, now);
    let date = tomorrow
        .due_at()
        .map(|due| due.date_naive())
        .expect("dentist is scheduled");
    let config = board.service.categorizer().config();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.completed_per_mille(), 333);
    assert_eq!(week.len(), 1);
    assert_eq!(tasks_due_on(&tasks, date, config).len(), 1);
    assert_eq!(due_time_label(&tomorrow, config), "08:00 AM");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_are_persisted_for_the_owner_only(board: BoardContext) {
    let task = board
        .service
        .create_task(CreateTaskRequest::new("Draft newsletter").with_category("Work"))
        .await
        .expect("create task");

    board
        .service
        .edit_task(
            task.id(),
            EditTaskRequest::new()
                .with_description("Include spring dates")
                .clear_category()
                .with_due_at(start_time() + TimeDelta::days(2)),
        )
        .await
        .expect("edit task");

    let stored = board
        .repository
        .find_by_id(&user("alice"), task.id())
        .await
        .expect("repository lookup")
        .expect("task stored");
    assert_eq!(stored.description(), Some("Include spring dates"));
    assert_eq!(stored.category(), None);
    assert!(stored.due_at().is_some());

    board.identity.sign_in(user("mallory"));
    let foreign_edit = board
        .service
        .edit_task(task.id(), EditTaskRequest::new().with_title("Hijacked"))
        .await;
    assert!(matches!(foreign_edit, Err(TaskServiceError::Repository(_))));
}
