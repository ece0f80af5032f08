//! Live task snapshots per user.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    categorizer::{CategorizedTasks, Categorizer, TaskFilter},
    domain::{Task, UserId},
    ports::{TaskRepositoryError, TaskRepositoryResult},
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard, watch};

/// Immutable, newest-first list of one user's tasks.
pub type TaskSnapshot = Arc<[Task]>;

/// Latest refresh outcome carried by a feed.
type FeedValue = Result<TaskSnapshot, TaskRepositoryError>;

/// One user's snapshot channel.
///
/// Refreshes take `refresh` for the whole list-and-send step, so a slow
/// listing can never overwrite a newer one.
#[derive(Debug)]
pub(super) struct SnapshotFeed {
    sender: watch::Sender<FeedValue>,
    refresh: AsyncMutex<()>,
}

impl SnapshotFeed {
    fn open() -> (Self, watch::Receiver<FeedValue>) {
        let empty: TaskSnapshot = Arc::from(Vec::new());
        let (sender, receiver) = watch::channel(Ok(empty));
        let feed = Self {
            sender,
            refresh: AsyncMutex::new(()),
        };
        (feed, receiver)
    }

    /// Waits until no other refresh of this feed is in flight.
    pub(super) async fn serialize(&self) -> AsyncMutexGuard<'_, ()> {
        self.refresh.lock().await
    }

    /// Sends a refresh outcome to every subscriber.
    pub(super) fn send(&self, listing: TaskRepositoryResult<TaskSnapshot>) {
        self.sender.send_replace(listing);
    }
}

type FeedMap = HashMap<UserId, Arc<SnapshotFeed>>;

/// Registry of snapshot channels, one per subscribed user.
#[derive(Debug, Clone, Default)]
pub(super) struct SnapshotFeeds {
    feeds: Arc<Mutex<FeedMap>>,
}

impl SnapshotFeeds {
    fn lock(&self) -> MutexGuard<'_, FeedMap> {
        self.feeds.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the user's feed, creating it when absent, together with a new
    /// receiver.
    ///
    /// The receiver is created under the registry lock so the feed cannot be
    /// pruned before it has a listener.
    pub(super) fn attach(&self, owner: &UserId) -> (Arc<SnapshotFeed>, watch::Receiver<FeedValue>) {
        let mut feeds = self.lock();
        if let Some(feed) = feeds.get(owner) {
            let receiver = feed.sender.subscribe();
            return (Arc::clone(feed), receiver);
        }
        let (feed, receiver) = SnapshotFeed::open();
        let shared = Arc::new(feed);
        feeds.insert(owner.clone(), Arc::clone(&shared));
        (shared, receiver)
    }

    /// Returns the user's feed while anyone is still listening.
    ///
    /// Feeds without receivers are dropped from the registry.
    pub(super) fn feed_for(&self, owner: &UserId) -> Option<Arc<SnapshotFeed>> {
        let mut feeds = self.lock();
        let feed = feeds.get(owner).cloned()?;
        if feed.sender.receiver_count() == 0 {
            feeds.remove(owner);
            return None;
        }
        Some(feed)
    }
}

/// Live view of one user's tasks.
///
/// The current value is refreshed after every mutation made through the
/// owning service. When a refresh fails the subscription reports the store
/// error until a later refresh succeeds.
#[derive(Debug, Clone)]
pub struct TaskSubscription {
    owner: UserId,
    receiver: watch::Receiver<FeedValue>,
}

impl TaskSubscription {
    pub(super) const fn new(owner: UserId, receiver: watch::Receiver<FeedValue>) -> Self {
        Self { owner, receiver }
    }

    /// Returns the user the subscription is scoped to.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Returns the latest snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the latest refresh
    /// failed.
    pub fn current(&self) -> TaskServiceResult<TaskSnapshot> {
        self.receiver.borrow().clone().map_err(TaskServiceError::from)
    }

    /// Waits for the next refresh and returns its snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::FeedClosed`] once the owning service has
    /// been dropped, or [`TaskServiceError::Repository`] when the refresh
    /// failed.
    pub async fn changed(&mut self) -> TaskServiceResult<TaskSnapshot> {
        self.receiver
            .changed()
            .await
            .map_err(|_| TaskServiceError::FeedClosed)?;
        self.receiver
            .borrow_and_update()
            .clone()
            .map_err(TaskServiceError::from)
    }

    /// Categorizes the latest snapshot at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the latest refresh
    /// failed.
    pub fn categorize(
        &self,
        categorizer: &Categorizer,
        now: DateTime<Utc>,
        filter: Option<&TaskFilter>,
    ) -> TaskServiceResult<CategorizedTasks> {
        let snapshot = self.current()?;
        Ok(categorizer.categorize(&snapshot, now, filter))
    }
}
