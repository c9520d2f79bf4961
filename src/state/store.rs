use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use super::tree::{AppState, SliceUpdate, StatePath};

/// Typed change event emitted once per logical mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub paths: Vec<StatePath>,
}

impl Change {
    pub fn touches(&self, path: StatePath) -> bool {
        self.paths.contains(&path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Rc<dyn Fn(&AppState)>;

struct Subscription {
    id: SubscriptionId,
    deps: Vec<StatePath>,
    callback: Callback,
}

/// Single source of truth for the session, with synchronous change
/// notification.
///
/// The store is confined to one thread. A mutation issued while callbacks
/// are running is queued and applied, in order, once the current round of
/// callbacks has finished; the outermost `set` returns only after the queue
/// is drained.
pub struct Store {
    state: RefCell<AppState>,
    subscriptions: RefCell<Vec<Subscription>>,
    pending: RefCell<VecDeque<Vec<SliceUpdate>>>,
    notifying: Cell<bool>,
    next_subscription: Cell<u64>,
    revision: Cell<u64>,
}

/// Ends a notification round. After a callback panic, batches it queued
/// are dropped so a later unrelated `set` does not apply them.
struct NotifyGuard<'a>(&'a Store);

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        let abandoned = {
            let mut pending = self.0.pending.borrow_mut();
            let count = pending.len();
            pending.clear();
            count
        };
        if abandoned > 0 {
            tracing::warn!(abandoned, "Dropped queued mutations after a failed notification");
        }
        self.0.notifying.set(false);
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state: RefCell::new(state),
            subscriptions: RefCell::new(Vec::new()),
            pending: RefCell::new(VecDeque::new()),
            notifying: Cell::new(false),
            next_subscription: Cell::new(0),
            revision: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Number of logical changes applied so far.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Register a render callback that runs after every change touching one
    /// of `deps`.
    pub fn subscribe(
        &self,
        deps: &[StatePath],
        callback: impl Fn(&AppState) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            deps: deps.to_vec(),
            callback: Rc::new(callback),
        });
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let before = subscriptions.len();
        subscriptions.retain(|sub| sub.id != id);
        subscriptions.len() != before
    }

    pub fn set(&self, update: SliceUpdate) {
        self.set_many(vec![update]);
    }

    /// Replace several slices as one logical change: each interested
    /// callback runs once, after all slices are in place.
    pub fn set_many(&self, updates: Vec<SliceUpdate>) {
        if updates.is_empty() {
            return;
        }

        self.pending.borrow_mut().push_back(updates);
        if self.notifying.get() {
            tracing::trace!("Queued mutation issued during notification");
            return;
        }

        self.notifying.set(true);
        let _guard = NotifyGuard(self);

        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(batch) = next else {
                break;
            };
            let change = self.apply(batch);
            self.notify(&change);
        }
    }

    fn apply(&self, updates: Vec<SliceUpdate>) -> Change {
        let mut paths = Vec::with_capacity(updates.len());
        {
            let mut state = self.state.borrow_mut();
            for update in updates {
                let path = state.apply(update);
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        }
        self.revision.set(self.revision.get() + 1);
        tracing::trace!(paths = ?paths, revision = self.revision.get(), "State changed");
        Change { paths }
    }

    fn notify(&self, change: &Change) {
        let callbacks: Vec<Callback> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|sub| sub.deps.iter().any(|dep| change.touches(*dep)))
            .map(|sub| sub.callback.clone())
            .collect();

        let state = self.state.borrow();
        for callback in callbacks {
            callback(&state);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
