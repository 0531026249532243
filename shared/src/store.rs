//! The page's single copy of an item's blocked dates.
//!
//! Every widget that renders availability subscribes here, so one fetch feeds
//! the booking pickers, the preview and the owner's manager alike. The store
//! also holds the page's one request slot: a change and the refresh that
//! follows it never overlap another request.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::availability::BlockedDates;
use crate::manager::{load_blocked_dates, AvailabilityBackend};

pub type SubscriberId = usize;

type Subscriber = Rc<dyn Fn(&Rc<BlockedDates>)>;

#[derive(Default)]
struct Inner {
    current: RefCell<Rc<BlockedDates>>,
    subscribers: RefCell<Vec<(SubscriberId, Subscriber)>>,
    next_id: Cell<SubscriberId>,
    in_flight: Cell<bool>,
}

/// Cheap to clone; clones share the same set and subscribers
#[derive(Clone, Default)]
pub struct AvailabilityStore {
    inner: Rc<Inner>,
}

impl AvailabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocked(blocked: BlockedDates) -> Self {
        let store = Self::new();
        *store.inner.current.borrow_mut() = Rc::new(blocked);
        store
    }

    pub fn current(&self) -> Rc<BlockedDates> {
        Rc::clone(&self.inner.current.borrow())
    }

    /// Call `subscriber` with every set published from now on
    pub fn subscribe(&self, subscriber: impl Fn(&Rc<BlockedDates>) + 'static) -> SubscriberId {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.subscribers.borrow_mut().push((id, Rc::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.inner.subscribers.borrow_mut().retain(|(sub_id, _)| *sub_id != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Replace the set and notify every subscriber
    pub fn publish(&self, blocked: BlockedDates) {
        let blocked = Rc::new(blocked);
        *self.inner.current.borrow_mut() = Rc::clone(&blocked);

        // Subscribers may subscribe or unsubscribe while being notified
        let subscribers: Vec<Subscriber> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        tracing::debug!("Publishing {} blocked dates to {} views", blocked.len(), subscribers.len());
        for subscriber in subscribers {
            subscriber(&blocked);
        }
    }

    /// Fetch the item's availability (fail-open) and publish it
    pub async fn refresh<B>(&self, backend: &B, item_id: u64)
    where
        B: AvailabilityBackend + ?Sized,
    {
        let blocked = load_blocked_dates(backend, item_id).await;
        self.publish(blocked);
    }

    /// Claim the request slot, `None` while another request holds it.
    ///
    /// The slot is released when the guard is dropped.
    pub fn begin_request(&self) -> Option<RequestGuard> {
        if self.inner.in_flight.replace(true) {
            return None;
        }
        Some(RequestGuard {
            inner: Rc::clone(&self.inner),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.inner.in_flight.get()
    }
}

impl PartialEq for AvailabilityStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for AvailabilityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvailabilityStore")
            .field("blocked", &self.current().len())
            .field("subscribers", &self.subscriber_count())
            .field("in_flight", &self.is_busy())
            .finish()
    }
}

#[must_use = "the request slot is released as soon as the guard is dropped"]
pub struct RequestGuard {
    inner: Rc<Inner>,
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.inner.in_flight.set(false);
    }
}
