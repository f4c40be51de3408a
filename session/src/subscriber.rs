use std::fmt;
use std::sync::Arc;

use crate::GameState;

/// Receives every snapshot a session publishes, in publish order.
pub trait Subscriber: Send {
    fn on_state(&mut self, state: &Arc<GameState>);
}

impl<F> Subscriber for F
where
    F: FnMut(&Arc<GameState>) + Send,
{
    fn on_state(&mut self, state: &Arc<GameState>) {
        self(state)
    }
}

/// Handle returned by [`GameSession::subscribe`](crate::GameSession::subscribe).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn Subscriber>)>,
}

impl Subscribers {
    pub(crate) fn insert(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, subscriber));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, state: &Arc<GameState>) {
        for (_, subscriber) in &mut self.entries {
            subscriber.on_state(state);
        }
    }

    pub(crate) fn notify_one(&mut self, id: SubscriptionId, state: &Arc<GameState>) {
        if let Some((_, subscriber)) = self.entries.iter_mut().find(|(entry_id, _)| *entry_id == id)
        {
            subscriber.on_state(state);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
