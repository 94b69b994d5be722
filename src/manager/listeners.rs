use std::collections::BTreeMap;

use crate::state::GameState;

/// What caused a listener notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent<'a> {
    /// A server message of this type was handled.
    Packet(&'a str),
    Tick,
    Connected,
    Disconnected,
}

impl<'a> StateEvent<'a> {
    pub fn tag(&self) -> &'a str {
        match *self {
            StateEvent::Packet(kind) => kind,
            StateEvent::Tick => "tick",
            StateEvent::Connected => "connected",
            StateEvent::Disconnected => "disconnected",
        }
    }
}

pub type Listener = Box<dyn FnMut(StateEvent<'_>, &GameState)>;

/// Handle returned by [`ListenerRegistry::subscribe`]. Ids increase with
/// every subscription, so their order is subscription order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: BTreeMap<ListenerId, Listener>,
}

impl ListenerRegistry {
    pub fn subscribe(&mut self, listener: impl FnMut(StateEvent<'_>, &GameState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Calls every listener in subscription order.
    pub fn notify(&mut self, event: StateEvent<'_>, state: &GameState) {
        tracing::trace!(event = event.tag(), listeners = self.listeners.len(), "notify");
        for listener in self.listeners.values_mut() {
            listener(event, state);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(StateEvent<'_>, &GameState)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |event: StateEvent<'_>, _: &GameState| {
            sink.borrow_mut().push(event.tag().to_string())
        })
    }

    #[test]
    fn test_tags() {
        assert_eq!(StateEvent::Packet("Phase").tag(), "Phase");
        assert_eq!(StateEvent::Tick.tag(), "tick");
        assert_eq!(StateEvent::Connected.tag(), "connected");
        assert_eq!(StateEvent::Disconnected.tag(), "disconnected");
    }

    #[test]
    fn test_notifies_in_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::default();
        for n in 0..3 {
            let order = Rc::clone(&order);
            registry.subscribe(move |_, _| order.borrow_mut().push(n));
        }
        registry.notify(StateEvent::Tick, &GameState::default());
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut registry = ListenerRegistry::default();
        let (first_seen, first) = recorder();
        let (second_seen, second) = recorder();
        let first_id = registry.subscribe(first);
        registry.subscribe(second);

        registry.notify(StateEvent::Packet("Players"), &GameState::default());
        assert!(registry.unsubscribe(first_id));
        assert!(!registry.unsubscribe(first_id));
        registry.notify(StateEvent::Tick, &GameState::default());

        assert_eq!(*first_seen.borrow(), vec!["Players"]);
        assert_eq!(*second_seen.borrow(), vec!["Players", "tick"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_order_kept_after_unsubscribing_from_the_middle() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::default();
        let ids: Vec<ListenerId> = (0..5)
            .map(|n| {
                let order = Rc::clone(&order);
                registry.subscribe(move |_, _| order.borrow_mut().push(n))
            })
            .collect();
        assert!(registry.unsubscribe(ids[1]));
        assert!(registry.unsubscribe(ids[3]));
        let order_late = Rc::clone(&order);
        registry.subscribe(move |_, _| order_late.borrow_mut().push(5));

        registry.notify(StateEvent::Tick, &GameState::default());
        assert_eq!(*order.borrow(), vec![0, 2, 4, 5]);
    }

    #[test]
    fn test_listener_sees_state() {
        let mut registry = ListenerRegistry::default();
        let seconds = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seconds);
        registry.subscribe(move |_, state| *sink.borrow_mut() = Some(state.seconds_left));

        let mut state = GameState::default();
        state.seconds_left = 42;
        registry.notify(StateEvent::Tick, &state);
        assert_eq!(*seconds.borrow(), Some(42));
    }
}
