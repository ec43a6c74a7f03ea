use std::fmt;

use datefield_format::DateValue;

/// Payload handed to value-change listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueChange {
    pub previous: Option<DateValue>,
    pub current: Option<DateValue>,
}

/// Handle for unregistering a listener added with
/// [`crate::LocaleDateField::on_value_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ValueChange)>;

/// Registered value-change listeners, fired in registration order.
#[derive(Default)]
pub(crate) struct ListenerSet {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl ListenerSet {
    pub(crate) fn add(&mut self, listener: impl FnMut(&ValueChange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() < before
    }

    pub(crate) fn fire(&mut self, event: &ValueChange) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn event() -> ValueChange {
        ValueChange {
            previous: None,
            current: DateValue::from_ymd(2014, 3, 14).ok(),
        }
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut set = ListenerSet::default();
        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            set.add(move |_| order.borrow_mut().push(tag));
        }
        set.fire(&event());
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn remove_reports_whether_the_listener_existed() {
        let mut set = ListenerSet::default();
        let id = set.add(|_| {});
        assert_eq!(set.len(), 1);
        assert!(set.remove(id));
        assert_eq!(set.len(), 0);
        assert!(!set.remove(id));
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut set = ListenerSet::default();
        let first = set.add(|_| {});
        set.remove(first);
        let second = set.add(|_| {});
        assert_ne!(first, second);
    }
}
