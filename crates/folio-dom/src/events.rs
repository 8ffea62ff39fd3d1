//! Synchronous event dispatch.

use std::sync::Arc;

use crate::tree::{Dom, NodeId};

/// Events the tree can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
}

/// An event being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,

    /// Node the event was fired on
    pub target: NodeId,

    /// Node whose listener is running
    pub current_target: NodeId,
}

/// A registered event handler.
pub type Listener = Arc<dyn Fn(&mut Dom, &Event) + Send + Sync>;

impl Dom {
    /// Register `listener` for `kind` events reaching `node`.
    pub fn add_event_listener<F>(&mut self, node: NodeId, kind: EventKind, listener: F)
    where
        F: Fn(&mut Dom, &Event) + Send + Sync + 'static,
    {
        self.listeners.push((node, kind, Arc::new(listener)));
    }

    /// Number of listeners registered on `node`.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.iter().filter(|(n, _, _)| *n == node).count()
    }

    /// Fire `kind` at `target`, running listeners on the target and then on
    /// each ancestor. Returns how many listeners ran.
    pub fn dispatch(&mut self, target: NodeId, kind: EventKind) -> usize {
        let mut path = vec![target];
        path.extend(self.ancestors(target));

        let mut ran = 0;
        for current_target in path {
            let listeners: Vec<Listener> = self
                .listeners
                .iter()
                .filter(|(node, k, _)| *node == current_target && *k == kind)
                .map(|(_, _, listener)| Arc::clone(listener))
                .collect();

            let event = Event {
                kind,
                target,
                current_target,
            };

            for listener in listeners {
                listener(self, &event);
                ran += 1;
            }
        }
        ran
    }

    /// Simulate a user click on `target`.
    pub fn click(&mut self, target: NodeId) -> usize {
        self.dispatch(target, EventKind::Click)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ElementOptions;

    #[test]
    fn click_bubbles_to_ancestors() {
        let mut dom = Dom::new();
        let root = dom.root();
        let button = dom
            .create_element(ElementOptions::new("button").parent(root))
            .unwrap();
        let span = dom
            .create_element(ElementOptions::new("span").content("▶").parent(button))
            .unwrap();

        dom.add_event_listener(button, EventKind::Click, |dom, event| {
            assert_eq!(event.kind, EventKind::Click);
            let count = dom
                .get_attribute(event.current_target, "data-clicks")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(0);
            dom.set_attribute(event.current_target, "data-clicks", &(count + 1).to_string())
                .unwrap();
        });

        assert_eq!(dom.click(span), 1);
        assert_eq!(dom.click(button), 1);
        assert_eq!(dom.get_attribute(button, "data-clicks"), Some("2"));
    }

    #[test]
    fn click_without_listeners_is_inert() {
        let mut dom = Dom::new();
        let div = dom.create_element(ElementOptions::default()).unwrap();
        assert_eq!(dom.click(div), 0);
        assert_eq!(dom.listener_count(div), 0);
    }
}
