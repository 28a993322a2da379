use crate::pipeline::state::ProcessState;

/// Callback invoked synchronously after every state mutation.
pub type ObserverCallback = Box<dyn Fn(&ProcessState) + Send>;

/// Handle returned by `subscribe`, used to detach the observer again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionHandle(u64);

/// Registry of progress observers attached to one state machine.
///
/// Callbacks run on the caller's thread, in subscription order, after the
/// mutation has been applied. A slow callback slows the pipeline down, so
/// observers should hand work off (e.g. to a channel) rather than block.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(u64, ObserverCallback)>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, callback: ObserverCallback) -> SubscriptionHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.observers.push((id, callback));
        SubscriptionHandle(id)
    }

    pub(crate) fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != handle.0);
        self.observers.len() != before
    }

    pub(crate) fn notify(&self, state: &ProcessState) {
        for (_, callback) in &self.observers {
            callback(state);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}
