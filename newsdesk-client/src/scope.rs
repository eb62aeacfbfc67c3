//! Ties in-flight requests to the view that started them.
//!
//! A view owns one [`ViewScope`] and wraps every request in
//! [`ViewScope::run`]. When the view is torn down it drops (or cancels) the
//! scope, and every wrapped future resolves to [`ClientError::Cancelled`]
//! instead of delivering a result nobody observes.

use std::{cell::RefCell, fmt, future::Future, rc::Rc};

use futures::future::{AbortHandle, Abortable};

use crate::error::ClientError;

#[derive(Default)]
struct ScopeState {
    cancelled: bool,
    next_id: u64,
    handles: Vec<(u64, AbortHandle)>,
}

impl Drop for ScopeState {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain(..) {
            handle.abort();
        }
    }
}

/// Cancellation scope for one view. Clones share the scope.
#[derive(Clone, Default)]
pub struct ViewScope {
    state: Rc<RefCell<ScopeState>>,
}

impl fmt::Debug for ViewScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ViewScope")
            .field("cancelled", &state.cancelled)
            .field("in_flight", &state.handles.len())
            .finish()
    }
}

impl ViewScope {
    /// A fresh scope with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `future` unless the scope is cancelled first.
    pub async fn run<F, T>(&self, future: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut state = self.state.borrow_mut();
            if state.cancelled {
                return Err(ClientError::Cancelled);
            }
            let id = state.next_id;
            state.next_id += 1;
            state.handles.push((id, handle));
            id
        };

        let outcome = Abortable::new(future, registration).await;
        self.state
            .borrow_mut()
            .handles
            .retain(|(handle_id, _)| *handle_id != id);

        match outcome {
            Ok(result) => result,
            Err(_aborted) => Err(ClientError::Cancelled),
        }
    }

    /// Aborts every request in flight and refuses new ones.
    pub fn cancel(&self) {
        let handles = {
            let mut state = self.state.borrow_mut();
            state.cancelled = true;
            std::mem::take(&mut state.handles)
        };
        for (_, handle) in handles {
            handle.abort();
        }
    }

    /// Whether [`Self::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().cancelled
    }

    /// Number of wrapped futures still running.
    pub fn in_flight(&self) -> usize {
        self.state.borrow().handles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{channel::oneshot, executor::block_on, future::join};

    #[test]
    fn passes_results_through() {
        let scope = ViewScope::new();
        assert_eq!(block_on(scope.run(async { Ok::<_, ClientError>(5) })), Ok(5));
        assert_eq!(
            block_on(scope.run(async { Err::<u8, _>(ClientError::Validation("bad".into())) })),
            Err(ClientError::Validation("bad".into()))
        );
        assert_eq!(scope.in_flight(), 0);
    }

    #[test]
    fn cancel_aborts_pending_future() {
        let scope = ViewScope::new();
        let (_sender, receiver) = oneshot::channel::<u8>();
        let pending = scope.run(async move { receiver.await.map_err(|_| ClientError::Cancelled) });
        let canceller = async {
            scope.cancel();
        };

        let (result, ()) = block_on(join(pending, canceller));
        assert_eq!(result, Err(ClientError::Cancelled));
        assert!(scope.is_cancelled());
        assert_eq!(scope.in_flight(), 0);
    }

    #[test]
    fn cancelling_a_superseded_scope_spares_its_successor() {
        let previous = ViewScope::new();
        let current = ViewScope::new();
        let (slow_sender, slow_receiver) = oneshot::channel::<u8>();
        let (fast_sender, fast_receiver) = oneshot::channel::<u8>();

        let stale = previous.run(async move { slow_receiver.await.map_err(|_| ClientError::Cancelled) });
        let fresh = current.run(async move { fast_receiver.await.map_err(|_| ClientError::Cancelled) });
        let driver = async {
            previous.cancel();
            let _ = slow_sender.send(1);
            let _ = fast_sender.send(2);
        };

        let ((stale, fresh), ()) = block_on(join(join(stale, fresh), driver));
        assert_eq!(stale, Err(ClientError::Cancelled));
        assert_eq!(fresh, Ok(2));
        assert!(!current.is_cancelled());
    }

    #[test]
    fn cancelled_scope_refuses_new_work() {
        let scope = ViewScope::new();
        scope.cancel();
        let result = block_on(scope.run(async { Ok::<_, ClientError>(1) }));
        assert_eq!(result, Err(ClientError::Cancelled));
    }

    #[test]
    fn dropping_last_handle_aborts() {
        let scope = ViewScope::new();
        let (sender, receiver) = oneshot::channel::<u8>();
        let (handle, registration) = AbortHandle::new_pair();
        scope.state.borrow_mut().handles.push((99, handle));
        drop(scope);

        let aborted = block_on(Abortable::new(receiver, registration));
        assert!(aborted.is_err());
        drop(sender);
    }
}
