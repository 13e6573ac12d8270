//! Store Implementation
//!
//! A Store owns one state value, the reducer that produces it and the list
//! of listeners interested in changes.
//!
//! # How Dispatch Works
//!
//! 1. The reducer computes the next state from the current state and the
//!    action. If it fails, the state is left untouched and the error is
//!    returned; no listener runs.
//!
//! 2. The new state replaces the old one wholesale.
//!
//! 3. A snapshot of the listener list is taken and every listener in it is
//!    called once, in subscription order. Listeners added or removed during
//!    the pass take effect from the next dispatch.
//!
//! # Reentrancy
//!
//! Only the re-entrant dispatch lock is held while the reducer or a listener
//! runs, so a listener may call `dispatch` on the same store. What happens
//! then is chosen by [`ReentrancyPolicy`]. With the default `Nested` policy
//! the inner dispatch runs to completion before the outer notification pass
//! resumes, which means listeners later in the outer snapshot never observe
//! the intermediate state.
//!
//! # Thread Safety
//!
//! Handles are `Send + Sync` and cheap to clone; clones share one store.
//! An outermost dispatch holds the store's re-entrant dispatch lock until
//! its notification pass (and, under `Queue`, the drained queue) is done.
//! Dispatches from other threads wait for it; only dispatches made on the
//! same thread while the lock is held count as nested. A listener must not
//! block on another thread that dispatches to the same store.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use smallvec::SmallVec;
use tracing::{debug, error, trace, warn};

use super::listener::{Listener, ListenerList, Subscription};
use super::{Action, Reducer};
use crate::config::{ListenerFaultPolicy, ReentrancyPolicy, StoreOptions};
use crate::error::StoreError;

struct Inner<S> {
    state: RwLock<Arc<S>>,
    reducer: RwLock<Arc<dyn Reducer<S>>>,
    listeners: ListenerList,
    options: StoreOptions,

    /// Serializes dispatches across threads. Re-entrant so listeners can
    /// dispatch on the thread that already holds it.
    dispatch_lock: ReentrantMutex<()>,

    /// Dispatches currently on the stack of the lock holder.
    depth: AtomicUsize,

    /// Actions deferred by [`ReentrancyPolicy::Queue`].
    pending: Mutex<VecDeque<Action>>,

    dispatch_count: AtomicU64,
    listener_faults: AtomicU64,
}

/// A Flux-style state container.
///
/// # Example
///
/// ```rust,ignore
/// let store = Store::new(infallible(|state: Option<&i64>, action: &Action| {
///     let state = state.copied().unwrap_or(0);
///     if action.is("INC") { state + 1 } else { state }
/// }))?;
///
/// let subscription = store.subscribe(|| println!("changed"));
/// store.dispatch(Action::new("INC"))?;   // prints "changed"
/// assert_eq!(*store.get_state(), 1);
/// subscription.unsubscribe();
/// ```
pub struct Store<S>
where
    S: Send + Sync + 'static,
{
    inner: Arc<Inner<S>>,
}

/// Create a store with default options.
pub fn create_store<S, R>(reducer: R) -> Result<Store<S>, StoreError>
where
    S: Send + Sync + 'static,
    R: Reducer<S>,
{
    Store::new(reducer)
}

/// Decrements the dispatch depth when a dispatch leaves the stack, including
/// by unwinding. An outermost dispatch that unwinds drops whatever is still
/// queued, so stale actions never leak into an unrelated later dispatch.
struct DepthGuard<'a> {
    depth: &'a AtomicUsize,
    pending: &'a Mutex<VecDeque<Action>>,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a AtomicUsize, pending: &'a Mutex<VecDeque<Action>>) -> Self {
        depth.fetch_add(1, Ordering::SeqCst);
        Self { depth, pending }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        let outermost = self.depth.fetch_sub(1, Ordering::SeqCst) == 1;
        if outermost && thread::panicking() {
            let mut pending = self.pending.lock();
            if !pending.is_empty() {
                warn!(discarded = pending.len(), "discarding queued actions after listener panic");
                pending.clear();
            }
        }
    }
}

impl<S> Store<S>
where
    S: Send + Sync + 'static,
{
    /// Create a store, computing the initial state by reducing the
    /// [`INIT`](super::INIT) action from no state.
    pub fn new<R: Reducer<S>>(reducer: R) -> Result<Self, StoreError> {
        Self::with_options(reducer, StoreOptions::default())
    }

    pub fn with_options<R: Reducer<S>>(reducer: R, options: StoreOptions) -> Result<Self, StoreError> {
        let initial = reducer.reduce(None, &Action::init())?;
        let reducer: Arc<dyn Reducer<S>> = Arc::new(reducer);
        debug!(?options, "store created");

        Ok(Self {
            inner: Arc::new(Inner {
                state: RwLock::new(Arc::new(initial)),
                reducer: RwLock::new(reducer),
                listeners: Arc::new(Mutex::new(Vec::new())),
                options,
                dispatch_lock: ReentrantMutex::new(()),
                depth: AtomicUsize::new(0),
                pending: Mutex::new(VecDeque::new()),
                dispatch_count: AtomicU64::new(0),
                listener_faults: AtomicU64::new(0),
            }),
        })
    }

    /// Get the current state.
    pub fn get_state(&self) -> Arc<S> {
        Arc::clone(&self.inner.state.read())
    }

    pub fn options(&self) -> StoreOptions {
        self.inner.options
    }

    /// Apply `action` and notify listeners.
    pub fn dispatch(&self, action: impl Into<Action>) -> Result<(), StoreError> {
        let action = action.into();
        let _serial = self.inner.dispatch_lock.lock();
        let outermost = self.inner.depth.load(Ordering::SeqCst) == 0;

        if !outermost {
            match self.inner.options.reentrancy {
                ReentrancyPolicy::Nested => {
                    trace!(action = action.kind(), "nested dispatch");
                }
                ReentrancyPolicy::Queue => {
                    trace!(action = action.kind(), "queueing nested dispatch");
                    self.inner.pending.lock().push_back(action);
                    return Ok(());
                }
                ReentrancyPolicy::Forbid => {
                    warn!(action = action.kind(), "rejecting nested dispatch");
                    return Err(StoreError::ReentrantDispatch {
                        action: action.kind().to_string(),
                    });
                }
            }
        }

        let _depth = DepthGuard::enter(&self.inner.depth, &self.inner.pending);
        self.apply(&action)?;

        if outermost && self.inner.options.reentrancy == ReentrancyPolicy::Queue {
            self.drain_pending()?;
        }
        Ok(())
    }

    /// Register a listener called after every dispatch until unsubscribed.
    ///
    /// Registering the same callback twice creates two independent entries.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let listener = Listener::new(listener);
        let id = listener.id();
        self.inner.listeners.lock().push(listener);
        trace!(?id, "listener subscribed");
        Subscription::new(id, &self.inner.listeners)
    }

    /// Swap the reducer and dispatch [`REPLACE`](super::REPLACE) so the new
    /// reducer can fill in any state it owns.
    pub fn replace_reducer<R: Reducer<S>>(&self, reducer: R) -> Result<(), StoreError> {
        let reducer: Arc<dyn Reducer<S>> = Arc::new(reducer);
        let _serial = self.inner.dispatch_lock.lock();
        *self.inner.reducer.write() = reducer;
        self.dispatch(Action::replace())
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Number of actions successfully reduced, excluding the init action.
    pub fn dispatch_count(&self) -> u64 {
        self.inner.dispatch_count.load(Ordering::SeqCst)
    }

    /// Number of listener panics caught under [`ListenerFaultPolicy::Isolate`].
    pub fn listener_faults(&self) -> u64 {
        self.inner.listener_faults.load(Ordering::SeqCst)
    }

    pub fn is_dispatching(&self) -> bool {
        self.inner.depth.load(Ordering::SeqCst) > 0
    }

    fn apply(&self, action: &Action) -> Result<(), StoreError> {
        let reducer = Arc::clone(&self.inner.reducer.read());
        let current = self.get_state();

        let next = reducer.reduce(Some(&*current), action).map_err(|err| {
            warn!(action = action.kind(), %err, "reducer failed, state unchanged");
            err
        })?;

        *self.inner.state.write() = Arc::new(next);
        self.inner.dispatch_count.fetch_add(1, Ordering::SeqCst);
        self.notify(action);
        Ok(())
    }

    fn notify(&self, action: &Action) {
        let snapshot: SmallVec<[Listener; 8]> = self.inner.listeners.lock().iter().cloned().collect();
        debug!(action = action.kind(), listeners = snapshot.len(), "notifying listeners");

        for listener in &snapshot {
            trace!(id = ?listener.id(), "calling listener");
            match self.inner.options.listener_faults {
                ListenerFaultPolicy::Propagate => listener.call(),
                ListenerFaultPolicy::Isolate => {
                    if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| listener.call())) {
                        self.inner.listener_faults.fetch_add(1, Ordering::SeqCst);
                        error!(
                            id = ?listener.id(),
                            action = action.kind(),
                            panic = panic_message(&*panic),
                            "listener panicked"
                        );
                    }
                }
            }
        }
    }

    fn drain_pending(&self) -> Result<(), StoreError> {
        loop {
            let next = self.inner.pending.lock().pop_front();
            let Some(action) = next else {
                return Ok(());
            };

            if let Err(err) = self.apply(&action) {
                let mut pending = self.inner.pending.lock();
                if !pending.is_empty() {
                    warn!(discarded = pending.len(), "discarding queued actions after reducer failure");
                    pending.clear();
                }
                return Err(err);
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

impl<S> Clone for Store<S>
where
    S: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Debug for Store<S>
where
    S: Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.get_state())
            .field("listener_count", &self.listener_count())
            .field("dispatch_count", &self.dispatch_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReducerError;
    use crate::store::{infallible, reducer};
    use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

    fn counter(state: Option<&i64>, action: &Action) -> Result<i64, ReducerError> {
        let state = state.copied().unwrap_or(0);
        match action.kind() {
            "INC" => Ok(state + 1),
            "ADD" => Ok(state + action.get("by").and_then(|v| v.as_i64()).unwrap_or(0)),
            "FAIL" => Err(ReducerError::new("refused")),
            _ => Ok(state),
        }
    }

    fn counting_listener(store: &Store<i64>) -> (Arc<AtomicI32>, Subscription) {
        let calls = Arc::new(AtomicI32::new(0));
        let calls_clone = calls.clone();
        let subscription = store.subscribe(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });
        (calls, subscription)
    }

    #[test]
    fn counter_store_counts() {
        let store = Store::new(counter).unwrap();
        assert_eq!(*store.get_state(), 0);

        store.dispatch("INC").unwrap();
        assert_eq!(*store.get_state(), 1);

        store.dispatch("INC").unwrap();
        assert_eq!(*store.get_state(), 2);
        assert_eq!(store.dispatch_count(), 2);
    }

    #[test]
    fn payload_reaches_reducer() {
        let store = create_store(counter).unwrap();
        store.dispatch(Action::new("ADD").with("by", 5)).unwrap();
        assert_eq!(*store.get_state(), 5);
    }

    #[test]
    fn initial_state_comes_from_init_action() {
        let store = Store::new(infallible(|state: Option<&String>, action: &Action| {
            match state {
                None => format!("created by {}", action.kind()),
                Some(s) => s.clone(),
            }
        }))
        .unwrap();
        assert_eq!(*store.get_state(), "created by @@vflux/INIT");
    }

    #[test]
    fn failing_init_fails_construction() {
        let result = Store::new(reducer(|_state: Option<&i64>, _action| {
            Err(ReducerError::new("no initial state"))
        }));
        assert_eq!(
            result.unwrap_err(),
            StoreError::Reducer(ReducerError::new("no initial state"))
        );
    }

    #[test]
    fn reducer_failure_leaves_state_and_skips_listeners() {
        let store = Store::new(counter).unwrap();
        store.dispatch("INC").unwrap();
        let (calls, _subscription) = counting_listener(&store);

        let err = store.dispatch("FAIL").unwrap_err();

        assert!(matches!(err, StoreError::Reducer(_)));
        assert_eq!(*store.get_state(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!store.is_dispatching());
    }

    #[test]
    fn listener_called_once_per_dispatch_until_unsubscribed() {
        let store = Store::new(counter).unwrap();
        let (calls, subscription) = counting_listener(&store);

        store.dispatch("INC").unwrap();
        store.dispatch("NOOP").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(subscription.unsubscribe());
        store.dispatch("INC").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn double_and_foreign_unsubscribe_are_no_ops() {
        let store = Store::new(counter).unwrap();
        let other = Store::new(counter).unwrap();
        let (calls, subscription) = counting_listener(&store);
        let (_other_calls, foreign) = counting_listener(&other);
        foreign.unsubscribe();

        assert!(subscription.unsubscribe());
        assert!(!subscription.unsubscribe());
        assert!(!foreign.unsubscribe());

        store.dispatch("INC").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn same_callback_subscribed_twice_is_called_twice() {
        let store = Store::new(counter).unwrap();
        let calls = Arc::new(AtomicI32::new(0));
        let callback = {
            let calls = calls.clone();
            Arc::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };

        let first = {
            let callback = callback.clone();
            store.subscribe(move || callback())
        };
        let _second = {
            let callback = callback.clone();
            store.subscribe(move || callback())
        };

        store.dispatch("INC").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        first.unsubscribe();
        store.dispatch("INC").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let store = Store::new(counter).unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));
        for name in ["a", "b", "c"] {
            let order = order.clone();
            store.subscribe(move || order.lock().push(name));
        }

        store.dispatch("INC").unwrap();
        assert_eq!(*order.lock(), vec!["a", "b", "c"]);
    }

    #[test]
    fn unsubscribe_during_notification_applies_to_next_dispatch() {
        let store = Store::new(counter).unwrap();
        let (late_calls, late) = {
            let calls = Arc::new(AtomicI32::new(0));
            let calls_clone = calls.clone();
            let remover_target: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
            let target = remover_target.clone();
            store.subscribe(move || {
                if let Some(subscription) = target.lock().as_ref() {
                    subscription.unsubscribe();
                }
            });
            let late = store.subscribe(move || {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            });
            *remover_target.lock() = Some(late.clone());
            (calls, late)
        };

        store.dispatch("INC").unwrap();
        // still in the snapshot taken for this pass
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
        assert!(!late.is_active());

        store.dispatch("INC").unwrap();
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn nested_dispatch_runs_inline_and_hides_intermediate_state() {
        let store = Store::new(counter).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        {
            let store_handle = store.clone();
            let seen = seen.clone();
            store.subscribe(move || {
                let state = *store_handle.get_state();
                seen.lock().push(("first", state));
                if state == 1 {
                    store_handle.dispatch("INC").unwrap();
                }
            });
        }
        {
            let store_handle = store.clone();
            let seen = seen.clone();
            store.subscribe(move || {
                seen.lock().push(("second", *store_handle.get_state()));
            });
        }

        store.dispatch("INC").unwrap();

        assert_eq!(*store.get_state(), 2);
        assert_eq!(
            *seen.lock(),
            vec![("first", 1), ("first", 2), ("second", 2), ("second", 2)]
        );
    }

    #[test]
    fn queued_dispatch_runs_after_the_current_pass() {
        let options = StoreOptions::default().reentrancy(ReentrancyPolicy::Queue);
        let store = Store::with_options(counter, options).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        {
            let store_handle = store.clone();
            let seen = seen.clone();
            store.subscribe(move || {
                let state = *store_handle.get_state();
                seen.lock().push(("first", state));
                if state == 1 {
                    store_handle.dispatch("INC").unwrap();
                }
            });
        }
        {
            let store_handle = store.clone();
            let seen = seen.clone();
            store.subscribe(move || {
                seen.lock().push(("second", *store_handle.get_state()));
            });
        }

        store.dispatch("INC").unwrap();

        assert_eq!(*store.get_state(), 2);
        assert_eq!(
            *seen.lock(),
            vec![("first", 1), ("second", 1), ("first", 2), ("second", 2)]
        );
    }

    #[test]
    fn queued_reducer_failure_propagates_from_outer_dispatch() {
        let options = StoreOptions::default().reentrancy(ReentrancyPolicy::Queue);
        let store = Store::with_options(counter, options).unwrap();
        let store_handle = store.clone();
        let fired = AtomicBool::new(false);
        store.subscribe(move || {
            if !fired.swap(true, Ordering::SeqCst) {
                store_handle.dispatch("FAIL").unwrap();
                store_handle.dispatch("INC").unwrap();
            }
        });

        let err = store.dispatch("INC").unwrap_err();

        assert!(matches!(err, StoreError::Reducer(_)));
        assert_eq!(*store.get_state(), 1);
        // the INC queued behind the failure was discarded
        store.dispatch("NOOP").unwrap();
        assert_eq!(*store.get_state(), 1);
    }

    #[test]
    fn forbidden_nested_dispatch_is_rejected() {
        let options = StoreOptions::default().reentrancy(ReentrancyPolicy::Forbid);
        let store = Store::with_options(counter, options).unwrap();
        let outcome = Arc::new(Mutex::new(None));

        {
            let store_handle = store.clone();
            let outcome = outcome.clone();
            store.subscribe(move || {
                *outcome.lock() = Some(store_handle.dispatch("INC"));
            });
        }

        store.dispatch("INC").unwrap();

        assert_eq!(*store.get_state(), 1);
        assert_eq!(
            *outcome.lock(),
            Some(Err(StoreError::ReentrantDispatch {
                action: "INC".to_string()
            }))
        );
        assert!(!store.is_dispatching());
    }

    #[test]
    fn panicking_listener_is_isolated() {
        let store = Store::new(counter).unwrap();
        store.subscribe(|| panic!("listener exploded"));
        let (calls, _subscription) = counting_listener(&store);

        store.dispatch("INC").unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.listener_faults(), 1);
        assert_eq!(*store.get_state(), 1);
    }

    #[test]
    fn panicking_listener_propagates_when_configured() {
        let options = StoreOptions::default().listener_faults(ListenerFaultPolicy::Propagate);
        let store = Store::with_options(counter, options).unwrap();
        store.subscribe(|| panic!("listener exploded"));
        let (calls, _subscription) = counting_listener(&store);

        let result = panic::catch_unwind(AssertUnwindSafe(|| store.dispatch("INC")));

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(*store.get_state(), 1);
        assert!(!store.is_dispatching());
    }

    #[test]
    fn queued_actions_are_dropped_when_a_listener_panics() {
        let options = StoreOptions::default()
            .reentrancy(ReentrancyPolicy::Queue)
            .listener_faults(ListenerFaultPolicy::Propagate);
        let store = Store::with_options(counter, options).unwrap();
        let store_handle = store.clone();
        let fired = AtomicBool::new(false);
        store.subscribe(move || {
            if !fired.swap(true, Ordering::SeqCst) {
                store_handle.dispatch("INC").unwrap();
                panic!("listener exploded after queueing");
            }
        });

        let result = panic::catch_unwind(AssertUnwindSafe(|| store.dispatch("INC")));
        assert!(result.is_err());
        assert_eq!(*store.get_state(), 1);

        store.dispatch("NOOP").unwrap();
        assert_eq!(*store.get_state(), 1);
        assert!(!store.is_dispatching());
    }

    fn slow_counter(state: Option<&i64>, action: &Action) -> Result<i64, ReducerError> {
        let state = state.copied().unwrap_or(0);
        thread::yield_now();
        Ok(if action.is("INC") { state + 1 } else { state })
    }

    #[test]
    fn concurrent_dispatches_are_serialized() {
        const THREADS: i64 = 4;
        const PER_THREAD: i64 = 2000;

        for policy in [ReentrancyPolicy::Nested, ReentrancyPolicy::Queue, ReentrancyPolicy::Forbid] {
            let store = Store::with_options(slow_counter, StoreOptions::default().reentrancy(policy)).unwrap();
            let (calls, _subscription) = counting_listener(&store);

            let workers: Vec<_> = (0..THREADS)
                .map(|_| {
                    let store = store.clone();
                    thread::spawn(move || {
                        for _ in 0..PER_THREAD {
                            let before = store.dispatch_count();
                            store.dispatch("INC").unwrap();
                            // our own action has been applied by the time dispatch returns
                            assert!(store.dispatch_count() > before);
                        }
                    })
                })
                .collect();
            for worker in workers {
                worker.join().unwrap();
            }

            assert_eq!(*store.get_state(), THREADS * PER_THREAD, "{policy:?}");
            assert_eq!(store.dispatch_count(), (THREADS * PER_THREAD) as u64, "{policy:?}");
            assert_eq!(calls.load(Ordering::SeqCst) as i64, THREADS * PER_THREAD, "{policy:?}");
            assert!(!store.is_dispatching());
        }
    }

    #[test]
    fn nested_dispatch_still_works_while_other_threads_wait() {
        let options = StoreOptions::default().reentrancy(ReentrancyPolicy::Queue);
        let store = Store::with_options(slow_counter, options).unwrap();
        {
            let store_handle = store.clone();
            store.subscribe(move || {
                // each odd state queues one follow-up INC
                if *store_handle.get_state() % 2 == 1 {
                    store_handle.dispatch("INC").unwrap();
                }
            });
        }

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        store.dispatch("INC").unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(*store.get_state(), 4000);
    }

    #[test]
    fn replace_reducer_dispatches_replace_action() {
        let store = Store::new(counter).unwrap();
        store.dispatch("INC").unwrap();
        let (calls, _subscription) = counting_listener(&store);

        store
            .replace_reducer(infallible(|state: Option<&i64>, action: &Action| {
                let state = state.copied().unwrap_or(0);
                if action.is(crate::store::REPLACE) {
                    state * 100
                } else {
                    state
                }
            }))
            .unwrap();

        assert_eq!(*store.get_state(), 100);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stores_are_independent_and_clones_share_state() {
        let a = Store::new(counter).unwrap();
        let b = Store::new(counter).unwrap();
        let a2 = a.clone();

        a.dispatch("INC").unwrap();
        a2.dispatch("INC").unwrap();

        assert_eq!(*a.get_state(), 2);
        assert_eq!(*b.get_state(), 0);
    }

    #[test]
    fn get_state_hands_out_shared_snapshots() {
        let store = Store::new(counter).unwrap();
        let before = store.get_state();
        store.dispatch("INC").unwrap();

        assert_eq!(*before, 0);
        assert_eq!(*store.get_state(), 1);
    }
}
