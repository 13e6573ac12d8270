//! Python Bindings
//!
//! Exposes the store to Python when built with the `python` feature. State
//! is an arbitrary Python object; actions cross the boundary as plain dicts
//! (or bare type strings) through the `json` module:
//!
//! ```python
//! from vflux import Store
//!
//! def counter(state, action):
//!     state = 0 if state is None else state
//!     return state + 1 if action["type"] == "INC" else state
//!
//! store = Store(counter)
//! unsubscribe = store.subscribe(lambda: print(store.get_state()))
//! store.dispatch({"type": "INC"})   # prints 1
//! unsubscribe()
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use tracing::error;

use crate::error::{ReducerError, StoreError};
use crate::store::{reducer, Action, Store, Subscription};

fn store_err(err: StoreError) -> PyErr {
    PyRuntimeError::new_err(err.to_string())
}

fn action_from_py(py: Python<'_>, action: &Bound<'_, PyAny>) -> PyResult<Action> {
    if let Ok(kind) = action.extract::<String>() {
        return Ok(Action::new(kind));
    }
    let json = py.import_bound("json")?;
    let text: String = json.call_method1("dumps", (action,))?.extract()?;
    serde_json::from_str(&text).map_err(|err| PyValueError::new_err(format!("invalid action: {err}")))
}

fn action_to_py(py: Python<'_>, action: &Action) -> PyResult<PyObject> {
    let text = serde_json::to_string(action).map_err(|err| PyValueError::new_err(err.to_string()))?;
    let json = py.import_bound("json")?;
    Ok(json.call_method1("loads", (text,))?.unbind())
}

/// Python-exposed Store type.
///
/// The reducer is any callable `(state | None, action: dict) -> state`.
/// Exceptions raised by it propagate out of `dispatch` as `RuntimeError`
/// and leave the state unchanged.
#[pyclass(name = "Store")]
pub struct PyStore {
    store: Store<PyObject>,
}

#[pymethods]
impl PyStore {
    #[new]
    fn new(py_reducer: PyObject) -> PyResult<Self> {
        let store = Store::new(reducer(move |state: Option<&PyObject>, action: &Action| {
            Python::with_gil(|py| {
                let previous = match state {
                    Some(state) => state.clone_ref(py),
                    None => py.None(),
                };
                let action = action_to_py(py, action).map_err(|err| ReducerError::new(err.to_string()))?;
                py_reducer
                    .call1(py, (previous, action))
                    .map_err(|err| ReducerError::new(err.to_string()))
            })
        }))
        .map_err(store_err)?;

        Ok(Self { store })
    }

    fn get_state(&self, py: Python<'_>) -> PyObject {
        self.store.get_state().clone_ref(py)
    }

    fn dispatch(&self, py: Python<'_>, action: &Bound<'_, PyAny>) -> PyResult<()> {
        let action = action_from_py(py, action)?;
        self.store.dispatch(action).map_err(store_err)
    }

    /// Register a zero-argument callable. Exceptions it raises are logged
    /// and do not stop other listeners.
    fn subscribe(&self, listener: PyObject) -> PySubscription {
        let subscription = self.store.subscribe(move || {
            Python::with_gil(|py| {
                if let Err(err) = listener.call0(py) {
                    error!(%err, "python listener raised");
                }
            });
        });
        PySubscription { subscription }
    }

    fn listener_count(&self) -> usize {
        self.store.listener_count()
    }

    fn __repr__(&self, py: Python<'_>) -> String {
        let state = self.store.get_state();
        let repr = state
            .bind(py)
            .repr()
            .map(|r| r.to_string())
            .unwrap_or_else(|_| "?".to_string());
        format!(
            "Store(state={}, listeners={})",
            repr,
            self.store.listener_count()
        )
    }
}

/// Python-exposed unsubscribe capability. Calling it removes the listener.
#[pyclass(name = "Subscription")]
pub struct PySubscription {
    subscription: Subscription,
}

#[pymethods]
impl PySubscription {
    fn unsubscribe(&self) -> bool {
        self.subscription.unsubscribe()
    }

    fn __call__(&self) -> bool {
        self.subscription.unsubscribe()
    }

    #[getter]
    fn active(&self) -> bool {
        self.subscription.is_active()
    }
}
