use std::{cell::RefCell, rc::Rc};

use futures::channel::oneshot;
use gloo_utils::window;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Position, PositionError};
use workout_tracker_lib::{coords::Coords, error::GeolocationError};

type Sender = Rc<RefCell<Option<oneshot::Sender<Result<Coords, GeolocationError>>>>>;

/// Asks the browser for the current position once. Never resolves if the
/// browser never answers.
pub async fn current_position() -> Result<Coords, GeolocationError> {
    let geolocation = window().navigator().geolocation().map_err(|_| GeolocationError::Unsupported)?;

    let (tx, rx) = oneshot::channel();
    let tx: Sender = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let tx = tx.clone();
        Closure::once(move |position: Position| {
            let coords = position.coords();
            send(&tx, Ok(Coords(coords.latitude(), coords.longitude())));
        })
    };

    let on_error = {
        let tx = tx.clone();
        Closure::once(move |err: PositionError| {
            send(&tx, Err(GeolocationError::Failed { code: err.code(), message: err.message() }));
        })
    };

    geolocation
        .get_current_position_with_error_callback(on_success.as_ref().unchecked_ref(), Some(on_error.as_ref().unchecked_ref()))
        .map_err(|_| GeolocationError::Unsupported)?;

    // Keeps both closures alive until one of them has fired
    let result = rx.await.unwrap_or(Err(GeolocationError::Unsupported));
    drop((on_success, on_error));
    result
}

fn send(tx: &Sender, result: Result<Coords, GeolocationError>) {
    if let Some(tx) = tx.borrow_mut().take() {
        let _ = tx.send(result);
    }
}
