//! Graceful-shutdown server wrapper, same shape as the storage node's
//! (patterned on the teacher's `Server`, `lib/api/src/server.rs`).

use std::net::SocketAddr;

use tokio::sync::oneshot::{self, Receiver, Sender};
use tokio::task::JoinHandle;

use crate::routes;
use crate::state::LocatorState;

pub struct Server {
    address: SocketAddr,
    trigger_cancel: Sender<()>,
    cancel_signal: Option<Receiver<()>>,
}

impl Server {
    pub fn new(address: SocketAddr) -> Self {
        let (trigger_cancel, cancel_signal) = oneshot::channel();
        Self {
            address,
            trigger_cancel,
            cancel_signal: Some(cancel_signal),
        }
    }

    pub fn stop(self) {
        let _ = self.trigger_cancel.send(());
    }

    pub fn run(mut self, state: LocatorState) -> (Self, JoinHandle<()>) {
        let rx = self
            .cancel_signal
            .take()
            .expect("run can only be called once");
        let address = self.address;

        let (_, server) =
            warp::serve(routes::routes(state)).bind_with_graceful_shutdown(address, async move {
                let _ = rx.await;
            });

        let handle = tokio::spawn(server);
        (self, handle)
    }
}
