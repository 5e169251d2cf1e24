use std::net::SocketAddr;

use kiosk::{Error, Router, Server, ServerConfig};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A server bound to an ephemeral loopback port, stopped with
/// [`Running::stop`].
pub struct Running {
    pub addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), Error>>,
}

impl Running {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Signals shutdown and waits for the server to drain.
    pub async fn stop(self) -> Result<(), Error> {
        let _ = self.stop.send(());
        self.handle.await.expect("server task panicked")
    }
}

pub async fn spawn(router: Router) -> Running {
    let server = Server::bind(&ServerConfig::new("127.0.0.1", 0)).await.unwrap();
    let addr = server.local_addr();
    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_with_shutdown(router, async {
        let _ = stopped.await;
    }));
    Running { addr, stop, handle }
}
