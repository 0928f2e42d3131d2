//! Server lifecycle: `Running` until a shutdown is requested, then `Stopped`
//! once in-flight requests drain or the grace period runs out.

use std::{io, net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto::Builder,
    service::TowerToHyperService,
};
use tokio::{
    net::{TcpListener, TcpStream},
    signal,
    sync::watch,
    task::JoinSet,
};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    router: Router,
    grace: Duration,
    shutdown: Arc<watch::Sender<bool>>,
}

/// Cloneable trigger for stopping a running [`Server`].
#[derive(Debug, Clone)]
pub struct ShutdownHandle(Arc<watch::Sender<bool>>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.0.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.0.borrow()
    }
}

impl Server {
    pub async fn bind(addr: &str, router: Router, grace: Duration) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            listener,
            router,
            grace,
            shutdown: Arc::new(shutdown),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.shutdown))
    }

    /// Serve until the handle fires. Open connections then get `grace` to
    /// finish their in-flight requests; whatever is still open after that is
    /// aborted and its socket closed.
    pub async fn run(self) -> io::Result<()> {
        let Self {
            listener,
            router,
            grace,
            shutdown,
        } = self;

        let mut connections = JoinSet::new();
        let stop = stopped(shutdown.subscribe());
        tokio::pin!(stop);

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let service = TowerToHyperService::new(router.clone());
                        connections.spawn(serve_connection(stream, peer, service, shutdown.subscribe()));
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        tokio::time::sleep(Duration::from_millis(50)).await;
                    }
                },
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
                () = &mut stop => break,
            }
        }

        drop(listener);
        info!(open = connections.len(), "shutdown requested, draining in-flight requests");

        let drained = tokio::time::timeout(grace, async {
            while connections.join_next().await.is_some() {}
        })
        .await
        .is_ok();

        if !drained {
            warn!(
                ?grace,
                open = connections.len(),
                "grace period elapsed, closing remaining connections"
            );
            connections.shutdown().await;
        }

        shutdown.send_replace(true);
        info!("server stopped");
        Ok(())
    }
}

async fn stopped(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stopped| *stopped).await;
}

/// Drive one HTTP connection. On shutdown the connection finishes its
/// current request and closes; the task itself may be aborted sooner.
async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    service: TowerToHyperService<Router>,
    shutdown: watch::Receiver<bool>,
) {
    let builder = Builder::new(TokioExecutor::new());
    let conn = builder.serve_connection_with_upgrades(TokioIo::new(stream), service);
    tokio::pin!(conn);

    let stop = stopped(shutdown);
    tokio::pin!(stop);

    tokio::select! {
        res = conn.as_mut() => {
            if let Err(e) = res {
                debug!(%peer, error = %e, "connection closed with error");
            }
            return;
        }
        () = &mut stop => {}
    }

    conn.as_mut().graceful_shutdown();
    if let Err(e) = conn.await {
        debug!(%peer, error = %e, "connection closed with error during shutdown");
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C"),
        () = terminate => info!("received SIGTERM"),
    }
}
