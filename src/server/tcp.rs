use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc, Semaphore};
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::server::TlsStream;
use tokio_rustls::TlsAcceptor;

use crate::common::{error, info, trace, warn, ErrorKind, Result};
use crate::core::{ListRoutes, RemoveRoute, UnitOfWork};
use crate::protocol::connection::Connection;
use crate::protocol::message::{Fail, FailCode, Message, Success};

// Server configuration.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    // Max tcp connections.
    max_tcp_connections: Option<u32>,
    // Size of buffer allocated per tcp connection.
    connection_tcp_buffer_bytes: Option<usize>,
    // tcp listen host.
    listen_host: Option<String>,
    // tcp listen port.
    listen_port: Option<String>,
    // disable tls connections.
    disable_tls: Option<bool>,
    // tls server certificate file path.
    tls_certificate: Option<PathBuf>,
    // tls server private key file path.
    tls_key: Option<PathBuf>,
}

impl Config {
    const DEFAULT_MAX_TCP_CONNECTIONS: u32 = 1024 * 10;
    const DEFAULT_CONNECTION_TCP_BUFFER_BYTES: usize = 1024 * 4;
    const DEFAULT_LISTEN_HOST: &'static str = "127.0.0.1";
    const DEFAULT_LISTEN_PORT: &'static str = crate::server::DEFAULT_PORT;

    pub fn set_max_tcp_connections(&mut self, val: Option<u32>) {
        if let Some(val) = val {
            self.max_tcp_connections = Some(std::cmp::max(val, 1));
        }
    }

    pub fn set_connection_tcp_buffer_bytes(&mut self, val: Option<usize>) {
        if let Some(val) = val {
            self.connection_tcp_buffer_bytes = Some(std::cmp::max(val, 1));
        }
    }

    pub fn set_listen_host(&mut self, val: &mut Option<String>) {
        if let Some(val) = val.take() {
            self.listen_host = Some(val)
        }
    }

    pub fn set_listen_port(&mut self, val: &mut Option<String>) {
        if let Some(val) = val.take() {
            self.listen_port = Some(val)
        }
    }

    pub fn set_disable_tls(&mut self, val: &mut Option<bool>) {
        if let Some(val) = val.take() {
            self.disable_tls = Some(val)
        }
    }

    pub fn set_tls_certificate(&mut self, val: &mut Option<PathBuf>) {
        if let Some(val) = val.take() {
            self.tls_certificate = Some(val)
        }
    }

    pub fn set_tls_key(&mut self, val: &mut Option<PathBuf>) {
        if let Some(val) = val.take() {
            self.tls_key = Some(val)
        }
    }

    pub(crate) fn override_merge(&mut self, other: &mut Config) {
        self.set_max_tcp_connections(other.max_tcp_connections);
        self.set_connection_tcp_buffer_bytes(other.connection_tcp_buffer_bytes);
        self.set_listen_host(&mut other.listen_host);
        self.set_listen_port(&mut other.listen_port);
        self.set_disable_tls(&mut other.disable_tls);
        self.set_tls_certificate(&mut other.tls_certificate);
        self.set_tls_key(&mut other.tls_key);
    }

    fn max_tcp_connections(&self) -> u32 {
        self.max_tcp_connections
            .unwrap_or(Config::DEFAULT_MAX_TCP_CONNECTIONS)
    }

    fn connection_tcp_buffer_bytes(&self) -> usize {
        self.connection_tcp_buffer_bytes
            .unwrap_or(Config::DEFAULT_CONNECTION_TCP_BUFFER_BYTES)
    }

    pub(crate) fn listen_addr(&self) -> String {
        format!(
            "{}:{}",
            self.listen_host
                .as_deref()
                .unwrap_or(Config::DEFAULT_LISTEN_HOST),
            self.listen_port
                .as_deref()
                .unwrap_or(Config::DEFAULT_LISTEN_PORT),
        )
    }

    fn disable_tls(&self) -> bool {
        self.disable_tls.unwrap_or(false)
    }

    fn load_certs(&self) -> Result<Vec<CertificateDer<'static>>> {
        let path = self
            .tls_certificate
            .as_ref()
            .ok_or_else(|| ErrorKind::Internal("tls certificate path not configured".into()))?;

        let mut reader = std::io::BufReader::new(std::fs::File::open(path)?);
        let certs = rustls_pemfile::certs(&mut reader).collect::<std::io::Result<Vec<_>>>()?;

        Ok(certs)
    }

    fn load_key(&self) -> Result<PrivateKeyDer<'static>> {
        let path = self
            .tls_key
            .as_ref()
            .ok_or_else(|| ErrorKind::Internal("tls key path not configured".into()))?;

        let mut reader = std::io::BufReader::new(std::fs::File::open(path)?);
        rustls_pemfile::private_key(&mut reader)?
            .ok_or_else(|| ErrorKind::Internal("no private key found in tls key file".into()).into())
    }
}

type ShutdownSignal = ();
type ShutdownCompleteSignal = ();

// Handle graceful shutdown.
struct GracefulShutdown {
    notify_shutdown: broadcast::Sender<ShutdownSignal>,
    shutdown_complete_tx: mpsc::Sender<ShutdownCompleteSignal>,
    shutdown_complete_rx: mpsc::Receiver<ShutdownCompleteSignal>,
}

impl GracefulShutdown {
    fn new() -> Self {
        let (notify_shutdown, _) = broadcast::channel(1);
        let (shutdown_complete_tx, shutdown_complete_rx) = mpsc::channel(1);

        Self {
            notify_shutdown,
            shutdown_complete_tx,
            shutdown_complete_rx,
        }
    }

    // Notify handlers of the shutdown and wait for it to be completed.
    async fn shutdown(mut self) {
        // Notify shutdown to all handler.
        drop(self.notify_shutdown);

        // Drop final Sender so the Receiver below can complete.
        drop(self.shutdown_complete_tx);

        // Wait for all handler to finish.
        let _ = self.shutdown_complete_rx.recv().await;
    }
}

pub(crate) struct Server {
    config: Config,
    graceful_shutdown: GracefulShutdown,
}

impl Server {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            config,
            graceful_shutdown: GracefulShutdown::new(),
        }
    }

    pub(crate) async fn run(
        mut self,
        request_sender: mpsc::Sender<UnitOfWork>,
        listener: TcpListener,
        shutdown: impl Future,
    ) -> Result<()> {
        tokio::select! {
            result = self.serve(listener, request_sender) => {
                if let Err(err) = result {
                    error!(cause = %err, "Failed to accept");
                }
            }
            _ = shutdown => {
                info!("Shutdown signal received");
            }
        }

        info!("Notify shutdown to all handlers");

        self.graceful_shutdown.shutdown().await;

        info!("Shutdown successfully completed");

        Ok(())
    }

    pub(crate) async fn serve(
        &mut self,
        listener: TcpListener,
        request_sender: mpsc::Sender<UnitOfWork>,
    ) -> Result<()> {
        info!(
            disable_tls = self.config.disable_tls(),
            "Server running. {:?}", self.config
        );

        let mut listener = SemaphoreListener::new(listener, self.config.max_tcp_connections());
        let connection_tcp_buffer_bytes = self.config.connection_tcp_buffer_bytes();

        if self.config.disable_tls() {
            loop {
                let (socket, handler) = self.accept(&mut listener, request_sender.clone()).await?;
                let connection = Connection::new(socket, Some(connection_tcp_buffer_bytes));

                tokio::spawn(handler.run(connection));
            }
        } else {
            let tls_config = ServerConfig::builder()
                .with_no_client_auth()
                .with_single_cert(self.config.load_certs()?, self.config.load_key()?)
                .map_err(|err| ErrorKind::Internal(format!("tls config. {}", err)))?;

            let tls_acceptor = TlsAcceptor::from(Arc::new(tls_config));

            loop {
                let (socket, handler) = self.accept(&mut listener, request_sender.clone()).await?;
                let acceptor = tls_acceptor.clone();

                tokio::spawn(async move {
                    let connection = match Server::handshake(
                        acceptor,
                        socket,
                        connection_tcp_buffer_bytes,
                    )
                    .await
                    {
                        Ok(connection) => connection,
                        Err(err) => {
                            error!("TLS: {}", err);
                            return;
                        }
                    };
                    trace!("TLS Handshake success");
                    handler.run(connection).await;
                });
            }
        }
    }

    async fn accept(
        &mut self,
        listener: &mut SemaphoreListener,
        request_sender: mpsc::Sender<UnitOfWork>,
    ) -> Result<(TcpStream, Handler)> {
        let (socket, peer_addr) = listener.accept().await?;
        info!(
            available = listener.max_connections.available_permits(),
            "Connection accepted"
        );

        let handler = Handler {
            remote_addr: Some(peer_addr),
            request_sender,
            shutdown: ShutdownSubscriber::new(
                self.graceful_shutdown.notify_shutdown.subscribe(),
                self.graceful_shutdown.shutdown_complete_tx.clone(),
            ),
            max_connections: listener.max_connections.clone(),
        };

        Ok((socket, handler))
    }

    async fn handshake(
        acceptor: TlsAcceptor,
        stream: TcpStream,
        buffer_bytes: usize,
    ) -> Result<Connection<TlsStream<TcpStream>>> {
        let tls_stream = acceptor.accept(stream).await?;
        Ok(Connection::new(tls_stream, Some(buffer_bytes)))
    }
}

struct Handler {
    remote_addr: Option<std::net::SocketAddr>,
    request_sender: mpsc::Sender<UnitOfWork>,
    shutdown: ShutdownSubscriber,
    max_connections: Arc<Semaphore>,
}

impl Handler {
    async fn run<T>(mut self, conn: Connection<T>)
    where
        T: AsyncWrite + AsyncRead + Unpin,
    {
        if let Err(err) = self.handle(conn).await {
            error!("{}", err);
        }
    }

    async fn handle<T>(&mut self, mut connection: Connection<T>) -> Result<()>
    where
        T: AsyncWrite + AsyncRead + Unpin,
    {
        // select! can't detect shutdown reliably, so explicitly check shutdown before tcp read.
        while !self.shutdown.is_shutdown() {
            let maybe_message = tokio::select! {
                msg = connection.read_message() => msg?,
                _ = self.shutdown.recv() => {
                    return Ok(())
                }
            };

            let message = match maybe_message {
                Some(message) => message,
                // peer closed the socket.
                None => return Ok(()),
            };

            match message {
                Message::Login(login) => {
                    let (work, rx) = UnitOfWork::new_login(login.into_credential());
                    self.request_sender.send(work).await?;

                    match rx.await?? {
                        Some(token) => {
                            connection.write_message(Success::with_token(token)).await?
                        }
                        None => {
                            info!(addr = ?self.remote_addr, "Login rejected");
                            connection
                                .write_message(Fail::new(FailCode::Unauthenticated))
                                .await?
                        }
                    }
                }
                Message::Ping(mut ping) => {
                    let (work, rx) = UnitOfWork::new_ping(ping.token().to_owned());
                    self.request_sender.send(work).await?;

                    match rx.await? {
                        Ok(time) => {
                            ping.record_server_time(time);
                            connection.write_message(ping).await?;
                        }
                        Err(err) if err.is_unauthorized() => {
                            connection
                                .write_message(Fail::new(FailCode::Unauthenticated))
                                .await?;
                        }
                        Err(err) => return Err(err),
                    }
                }
                Message::Routes(routes) => {
                    let list = ListRoutes {
                        date: routes.date(),
                    };
                    let (work, rx) = UnitOfWork::new_list_routes(routes.token().to_owned(), list);
                    self.request_sender.send(work).await?;

                    match rx.await? {
                        Ok(routes) => {
                            let body = serde_json::to_vec(&routes)?;
                            connection.write_message(Success::with_body(body)).await?;
                        }
                        Err(err) if err.is_unauthorized() => {
                            connection
                                .write_message(Fail::new(FailCode::Unauthenticated))
                                .await?;
                        }
                        Err(err) => return Err(err),
                    }
                }
                Message::Remove(remove) => {
                    let (work, rx) = UnitOfWork::new_remove_route(
                        remove.token().to_owned(),
                        RemoveRoute { id: remove.id() },
                    );
                    self.request_sender.send(work).await?;

                    match rx.await? {
                        Ok(Some(route)) => {
                            let body = serde_json::to_vec(&route)?;
                            connection.write_message(Success::with_body(body)).await?;
                        }
                        Ok(None) => connection.write_message(Success::new()).await?,
                        Err(err) if err.is_unauthorized() => {
                            connection
                                .write_message(Fail::new(FailCode::Unauthenticated))
                                .await?;
                        }
                        Err(err) => return Err(err),
                    }
                }
                message @ (Message::Success(_) | Message::Fail(_)) => {
                    warn!("unexpected message {:?}", message);
                    connection
                        .write_message(
                            Fail::new(FailCode::UnexpectedMessage)
                                .with_message(format!("unexpected message {:?}", message)),
                        )
                        .await?;
                }
            }
        }

        Ok(())
    }
}

impl Drop for Handler {
    fn drop(&mut self) {
        self.max_connections.add_permits(1);
    }
}

struct SemaphoreListener {
    inner: TcpListener,
    max_connections: Arc<Semaphore>,
}

impl SemaphoreListener {
    fn new(listener: TcpListener, max_connections: u32) -> Self {
        Self {
            inner: listener,
            max_connections: Arc::new(Semaphore::new(max_connections as usize)),
        }
    }

    async fn accept(&mut self) -> std::io::Result<(TcpStream, std::net::SocketAddr)> {
        self.max_connections
            .acquire()
            .await
            .expect("semaphore closed")
            .forget();
        self.inner.accept().await
    }
}

struct ShutdownSubscriber {
    shutdown: bool,
    notify: broadcast::Receiver<ShutdownSignal>,
    // Notify completing shutdown process by dropping.
    _complete_tx: mpsc::Sender<ShutdownCompleteSignal>,
}

impl ShutdownSubscriber {
    fn new(
        notify: broadcast::Receiver<ShutdownSignal>,
        complete_tx: mpsc::Sender<ShutdownCompleteSignal>,
    ) -> Self {
        Self {
            shutdown: false,
            notify,
            _complete_tx: complete_tx,
        }
    }

    fn is_shutdown(&self) -> bool {
        self.shutdown
    }

    async fn recv(&mut self) {
        if self.shutdown {
            return;
        }

        match self.notify.recv().await {
            Ok(_) | Err(broadcast::error::RecvError::Closed) => (), // ok
            Err(err) => error!("shutdown notify receive error {}", err),
        }

        self.shutdown = true;
    }
}
