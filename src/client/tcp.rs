use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use crate::client::Api;
use crate::protocol::connection::Connection;
use crate::protocol::message::{FailCode, Login, Message, Ping, Remove, Routes};
use crate::{KurierdError, Result, Route};

// Client that has not logged in yet. The only available request is login,
// which consumes it and returns a token holding client.
pub struct UnauthenticatedClient<T = TcpStream> {
    connection: Connection<T>,
}

impl UnauthenticatedClient<TcpStream> {
    // Connect without tls.
    pub async fn insecure_from_addr(host: impl AsRef<str>, port: u16) -> Result<Self> {
        let stream = TcpStream::connect((host.as_ref(), port)).await?;

        Ok(Self {
            connection: Connection::new(stream, None),
        })
    }
}

impl UnauthenticatedClient<TlsStream<TcpStream>> {
    pub async fn from_addr(host: impl Into<String>, port: u16) -> Result<Self> {
        let host = host.into();

        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let server_name = ServerName::try_from(host.clone())
            .map_err(|err| KurierdError::Internal(Box::new(err)))?;

        let stream = TcpStream::connect((host.as_str(), port)).await?;
        let stream = TlsConnector::from(Arc::new(config))
            .connect(server_name, stream)
            .await?;

        Ok(Self {
            connection: Connection::new(stream, None),
        })
    }
}

impl<T> UnauthenticatedClient<T>
where
    T: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send,
{
    // Submit the credential. On success the server issues a session token
    // which authenticates every subsequent request.
    pub async fn login<S1, S2>(mut self, username: S1, password: S2) -> Result<Client<T>>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        self.connection
            .write_message(Login::new(username, password))
            .await?;

        match self.connection.read_message().await? {
            Some(Message::Success(success)) => {
                let token = success
                    .token()
                    .ok_or_else(|| KurierdError::Internal("login response without token".into()))?;
                Ok(Client {
                    connection: self.connection,
                    token,
                })
            }
            Some(Message::Fail(fail)) if fail.code() == FailCode::Unauthenticated => {
                Err(KurierdError::Unauthenticated)
            }
            message => Err(unexpected_message(message)),
        }
    }
}

pub struct Client<T = TcpStream> {
    connection: Connection<T>,
    token: String,
}

#[async_trait]
impl<T> Api for Client<T>
where
    T: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send,
{
    async fn ping(&mut self) -> Result<chrono::Duration> {
        let ping = Ping::new(self.token.clone()).record_client_time();
        self.connection.write_message(ping).await?;

        match self.connection.read_message().await? {
            Some(Message::Ping(ping)) => {
                let client_time = ping
                    .client_time()
                    .ok_or_else(|| KurierdError::Internal("ping response without time".into()))?;
                Ok(Utc::now() - client_time)
            }
            Some(Message::Fail(fail)) if fail.code() == FailCode::Unauthenticated => {
                Err(KurierdError::Unauthenticated)
            }
            message => Err(unexpected_message(message)),
        }
    }

    async fn routes(&mut self, date: Option<NaiveDate>) -> Result<Vec<Route>> {
        self.connection
            .write_message(Routes::new(self.token.clone(), date))
            .await?;

        match self.connection.read_message().await? {
            Some(Message::Success(success)) => {
                let body = success
                    .into_body()
                    .ok_or_else(|| KurierdError::Internal("routes response without body".into()))?;
                serde_json::from_slice(&body)
                    .map_err(|err| KurierdError::Internal(Box::new(err)))
            }
            Some(Message::Fail(fail)) if fail.code() == FailCode::Unauthenticated => {
                Err(KurierdError::Unauthenticated)
            }
            message => Err(unexpected_message(message)),
        }
    }

    async fn remove_route(&mut self, id: u64) -> Result<Option<Route>> {
        self.connection
            .write_message(Remove::new(self.token.clone(), id))
            .await?;

        match self.connection.read_message().await? {
            Some(Message::Success(success)) => match success.into_body() {
                Some(body) => serde_json::from_slice(&body)
                    .map(Some)
                    .map_err(|err| KurierdError::Internal(Box::new(err))),
                None => Ok(None),
            },
            Some(Message::Fail(fail)) if fail.code() == FailCode::Unauthenticated => {
                Err(KurierdError::Unauthenticated)
            }
            message => Err(unexpected_message(message)),
        }
    }

    fn token(&self) -> &str {
        &self.token
    }
}

fn unexpected_message(message: Option<Message>) -> KurierdError {
    match message {
        Some(message) => {
            KurierdError::Internal(format!("unexpected message {:?}", message).into())
        }
        None => KurierdError::Internal("connection closed by server".into()),
    }
}
