use std::future::Future;
use std::path::Path;

use tokio::fs;
use tokio::net::TcpListener;

use crate::common::{info, Error};
use crate::config::Config;
use crate::core;
use crate::server::tcp::Server;
use crate::Result;

// Orchestrates process startup: resolve configuration, wire the backend
// worker and hand the listener to the server.
pub struct Initializer {
    pub config: Config,
    listener: Option<TcpListener>,
}

impl Initializer {
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            listener: None,
        }
    }

    pub async fn load_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let f = fs::File::open(path.as_ref()).await?;
        let config =
            serde_yaml::from_reader::<_, Config>(f.into_std().await).map_err(Error::from)?;

        info!(path = %path.as_ref().display(), "Config file loaded");

        Ok(Self::from_config(config))
    }

    // Mainly for testing. Use the given listener instead of binding one from
    // the configured listen address.
    pub fn set_listener(&mut self, listener: TcpListener) {
        self.listener = Some(listener);
    }

    pub async fn run_kurierd(self, shutdown: impl Future) -> Result<()> {
        let Initializer { config, listener } = self;

        let backend = core::Builder::from_config(config.backend).build()?;
        let request_sender = backend.request_channel();

        tokio::spawn(backend.run());

        let listener = match listener {
            Some(listener) => listener,
            None => TcpListener::bind(config.server.listen_addr()).await?,
        };

        let server = Server::new(config.server);
        server
            .run(request_sender, listener, shutdown)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_config_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
backend:
  users:
    - username: tester
      password: secret
"#
        )
        .unwrap();

        let initializer = Initializer::load_config_file(file.path()).await.unwrap();

        assert_eq!(initializer.config.backend.users[0].username, "tester");
    }

    #[tokio::test]
    async fn missing_config_file_is_an_error() {
        assert!(Initializer::load_config_file("./no/such/config.yaml")
            .await
            .is_err());
    }
}
