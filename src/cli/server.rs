use std::path::PathBuf;

use clap::Args;

use crate::common::debug;
use crate::config::Initializer;
use crate::server::tcp::Config as ServerConfig;
use crate::Result;

/// Running kurierd server
#[derive(Args, Debug)]
pub struct ServerCommand {
    /// Max tcp connections
    #[arg(long, env = "KURIERD_SERVER_MAX_CONNECTIONS")]
    max_connections: Option<u32>,
    /// Buffer bytes assigned to each tcp connection
    #[arg(long, env = "KURIERD_SERVER_CONNECTION_TCP_BUFFER_BYTES")]
    connection_tcp_buffer_bytes: Option<usize>,
    /// Configuration file path
    #[arg(
        long,
        short = 'C',
        default_value = "./files/config.yaml",
        env = "KURIERD_SERVER_CONFIG_PATH"
    )]
    config: PathBuf,
    /// Tcp binding address host(e.g. 0.0.0.0, localhost)
    #[arg(long, env = "KURIERD_SERVER_HOST")]
    bind_host: Option<String>,
    /// Tcp binding address port
    #[arg(long, env = "KURIERD_SERVER_PORT")]
    bind_port: Option<String>,
    /// Tls server certificate file path
    #[arg(long, env = "KURIERD_TLS_CERT", default_value = "./files/localhost.pem")]
    cert: PathBuf,
    /// Tls server private key file path
    #[arg(long, env = "KURIERD_TLS_KEY", default_value = "./files/localhost.key")]
    key: PathBuf,
}

impl ServerCommand {
    pub async fn run(self, disable_tls: bool) -> Result<()> {
        let ServerCommand {
            max_connections,
            connection_tcp_buffer_bytes,
            config,
            mut bind_host,
            mut bind_port,
            cert,
            key,
        } = self;

        let mut initializer = Initializer::load_config_file(config).await?;

        let mut config = {
            let mut config = ServerConfig::default();

            config.set_max_tcp_connections(max_connections);
            config.set_connection_tcp_buffer_bytes(connection_tcp_buffer_bytes);
            config.set_listen_host(&mut bind_host);
            config.set_listen_port(&mut bind_port);
            // Only override the config file when the flag was actually given.
            config.set_disable_tls(&mut disable_tls.then_some(true));
            config.set_tls_certificate(&mut Some(cert));
            config.set_tls_key(&mut Some(key));
            config
        };

        initializer.config.server.override_merge(&mut config);

        debug!("{:?}", initializer.config);

        initializer.run_kurierd(tokio::signal::ctrl_c()).await
    }
}
