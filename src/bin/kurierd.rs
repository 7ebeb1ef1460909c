use kurierd::{cli, config, KurierdError};

fn main() {
    // Install global collector configured based on KURIERD_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env(
            config::env::LOG_DIRECTIVE,
        ))
        .with_target(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_thread_ids(true)
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .on_thread_start(|| tracing::trace!("thread start"))
        .on_thread_stop(|| tracing::trace!("thread stop"))
        .enable_io()
        .enable_time()
        .build()
        .unwrap()
        .block_on(async {
            run().await;
        })
}

async fn run() {
    if let Err(err) = run_inner().await {
        let code = match err {
            KurierdError::Unauthenticated => {
                eprintln!("unauthenticated");
                2
            }
            _ => {
                eprintln!("{}", err);
                1
            }
        };
        std::process::exit(code);
    };
}

async fn run_inner() -> kurierd::Result<()> {
    let cli::KurierdCommand { client, command } = cli::parse();

    match command {
        cli::Command::Ping(ping) => ping.run(client).await,
        cli::Command::Login(login) => login.run(client).await,
        cli::Command::Routes(routes) => routes.run(client).await,
        cli::Command::Remove(remove) => remove.run(client).await,
        cli::Command::Server(server) => {
            let disable_tls = client.disable_tls;
            server.run(disable_tls).await
        }
    }
}
