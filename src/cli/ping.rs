use clap::Args;

use crate::cli::{authenticate, ClientOptions};
use crate::Result;

/// Ping the server
#[derive(Args, Debug)]
pub struct PingCommand {
    /// Ping counts
    #[arg(long, short = 'c', default_value = "1")]
    count: u32,
}

impl PingCommand {
    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let mut client = authenticate(options).await?;

        for current in 1..=self.count {
            let latency = client.ping().await?;
            println!(
                "ping (latency {}ms) {}/{}",
                latency.num_milliseconds(),
                current,
                self.count
            );
        }

        Ok(())
    }
}
