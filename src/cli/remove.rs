use clap::Args;

use crate::cli::{authenticate, ClientOptions};
use crate::Result;

/// Remove a route
#[derive(Args, Debug)]
pub struct RemoveCommand {
    /// Route id
    #[arg(value_name = "ID")]
    id: u64,
}

impl RemoveCommand {
    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let mut client = authenticate(options).await?;

        match client.remove_route(self.id).await? {
            Some(route) => println!("OK removed route {}", route.id),
            None => println!("Not Found"),
        }

        Ok(())
    }
}
