use clap::Args;

use crate::cli::{authenticate, ClientOptions};
use crate::Result;

/// Login with the configured credential and print the issued session token.
/// The token stays valid for 8 hours; there is no way to revoke it.
#[derive(Args, Debug)]
pub struct LoginCommand {}

impl LoginCommand {
    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let client = authenticate(options).await?;

        println!("{}", client.token());

        Ok(())
    }
}
