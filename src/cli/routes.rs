use chrono::NaiveDate;
use clap::Args;

use crate::cli::{authenticate, ClientOptions};
use crate::Result;

/// List delivery routes
#[derive(Args, Debug)]
pub struct RoutesCommand {
    /// Date to list routes for (YYYY-MM-DD). Defaults to today on the server
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl RoutesCommand {
    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let mut client = authenticate(options).await?;

        let routes = client.routes(self.date).await?;

        if routes.is_empty() {
            println!("No routes");
            return Ok(());
        }

        for route in routes {
            println!("route {}", route.id);
            for point in route.points {
                println!(
                    "  ({:.6}, {:.6}) {} {}",
                    point.lat,
                    point.lng,
                    point.address.as_deref().unwrap_or("-"),
                    point.additional_info.as_deref().unwrap_or(""),
                );
            }
        }

        Ok(())
    }
}
