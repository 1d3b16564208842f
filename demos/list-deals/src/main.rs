//! List RD Station CRM deals.
//!
//! ```text
//! RD_STATION_TOKEN=... cargo run -p list-deals-demo -- [name]
//! ```
//!
//! `RD_STATION_BASE_URL` overrides the API base URL. Set `RUST_LOG=debug`
//! to see the request pipeline logs.

#![allow(clippy::print_stdout)]

use std::time::Duration;

use rd_station::prelude::*;
use rd_station::ListDealsResponse;
use tracing_subscriber::EnvFilter;

/// First page of deals, ordered by name, optionally filtered by name.
fn filter_for(name: Option<String>) -> ListDealsFilter {
    ListDealsFilter {
        limit: 5,
        page: 1,
        order: "name".to_string(),
        direction: Some(Direction::Asc),
        name: name.unwrap_or_default(),
        ..Default::default()
    }
}

async fn list<C: HttpClient>(
    client: &RdStationClient<C>,
    filter: &ListDealsFilter,
) -> rd_station::Result<ListDealsResponse> {
    let ctx = CallContext::new().with_timeout(Duration::from_secs(10));
    client.list_deals(&ctx, filter).await
}

#[tokio::main]
async fn main() -> rd_station::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = RdStationClient::from_env()?;
    let filter = filter_for(std::env::args().nth(1));

    let page = list(&client, &filter).await?;

    println!("{} deal(s) in total", page.total);
    for deal in &page.deals {
        println!("- {} [{}] {}", deal.id, deal.deal_stage.name, deal.name);
    }
    if let Some(next) = page.next_page.filter(|_| page.has_more) {
        println!("more deals available, next page: {next}");
    }

    Ok(())
}
