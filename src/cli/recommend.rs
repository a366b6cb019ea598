use std::sync::Arc;
use tracing::info;
use crate::cli::commands::RecommendArgs;
use crate::config::SessionSettings;
use crate::errors::GateError;
use crate::trust::{HttpTrustClient, TrustService};

pub async fn handle_recommend(args: RecommendArgs) -> Result<(), GateError> {
    let config = super::load_config(args.config.as_deref()).await?;
    let chain = super::load_chain(&args.chain).await?;
    let settings = Arc::new(SessionSettings::from_config(&config));
    let client = HttpTrustClient::new(settings)?;

    info!(url = %args.url, chain_len = chain.len(), "Requesting recommendation");
    let response = client.recommend(&args.url, chain, config.request_timeout()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("Result: {}", response.result.as_str());
        println!("Detail: {}", response.detail);
    }
    Ok(())
}
