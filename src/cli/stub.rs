use tokio::net::TcpListener;
use tracing::info;
use crate::cli::commands::StubArgs;
use crate::errors::GateError;
use crate::models::{ResultDetail, TrustResponse, TrustResult};
use crate::stub::{self, StubState};

pub async fn handle_stub(args: StubArgs) -> Result<(), GateError> {
    let default = parse_verdict(&args.verdict, &args.detail)?;
    let state = StubState::new(default);

    for entry in &args.host_verdicts {
        let (host, verdict) = parse_host_verdict(entry)?;
        info!(host = %host, result = verdict.result.as_str(), detail = %verdict.detail, "Per-host verdict");
        state.set_host_verdict(&host, verdict);
    }

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        build = option_env!("GIT_HASH").unwrap_or("dev"),
        built_at = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        result = default.result.as_str(),
        detail = %default.detail,
        "Stub trust service listening on {}", addr
    );

    stub::serve(listener, state).await
}

fn parse_verdict(result: &str, detail: &str) -> Result<TrustResponse, GateError> {
    let result: TrustResult = result.parse().map_err(GateError::Config)?;
    let detail: ResultDetail = detail.parse().map_err(GateError::Config)?;
    Ok(TrustResponse::new(result, detail))
}

/// `HOST=VERDICT[:DETAIL]`
fn parse_host_verdict(entry: &str) -> Result<(String, TrustResponse), GateError> {
    let (host, verdict) = entry.split_once('=')
        .ok_or_else(|| GateError::Config(format!("expected HOST=VERDICT, got '{}'", entry)))?;
    let (result, detail) = verdict.split_once(':').unwrap_or((verdict, "none"));
    Ok((host.trim().to_string(), parse_verdict(result, detail)?))
}
