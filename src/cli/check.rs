use std::sync::Arc;
use console::style;
use tracing::info;
use crate::cli::commands::CheckArgs;
use crate::config::SessionSettings;
use crate::errors::GateError;
use crate::models::{CertificateChain, NativeVerdict, Outcome, ResultDetail, SecurityLevel, WarningKind};
use crate::navigation::*;
use crate::overrides::OverrideStore;
use crate::trust::HttpTrustClient;

/// Certificate provider answering with what was given on the command line.
struct FixedCertificates {
    native: NativeVerdict,
    chain: CertificateChain,
}

impl CertificateProvider for FixedCertificates {
    fn validation_result(&self, _nav: &Navigation) -> Result<NativeVerdict, GateError> {
        Ok(self.native)
    }

    fn chain(&self, _nav: &Navigation) -> Result<CertificateChain, GateError> {
        Ok(self.chain.clone())
    }
}

/// Prints what a browser would do.
struct ConsoleHost {
    quiet: bool,
}

impl NavigationController for ConsoleHost {
    fn suspend(&self, op: OperationId) {
        info!(op = %op, "Navigation suspended");
    }

    fn resume(&self, op: OperationId) {
        info!(op = %op, "Navigation resumed");
    }

    fn reload(&self, url: &str) {
        info!(url, "Reload requested");
    }
}

impl WarningPresenter for ConsoleHost {
    fn show(&self, kind: WarningKind, url: &str, detail: ResultDetail) {
        if self.quiet {
            return;
        }
        let actions: Vec<&str> = kind.actions().iter().map(|a| a.as_str()).collect();
        eprintln!(
            "{} {} page for {} (detail: {}, actions: {})",
            style("warning:").yellow().bold(),
            kind,
            url,
            detail,
            actions.join(", ")
        );
    }
}

pub async fn handle_check(args: CheckArgs, quiet: bool) -> Result<(), GateError> {
    reqwest::Url::parse(&args.url)
        .map_err(|e| GateError::InvalidUrl(format!("{}: {}", args.url, e)))?;
    let config = super::load_config(args.config.as_deref()).await?;
    let native: NativeVerdict = args.native.parse().map_err(GateError::Config)?;
    let chain = super::load_chain(&args.chain).await?;

    let settings = Arc::new(SessionSettings::from_config(&config));
    if let Some(level) = &args.security_level {
        let level: SecurityLevel = level.parse().map_err(GateError::Config)?;
        settings.set_security_level(level);
    }

    let overrides = Arc::new(OverrideStore::new());
    if args.exempt {
        overrides.exempt(&args.url);
    }
    if args.trust_end_cert {
        overrides.mark_trust_if_uncertain(&args.url);
    }

    let host = Arc::new(ConsoleHost { quiet });
    let trust = Arc::new(HttpTrustClient::new(settings.clone())?);
    let orchestrator = ValidationOrchestrator::new(
        Collaborators {
            certificates: Arc::new(FixedCertificates { native, chain }),
            settings,
            trust,
            navigation: host.clone(),
            presenter: host,
        },
        overrides,
        (&config).into(),
    );

    let resolution = orchestrator.navigate(OperationId::new(), args.url.clone()).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    let outcome = resolution.outcome.unwrap_or(Outcome::Proceed);
    let label = match outcome {
        Outcome::Proceed => style(outcome.to_string()).green(),
        Outcome::WarnUnreachable => style(outcome.to_string()).yellow(),
        Outcome::WarnUntrusted(_) | Outcome::WarnUnknown(_) => style(outcome.to_string()).red(),
    };
    println!("URL:     {}", resolution.url);
    println!("Path:    {:?}", resolution.path);
    println!("Outcome: {}", label);
    Ok(())
}
