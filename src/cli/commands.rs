use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "certgate", version, about = "Gate HTTPS navigations on a trust management service verdict")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one navigation through the gate and print the decision
    Check(CheckArgs),
    /// Ask the trust service for an advisory recommendation
    Recommend(RecommendArgs),
    /// Run a stub trust service with fixed verdicts
    StubTms(StubArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    /// URL being navigated to
    #[arg(short, long)]
    pub url: String,

    /// Certificate files (PEM or DER), root first
    #[arg(short, long, num_args = 1.., required = true)]
    pub chain: Vec<String>,

    /// Native TLS verdict: valid, invalid, unknown
    #[arg(long, default_value = "valid")]
    pub native: String,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Security level override: low, medium, high
    #[arg(long)]
    pub security_level: Option<String>,

    /// Treat the host's certificate as trusted even if the verdict is uncertain
    #[arg(long)]
    pub trust_end_cert: bool,

    /// Skip validation for the host
    #[arg(long)]
    pub exempt: bool,

    /// Print the resolution as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct RecommendArgs {
    /// URL the chain was served for
    #[arg(short, long)]
    pub url: String,

    /// Certificate files (PEM or DER), root first
    #[arg(short, long, num_args = 1.., required = true)]
    pub chain: Vec<String>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct StubArgs {
    /// Listen host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Listen port
    #[arg(short, long, default_value = "8090")]
    pub port: u16,

    /// Default verdict: trusted, untrusted, unknown
    #[arg(long, default_value = "trusted")]
    pub verdict: String,

    /// Default detail: first-seen, same-ca-valid, same-ca-expired, different-ca, revoked, none
    #[arg(long, default_value = "none")]
    pub detail: String,

    /// Per-host verdicts as HOST=VERDICT[:DETAIL], repeatable
    #[arg(long = "host-verdict")]
    pub host_verdicts: Vec<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
