use clap::{Arg, Command};
use slacksync_core::{Context, JiraClient, Result, Throttle};
use tracing::{info, warn};

/// Diagnostic tool: read back the Slack identity property stored on a
/// single Jira account. The sync flow only writes this property; this is
/// the one place that reads it.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let matches = Command::new("propcheck")
        .version("0.1.0")
        .about("Inspect the Slack identity property stored on a Jira account")
        .author("slacksync contributors")
        .arg(
            Arg::new("account-id")
                .long("account-id")
                .value_name("ID")
                .required(true)
                .help("Jira account ID to inspect"),
        )
        .get_matches();

    let ctx = Context::from_env()?;
    let account_id = matches
        .get_one::<String>("account-id")
        .expect("account-id is required");

    let jira = JiraClient::new(&ctx, Throttle::new(ctx.api_delay_ms))?;

    match jira.read_sync_property(account_id).await {
        Some((slack_id, slack_username)) => {
            info!(
                "Account {}: slack_id={}, slack_username={}",
                account_id, slack_id, slack_username
            );
            println!("{}: slack_id={}, slack_username={}", account_id, slack_id, slack_username);
        }
        None => {
            warn!("No Slack identity stored for account: {}", account_id);
            println!("{}: no Slack identity property set", account_id);
        }
    }

    Ok(())
}
