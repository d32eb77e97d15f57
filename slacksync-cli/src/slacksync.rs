use clap::{Arg, Command};
use slacksync_core::{sync_directory, Context, JiraClient, Result, SlackDirectory, Throttle};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let matches = Command::new("slacksync")
        .version("0.1.0")
        .about("Sync Slack workspace identities into Jira user properties")
        .author("slacksync contributors")
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_name("FULL|SINGLE")
                .help("Sync mode; prompted interactively when omitted"),
        )
        .arg(
            Arg::new("member-id")
                .long("member-id")
                .value_name("ID")
                .help("Slack member ID to sync in SINGLE mode; prompted when omitted"),
        )
        .get_matches();

    let start_time = std::time::Instant::now();

    // Initialize context from environment; missing credentials are fatal
    // before any remote call is made
    let ctx = Context::from_env()?;

    if ctx.ctx_out {
        info!("Context: {:?}", ctx);
    }

    info!("Slack to Jira identity sync");

    let mode = match matches.get_one::<String>("mode") {
        Some(mode) => mode.clone(),
        None => prompt("Sync mode (FULL/SINGLE): ")?,
    };

    let slack = SlackDirectory::new(&ctx, Throttle::new(ctx.api_delay_ms))?;

    // Gather the directory of Slack users associated with the token's workspace
    let index = match mode.trim().to_uppercase().as_str() {
        "FULL" => slack.fetch_all_members().await?,
        "SINGLE" => {
            let member_id = match matches.get_one::<String>("member-id") {
                Some(member_id) => member_id.clone(),
                None => prompt("Slack member ID: ")?,
            };
            slack.fetch_one_member(&member_id).await?
        }
        other => {
            error!("Invalid sync mode: '{}' (expected FULL or SINGLE)", other);
            std::process::exit(1);
        }
    };

    let total_members = index.len();
    if index.is_empty() {
        warn!("No user found for the given Slack workspace associated with token. Exiting!");
        return Ok(());
    }

    let jira = JiraClient::new(&ctx, Throttle::new(ctx.api_delay_ms))?;

    info!("Looking up {} users in Jira server: {}", total_members, ctx.jira_url);

    let stats = sync_directory(&index, &jira).await;

    let elapsed = start_time.elapsed();

    info!(
        "Finished updating {} propertie(s) in {} account(s) found in Jira (Total {} Slack member(s))",
        stats.properties_updated, stats.accounts_found, stats.total_members
    );
    info!("Sync completed in {:?}", elapsed);

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    use std::io::Write;

    print!("{}", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
