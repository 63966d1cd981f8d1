use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use zipcode_lookup::app::render::{render_card, render_history_page};
use zipcode_lookup::core::session::can_submit;
use zipcode_lookup::utils::{logger, validation::Validate};
use zipcode_lookup::{
    AddressHistoryStore, AddressLookup, AddressLookupClient, AppConfig, AppError, CliConfig,
    ConfigProvider, FileSessionStorage, LookupSession, SubmitOutcome,
};

fn exit_with(e: &AppError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}

fn load_config(cli: &CliConfig) -> zipcode_lookup::Result<AppConfig> {
    let config = cli.resolve()?;
    config.validate()?;
    Ok(config)
}

fn build_session(config: &AppConfig) -> zipcode_lookup::Result<LookupSession<AddressLookupClient>> {
    let client = AddressLookupClient::from_config(config)?;
    tracing::debug!("Using endpoint {}", client.endpoint());

    let store = match config.session_dir() {
        Some(dir) => AddressHistoryStore::with_persistence(
            client,
            Box::new(FileSessionStorage::new(dir.to_string())),
            config.session_key(),
        )?,
        None => AddressHistoryStore::new(client),
    };

    Ok(LookupSession::new(store))
}

async fn submit_and_print<L: AddressLookup>(session: &mut LookupSession<L>, raw: &str) -> bool {
    let outcome = session.submit(raw).await;

    match &outcome {
        SubmitOutcome::Lookup(lookup) if lookup.is_success() => {
            if let Some(group) = session.most_recent() {
                println!("{}", render_card(group));
            }
        }
        SubmitOutcome::Lookup(zipcode_lookup::LookupOutcome::CommunicationFailure {
            cause: Some(cause),
            ..
        }) => {
            tracing::debug!("Lookup cause: {:?}", cause);
        }
        _ => {}
    }

    if let Some(message) = outcome.error_message() {
        eprintln!("❌ {}: {}", raw, message);
    }

    outcome.is_success()
}

async fn run_interactive<L: AddressLookup>(
    session: &mut LookupSession<L>,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("postal code> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            ":quit" | ":q" => break,
            ":next" | ":n" => session.next_page(),
            ":prev" | ":p" => session.prev_page(),
            cmd if cmd.starts_with(":page") => {
                match cmd.trim_start_matches(":page").trim().parse::<usize>() {
                    Ok(page) => session.go_to_page(page.saturating_sub(1)),
                    Err(_) => eprintln!("usage: :page N"),
                }
            }
            _ if !can_submit(&line) => continue,
            _ => {
                submit_and_print(session, &line).await;
            }
        }

        println!(
            "{}",
            render_history_page(session.paginator(), session.current_page())
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting zipcode-lookup");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = load_config(&cli).unwrap_or_else(|e| exit_with(&e));
    let mut session = build_session(&config).unwrap_or_else(|e| exit_with(&e));

    if cli.codes.is_empty() {
        run_interactive(&mut session).await?;
        return Ok(());
    }

    let mut failures = 0;
    for code in &cli.codes {
        if !submit_and_print(&mut session, code).await {
            failures += 1;
        }
    }

    if let Some(page) = cli.page {
        session.go_to_page(page.saturating_sub(1));
    }
    println!(
        "{}",
        render_history_page(session.paginator(), session.current_page())
    );

    if failures > 0 {
        tracing::warn!("{} of {} lookups failed", failures, cli.codes.len());
        std::process::exit(2);
    }

    Ok(())
}
