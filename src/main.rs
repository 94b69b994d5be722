use anyhow::Context;
use mafia_client::{
    cli::{execute, parse_command, plain_translate, printing_listener, TerminalPresenter, HELP},
    config::Config,
    connection::WsConnection,
    lang::{LangTable, Translate},
    manager::{GameManager, Ticker},
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    signal,
};
use tracing_subscriber::EnvFilter;

type Translator = Box<dyn Fn(&str, &[String]) -> String>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".into());
    let config = Config::from_file(&config_path)
        .with_context(|| format!("failed to load config from {config_path}"))?;

    let lang: Translator = match &config.client.lang_path {
        Some(path) => {
            let table = LangTable::from_file(path)
                .with_context(|| format!("failed to load lang table from {path}"))?;
            tracing::info!("loaded {} lang entries from {path}", table.len());
            Box::new(move |key: &str, args: &[String]| table.translate(key, args))
        }
        None => Box::new(plain_translate),
    };

    let server_url = config.server_url();
    let (connection, mut events) = WsConnection::new(server_url.as_str());
    let mut manager = GameManager::new(connection, TerminalPresenter, config.lobby.clone());
    manager.add_listener(printing_listener(lang));
    manager
        .connect()
        .with_context(|| format!("failed to connect to {server_url}"))?;

    let ticker = Ticker::new(config.client.tick_interval_ms);
    let tick_ms = ticker.period().as_millis() as u64;
    let mut interval = ticker.interval().await;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");

    loop {
        tokio::select! {
            Some(event) = events.recv() => manager.handle_event(event),
            _ = interval.tick() => manager.tick(tick_ms),
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let Some(command) = parse_command(&line) else {
                    println!("{HELP}");
                    continue;
                };
                match execute(&mut manager, command) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => tracing::warn!("command failed: {e}"),
                }
            }
            _ = signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    manager.disconnect();
    Ok(())
}
