use assetfinder::application::asset_detail::DetailRequest;
use assetfinder::application::session::Session;
use assetfinder::cli::commands::{Cli, Commands};
use assetfinder::config::Config;
use assetfinder::domain::error::DomainError;
use assetfinder::domain::values::lookback::Lookback;
use assetfinder::domain::values::return_kind::ReturnKind;
use assetfinder::domain::values::return_stats::summarize;
use assetfinder::{compute_returns, AssetFinder};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() {
    assetfinder::logging::init();
    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }

    let finder = match AssetFinder::new(&config) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error initializing assetfinder: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(finder, cli.command).await {
        match e.downcast_ref::<DomainError>() {
            Some(d) if !d.is_fatal() => eprintln!("{d}"),
            _ => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

async fn run_command(finder: AssetFinder, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Search { query, limit } => {
            let k = limit.unwrap_or(finder.default_limit());
            let results = finder.search(&query, k).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Show {
            ticker,
            period,
            return_type,
            window,
            bins,
        } => {
            let req = DetailRequest {
                lookback: period.parse::<Lookback>()?,
                kind: return_type.parse::<ReturnKind>()?,
                window,
                bins,
            };
            let detail = finder.detail(&ticker, &req).await;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Commands::Fundamentals { ticker } => match finder.fundamentals(&ticker).await {
            Some(f) => {
                let mut out = serde_json::to_value(&f)?;
                out["market_cap_display"] = serde_json::json!(f.market_cap_display());
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            None => eprintln!("No fundamentals found for {ticker}"),
        },
        Commands::History { ticker, period } => {
            let lookback: Lookback = period.parse()?;
            match finder.history(&ticker, lookback).await {
                Some(h) => println!("{}", serde_json::to_string_pretty(&h)?),
                None => eprintln!("No price history found for {ticker}"),
            }
        }
        Commands::Returns {
            ticker,
            period,
            return_type,
            window,
        } => {
            let lookback: Lookback = period.parse()?;
            let kind: ReturnKind = return_type.parse()?;
            let Some(history) = finder.history(&ticker, lookback).await else {
                eprintln!("No price history found for {ticker}");
                return Ok(());
            };
            match compute_returns(&history) {
                Ok(returns) => {
                    let stats = summarize(&returns, kind, window)?;
                    let out = serde_json::json!({ "stats": stats, "returns": returns });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                Err(e) => eprintln!("No returns for {ticker}: {e}"),
            }
        }
        Commands::Catalog => {
            let catalog = finder.catalog();
            let out = serde_json::json!({
                "rows": catalog.len(),
                "dimension": catalog.dimension(),
                "duplicate_tickers": catalog.duplicate_tickers(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Interactive { period } => {
            let req = DetailRequest {
                lookback: period.parse()?,
                ..Default::default()
            };
            run_interactive(&finder, &req).await?;
        }
    }
    Ok(())
}

/// Free text searches; `:pick N` shows result N; `:quit` exits.
async fn run_interactive(finder: &AssetFinder, req: &DetailRequest) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"Type a description to search, :pick N to inspect a result, :quit to exit.\n> ")
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let mut out = String::new();

        if line == ":quit" || line == ":q" {
            break;
        } else if let Some(arg) = line.strip_prefix(":pick") {
            match arg.trim().parse::<usize>() {
                Ok(n) => match session.select_index(n).map(|_| ()) {
                    Ok(()) => match finder.detail_selected(&session, req).await {
                        Ok(detail) => {
                            out.push_str(&serde_json::to_string_pretty(&detail)?);
                            out.push('\n');
                        }
                        Err(e) => out.push_str(&format!("{e}\n")),
                    },
                    Err(e) => out.push_str(&format!("{e}\n")),
                },
                Err(_) => out.push_str("usage: :pick N\n"),
            }
        } else if !line.is_empty() {
            match finder
                .search_in_session(&mut session, line, finder.default_limit())
                .await
            {
                Ok(results) if results.is_empty() => out.push_str("No matches\n"),
                Ok(results) => {
                    for (i, r) in results.iter().enumerate() {
                        out.push_str(&format!("{:2}. {} ({:.3})\n", i + 1, r.label(), r.similarity));
                    }
                }
                Err(e) if !e.is_fatal() => out.push_str(&format!("{e}\n")),
                Err(e) => return Err(e.into()),
            }
        }

        out.push_str("> ");
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(())
}
