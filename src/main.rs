// Main entry point
use clap::Parser;
use colored::Colorize;
use langbridge::application::{languages, query};
use langbridge::domain::error::AppError;
use langbridge::domain::model::TranslateRequest;
use langbridge::infrastructure::config::{self, Config};
use langbridge::infrastructure::logging::init_logging;
use langbridge::infrastructure::storage::db::SqliteStore;
use langbridge::interfaces::cli::Cli;
use langbridge::interfaces::shutdown::Shutdown;
use langbridge::presentation::format;
use langbridge::presentation::theme::Theme;
use langbridge::state::AppState;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let mut shutdown = Shutdown::listen();

    let cli = Cli::parse();
    let config = config::load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }
    if cli.edit_config {
        edit_config().await?;
        return Ok(());
    }

    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = Theme::from_name(theme_name);

    if cli.languages {
        let options = languages::language_options();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(options)?);
        } else {
            print!("{}", format::format_languages(options, &theme));
        }
        return Ok(());
    }

    // History lives next to the config file
    let db_path = config::get_database_path();
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let store = Arc::new(SqliteStore::open(&db_path).await?);
    let state = AppState::new(config.clone(), store.clone())?;

    if cli.status {
        print_status(&state, &store, &db_path).await?;
        return Ok(());
    }
    if cli.clear_history {
        state.history.clear().await?;
        println!("History cleared.");
        return Ok(());
    }
    if let Some(id) = cli.delete {
        if state.history.remove(id).await? {
            println!("Deleted history item {}.", id);
        } else {
            eprintln!("{}", format!("No history item with id {}", id).red());
            std::process::exit(1);
        }
        return Ok(());
    }
    if cli.history {
        let items = state.history.list().await?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&items)?);
        } else {
            print!("{}", format::format_history(&items, &theme));
        }
        return Ok(());
    }

    if cli.text.is_empty() {
        eprintln!("{}", "Please provide text to translate".red());
        std::process::exit(1);
    }

    let request = build_request(&cli, &config);
    let Some(result) = shutdown
        .run(query::translate_text(&state, &request, !cli.no_history))
        .await
    else {
        eprintln!("\nTranslation interrupted");
        std::process::exit(130);
    };
    let result = result?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!(
            "{}",
            format::format_translation(&request, &result, &theme, config.enable_emoji)
        );
    }

    if !result.success {
        std::process::exit(1);
    }

    if cli.speak {
        match shutdown
            .run(query::speak_translation(&state, &result, &request.target_lang))
            .await
        {
            Some(Err(e)) => eprintln!("{}", e.to_string().yellow()),
            Some(Ok(())) => {}
            None => {
                state.speech.cancel();
                eprintln!("\nPlayback interrupted");
            }
        }
    }

    Ok(())
}

fn build_request(cli: &Cli, config: &Config) -> TranslateRequest {
    let source = cli
        .source
        .clone()
        .unwrap_or_else(|| config.translate.source_lang.clone());
    let target = cli
        .target
        .clone()
        .unwrap_or_else(|| config.translate.target_lang.clone());
    TranslateRequest::new(cli.text.join(" "), source, target)
}

async fn edit_config() -> Result<(), AppError> {
    let Some(config_path) = config::get_config_path() else {
        eprintln!("{}", "Config file not found".red());
        return Ok(());
    };
    if !config_path.exists() {
        config::generate_config_sample()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    // Run editor in blocking task
    tokio::task::spawn_blocking(move || {
        std::process::Command::new(editor)
            .arg(&config_path)
            .status()
    })
    .await
    .map_err(|e| AppError::Io(std::io::Error::other(e)))??;

    Ok(())
}

async fn print_status(state: &AppState, store: &SqliteStore, db_path: &Path) -> anyhow::Result<()> {
    println!("{}", "langbridge Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("Database: {} ({} keys)", db_path.display(), store.count().await?);
    println!(
        "History: {} / {} items{}",
        state.history.len().await?,
        state.history.max_items(),
        if state.config.history.enable {
            ""
        } else {
            " (recording disabled)"
        }
    );

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("Endpoint: {}", state.config.translate.endpoint);
    println!(
        "Languages: {} -> {} (min delay {} ms)",
        state.config.translate.source_lang,
        state.config.translate.target_lang,
        state.config.translate.min_request_delay_ms
    );

    match state.speech.voices().await {
        Ok(voices) => println!("Speech: {} voices available", voices.len()),
        Err(e) => println!("Speech: {}", e),
    }

    Ok(())
}
