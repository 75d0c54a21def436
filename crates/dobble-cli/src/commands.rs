use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use dobble_cli::cli::{DeckArgs, ExportArgs, GenerateArgs};
use dobble_cli::progress::ExportBar;
use dobble_client::{DobbleClient, save_pdf};
use dobble_core::{Session, workflow};
use dobble_model::{Deck, Notation, ValidationResult};

pub async fn run_validate(client: &DobbleClient, args: &DeckArgs) -> Result<ValidationResult> {
    let mut session = session_from_args(args);
    workflow::validate(&mut session, client).await;
    Ok(session.validation())
}

pub async fn run_generate(client: &DobbleClient, args: &GenerateArgs) -> Result<Deck> {
    let session = generated_session(client, &args.deck).await?;
    Ok(session.deck().clone())
}

pub async fn run_export(client: &DobbleClient, args: &ExportArgs) -> Result<PathBuf> {
    let session = generated_session(client, &args.deck).await?;

    let bar = if args.no_progress || !io::stderr().is_terminal() {
        ExportBar::hidden()
    } else {
        ExportBar::new()
    };
    let sink = bar.clone();
    let pdf = match workflow::export(&session, client, args.settings(), move |event| {
        sink.update(event);
    })
    .await
    {
        Ok(pdf) => pdf,
        Err(error) => {
            bar.abandon();
            return Err(error).context("PDF export failed");
        }
    };

    save_pdf(&args.output, &pdf)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(args.output.clone())
}

fn session_from_args(args: &DeckArgs) -> Session {
    let mut session = Session::new();
    session.set_mode(args.mode.into());
    session.set_notation(args.notation.into());
    session.set_how_many(args.how_many);
    session
}

/// Validates and generates, turning every blocked step into an error.
async fn generated_session(client: &DobbleClient, args: &DeckArgs) -> Result<Session> {
    let mut session = session_from_args(args);
    if !workflow::validate(&mut session, client).await {
        bail!("{}", session_message(&session, "Validation failed"));
    }

    if session.notation() == Notation::Images {
        session.set_selection(args.symbols.clone());
    } else if !args.symbols.is_empty() {
        tracing::warn!(
            count = args.symbols.len(),
            "--symbol is only used with --notation images; ignoring"
        );
    }

    let generated = workflow::generate(&mut session, client)
        .await
        .with_context(|| session_message(&session, "Generation failed"))?;
    if !generated {
        let reason = session
            .generate_disabled_reason()
            .unwrap_or_else(|| "Generation failed".to_string());
        bail!("{reason}");
    }
    Ok(session)
}

fn session_message(session: &Session, fallback: &str) -> String {
    session.error().unwrap_or(fallback).to_string()
}
