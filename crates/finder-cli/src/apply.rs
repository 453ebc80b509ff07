//! `apply` and `probe` commands: candidacy submission to the webhooks.

use chrono::Utc;
use clap::{Subcommand, ValueEnum};
use finder_client::{ClientError, FinderClient};
use finder_core::{Candidacy, CandidacyForm, FinderSession, SubmissionMode, Weekday};

const PROBE_MESSAGE: &str = "Test de connexion depuis finder-cli";

/// Sub-commands available under `apply`.
#[derive(Debug, Subcommand)]
pub enum ApplyCommands {
    /// Apply with contact details
    Contact {
        /// Center id, as printed by `centers`
        #[arg(long)]
        center: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// French phone number, e.g. 06 12 34 56 78 or +33612345678
        #[arg(long)]
        phone: String,
    },
    /// Apply by picking the weekdays you can work
    Days {
        /// Center id, as printed by `centers`
        #[arg(long)]
        center: String,
        /// Preferred day (repeatable)
        #[arg(long = "day", value_name = "DAY")]
        days: Vec<Weekday>,
        /// Identifier of the page the candidacy comes from
        #[arg(long)]
        url_id: Option<String>,
    },
}

impl ApplyCommands {
    fn center_id(&self) -> &str {
        match self {
            ApplyCommands::Contact { center, .. } | ApplyCommands::Days { center, .. } => center,
        }
    }

    fn into_form(self) -> CandidacyForm {
        match self {
            ApplyCommands::Contact {
                first_name,
                last_name,
                email,
                phone,
                ..
            } => CandidacyForm::Contact {
                first_name,
                last_name,
                email,
                phone,
            },
            ApplyCommands::Days { days, url_id, .. } => CandidacyForm::PreferredDays { days, url_id },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProbeMode {
    Contact,
    Days,
}

impl From<ProbeMode> for SubmissionMode {
    fn from(mode: ProbeMode) -> Self {
        match mode {
            ProbeMode::Contact => SubmissionMode::Contact,
            ProbeMode::Days => SubmissionMode::PreferredDays,
        }
    }
}

/// Validates and posts a candidacy for the center with the given id.
///
/// # Errors
///
/// Returns an error if the center id is unknown, the form does not validate,
/// or the webhook rejects or never receives the candidacy.
pub(crate) async fn run_apply(client: &FinderClient, command: ApplyCommands) -> anyhow::Result<()> {
    let loaded = client.load_centers_or_sample().await;
    if loaded.is_sample() {
        tracing::warn!("center list unavailable; only sample center ids are known");
    }
    let session = FinderSession::new(loaded.centers);

    let center_id = command.center_id().to_owned();
    let center = session.center(&center_id).ok_or_else(|| {
        anyhow::anyhow!("center '{center_id}' not found; run `centers` to list ids")
    })?;

    let candidacy = match Candidacy::build(center, command.into_form(), Utc::now()) {
        Ok(candidacy) => candidacy,
        Err(errors) => {
            for error in &errors.0 {
                eprintln!("  {}: {}", error.field, error.message);
            }
            anyhow::bail!(ClientError::from(errors).user_message())
        }
    };

    match client.submit_candidacy(&candidacy).await {
        Ok(receipt) => {
            println!("{}", receipt.message);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(center = %center_id, error = %err, "candidacy submission failed");
            anyhow::bail!(err.user_message())
        }
    }
}

/// Posts a test marker to the candidacy webhook of `mode` and prints the
/// answer.
///
/// # Errors
///
/// Returns an error if the webhook is unreachable or answers with a non-2xx
/// status.
pub(crate) async fn run_probe(client: &FinderClient, mode: SubmissionMode) -> anyhow::Result<()> {
    let url = client.endpoints().candidacy_for(mode);
    println!("probing {mode} webhook at {url}");

    let probe = client.probe_candidacy_webhook(mode, PROBE_MESSAGE).await?;
    println!("HTTP {}", probe.status);
    if !probe.body.is_empty() {
        println!("{}", probe.body);
    }

    if !probe.is_success() {
        anyhow::bail!("webhook answered HTTP {}", probe.status);
    }
    Ok(())
}
