use std::time::Duration;

use clap::Parser;
use mailverdict::{ApiKeys, ValidationMode, VerifyOptions};

#[derive(Parser)]
#[command(
    name = "mailverdict-cli",
    about = "Verdict d'envoi pour une adresse e-mail (syntaxe, MX, APIs tierces)"
)]
pub struct Cli {
    /// adresse à vérifier (mode vérification)
    pub email: Option<String>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long, conflicts_with = "find")]
    pub stdin: bool,

    /// n'appelle aucune API: syntaxe + MX seulement
    #[arg(long)]
    pub no_apis: bool,

    /// recherche une adresse au lieu de la vérifier (requiert --domain, --first-name, --last-name)
    #[arg(long)]
    pub find: bool,

    /// domaine pour la recherche
    #[arg(long, requires = "find")]
    pub domain: Option<String>,

    /// prénom pour la recherche
    #[arg(long, requires = "find")]
    pub first_name: Option<String>,

    /// nom pour la recherche
    #[arg(long, requires = "find")]
    pub last_name: Option<String>,

    /// write report to file (JSON/NDJSON/CSV selon --format)
    #[arg(long)]
    pub out: Option<String>,

    /// mode: strict|relaxed
    #[arg(long, default_value = "strict")]
    pub mode: String,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// timeout DNS pour la résolution MX (ms)
    #[arg(long = "mx-timeout-ms", default_value_t = 5_000)]
    pub mx_timeout_ms: u64,

    #[arg(long, env = "ABSTRACT_API_KEY", hide_env_values = true)]
    pub abstract_key: Option<String>,

    #[arg(long, env = "MAILBOXLAYER_API_KEY", hide_env_values = true)]
    pub mailboxlayer_key: Option<String>,

    #[arg(long, env = "HUNTER_IO_API_KEY", hide_env_values = true)]
    pub hunter_key: Option<String>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn parsed_mode(&self) -> ValidationMode {
        mode_from_str(&self.mode)
    }

    pub fn api_keys(&self) -> ApiKeys {
        let mut keys = ApiKeys::new();
        if let Some(key) = &self.abstract_key {
            keys = keys.with_abstract(key.as_str());
        }
        if let Some(key) = &self.mailboxlayer_key {
            keys = keys.with_mailboxlayer(key.as_str());
        }
        if let Some(key) = &self.hunter_key {
            keys = keys.with_hunter(key.as_str());
        }
        keys
    }

    pub fn verify_options(&self) -> VerifyOptions {
        VerifyOptions::new(self.api_keys())
            .with_skip_apis(self.no_apis)
            .with_validation_mode(self.parsed_mode())
            .with_mx_timeout(Duration::from_millis(self.mx_timeout_ms))
    }
}

pub fn mode_from_str(s: &str) -> ValidationMode {
    match s {
        "relaxed" => ValidationMode::Relaxed,
        _ => ValidationMode::Strict,
    }
}
