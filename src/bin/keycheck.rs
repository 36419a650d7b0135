//! SPEI Key Check - CLI tool for checking an uploaded public key file.

use clap::Parser;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use spei_batch::{key_material, token::BearerToken, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spei_keycheck")]
#[command(about = "Check that a file holds a public key (PEM or OpenSSH)", long_about = None)]
struct Cli {
    /// Key file path (or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Bearer token to attach; must not be blank
    #[arg(long)]
    jwt: Option<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let token = cli.jwt.as_deref().map(BearerToken::new).transpose()?;
    if let Some(ref token) = token {
        info!(?token, "bearer token kept in memory");
    }

    let text = if let Some(ref input_path) = cli.input {
        if !key_material::has_advisory_extension(Path::new(input_path)) {
            warn!(
                path = %input_path,
                expected = ?key_material::ADVISORY_EXTENSIONS,
                "unexpected key file extension, classifying anyway"
            );
        }
        let mut file = File::open(input_path)?;
        read_text(&mut file)?
    } else {
        read_text(&mut io::stdin())?
    };

    let verdict = key_material::classify(&text);
    let name = cli.input.as_deref().unwrap_or("<stdin>");
    println!("{}: {}", name, verdict);

    Ok(verdict.is_accepted())
}

fn read_text<R: Read>(reader: &mut R) -> Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}
