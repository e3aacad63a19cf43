// src/bin/fernet_crypt.rs
//! Encrypt or decrypt a message or file with a password or `FERNET_KEY`

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use fernet_crypt::config::{self, Config};
use fernet_crypt::crypto::{decrypt_to_vec, decrypt_to_vec_with_ttl, encrypt_to_vec};
use fernet_crypt::file_ops::{decrypt_file, decrypted_path_for, encrypt_file};
use fernet_crypt::key_ops::{encode_key, generate_key};
use fernet_crypt::{CoreError, EnvKeySource, ErrorKind, KeyMode};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zeroize::Zeroizing;

/// Encrypt/Decrypt tool using Fernet symmetric encryption.
///
/// Keys come from a password (-p/--password) or from the FERNET_KEY
/// environment variable (export FERNET_KEY="<your_base64_key>").
/// A password takes precedence over FERNET_KEY.
#[derive(Parser)]
#[command(name = "fernet-crypt", version)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["encrypt", "decrypt", "generate_key"])
))]
struct Cli {
    /// Encrypt the provided message or file content
    #[arg(short, long)]
    encrypt: bool,

    /// Decrypt the provided token or artifact file
    #[arg(short, long)]
    decrypt: bool,

    /// Print a new random key suitable for FERNET_KEY
    #[arg(long)]
    generate_key: bool,

    /// Message to encrypt, or hex token to decrypt
    #[arg(conflicts_with = "file")]
    data: Option<String>,

    /// File whose content should be encrypted, or raw artifact file to decrypt
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Where to write the file result (defaults to <file>.enc / stripped .enc)
    #[arg(short, long, requires = "file")]
    output: Option<PathBuf>,

    /// Password to derive the key from; without it FERNET_KEY is used
    #[arg(short, long, conflicts_with = "ask_password")]
    password: Option<String>,

    /// Prompt for the password without echoing it
    #[arg(long)]
    ask_password: bool,

    /// Reject tokens older than this many seconds
    #[arg(long, value_name = "SECS")]
    ttl: Option<u64>,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<CoreError>().map(CoreError::kind) {
        Some(ErrorKind::KeyUnavailable) => {
            eprintln!("Error: {err:#}");
            eprintln!("Please provide a password using -p/--password or set FERNET_KEY.");
        }
        Some(ErrorKind::InvalidToken) => {
            eprintln!("Error: Invalid token format or incorrect password. {err:#}");
            eprintln!(
                "Please ensure the token is a valid hexadecimal string and the correct password is provided."
            );
        }
        Some(ErrorKind::UnexpectedFailure) | None => {
            eprintln!("An unexpected error occurred: {err:#}");
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load().context("failed to load configuration")?;

    if cli.generate_key {
        println!("{}", encode_key(&generate_key()));
        return Ok(());
    }

    let password: Option<Zeroizing<String>> = match (&cli.password, cli.ask_password) {
        (Some(pw), _) => Some(Zeroizing::new(pw.clone())),
        (None, true) => Some(Zeroizing::new(
            rpassword::prompt_password("Password: ").context("failed to read password")?,
        )),
        (None, false) => None,
    };
    let mode = KeyMode::from_password(password.as_ref().map(|pw| pw.as_str()));
    drop(password);

    let source = config.key_source();
    let ttl = cli.ttl.map(Duration::from_secs).or_else(|| config.ttl());

    if cli.encrypt {
        run_encrypt(&cli, &config, &mode, &source)
    } else {
        run_decrypt(&cli, &mode, &source, ttl)
    }
}

fn run_encrypt(cli: &Cli, config: &Config, mode: &KeyMode, source: &EnvKeySource) -> Result<()> {
    let artifact = match (&cli.file, &cli.data) {
        (Some(path), _) => {
            let output = cli
                .output
                .clone()
                .unwrap_or_else(|| config.encrypted_path_for(path));
            let artifact = encrypt_file(path, &output, mode, source)
                .with_context(|| format!("could not encrypt file '{}'", path.display()))?;
            info!(output = %output.display(), "saved encrypted content");
            println!("Encrypted content saved to: {}", output.display());
            artifact
        }
        (None, Some(data)) => encrypt_to_vec(data.as_bytes(), mode, source)?,
        (None, None) => anyhow::bail!("No data or file content provided for encryption."),
    };

    println!("Encrypted token (hex): {}", hex::encode(&artifact));
    Ok(())
}

fn run_decrypt(
    cli: &Cli,
    mode: &KeyMode,
    source: &EnvKeySource,
    ttl: Option<Duration>,
) -> Result<()> {
    match (&cli.file, &cli.data) {
        (Some(path), _) => {
            let output = cli
                .output
                .clone()
                .unwrap_or_else(|| decrypted_path_for(path));
            let size = decrypt_file(path, &output, mode, source, ttl)
                .with_context(|| format!("could not decrypt file '{}'", path.display()))?;
            println!("Decrypted {size} bytes to: {}", output.display());
        }
        (None, Some(data)) => {
            let artifact = hex::decode(data.trim())
                .map_err(|_| CoreError::InvalidToken("token is not a valid hexadecimal string"))?;
            let plaintext = match ttl {
                Some(ttl) => decrypt_to_vec_with_ttl(&artifact, mode, source, ttl)?,
                None => decrypt_to_vec(&artifact, mode, source)?,
            };
            match std::str::from_utf8(plaintext.expose_secret()) {
                Ok(text) => println!("Decrypted message: {text}"),
                Err(_) => println!(
                    "Decrypted message (hex): {}",
                    hex::encode(plaintext.expose_secret())
                ),
            }
        }
        (None, None) => anyhow::bail!("No token or file provided for decryption."),
    }
    Ok(())
}
