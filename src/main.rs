use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::{Parser, Subcommand};
mod auth;
use pwdhash::{Algorithm, DEFAULT_COST, HashParams};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PWDHASH_LOG";

#[derive(Debug, clap::Args)]
struct HashArgs {
    /// Hash function keying PBKDF2: md5, sha1, sha256 or sha512
    #[arg(long, env = "PWDHASH_ALGORITHM", default_value = "sha256")]
    algorithm: Algorithm,

    /// PBKDF2 iteration count
    #[arg(long, env = "PWDHASH_COST", default_value_t = DEFAULT_COST)]
    cost: u32,

    /// Derived key length in bytes (default: digest size of the algorithm)
    #[arg(long = "key-len", env = "PWDHASH_KEY_LEN")]
    key_len: Option<usize>,
}

impl HashArgs {
    fn to_hash_params(&self) -> Result<HashParams> {
        let key_len = self.key_len.unwrap_or(self.algorithm.digest_size());
        Ok(HashParams::new(self.algorithm, self.cost, key_len)?)
    }
}

#[derive(Debug, Parser)]
#[command(name = "pwdhash")]
#[command(version, about = "PBKDF2 password hashing and verification.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password with a fresh random salt
    Hash {
        #[command(flatten)]
        params: HashArgs,

        /// Salt length in bytes (default: key length)
        #[arg(long = "salt-len", env = "PWDHASH_SALT_LEN")]
        salt_len: Option<usize>,
    },

    /// Checks a password against a hashed password
    #[command(arg_required_else_help = true)]
    Verify { token: String },

    /// Prints the cost a hashed password was created with
    #[command(arg_required_else_help = true)]
    Cost { token: String },

    /// Prints a random base64 salt
    #[command(arg_required_else_help = true)]
    Salt { len: usize },

    /// Reports whether a hashed password is weaker than the given parameters
    #[command(arg_required_else_help = true)]
    NeedsRehash {
        token: String,

        #[command(flatten)]
        params: HashArgs,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Cli::parse();

    match args.command {
        Commands::Hash { params, salt_len } => {
            let params = params.to_hash_params()?;
            let salt_len = salt_len.unwrap_or(params.key_len());
            debug!(
                algorithm = %params.algorithm(),
                cost = params.cost(),
                key_len = params.key_len(),
                salt_len,
                "hashing password"
            );

            let password = auth::read_password()?;
            let salt = pwdhash::generate_salt(salt_len)?;
            let token = pwdhash::hash_with_params(password.as_bytes(), &salt, &params)?;
            println!("{token}");
        }
        Commands::Verify { token } => {
            let password = auth::read_password()?;
            let result = pwdhash::compare_hash_and_password(&token, password.as_bytes());
            debug!(
                matched = result.is_ok(),
                mismatch = result.as_ref().is_err_and(|e| e.is_mismatch()),
                "verified password"
            );
            result?;
            println!("match");
        }
        Commands::Cost { token } => {
            let cost = pwdhash::cost(&token).context("unable to read cost")?;
            println!("{cost}");
        }
        Commands::Salt { len } => {
            let salt = pwdhash::generate_salt(len)?;
            println!("{}", STANDARD.encode(salt));
        }
        Commands::NeedsRehash { token, params } => {
            let params = params.to_hash_params()?;
            if pwdhash::needs_rehash(&token, &params)? {
                info!(
                    algorithm = %params.algorithm(),
                    cost = params.cost(),
                    "rehash recommended"
                );
                println!("yes");
            } else {
                println!("no");
            }
        }
    }

    Ok(())
}
