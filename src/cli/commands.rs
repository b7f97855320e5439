// src/cli/commands.rs
use clap::{ArgAction, Subcommand};

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the HTTP API
    Serve {
        /// API server port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate a password
    Generate {
        /// Number of characters (default from DEFAULT_PASSWORD_LENGTH)
        #[arg(long, short, allow_negative_numbers = true)]
        length: Option<i64>,

        /// Include digits
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        numbers: bool,

        /// Include symbols
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        symbols: bool,

        /// Include uppercase letters
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        uppercase: bool,
    },

    /// Create an account and print a token
    Signup {
        #[arg(long, short)]
        email: String,
    },

    /// Sign in and print a token
    Signin {
        #[arg(long, short)]
        email: String,
    },

    /// Save a password under the signed-in account
    Save {
        /// Password to store
        #[arg(required = true)]
        password: String,

        /// Optional label
        #[arg(long)]
        label: Option<String>,

        /// Bearer token from signup/signin
        #[arg(long, env = "PGR_TOKEN")]
        token: Option<String>,
    },

    /// List passwords saved under the signed-in account
    List {
        /// Bearer token from signup/signin
        #[arg(long, env = "PGR_TOKEN")]
        token: Option<String>,
    },
}
