//! CLI module - Command-line interface for the SQL injection demo
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};

/// SQL Injection Demo
/// Two variants of the same login/search app: one injectable, one hardened
#[derive(Parser)]
#[command(name = "sqli-demo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the variant that splices form input into raw SQL
    #[command(alias = "vuln")]
    Vulnerable {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Serve the variant with the request gate and parameter-bound queries
    #[command(alias = "secure")]
    Hardened {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
}
