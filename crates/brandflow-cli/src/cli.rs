//! Command-line interface definition.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "brandflow", version, about = "Multi-agent brand naming assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a new brainstorming session
    New {
        #[arg(long, default_value = "default_user")]
        user: String,
    },

    /// Generate, validate, and enrich brand name candidates
    Generate {
        /// Continue an existing session instead of starting a new one
        #[arg(long)]
        session: Option<String>,
        #[arg(long, default_value = "default_user")]
        user: String,
        /// What the product or service does
        #[arg(long)]
        description: String,
        #[arg(long)]
        industry: String,
        /// Brand personality (playful, professional, innovative, luxury)
        #[arg(long, default_value = "innovative")]
        personality: String,
        #[arg(long, default_value = "general consumers")]
        audience: String,
        /// Number of candidates to generate
        #[arg(long, default_value_t = 5)]
        count: usize,
        /// Nice classification category for trademark search
        #[arg(long)]
        category: Option<String>,
    },

    /// Validate brand names for domain and trademark availability
    Validate {
        #[arg(required = true)]
        names: Vec<String>,
        #[arg(long)]
        category: Option<String>,
    },

    /// Generate SEO content for a brand name
    Seo {
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        industry: String,
    },

    /// Generate a brand story and taglines
    Story {
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "innovative")]
        personality: String,
        #[arg(long, default_value = "general consumers")]
        audience: String,
    },

    /// Inspect stored sessions
    #[command(subcommand)]
    Sessions(SessionsCommand),

    /// Show aggregate statistics over all stored sessions
    Stats,
}

#[derive(Subcommand)]
pub enum SessionsCommand {
    /// List sessions, newest update first
    List {
        #[arg(long)]
        user: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Print one session as JSON
    Show { id: String },
    /// Delete a session
    Delete { id: String },
}
