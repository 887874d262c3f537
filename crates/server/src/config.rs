use std::net::SocketAddr;

use clap::Parser;

pub const DEFAULT_ROLE: &str = "Java Backend Developer";
pub const DEFAULT_DIFFICULTY: &str = "medium";
pub const DEFAULT_NUM_QUESTIONS: usize = 5;

/// Command-line and environment configuration for the HTTP server.
///
/// Provider credentials are read separately from `INTERVIEW_AI_*` variables.
#[derive(Debug, Clone, Parser)]
#[command(name = "interview-server", version, about = "Mock interview coach HTTP service")]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "INTERVIEW_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Upper bound on questions per session
    #[arg(long, env = "INTERVIEW_MAX_QUESTIONS", default_value_t = 20)]
    pub max_questions: usize,
}
