use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, error, warn};
use tokio::process::Command;
use tokio::time;

use crate::config::WatchConfig;
use crate::reading::StatusReading;

/// Classified result of one status fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The client reported it is not running.
    Unavailable,
    /// Nothing usable this cycle: timeout, spawn failure, or empty output.
    NoData,
    /// Output was present but did not contain three integers. Carries the
    /// raw text and whatever integers did parse so the fatal log can show
    /// both.
    Malformed { raw: String, integers: Vec<u64> },
    /// A valid observation.
    Reading(StatusReading),
}

/// Source of status readings for the watch loop.
#[allow(async_fn_in_trait)]
pub trait StatusFetcher {
    /// Produce one classified observation. Every failure mode is folded
    /// into the outcome; this never returns an error.
    async fn fetch(&mut self) -> Outcome;
}

/// Production fetcher that runs the configured status command.
pub struct CommandFetcher {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    not_running_message: String,
}

impl CommandFetcher {
    pub fn new(config: &WatchConfig) -> Result<Self> {
        let (program, args) = config
            .status_command
            .split_first()
            .context("status_command must name a program to run")?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout: Duration::from_secs(config.fetch_timeout_secs),
            not_running_message: config.not_running_message.clone(),
        })
    }
}

impl StatusFetcher for CommandFetcher {
    async fn fetch(&mut self) -> Outcome {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                error!("failed to run {}: {err}", self.program);
                return Outcome::NoData;
            }
            Err(_) => {
                warn!(
                    "{} did not answer within {:?}; retrying next cycle",
                    self.program, self.timeout
                );
                return Outcome::NoData;
            }
        };

        if !output.status.success() {
            debug!("{} exited with {}", self.program, output.status);
        }

        classify(
            &String::from_utf8_lossy(&output.stdout),
            &self.not_running_message,
        )
    }
}

/// Classify the literal text a status command produced.
fn classify(raw: &str, not_running_message: &str) -> Outcome {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Outcome::NoData;
    }
    if trimmed == not_running_message {
        return Outcome::Unavailable;
    }

    let integers: Vec<u64> = trimmed
        .split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect();

    if integers.len() < 3 {
        return Outcome::Malformed {
            raw: trimmed.to_string(),
            integers,
        };
    }

    // Counters come as "new unread total"; anything after is ignored.
    Outcome::Reading(StatusReading {
        new: integers[0],
        unread: integers[1],
        total: integers[2],
    })
}
