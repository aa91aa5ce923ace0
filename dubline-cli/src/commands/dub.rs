//! Dubbing command handlers
//!
//! Submits dubbing jobs and polls them until the dubbed audio can be
//! downloaded. Timed-out jobs keep running on the service; `dub wait` can
//! pick them up again by ID.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::*;
use dubline_client::input::InputSource;
use dubline_core::domain::job::{JobHandle, JobStatus};
use dubline_core::domain::language::TargetLanguage;
use dubline_poller::{DubbingBackend, JobPoller, PollerConfig, PollerError, TargetOutcome};

use super::SAMPLE_AUDIO_URL;
use crate::config::Config;
use crate::output::{language_output, stem, write_audio};

/// Poll loop overrides shared by the waiting subcommands
#[derive(Args, Clone, Debug, Default)]
pub struct PollArgs {
    /// Seconds between status queries
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Seconds to wait for the job before giving up
    #[arg(long)]
    max_wait: Option<u64>,

    /// Consecutive failed status queries tolerated
    #[arg(long)]
    max_retries: Option<u32>,

    /// Jobs polled at once when dubbing into several languages
    #[arg(long)]
    parallel: Option<usize>,
}

/// Dubbing subcommands
#[derive(Subcommand)]
pub enum DubCommands {
    /// Submit a file and wait for the dubbed audio
    Run {
        /// Input file path or URL (audio or video)
        #[arg(short, long, default_value = SAMPLE_AUDIO_URL)]
        input: String,

        /// Target language code, repeat for several languages
        #[arg(short, long = "target", default_value = "es")]
        targets: Vec<String>,

        /// Directory for the dubbed files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Submit a file without waiting
    Submit {
        /// Input file path or URL (audio or video)
        #[arg(short, long, default_value = SAMPLE_AUDIO_URL)]
        input: String,

        /// Target language code
        #[arg(short, long, default_value = "es")]
        target: String,
    },
    /// Wait for a previously submitted job and download its audio
    Wait {
        /// Dubbing job ID
        job_id: String,

        /// Target language given at submission
        #[arg(short, long, default_value = "es")]
        target: String,

        /// Where to write the dubbed audio
        #[arg(short, long, default_value = "dubbed.mp3")]
        output: PathBuf,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Show the current status of a job
    Status {
        /// Dubbing job ID
        job_id: String,
    },
}

/// Handle dubbing commands
pub async fn handle_dub_command(command: DubCommands, config: &Config) -> Result<()> {
    match command {
        DubCommands::Run {
            input,
            targets,
            output_dir,
            poll,
        } => run(config, &input, &targets, &output_dir, &poll).await,
        DubCommands::Submit { input, target } => submit(config, &input, &target).await,
        DubCommands::Wait {
            job_id,
            target,
            output,
            poll,
        } => wait(config, job_id, &target, &output, &poll).await,
        DubCommands::Status { job_id } => status(config, &job_id).await,
    }
}

/// Submit once per target and wait for all of them
async fn run(
    config: &Config,
    input: &str,
    targets: &[String],
    output_dir: &Path,
    poll: &PollArgs,
) -> Result<()> {
    let targets = parse_targets(targets)?;
    let poller = build_poller(config, poll)?;

    let source = InputSource::parse(input);
    let loaded = source
        .load(&reqwest::Client::new(), "audio.mp3")
        .await
        .with_context(|| format!("Failed to load input {}", source))?;

    println!(
        "{} Dubbing {} into {}",
        "▸".cyan(),
        loaded.file_name.bold(),
        targets
            .iter()
            .map(TargetLanguage::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let outcomes = poller
        .run_many(loaded.bytes, &loaded.file_name, targets)
        .await;

    let failures = write_outcomes(outcomes, output_dir, stem(&loaded.file_name)).await;
    if failures > 0 {
        bail!("{} dubbing job(s) did not produce audio", failures);
    }

    Ok(())
}

/// Writes every dubbed track and reports the rest
///
/// A track that cannot be written does not stop the others.
///
/// # Returns
/// The number of targets that produced no file
async fn write_outcomes(
    outcomes: Vec<TargetOutcome>,
    output_dir: &Path,
    stem: &str,
) -> usize {
    let mut failures = 0;
    for (target, outcome) in outcomes {
        match outcome {
            Ok(artifact) => {
                let path = language_output(output_dir, stem, target.as_str());
                if let Err(e) = write_audio(&path, &artifact.bytes).await {
                    failures += 1;
                    println!("{} [{}] {}: {:#}", "✗".red(), target, "not saved".red(), e);
                }
            }
            Err(e) => {
                failures += 1;
                print_failure(&target, &e);
            }
        }
    }
    failures
}

/// Submit without waiting and print the job ID
async fn submit(config: &Config, input: &str, target: &str) -> Result<()> {
    let target = TargetLanguage::parse(target)?;
    let poller = build_poller(config, &PollArgs::default())?;

    let source = InputSource::parse(input);
    let loaded = source
        .load(&reqwest::Client::new(), "audio.mp3")
        .await
        .with_context(|| format!("Failed to load input {}", source))?;

    let handle = poller
        .submit(loaded.bytes, &loaded.file_name, target)
        .await?;

    println!(
        "{} Dubbing started! Job ID: {}",
        "✓".green(),
        handle.job_id.cyan()
    );
    println!(
        "  {}",
        format!(
            "Run `dubline dub wait {} --target {}` to fetch the result",
            handle.job_id, handle.target
        )
        .dimmed()
    );

    Ok(())
}

/// Wait for an existing job
async fn wait(
    config: &Config,
    job_id: String,
    target: &str,
    output: &Path,
    poll: &PollArgs,
) -> Result<()> {
    let target = TargetLanguage::parse(target)?;
    let poller = build_poller(config, poll)?;
    let handle = JobHandle::new(job_id, target);

    let settings = poller.config().clone();
    match poller
        .await_completion(&handle, settings.poll_interval, settings.max_wait)
        .await
    {
        Ok(artifact) => write_audio(output, &artifact.bytes).await,
        Err(e) => {
            print_failure(&handle.target, &e);
            Err(e.into())
        }
    }
}

/// Print the job's status as reported right now
async fn status(config: &Config, job_id: &str) -> Result<()> {
    let client = config.speech_client()?;
    let metadata = client.get_dubbing(job_id).await?;
    let status = JobStatus::from_service(&metadata.status);

    println!("{}", "Dubbing Job:".bold());
    println!("  ID:        {}", metadata.dubbing_id.cyan());
    if let Some(name) = &metadata.name {
        println!("  Name:      {}", name);
    }
    println!(
        "  Status:    {} {}",
        colorize_status(status),
        format!("({})", metadata.status).dimmed()
    );
    if !metadata.target_languages.is_empty() {
        println!("  Languages: {}", metadata.target_languages.join(", "));
    }
    if let Some(error) = &metadata.error {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }

    Ok(())
}

fn parse_targets(targets: &[String]) -> Result<Vec<TargetLanguage>> {
    let mut parsed: Vec<TargetLanguage> = Vec::with_capacity(targets.len());
    for code in targets {
        let lang = TargetLanguage::parse(code)?;
        if !parsed.contains(&lang) {
            parsed.push(lang);
        }
    }
    Ok(parsed)
}

fn poller_config(base: &PollerConfig, poll: &PollArgs) -> Result<PollerConfig> {
    let mut config = base.clone();
    if let Some(secs) = poll.poll_interval {
        config.poll_interval = Duration::from_secs(secs);
    }
    if let Some(secs) = poll.max_wait {
        config.max_wait = Duration::from_secs(secs);
    }
    if let Some(retries) = poll.max_retries {
        config.max_transient_retries = retries;
    }
    if let Some(parallel) = poll.parallel {
        config.max_parallel_jobs = parallel;
    }
    config.validate()?;
    Ok(config)
}

fn build_poller(config: &Config, poll: &PollArgs) -> Result<JobPoller> {
    let poller_config = poller_config(&config.poller, poll)?;
    let backend = DubbingBackend::new(config.speech_client()?);
    Ok(JobPoller::new(Arc::new(backend), poller_config))
}

fn print_failure(target: &TargetLanguage, err: &PollerError) {
    let label = match err {
        PollerError::Submission(_) => "rejected",
        PollerError::JobFailed { .. } => "failed",
        PollerError::Timeout { .. } => "timed out",
        PollerError::Polling { .. } => "unknown",
        PollerError::Fetch { .. } => "download failed",
        PollerError::Task(_) => "crashed",
    };

    println!("{} [{}] {}: {}", "✗".red(), target, label.red(), err);

    if let PollerError::Timeout { job_id, .. } = err {
        println!(
            "  {}",
            format!(
                "The job is still running. Resume with `dubline dub wait {} --target {}`",
                job_id, target
            )
            .dimmed()
        );
    }
}

/// Colorize job status for display
fn colorize_status(status: JobStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Pending => status_str.yellow(),
        JobStatus::Processing => status_str.cyan(),
        JobStatus::Complete => status_str.green(),
        JobStatus::Failed => status_str.red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dubline_core::domain::job::Artifact;

    #[test]
    fn test_parse_targets_dedups() {
        let targets = parse_targets(&["es".to_string(), "ES".to_string(), "fr".to_string()])
            .unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].as_str(), "es");
        assert_eq!(targets[1].as_str(), "fr");
    }

    #[test]
    fn test_parse_targets_rejects_unknown() {
        assert!(parse_targets(&["zz".to_string()]).is_err());
    }

    #[test]
    fn test_poller_config_overrides() {
        let poll = PollArgs {
            poll_interval: Some(2),
            max_wait: Some(60),
            max_retries: Some(5),
            parallel: None,
        };
        let config = poller_config(&PollerConfig::default(), &poll).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.max_wait, Duration::from_secs(60));
        assert_eq!(config.max_transient_retries, 5);
        assert_eq!(config.max_parallel_jobs, 2);
    }

    #[test]
    fn test_poller_config_rejects_invalid_override() {
        let poll = PollArgs {
            poll_interval: Some(0),
            ..PollArgs::default()
        };
        assert!(poller_config(&PollerConfig::default(), &poll).is_err());
    }

    fn artifact(target: &TargetLanguage) -> Artifact {
        Artifact {
            job_id: format!("dub-{}", target),
            target: target.clone(),
            bytes: b"ID3".to_vec(),
            status_queries: 1,
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dubline-{}-{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_write_outcomes_writes_each_track() {
        let dir = scratch_dir("tracks");
        let targets = parse_targets(&["es".to_string(), "fr".to_string()]).unwrap();
        let outcomes: Vec<TargetOutcome> = targets
            .iter()
            .map(|t| (t.clone(), Ok(artifact(t))))
            .collect();

        assert_eq!(write_outcomes(outcomes, &dir, "nicole").await, 0);
        assert!(dir.join("nicole.es.mp3").exists());
        assert!(dir.join("nicole.fr.mp3").exists());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_write_outcomes_counts_unwritable_tracks() {
        // A regular file where the output directory's parent should be
        let blocker = scratch_dir("blocker");
        tokio::fs::write(&blocker, b"not a directory").await.unwrap();
        let dir = blocker.join("out");

        let targets = parse_targets(&["es".to_string(), "fr".to_string(), "de".to_string()])
            .unwrap();
        let outcomes = vec![
            (targets[0].clone(), Ok(artifact(&targets[0]))),
            (
                targets[1].clone(),
                Err(PollerError::Task("task panicked".to_string())),
            ),
            (targets[2].clone(), Ok(artifact(&targets[2]))),
        ];

        assert_eq!(write_outcomes(outcomes, &dir, "nicole").await, 3);

        tokio::fs::remove_file(&blocker).await.unwrap();
    }
}
