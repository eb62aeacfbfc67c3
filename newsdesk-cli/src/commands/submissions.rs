use anyhow::{Context, Result};
use clap::Subcommand;
use shared::models::{SubmissionFilter, SubmissionStats, SubmissionStatus};

use super::{connect, print_json, truncate};
use crate::GlobalArgs;

#[derive(Subcommand, Debug)]
pub enum SubmissionsCommand {
    /// List submissions with per-status counts
    List {
        /// all, pending, approved or rejected
        #[arg(long, default_value = "all")]
        status: SubmissionFilter,
        #[arg(long)]
        json: bool,
    },
    /// Mark a submission approved
    Approve { id: i64 },
    /// Mark a submission rejected
    Reject { id: i64 },
    /// Delete a submission
    Delete { id: i64 },
}

pub async fn run(global: &GlobalArgs, command: SubmissionsCommand) -> Result<()> {
    let (api, _) = connect(global).await?;
    let submissions = api.submissions();

    match command {
        SubmissionsCommand::List { status, json } => {
            let list = submissions
                .list(status)
                .await
                .context("failed to list submissions")?;
            if json {
                return print_json(&list);
            }
            let stats = SubmissionStats::tally(&list);
            println!(
                "{} total, {} pending, {} approved, {} rejected",
                stats.total, stats.pending, stats.approved, stats.rejected
            );
            for submission in &list {
                println!(
                    "{:>4}  {:<8}  {:<40}  {}",
                    submission.id,
                    submission.status.as_str(),
                    truncate(&submission.title, 40),
                    submission.name
                );
            }
        }
        SubmissionsCommand::Approve { id } => {
            moderate(&submissions, id, SubmissionStatus::Approved).await?;
        }
        SubmissionsCommand::Reject { id } => {
            moderate(&submissions, id, SubmissionStatus::Rejected).await?;
        }
        SubmissionsCommand::Delete { id } => {
            submissions
                .delete(id)
                .await
                .with_context(|| format!("failed to delete submission {id}"))?;
            println!("Deleted submission {id}");
        }
    }
    Ok(())
}

async fn moderate(
    submissions: &client::resources::Submissions,
    id: i64,
    status: SubmissionStatus,
) -> Result<()> {
    submissions
        .set_status(id, status)
        .await
        .with_context(|| format!("failed to mark submission {id} {status}"))?;
    println!("Submission {id} {status}");
    Ok(())
}
