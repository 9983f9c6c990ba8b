// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `holefit place` - analyze a part studio and fill its holes with copies of
//! a template instance found in an assembly of the same document.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fmt::Write;
use std::path::PathBuf;
use tracing::info;

use holefit_core::application::batch_inserter::{
    AssemblyTarget, BatchInserter, BatchReport, ItemOutcome,
};
use holefit_core::application::geometry_analyzer::GeometryAnalyzer;
use holefit_core::domain::hole::HoleClass;
use holefit_core::domain::session::ScanSession;

use super::analyze::PartStudioArgs;
use super::{connect, resolve_keywords, CommandError};

#[derive(Args, Debug, Clone)]
pub struct PlaceArgs {
    #[command(flatten)]
    pub target: PartStudioArgs,

    /// Part-studio element ID to analyze
    #[arg(long, value_name = "EID")]
    pub part_studio: String,

    /// Assembly element ID to insert into
    #[arg(long, value_name = "EID")]
    pub assembly: String,

    /// Keywords identifying the template instance (first match wins)
    #[arg(long = "template", value_name = "KEYWORD", num_args = 1..)]
    pub template: Vec<String>,

    /// Only scan parts whose name contains this text (case-sensitive)
    #[arg(long, value_name = "KEYWORD")]
    pub part: Option<String>,

    /// Only fill holes of this class (fastener or pin)
    #[arg(long, value_name = "CLASS")]
    pub class: Option<HoleClass>,

    /// Free-text note recorded with the scan
    #[arg(long, value_name = "TEXT")]
    pub instruction: Option<String>,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: PlaceArgs, config_path: Option<PathBuf>) -> Result<()> {
    let (config, platform) = connect(config_path)?;
    let keywords = resolve_keywords(args.template, &config)?;

    let document = &args.target.document;
    let workspace = &args.target.workspace;

    let analyzer = GeometryAnalyzer::new(platform.clone())?;
    let holes = analyzer
        .analyze(document, workspace, &args.part_studio, args.part.as_deref())
        .await
        .ok_or(CommandError::AnalysisFailed)?;
    if holes.is_empty() {
        return Err(CommandError::NoHoles {
            element_id: args.part_studio,
        }
        .into());
    }

    let mut session = ScanSession::new();
    session.record_scan(args.instruction, args.part, holes);
    let pending = pending_targets(&session, args.class)?;
    info!(pending, class = ?args.class, "Scan recorded");

    if !args.json {
        println!(
            "{}",
            format!("Placing {} template copy(ies) using {:?}", pending, keywords).bold()
        );
    }

    let inserter = BatchInserter::new(platform);
    let assembly = AssemblyTarget::new(document.as_str(), workspace.as_str(), args.assembly);
    let report = inserter
        .insert_from_session(&mut session, &assembly, &keywords, args.class)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

/// Number of holes the batch will fill; an empty class filter result is an
/// error of its own rather than a missing analysis.
pub fn pending_targets(
    session: &ScanSession,
    class: Option<HoleClass>,
) -> Result<usize, CommandError> {
    match (session.targets(class).len(), class) {
        (0, Some(class)) => Err(CommandError::NoHolesOfClass {
            class,
            found: session.holes().len(),
        }),
        (pending, _) => Ok(pending),
    }
}

pub fn render_report(report: &BatchReport) -> String {
    let mut out = String::new();
    for item in &report.items {
        let t = &item.target;
        let at = format!("({:.4}, {:.4}, {:.4})", t.x, t.y, t.z);
        let line = match &item.outcome {
            ItemOutcome::Placed { instance_id } => {
                format!("{} {} placed at {}", "✓".green(), instance_id, at)
            }
            ItemOutcome::PlacementFailed { instance_id, reason } => format!(
                "{} {} inserted, move to {} failed: {}",
                "!".yellow(),
                instance_id,
                at,
                reason
            ),
            ItemOutcome::Unplaced => format!(
                "{} inserted for {}, new instance not identified",
                "!".yellow(),
                at
            ),
            ItemOutcome::Failed { reason } => {
                format!("{} {} failed: {}", "✗".red(), at, reason)
            }
        };
        let _ = writeln!(out, "  [{}] {}", item.index + 1, line);
    }

    let summary = report.summary();
    let summary = if report.failed() == 0 {
        summary.green()
    } else {
        summary.yellow()
    };
    let _ = writeln!(out, "{}", summary);
    out
}
