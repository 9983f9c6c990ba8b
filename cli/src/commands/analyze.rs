// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `holefit analyze` - detect holes in a part studio

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

use holefit_core::application::geometry_analyzer::GeometryAnalyzer;
use holefit_core::domain::hole::{summarize_by_part, HoleClass, HoleFeature, PartHoleSummary};

use super::{connect, CommandError};

#[derive(Args, Debug, Clone)]
pub struct PartStudioArgs {
    /// Document ID
    #[arg(long, value_name = "DID")]
    pub document: String,

    /// Workspace ID
    #[arg(long, value_name = "WID")]
    pub workspace: String,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub target: PartStudioArgs,

    /// Part-studio element ID
    #[arg(long, value_name = "EID")]
    pub element: String,

    /// Only scan parts whose name contains this text (case-sensitive)
    #[arg(long, value_name = "KEYWORD")]
    pub part: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    holes: &'a [HoleFeature],
    parts: Vec<PartHoleSummary>,
}

pub async fn execute(args: AnalyzeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let (_, platform) = connect(config_path)?;
    let analyzer = GeometryAnalyzer::new(platform)?;

    let holes = analyzer
        .analyze(
            &args.target.document,
            &args.target.workspace,
            &args.element,
            args.part.as_deref(),
        )
        .await
        .ok_or(CommandError::AnalysisFailed)?;

    if args.json {
        let output = AnalysisOutput {
            parts: summarize_by_part(&holes),
            holes: &holes,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("{}", render_analysis(&holes));
    Ok(())
}

/// Hole table followed by the per-part tally.
pub fn render_analysis(holes: &[HoleFeature]) -> String {
    let mut out = String::new();

    if holes.is_empty() {
        let _ = writeln!(out, "{}", "No holes found".yellow());
        return out;
    }

    let _ = writeln!(out, "{}", format!("Found {} hole(s)", holes.len()).bold());
    let _ = writeln!(
        out,
        "  {:<4} {:<24} {:>9} {:<19} {:<5} {}",
        "#", "PART", "DIAMETER", "CLASS", "SIZE", "POSITION (m)"
    );
    for (i, hole) in holes.iter().enumerate() {
        let class = match hole.hole_class {
            HoleClass::FastenerClearance => hole.hole_class.as_str().cyan(),
            HoleClass::DowelPin => hole.hole_class.as_str().magenta(),
        };
        let _ = writeln!(
            out,
            "  {:<4} {:<24} {:>7.2}mm {:<19} {:<5} ({:.4}, {:.4}, {:.4})",
            i + 1,
            hole.part_name,
            hole.diameter,
            class,
            hole.recommended_size_code,
            hole.position.x,
            hole.position.y,
            hole.position.z
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Per part:".bold());
    for part in summarize_by_part(holes) {
        let _ = writeln!(
            out,
            "  {}: {} fastener clearance, {} dowel pin",
            part.part_name, part.fastener_clearance, part.dowel_pin
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use holefit_core::domain::hole::Position;

    #[test]
    fn test_render_lists_holes_and_tally() {
        colored::control::set_override(false);
        let holes = vec![
            HoleFeature::new(9.0, "Top Die Shoe", None, Position::new(0.01, 0.02, 0.035)),
            HoleFeature::new(8.0, "Top Die Shoe", None, Position::new(0.03, 0.02, 0.035)),
        ];

        let text = render_analysis(&holes);

        assert!(text.contains("Found 2 hole(s)"));
        assert!(text.contains("M8"));
        assert!(text.contains("D8"));
        assert!(text.contains("(0.0100, 0.0200, 0.0350)"));
        assert!(text.contains("Top Die Shoe: 1 fastener clearance, 1 dowel pin"));
    }

    #[test]
    fn test_render_empty() {
        colored::control::set_override(false);
        assert_eq!(render_analysis(&[]), "No holes found\n");
    }
}
