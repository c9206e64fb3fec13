//! Terminal rendering of step results and run summaries.

use console::style;

use combat_core::{Build, OutcomeStatus, RunReport, RunStatus, StepResult, Timeline};

pub fn print_step(result: &StepResult) {
    let marker = if result.success {
        style("✓").green()
    } else {
        style("✗").red()
    };
    let context = &result.context_after;
    println!(
        "{} step {} {} {}",
        marker,
        result.step_index,
        style(&result.step_id).bold(),
        style(format!(
            "[AP {} | WP {} | MP {}]",
            context.available_ap(),
            context.available_wp(),
            context.available_mp()
        ))
        .dim()
    );

    for outcome in &result.outcomes {
        let status = match outcome.status {
            OutcomeStatus::Succeeded => style(outcome.status.to_string()).green(),
            OutcomeStatus::Failed => style(outcome.status.to_string()).red(),
            OutcomeStatus::Skipped => style(outcome.status.to_string()).dim(),
        };
        let mut line = format!("    #{} {:<13} {:<9}", outcome.index, outcome.kind, status);
        if outcome.damage > 0 {
            line.push_str(&format!(" {} dmg", outcome.damage));
            if outcome.is_critical() {
                line.push_str(" (crit)");
            }
        }
        if !outcome.message.is_empty() {
            line.push_str(&format!(" {}", outcome.message));
        }
        println!("{}", line);
    }
}

pub fn print_report(build: &Build, timeline: &Timeline, report: &RunReport) {
    let summary = &report.summary;
    let name = if timeline.name.is_empty() {
        &timeline.id
    } else {
        &timeline.name
    };

    println!();
    println!("{}", style("=== Run Summary ===").bold().green());
    println!(
        "{} {} ({} steps) with {}",
        style("Timeline:").bold().cyan(),
        name,
        timeline.len(),
        build.id
    );
    let status = match &report.status {
        RunStatus::Completed => style("completed".to_string()).green(),
        RunStatus::Halted(failure) => style(format!(
            "halted at step {} action {}",
            failure.step_index, failure.action_index
        ))
        .red(),
        RunStatus::Cancelled { at_step } => {
            style(format!("cancelled before step {}", at_step)).yellow()
        }
    };
    println!("{} {}", style("Status:").bold().cyan(), status);
    println!();

    println!("{}", style("Damage:").bold().yellow());
    println!("  Total: {}", summary.total_damage);
    println!("  Critical hits: {}", summary.critical_hits);
    if let Some(per_ap) = summary.damage_per_ap {
        println!("  Per AP: {:.2}", per_ap);
    }
    if let Some(per_wp) = summary.damage_per_wp {
        println!("  Per WP: {:.2}", per_wp);
    }
    println!();

    println!("{}", style("Resources:").bold().yellow());
    println!(
        "  AP: used {}, regenerated {}, remaining {}",
        summary.total_ap_used, summary.total_ap_regenerated, summary.remaining_ap
    );
    println!(
        "  WP: used {}, regenerated {}, remaining {}",
        summary.total_wp_used, summary.total_wp_regenerated, summary.remaining_wp
    );
    println!(
        "  MP: used {}, remaining {}",
        summary.total_mp_used, summary.remaining_mp
    );
    if !summary.regeneration_by_source.is_empty() {
        println!();
        println!("{}", style("Regeneration by source:").bold().yellow());
        for (source, totals) in &summary.regeneration_by_source {
            println!(
                "  {:<20} AP +{}  WP +{}  MP +{}",
                source, totals.ap, totals.wp, totals.mp
            );
        }
    }
    println!();

    println!("{}", style("Actions:").bold().yellow());
    println!(
        "  Steps committed: {}, succeeded {}, failed {}, skipped {}",
        summary.steps_executed,
        summary.actions_succeeded,
        summary.actions_failed,
        summary.actions_skipped
    );
}
