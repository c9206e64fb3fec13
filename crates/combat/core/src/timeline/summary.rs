//! End-of-run aggregate folded from step results.

use std::collections::BTreeMap;

use crate::action::OutcomeStatus;
use crate::engine::StepResult;
use crate::resources::{RegenerationSummary, ResourceTotals};
use crate::state::SimulationContext;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Committed steps only.
    pub steps_executed: usize,
    pub total_damage: u64,
    pub total_ap_used: u32,
    pub total_wp_used: u32,
    pub total_mp_used: u32,
    pub total_ap_regenerated: u32,
    pub total_wp_regenerated: u32,
    pub total_mp_regenerated: u32,
    pub regeneration_by_source: BTreeMap<String, ResourceTotals>,
    pub actions_succeeded: usize,
    pub actions_failed: usize,
    pub actions_skipped: usize,
    pub critical_hits: usize,
    pub remaining_ap: u32,
    pub remaining_wp: u32,
    pub remaining_mp: u32,
    pub damage_per_ap: Option<f64>,
    pub damage_per_wp: Option<f64>,
}

impl RunSummary {
    /// Folds `results` in order. Costs and damage only count for committed
    /// steps; failed steps still contribute their outcome counts.
    pub fn fold<'a>(
        results: impl IntoIterator<Item = &'a StepResult>,
        regeneration: &RegenerationSummary,
        context: &SimulationContext,
    ) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.record(result);
        }

        summary.total_ap_regenerated = regeneration.total_ap;
        summary.total_wp_regenerated = regeneration.total_wp;
        summary.total_mp_regenerated = regeneration.total_mp;
        summary.regeneration_by_source = regeneration.by_source.clone();

        summary.remaining_ap = context.available_ap();
        summary.remaining_wp = context.available_wp();
        summary.remaining_mp = context.available_mp();

        summary.damage_per_ap = ratio(summary.total_damage, summary.total_ap_used);
        summary.damage_per_wp = ratio(summary.total_damage, summary.total_wp_used);
        summary
    }

    fn record(&mut self, result: &StepResult) {
        for outcome in &result.outcomes {
            match outcome.status {
                OutcomeStatus::Succeeded => self.actions_succeeded += 1,
                OutcomeStatus::Failed => self.actions_failed += 1,
                OutcomeStatus::Skipped => self.actions_skipped += 1,
            }
        }
        if !result.success {
            return;
        }

        self.steps_executed += 1;
        for outcome in &result.outcomes {
            self.total_damage += u64::from(outcome.damage);
            self.total_ap_used += outcome.ap_cost;
            self.total_wp_used += outcome.wp_cost;
            self.total_mp_used += outcome.mp_cost;
            if outcome.is_critical() {
                self.critical_hits += 1;
            }
        }
    }
}

fn ratio(damage: u64, spent: u32) -> Option<f64> {
    (spent > 0).then(|| damage as f64 / f64::from(spent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, ActionOutcome};
    use crate::resources::ResourceLedger;

    fn outcome(status: OutcomeStatus, ap: u32, damage: u32) -> ActionOutcome {
        ActionOutcome {
            index: 0,
            kind: ActionKind::CastSpell,
            status,
            ap_cost: ap,
            wp_cost: 0,
            mp_cost: 0,
            ap_regenerated: 0,
            wp_regenerated: 0,
            damage,
            message: String::new(),
            effect: None,
        }
    }

    fn result(success: bool, outcomes: Vec<ActionOutcome>) -> StepResult {
        StepResult {
            step_index: 0,
            step_id: "s".into(),
            outcomes,
            context_after: SimulationContext::default(),
            regenerations: Vec::new(),
            success,
            failure: None,
        }
    }

    #[test]
    fn folds_committed_costs_and_all_outcome_counts() {
        let results = vec![
            result(true, vec![outcome(OutcomeStatus::Succeeded, 4, 40)]),
            result(
                false,
                vec![
                    outcome(OutcomeStatus::Succeeded, 4, 40),
                    outcome(OutcomeStatus::Failed, 0, 0),
                    outcome(OutcomeStatus::Skipped, 0, 0),
                ],
            ),
        ];
        let context = SimulationContext::new(ResourceLedger::new(8, 6, 3));

        let summary = RunSummary::fold(&results, &RegenerationSummary::default(), &context);

        assert_eq!(summary.steps_executed, 1);
        assert_eq!(summary.total_damage, 40);
        assert_eq!(summary.total_ap_used, 4);
        assert_eq!(summary.actions_succeeded, 2);
        assert_eq!(summary.actions_failed, 1);
        assert_eq!(summary.actions_skipped, 1);
        assert_eq!(summary.remaining_ap, 8);
        assert_eq!(summary.damage_per_ap, Some(10.0));
        assert_eq!(summary.damage_per_wp, None);
    }
}
