//! AP/WP/MP balances with all-or-nothing debits.

use super::{RegenerationEvent, RegenerationTracker};

/// The three spendable resources.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResourceKind {
    #[strum(to_string = "AP")]
    Ap,
    #[strum(to_string = "WP")]
    Wp,
    #[strum(to_string = "MP")]
    Mp,
}

/// Rejected debit. The ledger is left untouched when this is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("insufficient {kind} (need {required}, have {available})")]
pub struct InsufficientResource {
    pub kind: ResourceKind,
    pub required: u32,
    pub available: u32,
}

/// Available action, wakfu and movement points.
///
/// Balances are unsigned, so a negative balance is unrepresentable; `debit`
/// refuses any amount above the current balance instead of clamping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceLedger {
    ap: u32,
    wp: u32,
    mp: u32,
}

impl ResourceLedger {
    pub const fn new(ap: u32, wp: u32, mp: u32) -> Self {
        Self { ap, wp, mp }
    }

    pub const fn available(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Ap => self.ap,
            ResourceKind::Wp => self.wp,
            ResourceKind::Mp => self.mp,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Ap => &mut self.ap,
            ResourceKind::Wp => &mut self.wp,
            ResourceKind::Mp => &mut self.mp,
        }
    }

    /// Checks a debit without applying it.
    pub fn ensure(&self, kind: ResourceKind, amount: u32) -> Result<(), InsufficientResource> {
        let available = self.available(kind);
        if amount > available {
            return Err(InsufficientResource {
                kind,
                required: amount,
                available,
            });
        }
        Ok(())
    }

    pub fn debit(&mut self, kind: ResourceKind, amount: u32) -> Result<(), InsufficientResource> {
        self.ensure(kind, amount)?;
        *self.slot_mut(kind) -= amount;
        Ok(())
    }

    pub fn credit(&mut self, kind: ResourceKind, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Credits `amount` and records the gain against `source` in `tracker`.
    pub fn regenerate(
        &mut self,
        kind: ResourceKind,
        amount: u32,
        source: impl Into<String>,
        step: usize,
        tracker: &mut RegenerationTracker,
    ) {
        self.credit(kind, amount);
        tracker.record(RegenerationEvent {
            step,
            source: source.into(),
            kind,
            amount,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_within_budget() {
        let mut ledger = ResourceLedger::new(12, 6, 3);
        ledger.debit(ResourceKind::Ap, 3).unwrap();
        ledger.debit(ResourceKind::Wp, 1).unwrap();

        assert_eq!(ledger, ResourceLedger::new(9, 5, 3));
    }

    #[test]
    fn overdraw_is_rejected_without_mutation() {
        let mut ledger = ResourceLedger::new(2, 0, 3);
        let err = ledger.debit(ResourceKind::Ap, 3).unwrap_err();

        assert_eq!(
            err,
            InsufficientResource {
                kind: ResourceKind::Ap,
                required: 3,
                available: 2,
            }
        );
        assert_eq!(err.to_string(), "insufficient AP (need 3, have 2)");
        assert_eq!(ledger.available(ResourceKind::Ap), 2);
    }

    #[test]
    fn exact_balance_can_be_spent() {
        let mut ledger = ResourceLedger::new(3, 0, 0);
        ledger.debit(ResourceKind::Ap, 3).unwrap();
        assert_eq!(ledger.available(ResourceKind::Ap), 0);
        assert!(ledger.debit(ResourceKind::Ap, 1).is_err());
    }

    #[test]
    fn regenerate_credits_and_records() {
        let mut ledger = ResourceLedger::new(0, 0, 0);
        let mut tracker = RegenerationTracker::default();

        ledger.regenerate(ResourceKind::Wp, 1, "regulator", 4, &mut tracker);

        assert_eq!(ledger.available(ResourceKind::Wp), 1);
        assert_eq!(tracker.events().len(), 1);
        assert_eq!(tracker.events()[0].step, 4);
        assert_eq!(tracker.summary().total_wp, 1);
    }

    #[test]
    fn balances_never_go_negative_under_mixed_operations() {
        let mut ledger = ResourceLedger::new(5, 2, 1);
        let mut tracker = RegenerationTracker::default();
        let script: [(ResourceKind, i64); 9] = [
            (ResourceKind::Ap, -4),
            (ResourceKind::Ap, -4),
            (ResourceKind::Wp, 3),
            (ResourceKind::Wp, -5),
            (ResourceKind::Mp, -2),
            (ResourceKind::Mp, -1),
            (ResourceKind::Ap, 2),
            (ResourceKind::Ap, -3),
            (ResourceKind::Wp, -5),
        ];

        for (step, (kind, delta)) in script.into_iter().enumerate() {
            if delta < 0 {
                let _ = ledger.debit(kind, delta.unsigned_abs() as u32);
            } else if step % 2 == 0 {
                ledger.credit(kind, delta as u32);
            } else {
                ledger.regenerate(kind, delta as u32, "test", step, &mut tracker);
            }
        }

        assert_eq!(ledger, ResourceLedger::new(0, 0, 0));
    }
}
