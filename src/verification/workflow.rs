use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, info, instrument, warn};

use super::VerificationError;
use crate::domain::LineItem;

/// Identifies one physical unit: the `ordinal`-th unit of a line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitKey {
    pub line_item_id: String,
    pub ordinal: u32,
}

impl UnitKey {
    pub fn new(line_item_id: impl Into<String>, ordinal: u32) -> Self {
        Self {
            line_item_id: line_item_id.into(),
            ordinal,
        }
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.line_item_id, self.ordinal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Pending,
    Verifying,
    Verified,
    Invalid,
    Cancelled,
}

impl Phase {
    /// `Verified` or `Cancelled`: nothing moves a unit out of these.
    pub fn is_settled(&self) -> bool {
        matches!(self, Phase::Verified | Phase::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitState {
    pub scanned: String,
    pub phase: Phase,
}

/// A verification that has started and is waiting to be resolved.
///
/// Carries everything the comparison needs, so resolving it is one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheck {
    pub key: UnitKey,
    pub scanned: String,
    pub expected: String,
    pub generation: u64,
}

impl PendingCheck {
    pub fn is_match(&self) -> bool {
        self.scanned == self.expected
    }
}

/// Proof that every unit was settled when `submit` was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub generation: u64,
    pub verified: usize,
    pub cancelled: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkflowSummary {
    pub total: usize,
    pub pending: usize,
    pub verifying: usize,
    pub verified: usize,
    pub invalid: usize,
    pub cancelled: usize,
}

impl WorkflowSummary {
    pub fn outstanding(&self) -> usize {
        self.pending + self.verifying + self.invalid
    }

    pub fn is_ready(&self) -> bool {
        self.outstanding() == 0
    }
}

/// Per-unit barcode verification for one order.
///
/// Every line item expands into `quantity` units keyed by [`UnitKey`]. Each unit
/// runs `Pending → Verifying → Verified | Invalid`, and `Pending | Invalid →
/// Cancelled` after a confirmed cancel request. The order may be submitted once
/// every unit is `Verified` or `Cancelled`.
///
/// The generation counter moves on every `initialize`/`close`; checks started
/// under an older generation are discarded when they resolve.
#[derive(Debug, Default)]
pub struct VerificationWorkflow {
    generation: u64,
    ordering: Vec<UnitKey>,
    units: HashMap<UnitKey, UnitState>,
    expected: HashMap<String, String>,
    cancel_request: Option<UnitKey>,
}

impl VerificationWorkflow {
    pub fn new(items: &[LineItem]) -> Result<Self, VerificationError> {
        let mut workflow = Self::default();
        workflow.initialize(items)?;
        Ok(workflow)
    }

    /// Replaces all state with fresh `Pending` units for `items`.
    ///
    /// Returns the number of units created. Line items sharing an id are refused
    /// and leave the current state as it was.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub fn initialize(&mut self, items: &[LineItem]) -> Result<usize, VerificationError> {
        let mut seen = HashSet::new();
        for item in items {
            if !seen.insert(item.id.as_str()) {
                warn!(line_item_id = %item.id, "Duplicate line item id");
                return Err(VerificationError::DuplicateLineItem(item.id.clone()));
            }
        }

        self.reset();
        for item in items {
            self.expected.insert(item.id.clone(), item.expected_barcode());
            for ordinal in 0..item.quantity {
                let key = UnitKey::new(item.id.clone(), ordinal);
                self.ordering.push(key.clone());
                self.units.insert(key, UnitState::default());
            }
        }

        info!(units = self.ordering.len(), generation = self.generation, "Verification initialized");
        Ok(self.ordering.len())
    }

    /// Drops every unit. Checks still in flight become stale.
    pub fn close(&mut self) {
        self.reset();
        debug!(generation = self.generation, "Verification closed");
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.ordering.clear();
        self.units.clear();
        self.expected.clear();
        self.cancel_request = None;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.ordering.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordering.is_empty()
    }

    pub fn unit(&self, key: &UnitKey) -> Option<&UnitState> {
        self.units.get(key)
    }

    /// Units in line item order, then ordinal order.
    pub fn units(&self) -> impl Iterator<Item = (&UnitKey, &UnitState)> + '_ {
        self.ordering
            .iter()
            .filter_map(move |key| self.units.get(key).map(|state| (key, state)))
    }

    pub fn expected_barcode(&self, key: &UnitKey) -> Option<&str> {
        self.expected.get(&key.line_item_id).map(String::as_str)
    }

    pub fn pending_cancel(&self) -> Option<&UnitKey> {
        self.cancel_request.as_ref()
    }

    fn unit_mut(&mut self, key: &UnitKey) -> Result<&mut UnitState, VerificationError> {
        self.units
            .get_mut(key)
            .ok_or_else(|| VerificationError::UnknownUnit(key.to_string()))
    }

    /// Records what was scanned for a unit and clears an `Invalid` mark.
    #[instrument(skip(self), fields(unit = %key))]
    pub fn set_scanned_value(&mut self, key: &UnitKey, value: String) -> Result<(), VerificationError> {
        let unit = self.unit_mut(key)?;
        ensure_open(key, unit.phase)?;
        unit.scanned = value;
        unit.phase = Phase::Pending;
        Ok(())
    }

    /// Moves a unit to `Verifying` and hands back the check to resolve later.
    #[instrument(skip(self), fields(unit = %key))]
    pub fn begin_verify(&mut self, key: &UnitKey) -> Result<PendingCheck, VerificationError> {
        let generation = self.generation;
        let expected = self.expected_barcode(key).map(str::to_string);
        let unit = self.unit_mut(key)?;
        ensure_open(key, unit.phase)?;
        if unit.scanned.is_empty() {
            return Err(VerificationError::EmptyScan(key.to_string()));
        }
        let expected = expected.ok_or_else(|| VerificationError::UnknownUnit(key.to_string()))?;

        unit.phase = Phase::Verifying;
        debug!("Verification started");
        Ok(PendingCheck {
            key: key.clone(),
            scanned: unit.scanned.clone(),
            expected,
            generation,
        })
    }

    /// Settles a check: `Verified` on an exact match, `Invalid` otherwise.
    #[instrument(skip(self, check), fields(unit = %check.key))]
    pub fn resolve(&mut self, check: PendingCheck) -> Result<Phase, VerificationError> {
        if check.generation != self.generation {
            warn!(
                check_generation = check.generation,
                generation = self.generation,
                "Discarding stale verification result"
            );
            return Err(VerificationError::Stale(check.key.to_string()));
        }
        let matched = check.is_match();
        let unit = self.unit_mut(&check.key)?;
        if unit.phase != Phase::Verifying {
            return Err(VerificationError::Stale(check.key.to_string()));
        }

        unit.phase = if matched { Phase::Verified } else { Phase::Invalid };
        info!(phase = ?unit.phase, "Verification resolved");
        Ok(unit.phase)
    }

    /// Opens the cancel confirmation for a unit. State is unchanged until
    /// [`confirm_cancel`](Self::confirm_cancel).
    #[instrument(skip(self), fields(unit = %key))]
    pub fn request_cancel(&mut self, key: &UnitKey) -> Result<(), VerificationError> {
        let unit = self.unit_mut(key)?;
        ensure_open(key, unit.phase)?;
        self.cancel_request = Some(key.clone());
        Ok(())
    }

    #[instrument(skip(self), fields(unit = %key))]
    pub fn confirm_cancel(&mut self, key: &UnitKey) -> Result<(), VerificationError> {
        if self.cancel_request.as_ref() != Some(key) {
            return Err(VerificationError::NoCancelRequested(key.to_string()));
        }
        let unit = self.unit_mut(key)?;
        ensure_open(key, unit.phase)?;

        unit.phase = Phase::Cancelled;
        self.cancel_request = None;
        info!("Unit cancelled");
        Ok(())
    }

    /// Closes the cancel confirmation without touching any unit.
    pub fn dismiss_cancel(&mut self) -> Option<UnitKey> {
        self.cancel_request.take()
    }

    /// True iff every unit is `Verified` or `Cancelled`.
    pub fn is_ready_to_submit(&self) -> bool {
        self.units.values().all(|unit| unit.phase.is_settled())
    }

    pub fn submit(&self) -> Result<SubmitReceipt, VerificationError> {
        let summary = self.summary();
        if !summary.is_ready() {
            return Err(VerificationError::NotReady {
                outstanding: summary.outstanding(),
            });
        }
        Ok(SubmitReceipt {
            generation: self.generation,
            verified: summary.verified,
            cancelled: summary.cancelled,
        })
    }

    pub fn summary(&self) -> WorkflowSummary {
        let mut summary = WorkflowSummary {
            total: self.units.len(),
            ..WorkflowSummary::default()
        };
        for unit in self.units.values() {
            match unit.phase {
                Phase::Pending => summary.pending += 1,
                Phase::Verifying => summary.verifying += 1,
                Phase::Verified => summary.verified += 1,
                Phase::Invalid => summary.invalid += 1,
                Phase::Cancelled => summary.cancelled += 1,
            }
        }
        summary
    }
}

/// Refuses any change to a unit that is settled or mid-verification.
fn ensure_open(key: &UnitKey, phase: Phase) -> Result<(), VerificationError> {
    match phase {
        Phase::Pending | Phase::Invalid => Ok(()),
        Phase::Verifying => Err(VerificationError::VerificationInFlight(key.to_string())),
        Phase::Verified => Err(VerificationError::AlreadyVerified(key.to_string())),
        Phase::Cancelled => Err(VerificationError::AlreadyCancelled(key.to_string())),
    }
}
