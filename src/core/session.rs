use std::sync::Arc;

use crate::core::{audience::select_indices, regions::RegionCatalog};
use crate::models::{AudienceCriteria, CriteriaField, CriteriaFlag, RosterEntry};

/// Live audience filter state for one operator
///
/// Holds the criteria being edited and the audience they currently select.
/// Every mutation recomputes the selection synchronously, so readers never
/// observe a result that lags its criteria.
#[derive(Debug, Clone)]
pub struct AudienceSession {
    roster: Arc<Vec<RosterEntry>>,
    regions: Arc<RegionCatalog>,
    criteria: AudienceCriteria,
    selected: Vec<usize>,
}

impl AudienceSession {
    /// Open a session with default criteria; the whole roster is selected
    pub fn new(roster: Arc<Vec<RosterEntry>>, regions: Arc<RegionCatalog>) -> Self {
        let selected = (0..roster.len()).collect();
        Self {
            roster,
            regions,
            criteria: AudienceCriteria::default(),
            selected,
        }
    }

    pub fn criteria(&self) -> &AudienceCriteria {
        &self.criteria
    }

    /// Selected members in audience order
    pub fn members(&self) -> impl Iterator<Item = &RosterEntry> + '_ {
        self.selected.iter().map(|&index| &self.roster[index])
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn roster_size(&self) -> usize {
        self.roster.len()
    }

    /// Display names of the first `limit` members
    pub fn sample_names(&self, limit: usize) -> Vec<&str> {
        self.members().take(limit).map(|entry| entry.user.name.as_str()).collect()
    }

    /// Identities of every selected member, in audience order
    pub fn recipient_ids(&self) -> Vec<String> {
        self.members().map(|entry| entry.id.clone()).collect()
    }

    /// Replace the whole criteria object
    pub fn set_criteria(&mut self, criteria: AudienceCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    /// Edit the criteria in place
    pub fn update<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut AudienceCriteria),
    {
        edit(&mut self.criteria);
        self.recompute();
    }

    /// Apply raw text from one of the inputs; malformed numbers become unset
    pub fn edit(&mut self, field: CriteriaField, raw: &str) {
        self.update(|criteria| criteria.set_text(field, raw));
    }

    pub fn toggle(&mut self, flag: CriteriaFlag) {
        self.update(|criteria| criteria.toggle(flag));
    }

    pub fn select_region(&mut self, region: Option<String>) {
        self.update(|criteria| criteria.region = region.filter(|name| !name.is_empty()));
    }

    /// Swap in a refetched roster, keeping the current criteria
    pub fn replace_roster(&mut self, roster: Arc<Vec<RosterEntry>>) {
        self.roster = roster;
        self.recompute();
    }

    /// Swap in a refetched region catalog, keeping the current criteria
    pub fn replace_regions(&mut self, regions: Arc<RegionCatalog>) {
        self.regions = regions;
        self.recompute();
    }

    /// Restore default criteria and select the full roster
    pub fn reset(&mut self) {
        self.criteria = AudienceCriteria::default();
        self.selected = (0..self.roster.len()).collect();
    }

    /// Hand off the final recipients and close out the criteria
    pub fn commit(&mut self) -> Vec<String> {
        let recipients = self.recipient_ids();
        tracing::debug!("Committed audience of {} recipients", recipients.len());
        self.reset();
        recipients
    }

    /// Discard the criteria without producing recipients
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn recompute(&mut self) {
        self.selected = select_indices(&self.roster, &self.criteria, &self.regions);
    }
}
