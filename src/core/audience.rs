use crate::core::{
    filters::{matches_gender_flags, name_contains, select_top_percent, within_age_bounds, within_geofence},
    regions::RegionCatalog,
};
use crate::models::{AudienceCriteria, RosterEntry};

/// Select the audience for a notification
///
/// Returns the roster members satisfying every criterion that is set, in
/// roster order unless the top-engagement cut reorders them.
///
/// # Pipeline Stages
/// 1. Age lower bound
/// 2. Age upper bound
/// 3. Named-region geofence (skipped if the region is not in the catalog)
/// 4. Ad-hoc point and radius geofence
/// 5. Gender checkboxes
/// 6. Name substring
/// 7. Top percent by likes received, over the survivors of 1-6
pub fn filter_audience<'a>(
    roster: &'a [RosterEntry],
    criteria: &AudienceCriteria,
    regions: &RegionCatalog,
) -> Vec<&'a RosterEntry> {
    select_indices(roster, criteria, regions)
        .into_iter()
        .map(|index| &roster[index])
        .collect()
}

/// Same selection as [`filter_audience`], expressed as roster indices
pub fn select_indices(
    roster: &[RosterEntry],
    criteria: &AudienceCriteria,
    regions: &RegionCatalog,
) -> Vec<usize> {
    let region_fence = criteria.region.as_deref().and_then(|name| {
        let found = regions.find(name);
        if found.is_none() {
            tracing::debug!("Region {:?} not in catalog, skipping region geofence", name);
        }
        found.map(|region| (region.center(), region.range))
    });
    let point_fence = criteria.ad_hoc_geofence();
    let user_name = criteria.user_name.as_deref().filter(|name| !name.is_empty());

    let survivors: Vec<usize> = roster
        .iter()
        .enumerate()
        // Stages 1 & 2: age range
        .filter(|(_, entry)| within_age_bounds(&entry.user, criteria.min_age, criteria.max_age))
        // Stage 3: named region
        .filter(|(_, entry)| match &region_fence {
            Some((center, range)) => within_geofence(&entry.user, center, *range),
            None => true,
        })
        // Stage 4: ad-hoc point
        .filter(|(_, entry)| match &point_fence {
            Some((center, range)) => within_geofence(&entry.user, center, *range),
            None => true,
        })
        // Stage 5: gender
        .filter(|(_, entry)| matches_gender_flags(&entry.user, criteria.is_male, criteria.is_female))
        // Stage 6: name
        .filter(|(_, entry)| user_name.map_or(true, |needle| name_contains(&entry.user, needle)))
        .map(|(index, _)| index)
        .collect();

    // Stage 7: engagement cut, applied last over the filtered population
    match criteria.top_percent() {
        Some(percent) => select_top_percent(survivors, percent, |&index| roster[index].user.likes_received),
        None => survivors,
    }
}
