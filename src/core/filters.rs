use std::cmp::Reverse;

use crate::models::{Gender, GeoPoint, UserRecord};

/// Check a user's age against optional lower and upper bounds
///
/// Both bounds are inclusive. A user without a usable age fails any bound
/// that is set.
#[inline]
pub fn within_age_bounds(user: &UserRecord, min_age: Option<u32>, max_age: Option<u32>) -> bool {
    if let Some(min) = min_age {
        if !user.age.is_some_and(|age| age >= min) {
            return false;
        }
    }

    if let Some(max) = max_age {
        if !user.age.is_some_and(|age| age <= max) {
            return false;
        }
    }

    true
}

/// Check that a user lives within `range_km` of `center`
///
/// Users with no known location are never inside a geofence.
#[inline]
pub fn within_geofence(user: &UserRecord, center: &GeoPoint, range_km: f64) -> bool {
    match &user.lives_in {
        Some(home) => center.distance_to(home) <= range_km,
        None => false,
    }
}

/// Apply the male and female checkboxes
///
/// Each flag is its own restriction, so setting both admits nobody.
#[inline]
pub fn matches_gender_flags(user: &UserRecord, is_male: bool, is_female: bool) -> bool {
    if is_male && user.gender != Gender::Man {
        return false;
    }

    if is_female && user.gender != Gender::Woman {
        return false;
    }

    true
}

/// Case-sensitive substring match on the display name
#[inline]
pub fn name_contains(user: &UserRecord, needle: &str) -> bool {
    user.name.contains(needle)
}

/// Keep the top `percent` of `items` ranked by engagement, descending
///
/// The sort is stable so tied items keep their input order, which fixes
/// where the truncation boundary falls. Percentages above 100 are clamped.
pub fn select_top_percent<T, F>(mut items: Vec<T>, percent: u32, engagement: F) -> Vec<T>
where
    F: Fn(&T) -> usize,
{
    let percent = percent.min(100) as usize;
    let keep = items.len() * percent / 100;

    items.sort_by_key(|item| Reverse(engagement(item)));
    items.truncate(keep);
    items
}
