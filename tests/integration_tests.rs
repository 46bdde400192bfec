// Integration tests for Kintr Audience

use kintr_audience::core::{filter_audience, AudienceSession, RegionCatalog};
use kintr_audience::models::{AudienceCriteria, CriteriaField, CriteriaFlag, Gender, GeoPoint, Region, RosterEntry, UserRecord};
use std::sync::Arc;

fn create_test_entry(
    id: &str,
    name: &str,
    age: u32,
    gender: Gender,
    lives_in: Option<(f64, f64)>,
    likes: usize,
) -> RosterEntry {
    RosterEntry::new(
        id,
        UserRecord {
            age: Some(age),
            gender,
            name: name.to_string(),
            lives_in: lives_in.map(|(lat, lon)| GeoPoint::new(lat, lon)),
            likes_received: likes,
        },
    )
}

fn create_test_regions() -> RegionCatalog {
    RegionCatalog::new(vec![
        Region {
            name: "Lower Manhattan".to_string(),
            latitude: 40.7128,
            longitude: -74.0060,
            range: 5.0,
        },
        Region {
            name: "Greater London".to_string(),
            latitude: 51.5074,
            longitude: -0.1278,
            range: 40.0,
        },
    ])
}

fn names(result: &[&RosterEntry]) -> Vec<String> {
    result.iter().map(|entry| entry.user.name.clone()).collect()
}

/// Deterministic roster with a spread of ages, genders, locations and likes
fn create_generated_roster(size: usize) -> Vec<RosterEntry> {
    (0..size)
        .map(|i| {
            let gender = match i % 3 {
                0 => Gender::Man,
                1 => Gender::Woman,
                _ => Gender::Other,
            };
            let lives_in = if i % 7 == 0 {
                None
            } else {
                Some((40.7128 + (i as f64 * 0.003) % 0.2, -74.0060 + (i as f64 * 0.002) % 0.2))
            };
            create_test_entry(
                &format!("u{}", i),
                &format!("User {}", i),
                18 + (i * 7 % 50) as u32,
                gender,
                lives_in,
                (i * 13) % 17,
            )
        })
        .collect()
}

#[test]
fn test_end_to_end_age_and_gender() {
    let roster = vec![
        create_test_entry("a", "Alice", 25, Gender::Man, Some((0.0, 0.0)), 10),
        create_test_entry("b", "Bob", 40, Gender::Woman, Some((0.0, 1.0)), 2),
        create_test_entry("c", "Carol", 30, Gender::Man, None, 5),
    ];
    let criteria = AudienceCriteria {
        min_age: Some(20),
        max_age: Some(35),
        is_male: true,
        ..Default::default()
    };

    let result = filter_audience(&roster, &criteria, &RegionCatalog::default());
    assert_eq!(names(&result), vec!["Alice", "Carol"]);
}

#[test]
fn test_empty_criteria_identity() {
    let roster = create_generated_roster(60);
    let result = filter_audience(&roster, &AudienceCriteria::default(), &create_test_regions());

    assert_eq!(result.len(), roster.len());
    for (kept, original) in result.iter().zip(roster.iter()) {
        assert_eq!(kept.id, original.id);
    }
}

#[test]
fn test_age_range_holds_for_every_survivor() {
    let roster = create_generated_roster(200);
    let regions = create_test_regions();

    for (min, max) in [(18, 18), (21, 30), (30, 45), (50, 67), (0, 200)] {
        let criteria = AudienceCriteria {
            min_age: Some(min),
            max_age: Some(max),
            ..Default::default()
        };
        let result = filter_audience(&roster, &criteria, &regions);

        for entry in &result {
            let age = entry.user.age.unwrap();
            assert!(age >= min && age <= max, "Age {} escaped [{}, {}]", age, min, max);
        }

        let expected = roster
            .iter()
            .filter(|entry| entry.user.age.is_some_and(|age| age >= min && age <= max))
            .count();
        assert_eq!(result.len(), expected);
    }
}

#[test]
fn test_top_percent_stability() {
    let roster = vec![
        create_test_entry("1", "First", 30, Gender::Man, None, 5),
        create_test_entry("2", "Second", 30, Gender::Man, None, 5),
        create_test_entry("3", "Third", 30, Gender::Man, None, 3),
        create_test_entry("4", "Fourth", 30, Gender::Man, None, 3),
        create_test_entry("5", "Fifth", 30, Gender::Man, None, 1),
    ];
    let criteria = AudienceCriteria {
        is_active_top_users: true,
        percent_value: Some(40),
        ..Default::default()
    };

    let result = filter_audience(&roster, &criteria, &RegionCatalog::default());
    assert_eq!(names(&result), vec!["First", "Second"]);
}

#[test]
fn test_top_percent_zero_and_hundred() {
    let roster = vec![
        create_test_entry("1", "Low", 30, Gender::Woman, None, 1),
        create_test_entry("2", "High", 30, Gender::Woman, None, 9),
        create_test_entry("3", "Mid", 30, Gender::Woman, None, 4),
    ];
    let mut criteria = AudienceCriteria {
        is_active_top_users: true,
        percent_value: Some(0),
        ..Default::default()
    };

    assert!(filter_audience(&roster, &criteria, &RegionCatalog::default()).is_empty());

    criteria.percent_value = Some(100);
    let result = filter_audience(&roster, &criteria, &RegionCatalog::default());
    assert_eq!(names(&result), vec!["High", "Mid", "Low"]);
}

#[test]
fn test_both_gender_flags_yield_nobody() {
    let roster = create_generated_roster(30);
    let criteria = AudienceCriteria {
        is_male: true,
        is_female: true,
        ..Default::default()
    };

    assert!(filter_audience(&roster, &criteria, &create_test_regions()).is_empty());
}

#[test]
fn test_unknown_region_matches_unset_region() {
    let roster = create_generated_roster(80);
    let regions = create_test_regions();

    let without_region = AudienceCriteria {
        min_age: Some(25),
        is_female: true,
        ..Default::default()
    };
    let stale_region = AudienceCriteria {
        region: Some("Removed Region".to_string()),
        ..without_region.clone()
    };

    let expected: Vec<String> = filter_audience(&roster, &without_region, &regions)
        .iter()
        .map(|entry| entry.id.clone())
        .collect();
    let actual: Vec<String> = filter_audience(&roster, &stale_region, &regions)
        .iter()
        .map(|entry| entry.id.clone())
        .collect();

    assert_eq!(actual, expected);
}

#[test]
fn test_region_geofence_excludes_users_without_location() {
    let roster = create_generated_roster(50);
    let regions = create_test_regions();
    let criteria = AudienceCriteria {
        region: Some("Lower Manhattan".to_string()),
        ..Default::default()
    };

    let result = filter_audience(&roster, &criteria, &regions);
    assert!(!result.is_empty());
    for entry in &result {
        let home = entry.user.lives_in.expect("geofenced users have a location");
        assert!(home.distance_to(&GeoPoint::new(40.7128, -74.0060)) <= 5.0);
    }
}

#[test]
fn test_session_walkthrough() {
    let roster = Arc::new(vec![
        create_test_entry("a", "Alice", 25, Gender::Woman, Some((51.50, -0.12)), 10),
        create_test_entry("b", "Bob", 40, Gender::Man, Some((51.52, -0.10)), 2),
        create_test_entry("c", "Carol", 30, Gender::Woman, Some((40.71, -74.00)), 5),
        create_test_entry("d", "Dee", 33, Gender::Woman, None, 8),
    ]);
    let mut session = AudienceSession::new(roster, Arc::new(create_test_regions()));
    assert_eq!(session.count(), 4);

    session.select_region(Some("Greater London".to_string()));
    assert_eq!(session.sample_names(10), vec!["Alice", "Bob"]);

    session.toggle(CriteriaFlag::Female);
    assert_eq!(session.sample_names(10), vec!["Alice"]);

    session.select_region(None);
    session.edit(CriteriaField::MinAge, "28");
    assert_eq!(session.sample_names(10), vec!["Carol", "Dee"]);

    session.toggle(CriteriaFlag::ActiveTopUsers);
    session.edit(CriteriaField::PercentValue, "50");
    assert_eq!(session.recipient_ids(), vec!["d"]);

    let recipients = session.commit();
    assert_eq!(recipients, vec!["d"]);
    assert_eq!(session.count(), 4);
}
