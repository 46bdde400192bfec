//! Kintr Audience - notification audience targeting for the Kintr admin dashboard
//!
//! This library selects which users receive a broadcast notification. The
//! selection is a pure filter over the user roster driven by operator
//! criteria: age range, named region, ad-hoc geofence, gender, name, and
//! a top-percent cut by engagement.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{filter_audience, haversine_distance, AudienceSession, RegionCatalog};
pub use models::{AudienceCriteria, GeoPoint, Gender, Region, RosterEntry, UserRecord};
