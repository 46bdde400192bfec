// Core algorithm exports
pub mod audience;
pub mod distance;
pub mod filters;
pub mod regions;
pub mod session;

pub use audience::{filter_audience, select_indices};
pub use distance::{haversine_distance, EARTH_RADIUS_KM};
pub use filters::{within_age_bounds, within_geofence, matches_gender_flags, name_contains, select_top_percent};
pub use regions::RegionCatalog;
pub use session::AudienceSession;
