// Model exports
pub mod criteria;
pub mod domain;
pub mod requests;
pub mod responses;

pub use criteria::{AudienceCriteria, CriteriaField, CriteriaFlag, coerce_integer, coerce_number};
pub use domain::{GeoPoint, Gender, UserRecord, RosterEntry, Region};
pub use requests::{PreviewRequest, SendNotificationRequest};
pub use responses::{AudienceMember, AudiencePreviewResponse, SendNotificationResponse, RegionsResponse, HealthResponse, ErrorResponse};
