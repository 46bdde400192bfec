use crate::models::{GeoPoint, Region};

/// Region catalog fetched once per session
///
/// Lookups are by exact name; the first region carrying a name wins if the
/// catalog happens to contain duplicates.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Resolve a region by name, `None` when the catalog has no such entry
    pub fn find(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.name == name)
    }

    /// Region whose center is closest to `point`
    pub fn nearest(&self, point: &GeoPoint) -> Option<&Region> {
        self.regions
            .iter()
            .map(|region| (region, point.distance_to(&region.center())))
            .filter(|(_, distance)| !distance.is_nan())
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(region, _)| region)
    }

    /// Labels for the region dropdown, in catalog order
    pub fn names(&self) -> Vec<&str> {
        self.regions.iter().map(|region| region.name.as_str()).collect()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl From<Vec<Region>> for RegionCatalog {
    fn from(regions: Vec<Region>) -> Self {
        Self::new(regions)
    }
}
