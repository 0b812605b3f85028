/// Represents a single chart-change row parsed from an LNM listing.
/// Coordinate fields are optional to accommodate rows without a fix;
/// derived fields are filled in one pass by the resolver/classifier and
/// the record is never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeRecord {
    // Core identification
    pub id: usize,
    pub chart: String,
    /// Raw action text, lower-cased at parse time.
    pub action: String,
    pub item: String,
    pub label: String,

    // Position (degrees decimal, may be absent)
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    /// Raw publication reference, e.g. "LNM 08/11, 11th Dist".
    pub published: String,

    // Derived fields
    /// Normalized "20YYwWW" effective-week identifier, absent when the
    /// publication reference is unparseable or future-dated.
    pub effective: Option<String>,
    pub is_note: bool,
    pub is_add: bool,
    pub is_delete: bool,
    /// Conspicuity filter result: worth checking on a paper chart.
    pub use_flag: bool,

    // Neighbor spacing annotations
    pub all_neighbor: Option<NeighborInfo>,
    /// Spacing within the conspicuous subset only.
    pub use_neighbor: Option<NeighborInfo>,
}

impl ChangeRecord {
    pub fn has_position(&self) -> bool {
        self.lat.is_some() && self.lng.is_some()
    }
}

/// Nearest-neighbor annotation for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborInfo {
    /// `id` of the nearest other record.
    pub id: usize,
    /// Great-circle distance in nautical miles.
    pub dist_nmi: f64,
    /// Initial azimuth from this record to the neighbor, degrees [0, 360).
    pub azimuth: f64,
}
