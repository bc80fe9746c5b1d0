//! Phase extraction: property graph walk, numeric coercion, timeline.

pub mod coerce;
pub mod timeline;
pub mod walker;

pub use coerce::{coerce, phase_tags, MAX_PHASE};
pub use timeline::{PhaseCollector, PhaseTimeline, ScanStats};
pub use walker::{property_sets, PropertySets, PsetFilter};
