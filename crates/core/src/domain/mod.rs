pub mod amenity;
pub mod hotel;
pub mod report;

pub use amenity::{Amenity, AmenityAnalysis, AmenityBucket, AmenityCategory, Highlight, TopAmenity};
pub use hotel::{Competitor, Hotel, Location, Rating, Review};
pub use report::{BasicReport, ExtendedReport};
