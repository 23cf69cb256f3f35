pub mod amenities;
pub mod competitors;
pub mod opportunities;
pub mod reviews;
