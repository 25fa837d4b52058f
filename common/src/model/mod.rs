pub mod checkin;
pub mod coordinate;
pub mod identity;
pub mod place;
pub mod zone;
