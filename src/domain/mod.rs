pub mod apartment;
pub mod status;

pub use apartment::{Apartment, ApartmentPatch, NewApartment};
pub use status::{ApartmentStatus, UnknownStatus};
