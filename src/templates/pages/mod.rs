pub mod apartment;
pub mod apartments;

pub use apartment::{apartment_page, ApartmentVm};
pub use apartments::{apartments_page, ApartmentsVm};
