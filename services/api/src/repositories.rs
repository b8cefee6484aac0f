//! Repositories for database operations

pub mod appointment;
pub mod blog;
pub mod doctor;
pub mod gallery;
#[cfg(test)]
pub mod memory;
pub mod service;
pub mod testimonial;

pub use appointment::{AppointmentRepository, AppointmentStore};
pub use blog::BlogRepository;
pub use doctor::DoctorRepository;
pub use gallery::GalleryRepository;
pub use service::ServiceRepository;
pub use testimonial::TestimonialRepository;
