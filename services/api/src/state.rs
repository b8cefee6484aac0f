//! Application state shared across handlers

use std::sync::Arc;

use common::guard::SessionGuard;
use sqlx::PgPool;

use crate::models::appointment::StatusPolicy;
use crate::repositories::{
    AppointmentStore, BlogRepository, DoctorRepository, GalleryRepository, ServiceRepository,
    TestimonialRepository,
};
use crate::uploads::UploadStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub appointments: Arc<dyn AppointmentStore>,
    pub service_repository: ServiceRepository,
    pub doctor_repository: DoctorRepository,
    pub gallery_repository: GalleryRepository,
    pub blog_repository: BlogRepository,
    pub testimonial_repository: TestimonialRepository,
    pub uploads: UploadStore,
    pub guard: SessionGuard,
    pub status_policy: StatusPolicy,
}

impl AppState {
    /// State backed by PostgreSQL for every store
    pub fn new(
        db_pool: PgPool,
        uploads: UploadStore,
        guard: SessionGuard,
        status_policy: StatusPolicy,
    ) -> Self {
        Self {
            appointments: Arc::new(crate::repositories::AppointmentRepository::new(
                db_pool.clone(),
            )),
            service_repository: ServiceRepository::new(db_pool.clone()),
            doctor_repository: DoctorRepository::new(db_pool.clone()),
            gallery_repository: GalleryRepository::new(db_pool.clone()),
            blog_repository: BlogRepository::new(db_pool.clone()),
            testimonial_repository: TestimonialRepository::new(db_pool.clone()),
            db_pool,
            uploads,
            guard,
            status_policy,
        }
    }
}
