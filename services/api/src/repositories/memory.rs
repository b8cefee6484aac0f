//! In-memory appointment store for tests

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use common::error::DatabaseResult;
use tokio::sync::Mutex;

use super::AppointmentStore;
use crate::models::appointment::{
    Appointment, AppointmentStats, AppointmentStatus, NewAppointment,
};

#[derive(Default)]
pub struct MemoryAppointmentStore {
    appointments: Mutex<Vec<Appointment>>,
    /// Known services by id, standing in for the services table
    services: HashMap<i64, String>,
}

impl MemoryAppointmentStore {
    pub fn with_services(services: &[(i64, &str)]) -> Self {
        Self {
            appointments: Mutex::default(),
            services: services
                .iter()
                .map(|(id, title)| (*id, title.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl AppointmentStore for MemoryAppointmentStore {
    async fn create(&self, appointment: &NewAppointment) -> DatabaseResult<i64> {
        let mut appointments = self.appointments.lock().await;
        let id = appointments.len() as i64 + 1;
        let service_id = appointment
            .service_id
            .filter(|id| self.services.contains_key(id));

        appointments.push(Appointment {
            id,
            first_name: appointment.first_name.clone(),
            last_name: appointment.last_name.clone(),
            email: appointment.email.clone(),
            phone: appointment.phone.clone(),
            preferred_date: appointment.preferred_date,
            preferred_time: appointment.preferred_time.clone(),
            service_id,
            service_title: service_id.and_then(|id| self.services.get(&id).cloned()),
            message: appointment.message.clone(),
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list(&self) -> DatabaseResult<Vec<Appointment>> {
        let appointments = self.appointments.lock().await;
        Ok(appointments.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Appointment>> {
        let appointments = self.appointments.lock().await;
        Ok(appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn status(&self, id: i64) -> DatabaseResult<Option<AppointmentStatus>> {
        Ok(self.find_by_id(id).await?.map(|a| a.status))
    }

    async fn set_status(
        &self,
        id: i64,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> DatabaseResult<bool> {
        let mut appointments = self.appointments.lock().await;
        match appointments
            .iter_mut()
            .find(|a| a.id == id && a.status == from)
        {
            Some(appointment) => {
                appointment.status = to;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn stats(&self) -> DatabaseResult<AppointmentStats> {
        let appointments = self.appointments.lock().await;
        let mut stats = AppointmentStats::default();
        for appointment in appointments.iter() {
            stats.add(appointment.status, 1);
        }
        Ok(stats)
    }
}
