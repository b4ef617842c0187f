//! Shared agent state: sysinfo handles, the sensor sets and the session config.

use std::sync::Arc;
use sysinfo::{Components, System};
use tokio::sync::{Mutex, RwLock};

use crate::hwmon::DriveSensor;
use crate::types::{ClientData, Gpu};

pub type SharedSystem = Arc<Mutex<System>>;
pub type SharedComponents = Arc<Mutex<Components>>;

#[derive(Clone)]
pub struct AppState {
    // Persistent sysinfo handles
    pub sys: SharedSystem,
    pub components: SharedComponents,

    // Enumerated once at startup so hdd_list and gpu_list keep their length
    pub drives: Arc<Mutex<Vec<DriveSensor>>>,
    pub gpus: Arc<Mutex<Vec<Gpu>>>,

    // Last config pushed by any dashboard; greeted to new connections
    pub client_data: Arc<RwLock<ClientData>>,

    pub hostname: String,
}
