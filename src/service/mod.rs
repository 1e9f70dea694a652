pub mod ledger;
pub mod registry;
pub mod validation;

pub use ledger::AttendanceLedger;
pub use registry::{Deletion, EmployeeRegistry};

use crate::store::RecordStore;
use std::sync::Arc;

/// Registry and ledger wired to the same store.
#[derive(Clone)]
pub struct Services {
    pub registry: EmployeeRegistry,
    pub ledger: AttendanceLedger,
}

impl Services {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let registry = EmployeeRegistry::new(store.clone());
        let ledger = AttendanceLedger::new(store, registry.clone());
        Self { registry, ledger }
    }
}
