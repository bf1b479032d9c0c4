// Adapters layer: concrete implementations for external systems (CRM, storage).

pub mod crm;
pub mod storage;
