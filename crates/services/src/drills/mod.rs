mod controller;
mod service;

pub use controller::DrillController;
pub use service::DrillService;
