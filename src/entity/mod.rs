pub mod appointments;
pub mod audit_logs;
pub mod services;
pub mod stylists;
pub mod users;

pub use appointments::Entity as Appointments;
pub use audit_logs::Entity as AuditLogs;
pub use services::Entity as Services;
pub use stylists::Entity as Stylists;
pub use users::Entity as Users;
