pub mod google_calendar;
pub mod service_account;
