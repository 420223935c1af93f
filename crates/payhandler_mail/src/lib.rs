// --- File: crates/payhandler_mail/src/lib.rs ---

pub mod error;
pub mod logic;
pub mod service;

pub use error::MailError;
pub use logic::send_mail;
pub use service::{LogOnlyNotificationService, MailNotificationService};
