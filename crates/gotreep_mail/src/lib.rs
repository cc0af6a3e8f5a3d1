// --- File: crates/gotreep_mail/src/lib.rs ---

pub mod error;
pub mod mailer;
pub mod service;
pub mod template;

pub use error::MailError;
pub use mailer::ConfirmationMailer;
pub use service::Smtp2GoNotificationService;
