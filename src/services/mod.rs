pub mod accounts;
pub mod mailer;
pub mod sessions;
