//! Mail sender adapters.
//!
//! - `SmtpMailSender` - Delivery through an SMTP relay
//! - `CapturingMailBox` - Keeps sent mail for assertions

mod capturing_mail_box;
mod smtp_mail_sender;

pub use capturing_mail_box::CapturingMailBox;
pub use smtp_mail_sender::SmtpMailSender;
