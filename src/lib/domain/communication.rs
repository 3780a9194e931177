//! Outbound email: the mailer interface, the remote send capability and the
//! backend that translates between them.

pub mod backend;
pub mod mailer;
pub mod transmissions;
