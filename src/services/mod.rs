pub mod accounts;
pub mod attendance;
pub mod blog;
pub mod bookings;
pub mod finance;
pub mod mail;
pub mod messaging;
pub mod qna;
