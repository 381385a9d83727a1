pub mod home;
pub mod stream;
pub mod uploads;
