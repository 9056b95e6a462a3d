pub mod booking;
pub mod subscriber;
