pub mod bookings;
pub mod broadcast;
pub mod health;
pub mod slots;
pub mod telegram;
