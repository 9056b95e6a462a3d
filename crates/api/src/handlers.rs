pub mod bookings;
pub mod broadcast;
pub mod slots;
pub mod telegram;

use chrono::{Local, NaiveDate};

/// Calendar date at the studio, used as the pruning cutoff and for the
/// default slot date.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
