pub mod booking;

pub use booking::{Booking, BookingRequest, IntField};
