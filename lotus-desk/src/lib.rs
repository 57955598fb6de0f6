//! View controllers for the desk application
//!
//! Every screen with non-trivial behaviour gets a renderer-free
//! controller here: plain state plus async methods that talk to the
//! [`lotus_client`] API traits. The UI layer renders the fields and
//! forwards events; it never calls the backend directly. Keeping the
//! controllers free of any widget toolkit is what makes the workflows
//! testable with in-process API mocks.

pub mod analytics;
pub mod booking_desk;
pub mod booking_form;
pub mod checkout;
pub mod debounce;
pub mod menu;
pub mod my_bookings;
pub mod notifications;
pub mod payments;
pub mod user_list;
