//! Customer "my bookings" controller
//!
//! The list is fetched once and filtered in memory; the filter box
//! matches against everything a guest might type from their
//! confirmation mail. Details are fetched lazily on expand, and a
//! successful cancel patches both the list row and the open detail.

use shared::models::{Booking, BookingStatus};

use lotus_client::api::BookingApi;

#[derive(Debug, Default)]
pub struct MyBookings {
    pub bookings: Vec<Booking>,
    pub filter: String,
    pub detail: Option<Booking>,
    pub loading: bool,
    pub error: Option<String>,
}

impl MyBookings {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A: BookingApi>(&mut self, api: &A) {
        self.loading = true;
        let result = api.my_bookings().await;
        self.loading = false;
        match result {
            Ok(list) => {
                self.bookings = list.into_items();
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not load your bookings"));
            }
        }
    }

    /// Case-insensitive substring match over id, dates (dd/mm/yyyy),
    /// status label and room numbers.
    pub fn filtered(&self) -> Vec<&Booking> {
        let needle = self.filter.trim().to_lowercase();
        if needle.is_empty() {
            return self.bookings.iter().collect();
        }
        self.bookings
            .iter()
            .filter(|b| Self::haystack(b).contains(&needle))
            .collect()
    }

    fn haystack(booking: &Booking) -> String {
        let mut hay = format!(
            "{} {} {} {}",
            booking.id,
            booking.check_in_date.format("%d/%m/%Y"),
            booking.check_out_date.format("%d/%m/%Y"),
            booking.status.label().to_lowercase(),
        );
        for room in &booking.room_details {
            hay.push(' ');
            hay.push_str(&room.room_number.to_lowercase());
        }
        hay
    }

    /// Expand one booking; the row data may be stale, the detail is not.
    pub async fn open_detail<A: BookingApi>(&mut self, api: &A, id: i64) {
        match api.booking_detail(id).await {
            Ok(booking) => {
                self.detail = Some(booking);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not load the booking"));
            }
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn can_cancel(&self, id: i64) -> bool {
        self.bookings
            .iter()
            .find(|b| b.id == id)
            .is_some_and(|b| b.status.can_cancel())
    }

    /// Cancel an upcoming booking. The button is only rendered when
    /// [`Self::can_cancel`] holds, and the guard here keeps an eager UI
    /// from calling anyway.
    pub async fn cancel<A: BookingApi>(&mut self, api: &A, id: i64) -> bool {
        if !self.can_cancel(id) {
            return false;
        }
        match api.cancel_booking(id).await {
            Ok(()) => {
                if let Some(booking) = self.bookings.iter_mut().find(|b| b.id == id) {
                    booking.status = BookingStatus::Cancelled;
                }
                if let Some(detail) = self.detail.as_mut().filter(|d| d.id == id) {
                    detail.status = BookingStatus::Cancelled;
                }
                self.error = None;
                true
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not cancel the booking"));
                false
            }
        }
    }
}
