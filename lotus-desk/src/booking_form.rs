//! Booking form controller
//!
//! Used by both the customer-facing booking page and the desk "book on
//! behalf of" flow; the `role` field decides which extra rules apply.
//! Validation is entirely client-side and a submit with a non-empty
//! error map never reaches the network.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use shared::models::{Booking, BookingCreate, PriceQuote, PriceQuoteRequest, Room, UserRole};

use lotus_client::api::{BookingApi, RoomApi};

/// How far ahead a check-in date may lie.
pub const BOOKING_WINDOW_DAYS: i64 = 28;

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Customer,
    Rooms,
    CheckInDate,
    CheckOutDate,
    GuestCount,
}

#[derive(Debug)]
pub struct BookingForm {
    role: UserRole,
    /// Target customer; only meaningful (and required) for desk roles.
    pub customer: Option<i64>,
    pub rooms: Vec<i64>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub guest_count: i32,
    pub special_requests: String,
    /// Rooms free for the chosen dates, refreshed on every date change.
    pub available: Vec<Room>,
    pub quote: Option<PriceQuote>,
    pub errors: BTreeMap<FormField, String>,
    pub error: Option<String>,
    pub submitting: bool,
}

impl BookingForm {
    pub fn new(role: UserRole) -> Self {
        Self {
            role,
            customer: None,
            rooms: Vec::new(),
            check_in_date: None,
            check_out_date: None,
            guest_count: 1,
            special_requests: String::new(),
            available: Vec::new(),
            quote: None,
            errors: BTreeMap::new(),
            error: None,
            submitting: false,
        }
    }

    /// Room selection stays disabled until both dates are chosen.
    pub fn dates_chosen(&self) -> bool {
        self.check_in_date.is_some() && self.check_out_date.is_some()
    }

    /// Changing either date invalidates the room selection and quote.
    pub fn set_dates(&mut self, check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) {
        self.check_in_date = check_in;
        self.check_out_date = check_out;
        self.rooms.clear();
        self.available.clear();
        self.quote = None;
    }

    /// Refresh the availability list. A call before both dates are set
    /// does nothing; the date controls gate it in the UI.
    pub async fn fetch_available<A: RoomApi>(&mut self, api: &A) {
        let (Some(check_in), Some(check_out)) = (self.check_in_date, self.check_out_date) else {
            return;
        };
        match api.available_rooms(check_in, check_out).await {
            Ok(rooms) => {
                self.available = rooms;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not load available rooms"));
            }
        }
    }

    /// Combined capacity of the selected rooms, from the availability
    /// list. Zero when a selected room is not in the list (stale
    /// selection), which skips the capacity rule.
    fn selected_capacity(&self) -> i32 {
        self.rooms
            .iter()
            .filter_map(|id| self.available.iter().find(|r| r.id == *id))
            .map(|r| r.room_type.max_guests)
            .sum()
    }

    pub fn validate(&mut self, today: NaiveDate) -> bool {
        self.errors.clear();

        if self.rooms.is_empty() {
            self.errors
                .insert(FormField::Rooms, "Select at least one room".into());
        }
        match (self.check_in_date, self.check_out_date) {
            (None, _) => {
                self.errors
                    .insert(FormField::CheckInDate, "Choose a check-in date".into());
            }
            (_, None) => {
                self.errors
                    .insert(FormField::CheckOutDate, "Choose a check-out date".into());
            }
            (Some(check_in), Some(check_out)) => {
                if check_in < today {
                    self.errors.insert(
                        FormField::CheckInDate,
                        "Check-in cannot be in the past".into(),
                    );
                } else if check_in > today + Duration::days(BOOKING_WINDOW_DAYS) {
                    self.errors.insert(
                        FormField::CheckInDate,
                        format!("Check-in must be within {BOOKING_WINDOW_DAYS} days"),
                    );
                }
                if check_out <= check_in {
                    self.errors.insert(
                        FormField::CheckOutDate,
                        "Check-out must be after check-in".into(),
                    );
                }
            }
        }
        if self.guest_count < 1 {
            self.errors
                .insert(FormField::GuestCount, "At least one guest".into());
        } else {
            let capacity = self.selected_capacity();
            if capacity > 0 && self.guest_count > capacity {
                self.errors.insert(
                    FormField::GuestCount,
                    format!("Selected rooms sleep at most {capacity} guests"),
                );
            }
        }
        if self.role.is_desk_role() && self.customer.is_none() {
            self.errors
                .insert(FormField::Customer, "Select a customer".into());
        }

        self.errors.is_empty()
    }

    /// Price estimate shown next to the form. Only meaningful for a
    /// single-room selection; multi-room totals come back from the
    /// server with the created booking.
    pub async fn request_quote<A: BookingApi>(&mut self, api: &A) {
        let (Some(check_in), Some(check_out)) = (self.check_in_date, self.check_out_date) else {
            return;
        };
        let [room_id] = self.rooms[..] else {
            self.quote = None;
            return;
        };
        let req = PriceQuoteRequest {
            room_id,
            check_in_date: check_in,
            check_out_date: check_out,
            guest_count: self.guest_count,
        };
        match api.quote_price(&req).await {
            Ok(quote) => self.quote = Some(quote),
            Err(err) => {
                // Estimate only; the form stays usable without it.
                tracing::debug!(error = %err, room_id, "Price quote failed");
                self.quote = None;
            }
        }
    }

    /// Validate and create. Returns the booking on success; on
    /// validation failure no request is made and `errors` says why.
    pub async fn submit<A: BookingApi>(
        &mut self,
        api: &A,
        today: NaiveDate,
    ) -> Option<Booking> {
        if !self.validate(today) {
            return None;
        }
        let req = BookingCreate {
            rooms: self.rooms.clone(),
            // validate() guarantees both dates.
            check_in_date: self.check_in_date?,
            check_out_date: self.check_out_date?,
            guest_count: self.guest_count,
            special_requests: (!self.special_requests.trim().is_empty())
                .then(|| self.special_requests.trim().to_string()),
            customer: self.role.is_desk_role().then_some(self.customer).flatten(),
        };
        self.submitting = true;
        let result = api.create_booking(&req).await;
        self.submitting = false;
        match result {
            Ok(booking) => {
                self.error = None;
                Some(booking)
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not create the booking"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use lotus_client::api::PageQuery;
    use lotus_client::error::ClientResult;
    use shared::ListResponse;
    use shared::models::{BookingStatus, RoomStatus, RoomType};

    use super::*;

    #[derive(Default)]
    struct MockRoomApi {
        available_calls: AtomicUsize,
    }

    #[async_trait]
    impl RoomApi for MockRoomApi {
        async fn list_rooms(&self, _search: Option<&str>) -> ClientResult<Vec<Room>> {
            unimplemented!()
        }

        async fn room_detail(&self, _id: i64) -> ClientResult<Room> {
            unimplemented!()
        }

        async fn available_rooms(
            &self,
            _check_in: NaiveDate,
            _check_out: NaiveDate,
        ) -> ClientResult<Vec<Room>> {
            self.available_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![room(1, 2), room(2, 4)])
        }

        async fn list_room_types(&self) -> ClientResult<Vec<shared::models::RoomType>> {
            unimplemented!()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn room(id: i64, max_guests: i32) -> Room {
        Room {
            id,
            room_number: format!("{}", 100 + id),
            status: RoomStatus::Available,
            room_type: RoomType {
                id: 1,
                name: "Standard".into(),
                base_price: "1000000".parse().unwrap(),
                max_guests,
                amenities: vec![],
                description: None,
            },
            images: vec![],
        }
    }

    #[derive(Default)]
    struct MockBookingApi {
        create_calls: AtomicUsize,
        quote_calls: AtomicUsize,
    }

    #[async_trait]
    impl BookingApi for MockBookingApi {
        async fn create_booking(&self, req: &BookingCreate) -> ClientResult<Booking> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Booking {
                id: 99,
                customer: req.customer,
                customer_name: None,
                rooms: req.rooms.clone(),
                check_in_date: req.check_in_date,
                check_out_date: req.check_out_date,
                guest_count: req.guest_count,
                status: BookingStatus::Pending,
                total_price: "2000000".parse().unwrap(),
                special_requests: req.special_requests.clone(),
                room_details: vec![],
            })
        }

        async fn quote_price(&self, req: &PriceQuoteRequest) -> ClientResult<PriceQuote> {
            self.quote_calls.fetch_add(1, Ordering::SeqCst);
            let nights = (req.check_out_date - req.check_in_date).num_days().max(1);
            let total: rust_decimal::Decimal = format!("{}", nights * 1_000_000).parse().unwrap();
            Ok(PriceQuote {
                original_price: total,
                total_price: total,
            })
        }

        async fn list_bookings(&self, _query: &PageQuery) -> ClientResult<ListResponse<Booking>> {
            unimplemented!()
        }

        async fn my_bookings(&self) -> ClientResult<ListResponse<Booking>> {
            unimplemented!()
        }

        async fn booking_detail(&self, _id: i64) -> ClientResult<Booking> {
            unimplemented!()
        }

        async fn cancel_booking(&self, _id: i64) -> ClientResult<()> {
            unimplemented!()
        }

        async fn check_in(&self, _id: i64) -> ClientResult<()> {
            unimplemented!()
        }

        async fn check_out(&self, _id: i64) -> ClientResult<()> {
            unimplemented!()
        }
    }

    fn valid_form(today: NaiveDate) -> BookingForm {
        let mut form = BookingForm::new(UserRole::Customer);
        form.check_in_date = Some(today + Duration::days(1));
        form.check_out_date = Some(today + Duration::days(3));
        form.rooms = vec![1];
        form.available = vec![room(1, 2)];
        form
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        let today = date(2024, 6, 1);
        let api = MockBookingApi::default();
        let mut form = BookingForm::new(UserRole::Customer);

        assert!(form.submit(&api, today).await.is_none());
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
        assert!(form.errors.contains_key(&FormField::Rooms));
        assert!(form.errors.contains_key(&FormField::CheckInDate));
    }

    #[tokio::test]
    async fn valid_form_submits_once() {
        let today = date(2024, 6, 1);
        let api = MockBookingApi::default();
        let mut form = valid_form(today);

        let booking = form.submit(&api, today).await.unwrap();
        assert_eq!(booking.id, 99);
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 1);
        assert!(!form.submitting);
    }

    #[test]
    fn check_out_must_be_strictly_after_check_in() {
        let today = date(2024, 6, 1);
        let mut form = valid_form(today);
        form.check_out_date = form.check_in_date;

        assert!(!form.validate(today));
        assert!(form.errors.contains_key(&FormField::CheckOutDate));
    }

    #[test]
    fn check_in_is_bounded_by_the_booking_window() {
        let today = date(2024, 6, 1);

        let mut form = valid_form(today);
        form.check_in_date = Some(today - Duration::days(1));
        assert!(!form.validate(today));

        let mut form = valid_form(today);
        form.check_in_date = Some(today + Duration::days(BOOKING_WINDOW_DAYS + 1));
        form.check_out_date = Some(today + Duration::days(BOOKING_WINDOW_DAYS + 2));
        assert!(!form.validate(today));

        let mut form = valid_form(today);
        form.check_in_date = Some(today + Duration::days(BOOKING_WINDOW_DAYS));
        form.check_out_date = Some(today + Duration::days(BOOKING_WINDOW_DAYS + 1));
        assert!(form.validate(today));
    }

    #[test]
    fn guest_count_is_checked_against_room_capacity() {
        let today = date(2024, 6, 1);
        let mut form = valid_form(today);
        form.guest_count = 3;

        assert!(!form.validate(today));
        assert!(form.errors.contains_key(&FormField::GuestCount));
    }

    #[test]
    fn desk_roles_must_pick_a_customer() {
        let today = date(2024, 6, 1);
        let mut form = valid_form(today);
        form.role = UserRole::Staff;

        assert!(!form.validate(today));
        assert!(form.errors.contains_key(&FormField::Customer));

        form.customer = Some(42);
        assert!(form.validate(today));
    }

    #[tokio::test]
    async fn availability_is_only_fetched_once_both_dates_are_set() {
        let today = date(2024, 6, 1);
        let api = MockRoomApi::default();
        let mut form = BookingForm::new(UserRole::Customer);

        form.check_in_date = Some(today + Duration::days(1));
        form.fetch_available(&api).await;
        assert_eq!(api.available_calls.load(Ordering::SeqCst), 0);

        form.check_out_date = Some(today + Duration::days(3));
        form.fetch_available(&api).await;
        assert_eq!(api.available_calls.load(Ordering::SeqCst), 1);
        assert_eq!(form.available.len(), 2);
    }

    #[tokio::test]
    async fn quote_covers_single_room_selections_only() {
        let today = date(2024, 6, 1);
        let api = MockBookingApi::default();
        let mut form = valid_form(today);

        form.request_quote(&api).await;
        assert_eq!(api.quote_calls.load(Ordering::SeqCst), 1);
        // Two nights at the mock rate.
        assert_eq!(
            form.quote.as_ref().unwrap().total_price,
            "2000000".parse::<rust_decimal::Decimal>().unwrap()
        );

        form.rooms = vec![1, 2];
        form.request_quote(&api).await;
        assert!(form.quote.is_none());
        assert_eq!(api.quote_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn changing_dates_clears_the_room_selection() {
        let today = date(2024, 6, 1);
        let mut form = valid_form(today);
        form.set_dates(Some(today + Duration::days(2)), Some(today + Duration::days(4)));
        assert!(form.rooms.is_empty());
        assert!(form.available.is_empty());
    }
}
