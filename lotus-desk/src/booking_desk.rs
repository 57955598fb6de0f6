//! Staff booking list controller
//!
//! Server-side paginated and searchable. Lifecycle buttons patch the
//! affected row in place on success instead of refetching the page,
//! so the list never jumps under the operator.

use shared::models::{Booking, BookingStatus};

use lotus_client::api::{BookingApi, PageQuery};

const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug)]
pub struct BookingDesk {
    pub bookings: Vec<Booking>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for BookingDesk {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingDesk {
    pub fn new() -> Self {
        Self {
            bookings: Vec::new(),
            total: 0,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            loading: false,
            error: None,
        }
    }

    fn query(&self) -> PageQuery {
        PageQuery::new(self.page, self.page_size).with_search(self.search.clone())
    }

    pub async fn load<A: BookingApi>(&mut self, api: &A) {
        self.loading = true;
        let result = api.list_bookings(&self.query()).await;
        self.loading = false;
        match result {
            Ok(list) => {
                self.total = list.total();
                self.bookings = list.into_items();
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not load bookings"));
            }
        }
    }

    pub async fn set_page<A: BookingApi>(&mut self, api: &A, page: u32) {
        self.page = page.max(1);
        self.load(api).await;
    }

    /// Check a confirmed booking in. No call is made for rows where the
    /// transition is not offered.
    pub async fn check_in<A: BookingApi>(&mut self, api: &A, id: i64) -> bool {
        if !self.status_of(id).is_some_and(BookingStatus::can_check_in) {
            return false;
        }
        match api.check_in(id).await {
            Ok(()) => {
                self.apply_transition(id, BookingStatus::CheckedIn);
                true
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not check the booking in"));
                false
            }
        }
    }

    /// Settle-free checkout from the list button. The billed path goes
    /// through [`crate::checkout::CheckoutDialog`] instead.
    pub async fn check_out<A: BookingApi>(&mut self, api: &A, id: i64) -> bool {
        if !self.status_of(id).is_some_and(BookingStatus::can_check_out) {
            return false;
        }
        match api.check_out(id).await {
            Ok(()) => {
                self.apply_transition(id, BookingStatus::CheckedOut);
                true
            }
            Err(err) => {
                self.error = Some(err.display_message("Could not check the booking out"));
                false
            }
        }
    }

    fn status_of(&self, id: i64) -> Option<BookingStatus> {
        self.bookings.iter().find(|b| b.id == id).map(|b| b.status)
    }

    /// The one place list rows are mutated after a lifecycle call.
    fn apply_transition(&mut self, id: i64, to: BookingStatus) {
        if let Some(booking) = self.bookings.iter_mut().find(|b| b.id == id) {
            booking.status = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use lotus_client::error::{ClientError, ClientResult};
    use shared::models::{BookingCreate, PriceQuote, PriceQuoteRequest};
    use shared::{ListResponse, Page};

    use super::*;

    fn booking(id: i64, status: BookingStatus) -> Booking {
        Booking {
            id,
            customer: Some(1),
            customer_name: Some("Alice".into()),
            rooms: vec![1],
            check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            guest_count: 2,
            status,
            total_price: "2000000".parse().unwrap(),
            special_requests: None,
            room_details: vec![],
        }
    }

    #[derive(Default)]
    struct MockApi {
        list_calls: AtomicUsize,
        transition_calls: AtomicUsize,
        fail_transitions: bool,
    }

    #[async_trait]
    impl BookingApi for MockApi {
        async fn create_booking(&self, _req: &BookingCreate) -> ClientResult<Booking> {
            unimplemented!()
        }

        async fn quote_price(&self, _req: &PriceQuoteRequest) -> ClientResult<PriceQuote> {
            unimplemented!()
        }

        async fn list_bookings(&self, query: &PageQuery) -> ClientResult<ListResponse<Booking>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            assert!(query.page >= 1);
            Ok(ListResponse::Paginated(Page {
                results: vec![
                    booking(1, BookingStatus::Confirmed),
                    booking(2, BookingStatus::CheckedIn),
                ],
                count: 12,
                next: None,
                previous: None,
            }))
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
            self.transition_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_transitions {
                return Err(ClientError::Validation("Room not ready".into()));
            }
            Ok(())
        }

        async fn check_out(&self, _id: i64) -> ClientResult<()> {
            self.transition_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_transitions {
                return Err(ClientError::Validation("Unpaid balance".into()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_fills_rows_and_total() {
        let api = MockApi::default();
        let mut desk = BookingDesk::new();
        desk.load(&api).await;

        assert_eq!(desk.bookings.len(), 2);
        assert_eq!(desk.total, 12);
        assert!(desk.error.is_none());
    }

    #[tokio::test]
    async fn check_in_patches_the_row_without_refetching() {
        let api = MockApi::default();
        let mut desk = BookingDesk::new();
        desk.load(&api).await;

        assert!(desk.check_in(&api, 1).await);
        assert_eq!(desk.bookings[0].status, BookingStatus::CheckedIn);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ineligible_rows_do_not_call_the_backend() {
        let api = MockApi::default();
        let mut desk = BookingDesk::new();
        desk.load(&api).await;

        // Row 2 is already checked in; row 1 is not checked in yet.
        assert!(!desk.check_in(&api, 2).await);
        assert!(!desk.check_out(&api, 1).await);
        assert_eq!(api.transition_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_transition_keeps_the_row_and_sets_the_banner() {
        let api = MockApi {
            fail_transitions: true,
            ..Default::default()
        };
        let mut desk = BookingDesk::new();
        desk.load(&api).await;

        assert!(!desk.check_out(&api, 2).await);
        assert_eq!(desk.bookings[1].status, BookingStatus::CheckedIn);
        assert_eq!(desk.error.as_deref(), Some("Unpaid balance"));
    }
}
