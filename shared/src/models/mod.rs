//! Backend entities and request payloads

mod booking;
mod checkout;
mod discount;
mod invoice;
mod notification;
mod payment;
mod room;
mod stats;
mod user;

pub use booking::{
    Booking, BookingCreate, BookingStatus, PriceQuote, PriceQuoteRequest, RoomSummary,
};
pub use checkout::{
    CheckoutInfo, CheckoutRequest, CheckoutResponse, CustomerSnapshot, PaymentMethod,
    PaymentMethodOption, PriceCalculation, RentalWindow,
};
pub use discount::DiscountCode;
pub use invoice::{Invoice, InvoiceItem, InvoiceStatus};
pub use notification::{Notification, UnreadCount};
pub use payment::{Payment, PaymentStatus};
pub use room::{Room, RoomImage, RoomStatus, RoomType};
pub use stats::{MonthlyRevenue, RecentBooking, StatsOverview, TopRoom};
pub use user::{CustomerType, ToggleActiveResponse, User, UserCreate, UserRole, UserUpdate};
