//! Interactive Front Desk Example
//!
//! Demonstrates the typed client against a running backend:
//! 1. Log in as a staff account
//! 2. Browse and search the booking list
//! 3. Check bookings in and out
//!
//! Run: cargo run --example front_desk

use std::io::{self, Write};

use lotus_client::api::{
    AuthApi, BookingApi, CheckoutApi, NotificationApi, PageQuery, RestApi,
};
use lotus_client::config::ClientConfig;
use shared::models::{CheckoutRequest, PaymentMethod};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("\n🏨 Front Desk Client");
    println!("====================\n");

    let base_url = std::env::var("LOTUS_BASE_URL")
        .ok()
        .unwrap_or_else(|| get_input_with_default("Backend URL", "http://localhost:8000"));

    let api = RestApi::new(&ClientConfig::new(base_url))?;

    println!("\n🔑 Staff login");
    let username = get_input("Username: ");
    let password = get_input("Password: ");
    api.login(&username, &password).await?;

    let me = api.current_user().await?;
    println!("✅ Logged in as {} ({:?})", me.username, me.role);

    let unread = api.unread_count().await.unwrap_or(0);
    if unread > 0 {
        println!("🔔 {unread} unread notifications");
    }

    loop {
        print_menu();
        let choice = get_input("Enter choice (0-4): ");
        let result = match choice.as_str() {
            "0" => {
                api.logout().await?;
                println!("\n👋 Goodbye!");
                break;
            }
            "1" => list_bookings(&api, None).await,
            "2" => {
                let term = get_input("Search: ");
                list_bookings(&api, Some(term)).await
            }
            "3" => check_in_booking(&api).await,
            "4" => {
                let id = get_input("Booking ID: ").parse::<i64>().unwrap_or(0);
                settle_checkout(&api, id).await
            }
            _ => {
                println!("❌ Invalid choice");
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("❌ {e}");
        }
    }

    Ok(())
}

async fn list_bookings(api: &RestApi, search: Option<String>) -> anyhow::Result<()> {
    let mut query = PageQuery::new(1, 10);
    if let Some(term) = search {
        query = query.with_search(term);
    }
    let list = api.list_bookings(&query).await?;
    println!("\n{} bookings total", list.total());
    for booking in list.into_items() {
        println!(
            "  #{:<5} {:<20} {} -> {}  [{}]  {}",
            booking.id,
            booking.customer_name.as_deref().unwrap_or("-"),
            booking.check_in_date,
            booking.check_out_date,
            booking.status.label(),
            booking.total_price,
        );
    }
    Ok(())
}

async fn check_in_booking(api: &RestApi) -> anyhow::Result<()> {
    let id = get_input("Booking ID: ").parse::<i64>().unwrap_or(0);
    api.check_in(id).await?;
    println!("✅ Booking {id} checked in");
    Ok(())
}

async fn settle_checkout(api: &RestApi, booking_id: i64) -> anyhow::Result<()> {
    let info = api.checkout_info(booking_id).await?;
    println!("\nGuest: {} <{}>", info.customer.full_name, info.customer.email);
    println!("Estimated: {}", info.estimated_price);

    let discount = if info.available_discount_codes.is_empty() {
        None
    } else {
        println!("Available discount codes:");
        for code in &info.available_discount_codes {
            println!("  {} - {}", code.id, code.code);
        }
        get_input("Discount code ID (blank for none): ")
            .parse::<i64>()
            .ok()
    };

    let price = api.calculate_checkout_price(booking_id, discount).await?;
    println!("Final price: {}", price.final_price);

    let response = api
        .submit_checkout(
            booking_id,
            &CheckoutRequest {
                payment_method: PaymentMethod::Cash,
                discount_code_id: discount,
            },
        )
        .await?;
    if let Some(invoice_id) = response.invoice_id {
        println!("✅ Checked out, invoice #{invoice_id}");
    } else {
        println!("✅ Checked out");
    }
    Ok(())
}

fn print_menu() {
    println!("\nAvailable Actions:");
    println!("1. List bookings");
    println!("2. Search bookings");
    println!("3. Check in");
    println!("4. Check out (with billing)");
    println!("0. Logout and exit");
}

fn get_input(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input.trim().to_string()
}

fn get_input_with_default(prompt: &str, default: &str) -> String {
    print!("{} [{}]: ", prompt, default);
    io::stdout().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    let input = input.trim();
    if input.is_empty() {
        default.to_string()
    } else {
        input.to_string()
    }
}
