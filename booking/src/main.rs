//! Box Office demo.
//!
//! Seeds a small catalog and two theaters, then walks through a booking,
//! a conflicting booking and settlement the way a seat-picker front end would.

use boxoffice::{BookingEnvironment, BookingService, Config, Movie, SeatCoord};
use boxoffice_core::environment::SystemClock;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.logging.filter)
                .unwrap_or_else(|_| "boxoffice=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        rows = config.venue.rows,
        cols = config.venue.cols,
        max_dispatch_depth = config.runtime.max_dispatch_depth,
        "Configuration loaded"
    );

    let env = BookingEnvironment::new(Arc::new(SystemClock));
    let mut service =
        BookingService::new(env).with_max_dispatch_depth(config.runtime.max_dispatch_depth);

    service.add_movie(Movie::new("Inception", 148, "Sci-Fi"))?;
    service.add_movie(Movie::new("The Dark Knight", 152, "Action"))?;
    service.add_theater("PVR Cinemas", config.venue.rows, config.venue.cols)?;
    service.add_theater("INOX", config.venue.rows, config.venue.cols)?;

    println!("=== Box Office ===\n");
    println!("Movies:");
    for movie in service.list_movies() {
        println!("  {movie}");
    }
    println!("Theaters:");
    for theater in service.list_theaters() {
        println!("  {} ({}x{})", theater.name(), theater.rows(), theater.cols());
    }

    println!("\nAlice picks 1,1 and 1,2 for Inception at PVR Cinemas...");
    let alice = [SeatCoord::new(0, 0), SeatCoord::new(0, 1)];
    match service.submit_booking("Alice", "Inception", "PVR Cinemas", &alice) {
        Ok(confirmation) => println!("  {confirmation}"),
        Err(err) => println!("  {err}"),
    }

    println!("\nBob picks 1,2 and 2,2 for the same showing...");
    let bob = [SeatCoord::new(0, 1), SeatCoord::new(1, 1)];
    match service.submit_booking("Bob", "Inception", "PVR Cinemas", &bob) {
        Ok(confirmation) => println!("  {confirmation}"),
        Err(err) => println!("  {err}"),
    }

    println!("\nSeats for Inception at PVR Cinemas (X = booked):");
    for (row, seats) in service.seat_map("PVR Cinemas", "Inception")?.iter().enumerate() {
        let cells: Vec<String> = seats
            .iter()
            .enumerate()
            .map(|(col, free)| {
                if *free {
                    SeatCoord::new(row, col).to_string()
                } else {
                    " X ".to_string()
                }
            })
            .collect();
        println!("  {}", cells.join(" "));
    }

    println!("\n{}", service.settle_all());
    println!("{}", service.settle_all());

    println!("\n=== Demo Complete ===");
    Ok(())
}
