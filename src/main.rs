use std::sync::Arc;

use clap::Parser;

use fare_estimator::api::predict_service::PaymentType;
use fare_estimator::config::{Config, REQUIRED_VARIABLES};
use fare_estimator::page::info::ABOUT_TEXT;
use fare_estimator::page::{Field, FormState, Page, ResultsView, Surface};

#[derive(Parser, Debug)]
#[command(about = "Estimate an NYC yellow taxi fare between two addresses")]
struct Args {
    /// Pickup address
    pickup: Option<String>,

    /// Dropoff address
    dropoff: Option<String>,

    #[arg(long, default_value_t = PaymentType::Card)]
    payment: PaymentType,

    /// Save a PDF summary of the estimate to EXPORT_DIR
    #[arg(long)]
    pdf: bool,

    /// Print address suggestions for TEXT and exit
    #[arg(long, value_name = "TEXT")]
    suggest: Option<String>,

    /// Print information about the estimator and exit
    #[arg(long)]
    about: bool,
}

struct Terminal;

impl Surface for Terminal {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn set_busy(&self, busy: bool) {
        if busy {
            log::info!("Calculating fare...");
        } else {
            log::debug!("Fare calculation finished");
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    if args.about {
        println!("{ABOUT_TEXT}");
        return Ok(());
    }

    let config = Config::env().inspect_err(|e| {
        log::error!(
            "config: {e}. Check all required environment variables ({}) are set.",
            REQUIRED_VARIABLES.join(", ")
        );
    })?;

    config.log();

    let page = Page::from_config(&config, Arc::new(Terminal))?;

    if let Some(text) = args.suggest {
        for suggestion in page.suggest(Field::Pickup, &text).await? {
            println!("{suggestion}");
        }
        return Ok(());
    }

    page.set_field(Field::Pickup, args.pickup.unwrap_or_default());
    page.set_field(Field::Dropoff, args.dropoff.unwrap_or_default());
    page.set_payment(args.payment);

    let submission = page.submit().await?;
    submission.route_drawn().await;

    if let Some(view) = page.results() {
        print_results(&page.form(), &view);
    }

    match page.map().overlay() {
        Some(route) => println!(
            "Route: {} ({} points)",
            if route.summary.is_empty() { "driving" } else { route.summary.as_str() },
            route.path.len()
        ),
        None => println!("Route: unavailable"),
    }

    if args.pdf {
        let path = page.export()?;
        println!("Summary saved to {}", path.display());
    }

    Ok(())
}

fn print_results(form: &FormState, view: &ResultsView) {
    println!("Pickup:      {}", form.pickup);
    println!("Dropoff:     {}", form.dropoff);
    println!("Payment:     {}", form.payment);
    println!();
    println!("Estimated fare:  {}", view.fare_amount);
    println!("Total amount:    {}", view.total_amount);
    println!("  Base fare:     {}", view.base_fare);
    println!("  Extra:         {}", view.extra);
    println!("  Congestion:    {}", view.congestion);
    println!("  MTA tax:       {}", view.mta_tax);
    println!("  Improvement:   {}", view.improvement);
    println!("  Tolls:         {}", view.tolls);
    println!();
    println!("Distance:    {}", view.distance);
    println!("Duration:    {}", view.duration);
    println!("Day:         {}", view.pickup_day);
    println!("Time:        {}", view.pickup_hour);
    println!("Date:        {}", view.pickup_date);
    println!("Rate:        {}", view.rate_code);
}
