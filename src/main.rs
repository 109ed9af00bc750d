use clap::Parser;
use eventfinder::config::env_loader::{load_config, parse_url_config, BACKEND_URL_VAR};
use eventfinder::ticketing::api::TicketingAPI;
use eventfinder::ticketing::model::{Category, EventDetail, EventSummary, VenueDetail};
use eventfinder::tracing::setup_loki;
use eventfinder::ui::controller::SearchController;
use eventfinder::ui::form::SearchForm;
use eventfinder::ui::sort::SortColumn;
use eventfinder::ui::view::{HtmlDocument, Region, View};
use itertools::Itertools;
use std::error::Error;
use std::process::ExitCode;
use tracing::info;

/// Search ticketed events near a location
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// What to search for
    #[arg(short, long)]
    keyword: String,

    /// Radius in miles (10 when empty)
    #[arg(short, long, default_value = "")]
    distance: String,

    #[arg(short, long, default_value_t = Category::Default)]
    category: Category,

    /// Where to search; not needed with --auto-detect
    #[arg(short, long, default_value = "")]
    location: String,

    /// Use the location of this machine's network address
    #[arg(short, long)]
    auto_detect: bool,

    /// Sort the results by event, genre or venue (repeat to flip direction)
    #[arg(short, long)]
    sort: Vec<SortColumn>,

    /// Show details of the event at this row (1-based)
    #[arg(short, long)]
    event: Option<usize>,

    /// Also show the venue of the selected event
    #[arg(long, requires = "event")]
    venue: bool,

    /// Overrides the backend URL from the environment
    #[arg(long)]
    backend_url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<bool, Box<dyn Error>> {
    let mut config = load_config()?;

    if let Some(backend_url) = &args.backend_url {
        config.backend_url = parse_url_config(BACKEND_URL_VAR, backend_url)?;
    }

    let _loki = setup_loki(config.loki_url.as_deref()).await;

    info!("Using backend {}", config.backend_url);

    let api = TicketingAPI::new(config.backend_url, config.request_timeout)?;
    let mut controller = SearchController::new(api, HtmlDocument::default());

    let form = SearchForm {
        keyword: args.keyword,
        distance: args.distance,
        category: args.category,
        location: args.location,
        auto_detect: args.auto_detect,
    };

    let validation = form.validate();
    controller.submit(&form).await;

    if !validation.is_valid() {
        if validation.keyword_missing {
            eprintln!("Please provide a keyword.");
        }
        if validation.location_missing {
            eprintln!("Please provide a location or use --auto-detect.");
        }
        return Ok(false);
    }
    if !report_alerts(controller.view_mut()) {
        return Ok(false);
    }
    if controller.view().is_visible(Region::NoResults) {
        println!("No records found.");
        return Ok(true);
    }

    for column in args.sort {
        controller.sort_by(column);
    }

    print_summaries(&controller.summaries());

    let Some(row) = args.event else {
        return Ok(true);
    };

    if row == 0 || !controller.select_row(row - 1).await {
        eprintln!("There is no event at row {}.", row);
        return Ok(false);
    }
    if !report_alerts(controller.view_mut()) {
        return Ok(false);
    }
    if let Some(detail) = controller.current_detail() {
        print_detail(detail);
    }

    if args.venue {
        if !controller.view().is_visible(Region::VenueToggle) {
            println!("\nNo venue details available.");
            return Ok(true);
        }

        controller.toggle_venue_details().await;

        if !report_alerts(controller.view_mut()) {
            return Ok(false);
        }
        match controller.current_venue() {
            Some(venue) => print_venue(venue),
            None => println!("\nNo venue details available."),
        }
    }

    Ok(true)
}

/// Prints pending alerts; false when there were any
fn report_alerts(document: &mut HtmlDocument) -> bool {
    let alerts = document.take_alerts();

    for alert in &alerts {
        eprintln!("{alert}");
    }

    alerts.is_empty()
}

fn print_summaries(summaries: &[EventSummary]) {
    for (row, summary) in summaries.iter().enumerate() {
        println!(
            "{:>3}  {:<19}  {}  [{}]  @ {}",
            row + 1,
            summary.date_time,
            summary.name,
            summary.genre,
            summary.venue_name
        );
    }
}

fn print_detail(detail: &EventDetail) {
    println!("\n{}", detail.name);
    println!("  Date:          {}", detail.date);
    if !detail.artists.is_empty() {
        println!(
            "  Artist/Team:   {}",
            detail.artists.iter().map(|artist| &artist.name).join(" | ")
        );
    }
    println!("  Venue:         {}", detail.venue);
    println!("  Genres:        {}", detail.genre);
    println!("  Ticket Status: {}", detail.status.label);
    if let Some(price_range) = &detail.price_range {
        println!("  Ticket Price:  {}", price_range);
    }
    if let Some(ticket_url) = &detail.ticket_url {
        println!("  Buy Ticket At: {}", ticket_url);
    }
    if let Some(seat_map) = &detail.seat_map {
        println!("  Seat Map:      {}", seat_map);
    }
}

fn print_venue(venue: &VenueDetail) {
    println!("\n{}", venue.name);
    println!("  Address: {}", venue.address);
    println!("           {}", venue.city);
    println!("           {}", venue.postal_code);
    println!("  Map:     {}", venue.map_url);
    if let Some(more_events_url) = &venue.more_events_url {
        println!("  More events: {}", more_events_url);
    }
}
