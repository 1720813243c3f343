use std::{fs::File, io::BufReader, time::Instant};

use shopify_order_parser::{JsonStreamer, Limits, OrderCollection};

/// Shopify caps an order at 250 line items, leave room for the other fields
const MAX_ENTRIES: usize = 1_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./tests/fixtures/order.json".to_string());

    let instant = Instant::now();
    let streamer = JsonStreamer::with_limits(Limits::default().max_entries(MAX_ENTRIES));
    let order: OrderCollection = streamer
        .from_reader(BufReader::new(File::open(&path)?))
        .map(|entries| OrderCollection::new(entries.into()))?;
    log::info!("Parsed {path} in {}ms", instant.elapsed().as_millis());

    log::info!(
        "Order {} ({}) total {} {}",
        order.id().unwrap_or_default(),
        order.email().unwrap_or("no email"),
        order.total_price().unwrap_or("?"),
        order.currency().unwrap_or("")
    );
    log::info!(
        "{} line items, {} distinct products",
        order.get_number_of_items(),
        order.get_item_ids().len()
    );

    for item in order.get_items() {
        log::info!(
            "  {} x{} {}",
            item.product_id().unwrap_or_default(),
            order.get_items_by_id(item.product_id().unwrap_or_default()).len(),
            item.title().unwrap_or("untitled")
        );
    }

    Ok(())
}
