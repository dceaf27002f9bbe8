use crypto_market_board::{Column, MarketBoardService, MarketEvent, TableRow};
use std::time::Duration;
use tokio::time::timeout;

fn print_board(rows: &[TableRow], limit: usize) {
    println!("\n{:-<96}", "");
    println!(
        "{:>4} {:<3} {:<20} {:>16} {:>9} {:>9} {:>9} {:>12}",
        "#", "", "Coin", "Price", "1h%", "24h%", "7d%", "Market Cap"
    );
    for row in rows.iter().take(limit) {
        println!(
            "{:>4} {:<3} {:<20} {:>16} {:>9} {:>9} {:>9} {:>12}",
            row.rank,
            if row.watched { "*" } else { "" },
            format!("{} ({})", row.name, row.symbol),
            row.price,
            row.change_1h.text,
            row.change_24h.text,
            row.change_7d.text,
            row.market_cap,
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("Live Crypto Market (CoinGecko)");
    println!("==============================");

    let service = MarketBoardService::mount_coingecko()?;
    let mut events = service.subscribe();

    // Wait for the first batch (live or fallback).
    match timeout(Duration::from_secs(15), events.recv()).await {
        Ok(Ok(event @ MarketEvent::FetchFailed { .. })) => eprintln!("Warning: {}", event),
        Ok(Ok(event)) => println!("{}", event),
        Ok(Err(e)) => eprintln!("Notification channel closed: {}", e),
        Err(_) => eprintln!("No market data after 15s"),
    }

    {
        let mut board = service.board_mut().await;
        board.toggle_watch("ethereum");
        print_board(&board.rows(), 10);

        println!("\nSorted by price, descending:");
        board.click_header(Column::Price);
        board.click_header(Column::Price);
        print_board(&board.rows(), 10);

        println!("\nSearch \"sol\":");
        board.click_header(Column::Rank);
        board.set_search("sol");
        print_board(&board.rows(), usize::MAX);
        println!("{} matching assets", board.match_count());

        board.set_search("");
        if let Ok(panel) = board.select("bitcoin") {
            println!("\n{} ({}) {}", panel.name, panel.symbol, panel.rank);
            println!("  Price:        {} ({} 24h)", panel.price, panel.change_24h.text);
            println!("  Market Cap:   {}", panel.market_cap);
            println!("  Vol/MCap:     {}", panel.volume_to_market_cap);
            println!("  Max Supply:   {}", panel.max_supply);
            println!(
                "  ATH:          {} on {} ({})",
                panel.all_time_high.price, panel.all_time_high.date, panel.all_time_high.distance
            );
            println!("  Technology:   {}", panel.profile.technology);
            for link in &panel.links {
                println!("  {}: {}", link.label, link.url);
            }
        }
        board.close_detail();
    }

    let stats = service.stats().await;
    println!(
        "\nRefreshes: {} (fallback: {}), live rate: {:.0}%",
        stats.total_refreshes,
        stats.fallback_refreshes,
        stats.live_rate() * 100.0
    );

    service.unmount().await;
    Ok(())
}
