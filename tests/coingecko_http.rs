//! Exercises the CoinGecko client and the fallback path against a local
//! HTTP server serving canned responses.

use crypto_market_board::{
    constants::FALLBACK_ASSET_ID, providers::CoinGeckoProvider, Column, MarketBoardService,
    MarketDataFetcher, MarketDataProvider, MarketEvent, MarketQuery, ProviderError,
    RefreshConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::timeout;

const MARKETS_BODY: &str = r#"[
  {
    "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
    "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
    "current_price": 43250, "market_cap": 847200000000, "market_cap_rank": 1,
    "fully_diluted_valuation": 908000000000, "total_volume": 15200000000,
    "high_24h": 44000, "low_24h": 42500, "price_change_24h": 1045.5,
    "price_change_percentage_24h": 2.45, "market_cap_change_24h": 20000000000,
    "market_cap_change_percentage_24h": 2.4, "circulating_supply": 19600000,
    "total_supply": 21000000, "max_supply": 21000000, "ath": 69000,
    "ath_change_percentage": -37.3, "ath_date": "2021-11-10T14:24:11.849Z",
    "atl": 67.81, "atl_change_percentage": 63600.0, "atl_date": "2013-07-06T00:00:00.000Z",
    "roi": null, "last_updated": "2024-01-15T10:00:00.000Z",
    "sparkline_in_7d": {"price": [42000.1, 42500.2, 43250.0]},
    "price_change_percentage_1h_in_currency": 0.5,
    "price_change_percentage_24h_in_currency": 2.45,
    "price_change_percentage_7d_in_currency": 5.2
  },
  {
    "id": "ethereum", "symbol": "eth", "name": "Ethereum",
    "image": "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
    "current_price": 2250.12, "market_cap": 270000000000, "market_cap_rank": 2,
    "fully_diluted_valuation": null, "total_volume": 9000000000,
    "price_change_percentage_24h": -1.2, "circulating_supply": 120000000,
    "total_supply": 120000000, "max_supply": null,
    "price_change_percentage_1h_in_currency": null,
    "price_change_percentage_7d_in_currency": -3.4
  }
]"#;

/// Serves a single HTTP response and reports the request line it received
async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (request_tx, request_rx) = oneshot::channel();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let request = String::from_utf8_lossy(&request);
        let request_line = request.lines().next().unwrap_or_default().to_string();
        let _ = request_tx.send(request_line);

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    (format!("http://{}/api/v3", addr), request_rx)
}

#[tokio::test]
async fn test_fetch_markets_parses_listing() {
    let (base_url, request_rx) = serve_once("200 OK", MARKETS_BODY).await;
    let provider = CoinGeckoProvider::with_base_url(base_url).unwrap();

    let quotes = provider.fetch_markets(&MarketQuery::default()).await.unwrap();
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].id, "bitcoin");
    assert_eq!(quotes[0].max_supply, Some(21_000_000.0));
    assert_eq!(quotes[1].max_supply, None);
    assert_eq!(quotes[1].fully_diluted_valuation, None);
    assert_eq!(quotes[1].price_change_percentage_1h_in_currency, None);

    let request_line = request_rx.await.unwrap();
    assert!(request_line.starts_with("GET /api/v3/coins/markets?vs_currency=usd"));
    assert!(request_line.contains("per_page=100"));
    assert!(request_line.contains("order=market_cap_desc"));
    assert!(request_line.contains("sparkline=true"));
    assert!(request_line.contains("price_change_percentage=1h%2C24h%2C7d"));
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let (base_url, _) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
    let provider = CoinGeckoProvider::with_base_url(base_url).unwrap();

    let err = provider
        .fetch_markets(&MarketQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::ApiError(_)));
}

#[tokio::test]
async fn test_rate_limit_status() {
    let (base_url, _) = serve_once("429 Too Many Requests", "{}").await;
    let provider = CoinGeckoProvider::with_base_url(base_url).unwrap();

    let err = provider
        .fetch_markets(&MarketQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::RateLimitExceeded));
}

#[tokio::test]
async fn test_unparseable_body_takes_fallback_path() {
    let (base_url, _) = serve_once("200 OK", "<html>maintenance</html>").await;
    let provider = Arc::new(CoinGeckoProvider::with_base_url(base_url).unwrap());
    let fetcher = MarketDataFetcher::new(provider);
    let mut events = fetcher.subscribe();

    let batch = fetcher.fetch().await;
    assert!(batch.is_fallback());
    assert_eq!(batch.quotes.len(), 1);
    assert_eq!(batch.quotes[0].id, FALLBACK_ASSET_ID);

    match events.try_recv().unwrap() {
        MarketEvent::FetchFailed { error_message, .. } => {
            assert!(error_message.contains("Invalid response"))
        }
        other => panic!("unexpected event: {}", other),
    }
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_unreachable_host_takes_fallback_path() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider =
        Arc::new(CoinGeckoProvider::with_base_url(format!("http://{}/api/v3", addr)).unwrap());
    let fetcher = MarketDataFetcher::new(provider);
    let mut events = fetcher.subscribe();

    let batch = fetcher.fetch().await;
    assert!(batch.is_fallback());
    assert!(events.try_recv().unwrap().is_failure());
}

#[tokio::test]
async fn test_mounted_board_renders_live_listing() {
    let (base_url, _) = serve_once("200 OK", MARKETS_BODY).await;
    let provider = Arc::new(CoinGeckoProvider::with_base_url(base_url).unwrap());
    let service = MarketBoardService::mount(provider, RefreshConfig::default());
    let mut events = service.subscribe();

    let event = timeout(Duration::from_secs(10), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.event_type(), "BATCH_UPDATED");

    // The notification is published just before the batch is applied.
    for _ in 0..100 {
        if !service.board().await.is_loading() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let mut board = service.board_mut().await;
    assert!(!board.is_loading());

    let rows = board.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].price, "$43,250.00");
    assert_eq!(rows[0].max_supply.as_deref(), Some("Max: 21.00M"));
    assert_eq!(rows[1].change_1h.text, "N/A");
    assert_eq!(rows[1].change_24h.text, "-1.20%");
    assert_eq!(rows[1].circulating_supply, "120.00M ETH");

    board.click_header(Column::MarketCap);
    board.click_header(Column::MarketCap);
    assert_eq!(board.rows()[0].id, "bitcoin");

    board.set_search("eth");
    let rows = board.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ethereum");

    let panel = board.select("ethereum").unwrap();
    assert_eq!(panel.max_supply, "∞ ETH");
    drop(board);

    service.unmount().await;
}
