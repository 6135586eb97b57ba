use anyhow::Result;
use housebook::config::CryptoInstrument;
use housebook::market_data::providers::CryptoQuoteSource;
use housebook::market_data::QuoteSource;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn coin(label: &str, id: &str) -> CryptoInstrument {
    CryptoInstrument {
        label: label.to_string(),
        id: id.to_string(),
    }
}

#[tokio::test]
async fn crypto_quotes_are_batched_and_label_mapped() -> Result<()> {
    let server = MockServer::start().await;

    let body = r#"{
        "bitcoin": { "krw": 91250000.0 },
        "ethereum": { "krw": 4410000.0 }
    }"#;

    Mock::given(method("GET"))
        .and(path("/api/v3/simple/price"))
        .and(query_param("ids", "bitcoin,ethereum"))
        .and(query_param("vs_currencies", "krw"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let source = CryptoQuoteSource::new(
        "KRW",
        vec![coin("비트코인", "bitcoin"), coin("이더리움", "ethereum")],
    )
    .with_base_url(server.uri());

    let quotes = source.fetch_quotes().await?;

    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].name, "비트코인");
    assert_eq!(quotes[0].price, 91250000.0);
    assert_eq!(quotes[1].name, "이더리움");
    assert_eq!(quotes[1].price, 4410000.0);

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "expected one batched request");

    Ok(())
}

#[tokio::test]
async fn coins_missing_from_response_are_skipped() -> Result<()> {
    let server = MockServer::start().await;

    let body = r#"{ "bitcoin": { "krw": 91250000.0 } }"#;
    Mock::given(method("GET"))
        .and(path("/api/v3/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let source = CryptoQuoteSource::new(
        "KRW",
        vec![coin("비트코인", "bitcoin"), coin("없는코인", "nonexistent")],
    )
    .with_base_url(server.uri());

    let quotes = source.fetch_quotes().await?;
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].name, "비트코인");

    Ok(())
}

#[tokio::test]
async fn no_instruments_means_no_request() -> Result<()> {
    let server = MockServer::start().await;

    let source = CryptoQuoteSource::new("KRW", Vec::new()).with_base_url(server.uri());
    let quotes = source.fetch_quotes().await?;

    assert!(quotes.is_empty());
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());

    Ok(())
}
