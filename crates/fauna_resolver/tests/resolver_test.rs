//! Tests for cache, retry and fallback behaviour of the resolver.

mod test_utils;

use fauna_core::{Animal, DEFAULT_IMAGE_URL, fallback_pool};
use fauna_rate_limit::FaunaConfig;
use fauna_resolver::{Resolver, TransportResponse};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{Scripted, ScriptedTransport};
use tokio::time::Instant;

fn resolver(transport: &ScriptedTransport) -> Resolver<ScriptedTransport> {
    Resolver::with_transport(transport.clone(), &FaunaConfig::default())
}

fn in_pool(animal: Animal, url: &str) -> bool {
    fallback_pool(animal).contains(&url)
}

#[tokio::test(start_paused = true)]
async fn test_resolve_never_fails() -> anyhow::Result<()> {
    let transport = ScriptedTransport::always(Scripted::Fail(
        fauna_error::TransportErrorKind::Connect("refused".to_string()),
    ));
    let resolver = resolver(&transport);

    for category in ["cat", "", "unicorn", "PANDA", " owl ", "🦄", "dog dog"] {
        let url = resolver.resolve(category, None).await;
        assert!(url.starts_with("https://"), "{category:?} resolved to {url:?}");
    }

    assert_eq!(resolver.resolve("unicorn", None).await, DEFAULT_IMAGE_URL);
    assert!(in_pool(Animal::Panda, &resolver.resolve("PANDA", None).await));
    assert_eq!(resolver.cached_len(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cache_hit_makes_no_request() -> anyhow::Result<()> {
    let transport = ScriptedTransport::always(Scripted::cat("http://x/cat1.png"));
    let resolver = resolver(&transport);

    let first = resolver.resolve("cat", None).await;
    let second = resolver.resolve("Cat", None).await;

    assert_eq!(first, "http://x/cat1.png");
    assert_eq!(second, first);
    assert_eq!(transport.call_count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cache_expires_after_duration() -> anyhow::Result<()> {
    let transport = ScriptedTransport::sequence(vec![
        Scripted::cat("http://x/cat1.png"),
        Scripted::cat("http://x/cat2.png"),
    ]);
    let resolver = resolver(&transport);

    assert_eq!(resolver.resolve("cat", None).await, "http://x/cat1.png");
    tokio::time::advance(Duration::from_secs(31)).await;
    assert_eq!(resolver.resolve("cat", None).await, "http://x/cat2.png");
    assert_eq!(transport.call_count(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_then_success_retries_once() -> anyhow::Result<()> {
    let transport = ScriptedTransport::sequence(vec![
        Scripted::too_many(Some(Duration::from_secs(1))),
        Scripted::cat("http://x/cat1.png"),
    ]);
    let resolver = resolver(&transport);

    let started = Instant::now();
    let url = resolver.resolve("cat", None).await;

    assert_eq!(url, "http://x/cat1.png");
    assert_eq!(transport.call_count(), 2);
    assert!(started.elapsed() >= Duration::from_secs(1));
    assert!(started.elapsed() < Duration::from_secs(5));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_long_retry_after_is_capped() -> anyhow::Result<()> {
    let transport = ScriptedTransport::sequence(vec![
        Scripted::too_many(Some(Duration::from_secs(120))),
        Scripted::cat("http://x/cat1.png"),
    ]);
    let resolver = resolver(&transport);

    let started = Instant::now();
    resolver.resolve("cat", None).await;

    let waited = started.elapsed();
    assert!(waited >= Duration::from_secs(5));
    assert!(waited < Duration::from_secs(6));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_persistent_rate_limit_falls_back() -> anyhow::Result<()> {
    let transport = ScriptedTransport::always(Scripted::too_many(None));
    let resolver = resolver(&transport);

    let started = Instant::now();
    let url = resolver.resolve("cat", None).await;
    let waited = started.elapsed();

    assert!(in_pool(Animal::Cat, &url));
    assert_eq!(transport.call_count(), 3);
    assert!(waited >= Duration::from_secs(10), "waited {waited:?}");
    assert!(waited < Duration::from_secs(11), "waited {waited:?}");
    assert_eq!(resolver.cached_len(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_timeouts_fall_back_to_pool() -> anyhow::Result<()> {
    let transport = ScriptedTransport::always(Scripted::timeout());
    let resolver = resolver(&transport);

    let url = resolver.resolve("cat", None).await;

    assert!(in_pool(Animal::Cat, &url));
    assert_eq!(transport.call_count(), 3);
    assert_eq!(resolver.cached_len(), 0, "fallbacks are not cached");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_error_status_and_empty_body_are_failed_attempts() -> anyhow::Result<()> {
    let transport = ScriptedTransport::sequence(vec![
        Scripted::Respond(TransportResponse::new(503, None, "busy")),
        Scripted::Respond(TransportResponse::ok("[]")),
        Scripted::Respond(TransportResponse::ok("not json")),
    ]);
    let resolver = resolver(&transport);

    let url = resolver.resolve("dog", None).await;

    assert!(in_pool(Animal::Dog, &url));
    assert_eq!(transport.call_count(), 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_explicit_key_is_sent_and_result_cached() -> anyhow::Result<()> {
    let transport = ScriptedTransport::always(Scripted::cat("http://x/cat1.png"));
    let resolver = resolver(&transport);

    assert_eq!(resolver.resolve("cat", Some("valid")).await, "http://x/cat1.png");
    assert_eq!(resolver.resolve("cat", Some("valid")).await, "http://x/cat1.png");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].api_key().as_deref(), Some("valid"));
    assert_eq!(requests[0].url(), "https://api.thecatapi.com/v1/images/search");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_configured_key_used_when_none_given() -> anyhow::Result<()> {
    let transport = ScriptedTransport::always(Scripted::Respond(TransportResponse::ok(
        r#"{"image": "https://randomfox.ca/images/3.jpg", "url": "x"}"#,
    )));
    let mut config = FaunaConfig::default();
    config.credentials.dog_api_key = Some("woof".to_string());
    let resolver = Resolver::with_transport(transport.clone(), &config);

    resolver.resolve("dog", Some("")).await;
    let fox = resolver.resolve("fox", Some("ignored")).await;

    let requests = transport.requests();
    assert_eq!(requests[0].api_key().as_deref(), Some("woof"));
    assert_eq!(fox, "https://randomfox.ca/images/3.jpg");
    assert_eq!(requests.last().and_then(|r| r.api_key().clone()), None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_static_only_category_makes_no_request() -> anyhow::Result<()> {
    let transport = ScriptedTransport::always(Scripted::cat("http://x/never.png"));
    let resolver = resolver(&transport);

    let url = resolver.resolve("koala", None).await;

    assert!(in_pool(Animal::Koala, &url));
    assert_eq!(transport.call_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_wildlife_search_request() -> anyhow::Result<()> {
    let transport = ScriptedTransport::always(Scripted::Respond(TransportResponse::ok(
        r#"{"results": [{"photos": [{"url": "https://static.example/photos/1/square.jpeg"}]}]}"#,
    )));
    let resolver = resolver(&transport);

    let url = resolver.resolve("otter", None).await;

    assert_eq!(url, "https://static.example/photos/1/medium.jpeg");
    let requests = transport.requests();
    assert!(requests[0].url().contains("taxon_name=otter"));
    assert_eq!(requests[0].api_key(), &None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_wildlife_can_be_disabled() -> anyhow::Result<()> {
    let transport = ScriptedTransport::always(Scripted::timeout());
    let mut config = FaunaConfig::default();
    config.resolver.wildlife_enabled = false;
    let resolver = Resolver::with_transport(transport.clone(), &config);

    let url = resolver.resolve("wolf", None).await;

    assert!(in_pool(Animal::Wolf, &url));
    assert_eq!(transport.call_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_fetches_are_bounded() -> anyhow::Result<()> {
    let transport = ScriptedTransport::always(Scripted::cat("http://x/cat1.png"))
        .with_delay(Duration::from_millis(50));
    let resolver = Arc::new(resolver(&transport));

    let mut handles = Vec::new();
    for _ in 0..20 {
        let resolver = resolver.clone();
        handles.push(tokio::spawn(async move { resolver.resolve("cat", None).await }));
    }
    for handle in handles {
        assert_eq!(handle.await?, "http://x/cat1.png");
    }

    assert!(transport.peak_in_flight() <= 5);
    assert!(transport.peak_in_flight() >= 1);
    assert_eq!(resolver.gate().available(), 5);
    Ok(())
}

#[tokio::test]
async fn test_random_api_category_has_an_api() -> anyhow::Result<()> {
    let transport = ScriptedTransport::always(Scripted::timeout());
    let resolver = resolver(&transport);

    for _ in 0..20 {
        let animal = resolver.random_api_category();
        assert!(matches!(
            animal,
            Animal::Cat | Animal::Dog | Animal::Fox | Animal::Duck
        ));
    }
    assert!(in_pool(Animal::Duck, &resolver.static_fallback("DUCK")));
    Ok(())
}
