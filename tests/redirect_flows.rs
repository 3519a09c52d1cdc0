//! End-to-end legacy redirect tests for the gateway.

use axum::http::StatusCode;

mod common;

async fn location(client: &reqwest::Client, base: &str, path_and_query: &str) -> (u16, String) {
    let res = client
        .get(format!("{base}{path_and_query}"))
        .send()
        .await
        .expect("gateway unreachable");
    let status = res.status().as_u16();
    let location = res
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    (status, location)
}

#[tokio::test]
async fn test_legacy_urls_redirect_permanently() {
    let origin = common::start_mock_origin().await;
    let (addr, shutdown) = common::spawn_gateway(common::fixture_config(origin)).await;
    let base = format!("http://{addr}");
    let client = common::test_client();

    let cases = [
        ("/ru/som.html", "/uk/som"),
        ("/ua/som.html", "/uk/som"),
        ("/uk/som.html", "/uk/som"),
        ("/en/som.html", "/en/som"),
        ("/tilyapiya-test.html", "/uk/tilyapiya-test"),
        ("/ru/pro-nas", "/uk/pro-nas"),
        ("/ua", "/uk"),
        ("/category/novini", "/uk/blog/category/novini"),
        ("/blog", "/uk/blog"),
        ("/blog/", "/uk/blog"),
        ("/prefiltr-ultrasieve.html/ultrasieveextra", "/uk/prefiltr-ultrasieve"),
        ("/", "/uk"),
        ("/about", "/uk/about"),
    ];
    for (path, expected) in cases {
        let (status, location) = location(&client, &base, path).await;
        assert_eq!(status, 301, "status for {path}");
        assert_eq!(location, expected, "location for {path}");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_query_string_is_preserved() {
    let origin = common::start_mock_origin().await;
    let (addr, shutdown) = common::spawn_gateway(common::fixture_config(origin)).await;
    let base = format!("http://{addr}");
    let client = common::test_client();

    let (status, loc) = location(&client, &base, "/?post_type=contact").await;
    assert_eq!(status, 301);
    assert_eq!(loc, "/uk/?post_type=contact");

    let (status, loc) = location(&client, &base, "/ru/pro-nas?utm_source=old").await;
    assert_eq!(status, 301);
    assert_eq!(loc, "/uk/pro-nas?utm_source=old");

    shutdown.trigger();
}

#[tokio::test]
async fn test_prefixed_paths_pass_through_to_origin() {
    let origin = common::start_mock_origin().await;
    let (addr, shutdown) = common::spawn_gateway(common::fixture_config(origin)).await;
    let client = common::test_client();

    let res = client
        .get(format!("http://{addr}/en/about"))
        .send()
        .await
        .expect("gateway unreachable");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "origin:/en/about");

    // root with an unrelated query is not a legacy URL either
    let res = client
        .get(format!("http://{addr}/?utm_source=x"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "origin:/?utm_source=x");

    shutdown.trigger();
}

#[tokio::test]
async fn test_disabled_redirects_forward_everything() {
    let origin = common::start_mock_origin().await;
    let mut config = common::fixture_config(origin);
    config.redirects.enabled = false;
    let (addr, shutdown) = common::spawn_gateway(config).await;
    let client = common::test_client();

    let res = client
        .get(format!("http://{addr}/about"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "origin:/about");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_origin_is_bad_gateway() {
    // bind-then-drop to get an address nothing listens on
    let dead = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();
    let (addr, shutdown) = common::spawn_gateway(common::fixture_config(dead)).await;
    let client = common::test_client();

    let res = client
        .get(format!("http://{addr}/en/about"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    shutdown.trigger();
}
