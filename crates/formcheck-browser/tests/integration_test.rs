use formcheck_browser::{wait_until_clickable, BrowserActions, BrowserEngine, BrowserError, Locator};
use formcheck_core::BrowserConfig;
use std::time::Duration;

const FORM_PAGE: &str = "data:text/html,\
<input id='userName' value='Mr ' oninput='document.getElementById(\"echo\").textContent=this.value'>\
<span id='echo'></span>\
<button id='go' disabled>Go</button>\
<div id='output'><p id='name'>Name:Jane</p></div>\
<p id='name'>outside</p>\
<script>setTimeout(() => document.getElementById('go').disabled = false, 300)</script>";

async fn engine() -> BrowserEngine {
    BrowserEngine::launch(&BrowserConfig::default(), None)
        .await
        .expect("launch browser")
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_browser_engine_creation() {
    let mut engine = engine().await;
    assert!(engine.close().await.is_ok());
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_type_appends_to_prefilled_input() {
    let mut engine = engine().await;
    engine.navigate(FORM_PAGE).await.unwrap();

    let input = Locator::id("userName");
    engine.type_text(&input, "Smith").await.unwrap();

    let echoed = engine.text(&Locator::id("echo")).await.unwrap();
    assert_eq!(echoed, "Mr Smith");

    engine.close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_text_within_scopes_to_container() {
    let mut engine = engine().await;
    engine.navigate(FORM_PAGE).await.unwrap();

    let text = engine
        .text_within(&Locator::id("output"), &Locator::id("name"))
        .await
        .unwrap();
    assert_eq!(text, "Name:Jane");

    let err = engine
        .text_within(&Locator::id("missing"), &Locator::id("name"))
        .await
        .unwrap_err();
    assert!(err.is_locate_error());

    engine.close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_wait_for_enabled_button() {
    let mut engine = engine().await;
    engine.navigate(FORM_PAGE).await.unwrap();

    let button = Locator::id("go");
    wait_until_clickable(
        &engine,
        &button,
        Duration::from_secs(5),
        Duration::from_millis(50),
    )
    .await
    .expect("button is enabled after the timer fires");
    engine.click(&button).await.unwrap();

    let err = wait_until_clickable(
        &engine,
        &Locator::id("never"),
        Duration::from_millis(200),
        Duration::from_millis(50),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, BrowserError::WaitExpired { .. }));

    engine.close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_close_twice_is_an_error() {
    let mut engine = engine().await;
    engine.close().await.unwrap();
    assert!(matches!(
        engine.close().await,
        Err(BrowserError::SessionClosed)
    ));
    assert!(matches!(
        engine.navigate("https://example.com").await,
        Err(BrowserError::SessionClosed)
    ));
}
