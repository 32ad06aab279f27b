// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the SMS provider client using wiremock.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, header};
use switchhub::{
    AppState, BroadcastHub, MutationGateway, SmsConfig, SmsError, StateStore, build_router,
};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> switchhub::SmsClient {
    SmsConfig::new("sandbox", "test-key")
        .with_base_url(server.uri())
        .into_client()
        .unwrap()
}

#[tokio::test]
async fn send_posts_form_encoded_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/version1/messaging"))
        .and(header_matcher("apiKey", "test-key"))
        .and(header_matcher("Accept", "application/json"))
        .and(body_string_contains("username=sandbox"))
        .and(body_string_contains("to=%2B254700000001"))
        .and(body_string_contains("message=Device+has+been+turned+ON"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .send("+254700000001", "Device has been turned ON")
        .await
        .unwrap();
}

#[tokio::test]
async fn send_maps_provider_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/version1/messaging"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client_for(&server).send("+254700000001", "hello").await;
    assert!(matches!(
        result.unwrap_err(),
        SmsError::Rejected { status: 401 }
    ));
}

/// Full webhook path: an inbound command mutates state and triggers a
/// confirmation SMS to the sender.
#[tokio::test]
async fn webhook_sends_confirmation_through_provider() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/version1/messaging"))
        .and(body_string_contains("to=%2B254700000001"))
        .and(body_string_contains("message=Device+has+been+turned+ON"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(StateStore::new());
    let hub = BroadcastHub::new(Arc::clone(&store));
    let gateway = Arc::new(MutationGateway::new(store, hub));
    let app = build_router(
        AppState::new(Arc::clone(&gateway)).with_sms(Arc::new(client_for(&server))),
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sms/callback")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("text=ON&from=%2B254700000001"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert!(gateway.current().is_on());
}

/// A provider failure costs only the confirmation text; the webhook
/// still succeeds and the mutation sticks.
#[tokio::test]
async fn webhook_survives_provider_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/version1/messaging"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = Arc::new(StateStore::new());
    let hub = BroadcastHub::new(Arc::clone(&store));
    let gateway = Arc::new(MutationGateway::new(store, hub));
    let app = build_router(
        AppState::new(Arc::clone(&gateway)).with_sms(Arc::new(client_for(&server))),
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sms/callback")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("text=ON&from=%2B254700000001"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert!(gateway.current().is_on());
}
