// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal and weekly progress endpoint tests.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{body_json, empty_request, json_request};

async fn post(app: &axum::Router, token: &str, uri: &str, body: serde_json::Value) -> StatusCode {
    app.clone()
        .oneshot(json_request("POST", uri, token, body))
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_weekly_progress() {
    let (app, state) = common::create_test_app();
    let token = common::token_for(&state, "runner");

    assert_eq!(
        post(
            &app,
            &token,
            "/api/goals",
            json!({"targetDistance": 20, "weekStartDate": "2024-01-01"}),
        )
        .await,
        StatusCode::CREATED
    );

    for body in [
        json!({"date": "2024-01-01", "distance": 5, "duration": 30, "intensity": "medium"}),
        json!({"date": "2024-01-03", "distance": 3, "duration": 20, "intensity": "low"}),
        // Outside the goal week
        json!({"date": "2024-01-08", "distance": 10, "duration": 60, "intensity": "high"}),
    ] {
        assert_eq!(
            post(&app, &token, "/api/workouts", body).await,
            StatusCode::CREATED
        );
    }

    let response = app
        .oneshot(empty_request("GET", "/api/goals", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["goal"]["targetDistance"], 20.0);
    assert_eq!(body["goal"]["weekStartDate"], "2024-01-01T00:00:00Z");
    assert_eq!(body["weekEndDate"], "2024-01-08T00:00:00Z");
    assert_eq!(body["totalDistance"], 8.0);
    assert_eq!(body["totalCalories"], 450.0);
    assert_eq!(body["totalDuration"], 50);
    assert_eq!(body["totalWorkouts"], 2);
    assert_eq!(body["averagePace"], 6.25);
    assert_eq!(body["progress"], 40.0);
    assert_eq!(body["remainingDistance"], 12.0);
    assert_eq!(body["distanceByDay"], json!({"Mon": 5.0, "Wed": 3.0}));

    let daily = body["dailyDistances"].as_array().unwrap();
    assert_eq!(daily.len(), 7);
    assert_eq!(daily[0], json!({"day": "Mon", "distance": 5.0}));
    assert_eq!(daily[1], json!({"day": "Tue", "distance": 0.0}));
    assert_eq!(daily[6]["day"], "Sun");
}

#[tokio::test]
async fn test_progress_is_capped_at_100() {
    let (app, state) = common::create_test_app();
    let token = common::token_for(&state, "runner");

    post(
        &app,
        &token,
        "/api/goals",
        json!({"targetDistance": 5, "weekStartDate": "2024-01-01"}),
    )
    .await;
    post(
        &app,
        &token,
        "/api/workouts",
        json!({"date": "2024-01-02", "distance": 12, "duration": 70}),
    )
    .await;

    let response = app
        .oneshot(empty_request("GET", "/api/goals", &token))
        .await
        .unwrap();
    let body = body_json(response).await;

    assert_eq!(body["progress"], 100.0);
    assert_eq!(body["remainingDistance"], 0.0);
    assert_eq!(body["totalDistance"], 12.0);
}

#[tokio::test]
async fn test_duplicate_goal_for_same_week() {
    let (app, state) = common::create_test_app();
    let token = common::token_for(&state, "runner");

    assert_eq!(
        post(
            &app,
            &token,
            "/api/goals",
            json!({"targetDistance": 20, "weekStartDate": "2024-01-01"}),
        )
        .await,
        StatusCode::CREATED
    );

    // Same calendar day, different time of day
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/goals",
            &token,
            json!({"targetDistance": 25, "weekStartDate": "2024-01-01T15:30:00Z"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "duplicate_goal");

    // Another user may use the same week
    let other = common::token_for(&state, "other");
    assert_eq!(
        post(
            &app,
            &other,
            "/api/goals",
            json!({"targetDistance": 10, "weekStartDate": "2024-01-01"}),
        )
        .await,
        StatusCode::CREATED
    );
}

#[tokio::test]
async fn test_current_goal_is_latest_week() {
    let (app, state) = common::create_test_app();
    let token = common::token_for(&state, "runner");

    post(
        &app,
        &token,
        "/api/goals",
        json!({"targetDistance": 30, "weekStartDate": "2024-01-08"}),
    )
    .await;
    post(
        &app,
        &token,
        "/api/goals",
        json!({"targetDistance": 20, "weekStartDate": "2024-01-01"}),
    )
    .await;

    let response = app
        .oneshot(empty_request("GET", "/api/goals", &token))
        .await
        .unwrap();
    let body = body_json(response).await;

    assert_eq!(body["goal"]["weekStartDate"], "2024-01-08T00:00:00Z");
    assert_eq!(body["goal"]["targetDistance"], 30.0);
}

#[tokio::test]
async fn test_no_goal_is_not_found() {
    let (app, state) = common::create_test_app();
    let token = common::token_for(&state, "runner");

    let response = app
        .oneshot(empty_request("GET", "/api/goals", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn test_create_goal_validation() {
    let (app, state) = common::create_test_app();
    let token = common::token_for(&state, "runner");

    for body in [
        json!({"weekStartDate": "2024-01-01"}),
        json!({"targetDistance": 0, "weekStartDate": "2024-01-01"}),
        json!({"targetDistance": -3, "weekStartDate": "2024-01-01"}),
        json!({"targetDistance": 20}),
        json!({"targetDistance": 20, "weekStartDate": "last monday"}),
    ] {
        assert_eq!(
            post(&app, &token, "/api/goals", body.clone()).await,
            StatusCode::BAD_REQUEST,
            "expected 400 for {}",
            body
        );
    }
}
