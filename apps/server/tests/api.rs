use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use saver_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

struct TestApp {
    _dir: TempDir,
    router: Router,
}

impl TestApp {
    async fn spawn() -> Self {
        let dir = tempdir().unwrap();
        let config = Config::with_db_path(dir.path().join("test.db").to_string_lossy());
        let state = build_state(&config).await.unwrap();
        TestApp {
            _dir: dir,
            router: app_router(state, &config),
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create_goal(&self, user_id: i32, name: &str, target: f64) -> i64 {
        let (status, goal) = self
            .send(
                "POST",
                &format!("/api/users/{}/goals", user_id),
                Some(json!({ "name": name, "description": null, "target": target })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        goal["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn healthz_works() {
    let app = TestApp::spawn().await;
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn goal_lifecycle_is_scoped_to_owner() {
    let app = TestApp::spawn().await;
    let id = app.create_goal(78, "Holiday", 100.0).await;
    app.create_goal(12, "House", 540.0).await;

    let (status, goals) = app.send("GET", "/api/users/78/goals", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(goals.as_array().unwrap().len(), 1);
    assert_eq!(goals[0]["status"], "OPEN");

    let (_, all) = app.send("GET", "/api/goals", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, _) = app.send("GET", &format!("/api/users/12/goals/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, updated) = app
        .send(
            "PUT",
            &format!("/api/users/78/goals/{}", id),
            Some(json!({
                "name": "Summer holiday",
                "description": "Spain",
                "status": "COMPLETE",
                "isDefault": true
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Summer holiday");
    assert_eq!(updated["target"], 100.0);

    let (status, _) = app
        .send("DELETE", &format!("/api/users/78/goals/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = app.send("GET", &format!("/api/users/78/goals/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn goal_with_non_positive_target_is_rejected() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .send(
            "POST",
            "/api/users/1/goals",
            Some(json!({ "name": "Nothing", "description": null, "target": 0.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("target"));
}

#[tokio::test]
async fn deposits_settle_generated_milestones() {
    let app = TestApp::spawn().await;
    let id = app.create_goal(78, "Holiday", 100.0).await;
    let milestones_uri = format!("/api/users/78/goals/{}/milestones", id);

    let (status, generated) = app.send("PATCH", &milestones_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let targets: Vec<f64> = generated
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["target"].as_f64().unwrap())
        .collect();
    assert_eq!(targets, vec![20.0, 40.0, 60.0, 80.0, 100.0]);

    let (status, _) = app.send("PATCH", &milestones_uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send("PUT", &format!("/api/users/78/goals/{}/deposits?amount=45", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, balance) = app
        .send("GET", &format!("/api/users/78/goals/{}/balance", id), None)
        .await;
    assert_eq!(balance["balance"], 45.0);

    let (_, milestones) = app.send("GET", &milestones_uri, None).await;
    let milestones = milestones.as_array().unwrap().clone();
    let met: Vec<f64> = milestones
        .iter()
        .filter(|m| !m["dateMet"].is_null())
        .map(|m| m["target"].as_f64().unwrap())
        .collect();
    assert_eq!(met, vec![20.0, 40.0]);

    let met_id = milestones[0]["id"].as_i64().unwrap();
    let (status, _) = app
        .send("DELETE", &format!("{}/{}", milestones_uri, met_id), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let pending_id = milestones[4]["id"].as_i64().unwrap();
    let (status, updated) = app
        .send(
            "PUT",
            &format!("{}/{}", milestones_uri, pending_id),
            Some(json!({ "target": 90.0, "description": "Nearly there" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["target"], 90.0);

    let (status, _) = app
        .send(
            "PUT",
            &format!("{}/{}", milestones_uri, pending_id),
            Some(json!({ "target": 1000000.0, "description": null })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, settled) = app
        .send("POST", &format!("/api/users/78/goals/{}/settlement", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(settled.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn milestone_of_another_goal_is_not_found() {
    let app = TestApp::spawn().await;
    let a = app.create_goal(5, "A", 100.0).await;
    let b = app.create_goal(5, "B", 100.0).await;
    let (_, milestone) = app
        .send(
            "POST",
            &format!("/api/users/5/goals/{}/milestones", a),
            Some(json!({ "target": 50.0, "description": null })),
        )
        .await;
    let milestone_id = milestone["id"].as_i64().unwrap();

    let (status, _) = app
        .send(
            "DELETE",
            &format!("/api/users/5/goals/{}/milestones/{}", b, milestone_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, fetched) = app
        .send("GET", &format!("/api/milestones/{}", milestone_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["target"], 50.0);
}

#[tokio::test]
async fn transaction_errors_map_to_statuses() {
    let app = TestApp::spawn().await;
    let id = app.create_goal(78, "Holiday", 100.0).await;

    let (status, _) = app
        .send("PUT", &format!("/api/users/78/goals/{}/withdrawals", id), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send("PUT", &format!("/api/users/78/goals/{}/withdrawals?amount=5", id), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    for route in ["deposits", "withdrawals"] {
        let (status, _) = app
            .send(
                "PUT",
                &format!("/api/users/78/goals/{}/{}?amount=inf", id, route),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = app
        .send("PUT", &format!("/api/users/12/goals/{}/deposits?amount=5", id), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            "POST",
            &format!("/api/users/78/goals/{}/transactions", id),
            Some(Value::Null),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.send("POST", "/api/transactions/1/reversal", None).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["code"], 501);
}

#[tokio::test]
async fn transfers_and_user_history() {
    let app = TestApp::spawn().await;
    let a = app.create_goal(7, "A", 100.0).await;
    let b = app.create_goal(7, "B", 100.0).await;

    app.send("PUT", &format!("/api/users/7/goals/{}/deposits?amount=60", a), None)
        .await;
    let (status, transfer) = app
        .send(
            "POST",
            &format!("/api/users/7/goals/{}/transactions", b),
            Some(json!({ "amount": 25.0, "sourceGoalId": a })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(transfer["sourceGoalId"], a);
    assert_eq!(transfer["targetGoalId"], b);

    let (status, _) = app
        .send(
            "POST",
            "/api/users/7/transactions",
            Some(json!({ "amount": 10.0, "sourceGoalId": b })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, balance_a) = app
        .send("GET", &format!("/api/users/7/goals/{}/balance", a), None)
        .await;
    let (_, balance_b) = app
        .send("GET", &format!("/api/users/7/goals/{}/balance", b), None)
        .await;
    assert_eq!(balance_a["balance"], 35.0);
    assert_eq!(balance_b["balance"], 15.0);

    let (_, history) = app.send("GET", "/api/users/7/transactions", None).await;
    assert_eq!(history.as_array().unwrap().len(), 3);
    let (_, goal_history) = app
        .send("GET", &format!("/api/users/7/goals/{}/transactions", b), None)
        .await;
    assert_eq!(goal_history.as_array().unwrap().len(), 2);
}
