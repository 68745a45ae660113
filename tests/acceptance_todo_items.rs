mod common;

use common::{app, call, pool};
use serde_json::json;
use todolist_api::{build_app, config::Environment};

#[tokio::test]
async fn acceptance_create_list_get_update_complete_delete() {
    let app = app().await;
    let (_, category) = call(&app, "POST", "/api/categories", Some(json!({ "name": "Work" }))).await;
    let category_id = category["data"]["id"].as_i64().unwrap();

    // create; caller-supplied completion and timestamp are ignored
    let payload = json!({
        "title": "Report",
        "description": "Quarterly",
        "dueDate": "2030-01-01T09:00:00Z",
        "categoryId": category_id,
        "isCompleted": true,
        "createdAt": "2000-01-01T00:00:00Z"
    });
    let (status, body) = call(&app, "POST", "/api/todoitems", Some(payload)).await;
    assert_eq!(status, 200);
    let created = body["data"].clone();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["isCompleted"], false);
    assert_ne!(created["createdAt"], "2000-01-01T00:00:00Z");
    assert_eq!(created["categoryName"], "Work");

    // get round-trips the input
    let (status, body) = call(&app, "GET", &format!("/api/todoitems/{id}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], created);
    assert_eq!(body["data"]["title"], "Report");
    assert_eq!(body["data"]["description"], "Quarterly");
    assert_eq!(body["data"]["dueDate"], "2030-01-01T09:00:00Z");

    // list
    let (status, body) = call(&app, "GET", "/api/todoitems", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["totalCount"], 1);

    // update wholesale
    let update = json!({ "title": "Report v2", "description": "", "isCompleted": false });
    let (status, body) = call(&app, "PUT", &format!("/api/todoitems/{id}"), Some(update)).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Report v2");
    assert_eq!(body["data"]["categoryId"], serde_json::Value::Null);
    assert_eq!(body["data"]["dueDate"], serde_json::Value::Null);
    assert_eq!(body["data"]["createdAt"], created["createdAt"]);

    // complete twice
    for _ in 0..2 {
        let (status, body) = call(&app, "PATCH", &format!("/api/todoitems/{id}/complete"), None).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["isCompleted"], true);
    }

    // delete
    let (status, body) = call(&app, "DELETE", &format!("/api/todoitems/{id}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], true);

    // 404s
    for (method, path) in [
        ("GET", format!("/api/todoitems/{id}")),
        ("DELETE", format!("/api/todoitems/{id}")),
        ("PATCH", format!("/api/todoitems/{id}/complete")),
    ] {
        let (status, body) = call(&app, method, &path, None).await;
        assert_eq!(status, 404, "{method} {path}");
        assert_eq!(body["success"], false);
    }
    let (status, _) = call(&app, "PUT", &format!("/api/todoitems/{id}"), Some(json!({ "title": "x" }))).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn unknown_category_is_a_bad_request_and_nothing_is_stored() {
    let app = app().await;
    let (status, body) = call(&app, "POST", "/api/todoitems", Some(json!({ "title": "Orphan", "categoryId": 99 }))).await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], serde_json::Value::Null);

    let (_, body) = call(&app, "GET", "/api/todoitems", None).await;
    assert_eq!(body["totalCount"], 0);
}

#[tokio::test]
async fn list_filters_combine() {
    let app = app().await;
    let (_, one) = call(&app, "POST", "/api/categories", Some(json!({ "name": "One" }))).await;
    let (_, two) = call(&app, "POST", "/api/categories", Some(json!({ "name": "Two" }))).await;
    let (one, two) = (one["data"]["id"].as_i64().unwrap(), two["data"]["id"].as_i64().unwrap());

    let (_, a) = call(&app, "POST", "/api/todoitems", Some(json!({ "title": "A", "categoryId": one }))).await;
    let (_, b) = call(&app, "POST", "/api/todoitems", Some(json!({ "title": "B", "description": "Buy milk", "categoryId": one }))).await;
    call(&app, "POST", "/api/todoitems", Some(json!({ "title": "C", "categoryId": two, "dueDate": "2030-05-05T00:00:00Z" }))).await;
    let a_id = a["data"]["id"].as_i64().unwrap();
    call(&app, "PATCH", &format!("/api/todoitems/{a_id}/complete"), None).await;

    let (status, body) = call(&app, "GET", &format!("/api/todoitems?isCompleted=false&categoryId={one}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["data"][0]["id"], b["data"]["id"]);

    let (_, body) = call(&app, "GET", "/api/todoitems?searchTerm=MILK", None).await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["data"][0]["title"], "B");

    let (_, body) = call(&app, "GET", "/api/todoitems?dueDateFrom=2030-05-05T00:00:00Z&dueDateTo=2030-05-06T00:00:00Z", None).await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["data"][0]["title"], "C");

    let (status, _) = call(&app, "GET", "/api/todoitems?isCompleted=perhaps", None).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn stats_endpoints_report_rates() {
    let app = app().await;

    let (_, body) = call(&app, "GET", "/api/todoitems/stats", None).await;
    assert_eq!(body["data"]["completionRate"], 0.0);

    let mut ids = Vec::new();
    for title in ["a", "b", "c", "d"] {
        let (_, body) = call(&app, "POST", "/api/todoitems", Some(json!({ "title": title }))).await;
        ids.push(body["data"]["id"].as_i64().unwrap());
    }
    call(&app, "PATCH", &format!("/api/todoitems/{}/complete", ids[0]), None).await;
    call(&app, "PUT", &format!("/api/todoitems/{}", ids[1]), Some(json!({ "title": "b", "dueDate": "2001-01-01T00:00:00Z" }))).await;

    let (status, body) = call(&app, "GET", "/api/todoitems/stats", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["totalTasks"], 4);
    assert_eq!(body["data"]["completionRate"], 25.0);
    assert_eq!(body["data"]["overdueTasks"], 1);
    assert_eq!(body["data"]["tasksByCategory"][0]["category"], "Uncategorized");
    assert_eq!(body["data"]["tasksByCategory"][0]["count"], 4);

    let (status, body) = call(&app, "GET", "/api/stats", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["todoStats"]["totalTasks"], 4);
    assert_eq!(body["data"]["categoryStats"]["totalCategories"], 0);
}

#[tokio::test]
async fn store_failures_become_500_with_details_only_in_development() {
    for (environment, expect_details) in [(Environment::Development, true), (Environment::Production, false)] {
        let pool = pool().await;
        sqlx::query("DROP TABLE todo_items").execute(&pool).await.unwrap();
        let app = build_app(pool, environment);

        let res = common::request(&app, "GET", "/api/todoitems", None).await;
        assert_eq!(res.status(), 500);
        assert!(res.headers().contains_key("x-error-id"));
        let body = common::body_json(res).await;
        assert_eq!(body["success"], false);
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(!errors.is_empty(), expect_details);
    }
}
