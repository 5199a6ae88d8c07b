use crate::helpers::{add_entry, add_member, get_json_response_body, TestApp};

use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_entries_newest_first(app: &mut TestApp) {
    let simon = add_member(app, "Simon").await;
    let tom = add_member(app, "Tom").await;

    let first = add_entry(app, simon, "race", "2024-05-01").await;
    let second = add_entry(app, tom, "safety", "2024-05-20").await;
    let third = add_entry(app, simon, "ood", "2024-05-10").await;

    let response = app.get_all_entries().await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(
        body,
        json!({
            "memberName": "All members",
            "entries": [
                {
                    "id": second,
                    "memberId": tom,
                    "memberName": "Tom",
                    "activityId": 3,
                    "activityName": "safety",
                    "date": "2024-05-20"
                },
                {
                    "id": third,
                    "memberId": simon,
                    "memberName": "Simon",
                    "activityId": 2,
                    "activityName": "ood",
                    "date": "2024-05-10"
                },
                {
                    "id": first,
                    "memberId": simon,
                    "memberName": "Simon",
                    "activityId": 1,
                    "activityName": "race",
                    "date": "2024-05-01"
                }
            ]
        })
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_empty_list_without_entries(app: &mut TestApp) {
    let response = app.get_all_entries().await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body, json!({"memberName": "All members", "entries": []}));
}
