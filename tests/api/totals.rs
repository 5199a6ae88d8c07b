use crate::helpers::{add_entry, add_member, get_json_response_body, TestApp};

use club_logbook::{
    routes::TotalsResponse,
    services::data_stores::HashmapLogbookStore,
};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_empty_totals_without_members(app: &mut TestApp) {
    let response = app.get_totals().await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body, json!({"totals": []}));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_sort_members_by_duty_ratio(app: &mut TestApp) {
    let a = add_member(app, "A").await;
    let b = add_member(app, "B").await;
    let c = add_member(app, "C").await;

    add_entry(app, a, "ood", "2024-04-01").await;
    add_entry(app, a, "safety", "2024-04-02").await;
    add_entry(app, b, "race", "2024-04-03").await;

    let response = app.get_totals().await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(
        body,
        json!({
            "totals": [
                {
                    "memberId": b,
                    "memberName": "B",
                    "counts": {"ood": 0, "race": 1, "safety": 0},
                    "dutyRatio": 0.0
                },
                {
                    "memberId": a,
                    "memberName": "A",
                    "counts": {"ood": 1, "race": 0, "safety": 1},
                    "dutyRatio": 100.0
                },
                {
                    "memberId": c,
                    "memberName": "C",
                    "counts": {"ood": 0, "race": 0, "safety": 0},
                    "dutyRatio": 100.0
                }
            ]
        })
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_compute_fractional_ratios(app: &mut TestApp) {
    let peter = add_member(app, "Peter").await;

    add_entry(app, peter, "ood", "2024-04-01").await;
    add_entry(app, peter, "race", "2024-04-02").await;
    add_entry(app, peter, "race", "2024-04-03").await;

    let response = app.get_totals().await;
    let totals = response
        .json::<TotalsResponse>()
        .await
        .expect("Could not deserialise response body to TotalsResponse")
        .totals;

    assert_eq!(totals.len(), 1);
    assert!((totals[0].duty_ratio - 100.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn should_return_500_if_ratio_activity_missing() {
    let app = TestApp::with_store(HashmapLogbookStore::with_activities(&[
        "race", "ood",
    ]))
    .await;
    add_member(&app, "Simon").await;

    let response = app.get_totals().await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        get_json_response_body(response).await,
        json!({"error": "Unexpected error"})
    );
}
