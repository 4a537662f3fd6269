use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn track_is_created_updated_and_listed() {
    let app = TestApp::spawn().await;
    let (_, token) = app.admin().await;

    let res = app
        .graphql(
            &token,
            "mutation {
                createTrack(name: \"Circuit Paul Ricard\", distance: 5842, lapRecord: 92740,
                            website: \"https://circuitpaulricard.com\",
                            latitude: 43.2506, longitude: 5.7917) { id name latitude }
            }",
            json!({}),
        )
        .await;
    let id = res.data_id("createTrack");
    assert_eq!(res.body["data"]["createTrack"]["latitude"], 43.2506);

    let res = app
        .graphql(
            &token,
            "mutation($id: Long!) {
                updateTrack(trackId: $id, name: \"Paul Ricard\", distance: 5842, lapRecord: 91000) {
                    name lapRecord website
                }
            }",
            json!({ "id": id }),
        )
        .await;
    assert_eq!(
        res.body["data"]["updateTrack"],
        json!({"name": "Paul Ricard", "lapRecord": 91000, "website": null})
    );

    let res = app
        .graphql(&token, "{ getAllTracks { name } }", json!({}))
        .await;
    assert_eq!(res.body["data"]["getAllTracks"], json!([{"name": "Paul Ricard"}]));
}

#[tokio::test]
async fn unknown_track_is_reported() {
    let app = TestApp::spawn().await;
    let (_, token) = app.admin().await;

    let res = app
        .graphql(&token, "{ getTrackById(id: 31) { id } }", json!({}))
        .await;
    assert_eq!(res.error_code(), Some("track_not_found"));

    let res = app
        .graphql(
            &token,
            "mutation { updateTrack(trackId: 31, name: \"x\", distance: 1, lapRecord: 1) { id } }",
            json!({}),
        )
        .await;
    assert_eq!(res.error_code(), Some("track_not_found"));
}

#[tokio::test]
async fn deleting_a_track_keeps_its_events_and_drops_its_lap_records() {
    let app = TestApp::spawn().await;
    let (admin_id, token) = app.admin().await;
    let track_id = app.create_track(&token, "Mugello").await;

    let res = app
        .graphql(
            &token,
            "mutation($t: Long!, $m: Long!) {
                createEvent(title: \"Italian day\", startDate: \"2024-05-30T08:00:00\",
                            endDate: \"2024-05-30T18:00:00\", trackId: $t, memberId: $m) { id }
            }",
            json!({"t": track_id, "m": admin_id}),
        )
        .await;
    let event_id = res.data_id("createEvent");
    app.graphql(
        &token,
        "mutation($t: Long!, $m: Long!) {
            createLapRecord(memberId: $m, trackId: $t, recordDate: \"2024-05-30T10:00:00\",
                            lapTime: 106000, conditions: \"Dry\") { id }
        }",
        json!({"t": track_id, "m": admin_id}),
    )
    .await;

    let res = app
        .graphql(
            &token,
            "mutation($id: Long!) { deleteTrack(trackId: $id) { name } }",
            json!({ "id": track_id }),
        )
        .await;
    assert_eq!(res.body["data"]["deleteTrack"]["name"], "Mugello", "{}", res.text);

    let res = app
        .graphql(
            &token,
            "query($id: Long!) { getEventById(id: $id) { title track { id } } }",
            json!({ "id": event_id }),
        )
        .await;
    assert_eq!(
        res.body["data"]["getEventById"],
        json!({"title": "Italian day", "track": null})
    );

    let res = app
        .graphql(
            &token,
            "query($m: Long!) { getMemberLapRecords(memberId: $m) { id } }",
            json!({ "m": admin_id }),
        )
        .await;
    assert_eq!(res.body["data"]["getMemberLapRecords"], json!([]));
}
