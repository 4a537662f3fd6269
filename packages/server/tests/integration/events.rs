use serde_json::{Value, json};

use crate::common::TestApp;

const CREATE_EVENT: &str = "mutation($title: String!, $start: String!, $end: String!, $trackId: Long!, $memberId: Long!) {
    createEvent(title: $title, startDate: $start, endDate: $end, trackId: $trackId,
                organizer: \"Club\", price: 120.5, memberId: $memberId) {
        id title startDate endDate price track { id name } createdBy { id }
    }
}";

async fn create_event(
    app: &TestApp,
    token: &str,
    title: &str,
    start: &str,
    end: &str,
    track_id: i64,
    member_id: i64,
) -> Value {
    app.graphql(
        token,
        CREATE_EVENT,
        json!({"title": title, "start": start, "end": end, "trackId": track_id, "memberId": member_id}),
    )
    .await
    .body
}

mod create {
    use super::*;

    #[tokio::test]
    async fn event_is_created_with_its_track_and_author() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        let track_id = app.create_track(&token, "Magny-Cours").await;

        let body = create_event(
            &app,
            &token,
            "Spring track day",
            "2024-04-13T08:00:00",
            "2024-04-13T18:00:00",
            track_id,
            admin_id,
        )
        .await;

        let event = &body["data"]["createEvent"];
        assert_eq!(event["title"], "Spring track day");
        assert_eq!(event["startDate"], "2024-04-13 08:00:00");
        assert_eq!(event["price"], 120.5);
        assert_eq!(event["track"]["name"], "Magny-Cours");
        assert_eq!(event["createdBy"]["id"], admin_id);
    }

    #[tokio::test]
    async fn created_event_reads_back_unchanged() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        let track_id = app.create_track(&token, "Le Mans Bugatti").await;
        let fields = "id title description startDate endDate organizer price
                      track { id } createdOn createdBy { id }";

        let created = app
            .graphql(
                &token,
                &format!(
                    "mutation($trackId: Long!, $memberId: Long!) {{
                        createEvent(title: \"Trackday\", description: \"Two groups\",
                                    startDate: \"2024-06-08T08:30:00\", endDate: \"2024-06-09T17:45:00\",
                                    trackId: $trackId, organizer: \"Moto Club\", price: 249.99,
                                    memberId: $memberId) {{ {fields} }}
                    }}"
                ),
                json!({"trackId": track_id, "memberId": admin_id}),
            )
            .await;
        let created = &created.body["data"]["createEvent"];
        let id = created["id"].as_i64().expect("created event should have an id");
        assert!(created["createdOn"].is_string());

        let fetched = app
            .graphql(
                &token,
                &format!("query($id: Long!) {{ getEventById(id: $id) {{ {fields} }} }}"),
                json!({"id": id}),
            )
            .await;
        let fetched = &fetched.body["data"]["getEventById"];

        assert_eq!(fetched, created);
        assert_eq!(fetched["title"], "Trackday");
        assert_eq!(fetched["description"], "Two groups");
        assert_eq!(fetched["startDate"], "2024-06-08 08:30:00");
        assert_eq!(fetched["endDate"], "2024-06-09 17:45:00");
        assert_eq!(fetched["organizer"], "Moto Club");
        assert_eq!(fetched["price"], 249.99);
        assert_eq!(fetched["track"]["id"], track_id);
        assert_eq!(fetched["createdBy"]["id"], admin_id);
    }

    #[tokio::test]
    async fn invalid_date_is_reported() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;

        let res = app
            .graphql(
                &token,
                CREATE_EVENT,
                json!({"title": "Bad", "start": "13/04/2024", "end": "2024-04-13T18:00:00",
                       "trackId": 999, "memberId": admin_id}),
            )
            .await;

        assert_eq!(res.error_code(), Some("invalid_date"));
    }

    #[tokio::test]
    async fn end_before_start_is_rejected() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        let track_id = app.create_track(&token, "Ledenon").await;

        let res = app
            .graphql(
                &token,
                CREATE_EVENT,
                json!({"title": "Backwards", "start": "2024-04-13T18:00:00", "end": "2024-04-13T08:00:00",
                       "trackId": track_id, "memberId": admin_id}),
            )
            .await;

        assert_eq!(res.error_code(), Some("event_end_before_start"));
    }

    #[tokio::test]
    async fn unknown_track_is_reported() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;

        let res = app
            .graphql(
                &token,
                CREATE_EVENT,
                json!({"title": "Nowhere", "start": "2024-04-13T08:00:00", "end": "2024-04-13T18:00:00",
                       "trackId": 4242, "memberId": admin_id}),
            )
            .await;

        assert_eq!(res.error_code(), Some("track_not_found"));
    }
}

mod calendar {
    use super::*;

    #[tokio::test]
    async fn events_are_selected_by_year_month_and_day() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        let track_id = app.create_track(&token, "Nogaro").await;

        for (title, start) in [
            ("New year", "2024-01-01T00:00:00"),
            ("Summer", "2024-07-14T09:00:00"),
            ("Summer late", "2024-07-31T23:59:59"),
            ("Next year", "2025-01-01T00:00:00"),
        ] {
            create_event(&app, &token, title, start, "2025-12-31T00:00:00", track_id, admin_id)
                .await;
        }

        let res = app
            .graphql(&token, "{ getEventsByYear(year: 2024) { title } }", json!({}))
            .await;
        let titles: Vec<&str> = res.body["data"]["getEventsByYear"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["New year", "Summer", "Summer late"]);

        let res = app
            .graphql(
                &token,
                "{ getEventsByMonthAndYear(month: 7, year: 2024) { title } }",
                json!({}),
            )
            .await;
        assert_eq!(
            res.body["data"]["getEventsByMonthAndYear"]
                .as_array()
                .unwrap()
                .len(),
            2
        );

        let res = app
            .graphql(
                &token,
                "{ getEventsByDayAndMonthAndYear(day: 14, month: 7, year: 2024) { title } }",
                json!({}),
            )
            .await;
        assert_eq!(
            res.body["data"]["getEventsByDayAndMonthAndYear"],
            json!([{"title": "Summer"}])
        );
    }

    #[tokio::test]
    async fn dates_outside_the_calendar_select_nothing() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        let track_id = app.create_track(&token, "Nogaro").await;
        create_event(&app, &token, "Leap day", "2024-02-29T09:00:00", "2024-02-29T18:00:00", track_id, admin_id).await;

        for (field, query) in [
            ("getEventsByYear", "{ getEventsByYear(year: 300000) { id } }"),
            ("getEventsByYear", "{ getEventsByYear(year: 2147483647) { id } }"),
            ("getEventsByMonthAndYear", "{ getEventsByMonthAndYear(month: 13, year: 2024) { id } }"),
            ("getEventsByMonthAndYear", "{ getEventsByMonthAndYear(month: 0, year: 2024) { id } }"),
            ("getEventsByDayAndMonthAndYear", "{ getEventsByDayAndMonthAndYear(day: 30, month: 2, year: 2024) { id } }"),
            ("getEventsByDayAndMonthAndYear", "{ getEventsByDayAndMonthAndYear(day: -1, month: 2, year: 2024) { id } }"),
        ] {
            let res = app.graphql(&token, query, json!({})).await;
            assert!(res.body["errors"].is_null(), "{query}: {}", res.text);
            assert_eq!(res.body["data"][field], json!([]), "{query}");
        }

        let res = app
            .graphql(
                &token,
                "{ getEventsByDayAndMonthAndYear(day: 29, month: 2, year: 2024) { title } }",
                json!({}),
            )
            .await;
        assert_eq!(
            res.body["data"]["getEventsByDayAndMonthAndYear"],
            json!([{"title": "Leap day"}])
        );
    }

    #[tokio::test]
    async fn title_search_is_case_insensitive() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        let track_id = app.create_track(&token, "Nogaro").await;
        create_event(&app, &token, "Night Session", "2024-05-01T20:00:00", "2024-05-01T23:00:00", track_id, admin_id).await;
        create_event(&app, &token, "Morning run", "2024-05-02T08:00:00", "2024-05-02T11:00:00", track_id, admin_id).await;

        let res = app
            .graphql(&token, "{ getEventsByTitle(title: \"night\") { title } }", json!({}))
            .await;

        assert_eq!(
            res.body["data"]["getEventsByTitle"],
            json!([{"title": "Night Session"}])
        );
    }

    #[tokio::test]
    async fn unknown_event_is_reported() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;

        let res = app
            .graphql(&token, "{ getEventById(id: 77) { id } }", json!({}))
            .await;

        assert_eq!(res.error_code(), Some("event_not_found"));
    }
}

mod participants {
    use super::*;

    const ADD: &str = "mutation($eventId: Long!, $memberId: Long!) {
        addEventParticipant(eventId: $eventId, memberId: $memberId) { participants { member { id } } }
    }";
    const REMOVE: &str = "mutation($eventId: Long!, $memberId: Long!) {
        removeEventParticipant(eventId: $eventId, memberId: $memberId) { participants { member { id } } }
    }";

    #[tokio::test]
    async fn member_joins_and_leaves_an_event() {
        let app = TestApp::spawn().await;
        let (admin_id, admin_token) = app.admin().await;
        let (member_id, token) = app
            .member_with_role("rider@paddock.test", paddock_server::entity::role::Role::Member)
            .await;
        let track_id = app.create_track(&admin_token, "Croix").await;
        let body = create_event(&app, &admin_token, "Club day", "2024-06-01T08:00:00", "2024-06-01T18:00:00", track_id, admin_id).await;
        let event_id = body["data"]["createEvent"]["id"].as_i64().unwrap();
        let vars = json!({"eventId": event_id, "memberId": member_id});

        let res = app.graphql(&token, ADD, vars.clone()).await;
        assert_eq!(
            res.body["data"]["addEventParticipant"]["participants"],
            json!([{"member": {"id": member_id}}])
        );

        let again = app.graphql(&token, ADD, vars.clone()).await;
        assert_eq!(again.error_code(), Some("member_already_participant"));

        let res = app.graphql(&token, REMOVE, vars.clone()).await;
        assert_eq!(
            res.body["data"]["removeEventParticipant"]["participants"],
            json!([])
        );

        let again = app.graphql(&token, REMOVE, vars).await;
        assert_eq!(again.error_code(), Some("member_not_participant"));
    }

    #[tokio::test]
    async fn deleting_an_event_drops_its_participations() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        let track_id = app.create_track(&token, "Croix").await;
        let body = create_event(&app, &token, "Club day", "2024-06-01T08:00:00", "2024-06-01T18:00:00", track_id, admin_id).await;
        let event_id = body["data"]["createEvent"]["id"].as_i64().unwrap();
        app.graphql(&token, ADD, json!({"eventId": event_id, "memberId": admin_id}))
            .await;

        let res = app
            .graphql(
                &token,
                "mutation($id: Long!) { deleteEvent(eventId: $id) { id } }",
                json!({ "id": event_id }),
            )
            .await;
        assert_eq!(res.data_id("deleteEvent"), event_id);

        let res = app
            .graphql(
                &token,
                "query($id: Long!) { getMemberById(id: $id) { eventMembers { id } } }",
                json!({ "id": admin_id }),
            )
            .await;
        assert_eq!(res.body["data"]["getMemberById"]["eventMembers"], json!([]));
    }
}
