use serde_json::json;

use paddock_server::entity::role::Role;

use crate::common::TestApp;

/// Paged news query with the given inline arguments.
fn page(args: &str) -> String {
    let args = if args.is_empty() {
        String::new()
    } else {
        format!("({args})")
    };
    format!(
        "{{ getAllNewsFilteredPaginated{args} {{
            content {{ title }} totalElements totalPages pageNumber pageSize
        }} }}"
    )
}

async fn seed_news(app: &TestApp, token: &str, author: i64) {
    for (title, date) in [
        ("Season opener", "2024-03-01T09:00:00"),
        ("Winter works", "2024-01-15T09:00:00"),
        ("Season finale", "2024-10-20T09:00:00"),
    ] {
        app.create_news(token, title, date, author).await;
    }
}

fn titles(body: &serde_json::Value) -> Vec<&str> {
    body["data"]["getAllNewsFilteredPaginated"]["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect()
}

mod round_trip {
    use super::*;

    #[tokio::test]
    async fn created_news_reads_back_unchanged() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        let fields = "id title catchLine content newsDate createdOn createdBy { id }";

        let created = app
            .graphql(
                &token,
                &format!(
                    "mutation($memberId: Long!) {{
                        createNews(title: \"Calendar is out\", catchLine: \"Ten dates\",
                                   content: \"See the events tab.\", newsDate: \"2024-02-01T12:15:00\",
                                   memberId: $memberId) {{ {fields} }}
                    }}"
                ),
                json!({"memberId": admin_id}),
            )
            .await;
        let created = &created.body["data"]["createNews"];
        let id = created["id"].as_i64().expect("created news should have an id");
        assert!(created["createdOn"].is_string());

        let fetched = app
            .graphql(
                &token,
                &format!("query($id: Long!) {{ getNewsById(id: $id) {{ {fields} }} }}"),
                json!({"id": id}),
            )
            .await;
        let fetched = &fetched.body["data"]["getNewsById"];

        assert_eq!(fetched, created);
        assert_eq!(fetched["title"], "Calendar is out");
        assert_eq!(fetched["catchLine"], "Ten dates");
        assert_eq!(fetched["content"], "See the events tab.");
        assert_eq!(fetched["newsDate"], "2024-02-01 12:15:00");
        assert_eq!(fetched["createdBy"]["id"], admin_id);
    }

    #[tokio::test]
    async fn unknown_news_is_reported() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;

        let res = app
            .graphql(&token, "{ getNewsById(id: 404) { id } }", json!({}))
            .await;

        assert_eq!(res.error_code(), Some("news_not_found"));
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn all_news_are_most_recent_first() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        seed_news(&app, &token, admin_id).await;

        let res = app
            .graphql(&token, "{ getAllNews { title newsDate } }", json!({}))
            .await;

        assert_eq!(
            res.body["data"]["getAllNews"],
            json!([
                {"title": "Season finale", "newsDate": "2024-10-20 09:00:00"},
                {"title": "Season opener", "newsDate": "2024-03-01 09:00:00"},
                {"title": "Winter works", "newsDate": "2024-01-15 09:00:00"},
            ])
        );
    }

    #[tokio::test]
    async fn pages_default_to_newest_first() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        seed_news(&app, &token, admin_id).await;

        let res = app.graphql(&token, &page("pageSize: 2"), json!({})).await;

        let body = &res.body["data"]["getAllNewsFilteredPaginated"];
        assert_eq!(titles(&res.body), vec!["Season finale", "Season opener"]);
        assert_eq!(body["totalElements"], 3);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["pageNumber"], 0);
        assert_eq!(body["pageSize"], 2);

        let res = app
            .graphql(&token, &page("pageNumber: 1, pageSize: 2"), json!({}))
            .await;
        assert_eq!(titles(&res.body), vec!["Winter works"]);
    }

    #[tokio::test]
    async fn pages_filter_and_sort() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        seed_news(&app, &token, admin_id).await;

        let res = app
            .graphql(
                &token,
                &page("text: \"season\", sortBy: \"title\", sortDirection: \"ASC\""),
                json!({}),
            )
            .await;

        assert_eq!(titles(&res.body), vec!["Season finale", "Season opener"]);
        assert_eq!(
            res.body["data"]["getAllNewsFilteredPaginated"]["totalElements"],
            2
        );
    }

    #[tokio::test]
    async fn bad_paging_arguments_are_rejected() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;

        let res = app.graphql(&token, &page("pageSize: 0"), json!({})).await;
        assert_eq!(res.error_code(), Some("invalid_argument"));

        let res = app
            .graphql(&token, &page("sortBy: \"author\""), json!({}))
            .await;
        assert_eq!(res.error_code(), Some("invalid_argument"));
    }

    #[tokio::test]
    async fn paging_is_admin_only() {
        let app = TestApp::spawn().await;
        let (_, token) = app
            .member_with_role("rider@paddock.test", Role::Member)
            .await;

        let res = app.graphql(&token, &page(""), json!({})).await;

        assert_eq!(res.error_code(), Some("access_denied"));
    }
}

mod likes {
    use super::*;

    const LIKE: &str = "mutation($n: Long!, $m: Long!) { likeNews(newsId: $n, memberId: $m) { likedNews { member { id } } } }";
    const UNLIKE: &str = "mutation($n: Long!, $m: Long!) { unlikeNews(newsId: $n, memberId: $m) { likedNews { id } } }";

    #[tokio::test]
    async fn member_likes_and_unlikes_once() {
        let app = TestApp::spawn().await;
        let (admin_id, admin_token) = app.admin().await;
        let (member_id, token) = app
            .member_with_role("rider@paddock.test", Role::Member)
            .await;
        let news_id = app
            .create_news(&admin_token, "Opener", "2024-03-01T09:00:00", admin_id)
            .await;
        let vars = json!({"n": news_id, "m": member_id});

        let res = app.graphql(&token, LIKE, vars.clone()).await;
        assert_eq!(
            res.body["data"]["likeNews"]["likedNews"],
            json!([{"member": {"id": member_id}}])
        );

        let again = app.graphql(&token, LIKE, vars.clone()).await;
        assert_eq!(again.error_code(), Some("news_already_liked_by_member"));

        let res = app.graphql(&token, UNLIKE, vars.clone()).await;
        assert_eq!(res.body["data"]["unlikeNews"]["likedNews"], json!([]));

        let again = app.graphql(&token, UNLIKE, vars).await;
        assert_eq!(again.error_code(), Some("news_not_liked_by_member"));
    }

    #[tokio::test]
    async fn liking_a_missing_news_reports_the_news_first() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;

        let res = app
            .graphql(&token, LIKE, json!({"n": 404, "m": 404}))
            .await;

        assert_eq!(res.error_code(), Some("news_not_found"));
    }

    #[tokio::test]
    async fn deleting_a_news_drops_its_likes() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        let news_id = app
            .create_news(&token, "Opener", "2024-03-01T09:00:00", admin_id)
            .await;
        app.graphql(&token, LIKE, json!({"n": news_id, "m": admin_id}))
            .await;

        let res = app
            .graphql(
                &token,
                "mutation($id: Long!) { deleteNews(newsId: $id) { id } }",
                json!({ "id": news_id }),
            )
            .await;
        assert_eq!(res.data_id("deleteNews"), news_id);

        let res = app
            .graphql(
                &token,
                "query($id: Long!) { getMemberById(id: $id) { likedNews { id } } }",
                json!({ "id": admin_id }),
            )
            .await;
        assert_eq!(res.body["data"]["getMemberById"]["likedNews"], json!([]));
    }
}

mod edits {
    use super::*;

    #[tokio::test]
    async fn update_records_the_editor() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;
        let news_id = app
            .create_news(&token, "Opener", "2024-03-01T09:00:00", admin_id)
            .await;

        let res = app
            .graphql(
                &token,
                "mutation($id: Long!, $m: Long!) {
                    updateNews(newsId: $id, title: \"Opener (updated)\", catchLine: \"New date\",
                               newsDate: \"2024-03-08T09:00:00\", memberId: $m) {
                        title catchLine newsDate modifiedBy { id }
                    }
                }",
                json!({"id": news_id, "m": admin_id}),
            )
            .await;

        assert_eq!(
            res.body["data"]["updateNews"],
            json!({
                "title": "Opener (updated)",
                "catchLine": "New date",
                "newsDate": "2024-03-08 09:00:00",
                "modifiedBy": {"id": admin_id},
            })
        );
    }

    #[tokio::test]
    async fn invalid_news_date_is_reported() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;

        let res = app
            .graphql(
                &token,
                "mutation($m: Long!) { createNews(title: \"x\", newsDate: \"yesterday\", memberId: $m) { id } }",
                json!({ "m": admin_id }),
            )
            .await;

        assert_eq!(res.error_code(), Some("invalid_date"));
    }
}
