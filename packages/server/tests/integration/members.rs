use serde_json::json;

use paddock_server::entity::role::Role;

use crate::common::TestApp;

const CREATE_MEMBER: &str = "mutation($email: String!, $avatar: String) {
    createMember(firstName: \"Jean\", lastName: \"Alesi\", email: $email, bike: \"916\",
                 avatarFile: $avatar, avatarFileName: \"helmet.png\", active: true) {
        id email role verified active avatar { filename file }
    }
}";

mod create {
    use super::*;

    #[tokio::test]
    async fn admin_creates_a_member_with_an_avatar() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;

        // "PNG" in base64.
        let res = app
            .graphql(
                &token,
                CREATE_MEMBER,
                json!({"email": " Jean@Paddock.test ", "avatar": "UE5H"}),
            )
            .await;

        let member = &res.body["data"]["createMember"];
        assert_eq!(member["email"], "jean@paddock.test", "{}", res.text);
        assert_eq!(member["role"], "ROLE_USER");
        assert_eq!(member["verified"], false);
        assert_eq!(member["active"], true);
        assert_eq!(member["avatar"]["filename"], "helmet.png");
        assert_eq!(member["avatar"]["file"], "UE5H");
    }

    #[tokio::test]
    async fn created_member_reads_back_unchanged() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;
        let fields = "id firstName lastName email phone bike active admin verified role
                      createdOn avatar { filename file }";

        let created = app
            .graphql(
                &token,
                &format!(
                    "mutation {{
                        createMember(firstName: \"Randy\", lastName: \"Mamola\",
                                     email: \"randy@paddock.test\", phone: \"+33 6 12 34 56 78\",
                                     bike: \"NSR 500\", avatarFile: \"UE5H\",
                                     avatarFileName: \"randy.png\", active: true, admin: true) {{ {fields} }}
                    }}"
                ),
                json!({}),
            )
            .await;
        let created = &created.body["data"]["createMember"];
        let id = created["id"].as_i64().expect("created member should have an id");
        assert!(created["createdOn"].is_string());

        let fetched = app
            .graphql(
                &token,
                &format!("query($id: Long!) {{ getMemberById(id: $id) {{ {fields} }} }}"),
                json!({"id": id}),
            )
            .await;
        let fetched = &fetched.body["data"]["getMemberById"];

        assert_eq!(fetched, created);
        assert_eq!(fetched["firstName"], "Randy");
        assert_eq!(fetched["lastName"], "Mamola");
        assert_eq!(fetched["email"], "randy@paddock.test");
        assert_eq!(fetched["phone"], "+33 6 12 34 56 78");
        assert_eq!(fetched["bike"], "NSR 500");
        assert_eq!(fetched["active"], true);
        assert_eq!(fetched["admin"], true);
        assert_eq!(fetched["avatar"]["filename"], "randy.png");
        assert_eq!(fetched["avatar"]["file"], "UE5H");
    }

    #[tokio::test]
    async fn duplicate_email_is_reported() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;

        let res = app
            .graphql(&token, CREATE_MEMBER, json!({"email": "ADMIN@paddock.test"}))
            .await;

        assert_eq!(res.error_code(), Some("member_email_already_exist"));
    }

    #[tokio::test]
    async fn undecodable_avatar_is_reported() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;

        let res = app
            .graphql(
                &token,
                CREATE_MEMBER,
                json!({"email": "jean@paddock.test", "avatar": "%%% not base64 %%%"}),
            )
            .await;

        assert_eq!(res.error_code(), Some("invalid_avatar"));
        assert!(app.find_member("jean@paddock.test").await.is_none());
    }
}

mod queries {
    use super::*;

    #[tokio::test]
    async fn filter_matches_names_and_email() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;
        app.insert_member("valentino@paddock.test", None, Role::Member)
            .await;
        app.insert_member("marc@paddock.test", None, Role::Member)
            .await;

        let res = app
            .graphql(
                &token,
                "{ getMembersFiltered(text: \"VALEN\") { email } }",
                json!({}),
            )
            .await;
        assert_eq!(
            res.body["data"]["getMembersFiltered"],
            json!([{"email": "valentino@paddock.test"}])
        );

        let res = app
            .graphql(&token, "{ getMembersFiltered(text: \"  \") { id } }", json!({}))
            .await;
        assert_eq!(
            res.body["data"]["getMembersFiltered"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn unknown_member_is_reported() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;

        let res = app
            .graphql(&token, "{ getMemberById(id: 999) { id } }", json!({}))
            .await;
        assert_eq!(res.error_code(), Some("member_not_found"));

        let res = app
            .graphql(
                &token,
                "{ getMemberByEmail(email: \"ghost@paddock.test\") { id } }",
                json!({}),
            )
            .await;
        assert_eq!(res.error_code(), Some("member_not_found"));
    }

    #[tokio::test]
    async fn ids_may_be_sent_as_strings() {
        let app = TestApp::spawn().await;
        let (admin_id, token) = app.admin().await;

        let res = app
            .graphql(
                &token,
                "query($id: Long!) { getMemberById(id: $id) { id } }",
                json!({ "id": admin_id.to_string() }),
            )
            .await;

        assert_eq!(res.data_id("getMemberById"), admin_id);
    }
}

mod mutations {
    use super::*;

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_the_role() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;
        let id = app
            .insert_member("rider@paddock.test", None, Role::Member)
            .await;

        let res = app
            .graphql(
                &token,
                "mutation($id: Long!) {
                    updateMember(memberId: $id, firstName: \"Casey\", lastName: \"Stoner\",
                                 email: \"casey@paddock.test\", active: true) {
                        firstName email role bike modifiedOn
                    }
                }",
                json!({ "id": id }),
            )
            .await;

        let member = &res.body["data"]["updateMember"];
        assert_eq!(member["firstName"], "Casey", "{}", res.text);
        assert_eq!(member["email"], "casey@paddock.test");
        assert_eq!(member["role"], "ROLE_MEMBER");
        assert!(member["bike"].is_null());
        assert!(member["modifiedOn"].is_string());
    }

    #[tokio::test]
    async fn role_is_promoted_and_bad_roles_rejected() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;
        let id = app
            .insert_member("rider@paddock.test", None, Role::User)
            .await;
        let query = "mutation($id: Long!, $role: String!) { updateMemberRole(memberId: $id, role: $role) { role } }";

        let res = app
            .graphql(&token, query, json!({"id": id, "role": "ROLE_MEMBER"}))
            .await;
        assert_eq!(res.body["data"]["updateMemberRole"]["role"], "ROLE_MEMBER");

        let res = app
            .graphql(&token, query, json!({"id": id, "role": "ROLE_ROOT"}))
            .await;
        assert_eq!(res.error_code(), Some("invalid_role"));
    }

    #[tokio::test]
    async fn delete_removes_the_member_and_its_lap_records() {
        let app = TestApp::spawn().await;
        let (_, token) = app.admin().await;
        let id = app
            .insert_member("rider@paddock.test", None, Role::Member)
            .await;
        let track_id = app.create_track(&token, "Jerez").await;
        app.graphql(
            &token,
            "mutation($m: Long!, $t: Long!) {
                createLapRecord(memberId: $m, trackId: $t, recordDate: \"2024-03-03T10:00:00\",
                                lapTime: 101234, conditions: \"Dry\") { id }
            }",
            json!({"m": id, "t": track_id}),
        )
        .await;

        let res = app
            .graphql(
                &token,
                "mutation($id: Long!) { deleteMember(memberId: $id) { email } }",
                json!({ "id": id }),
            )
            .await;
        assert_eq!(
            res.body["data"]["deleteMember"]["email"],
            "rider@paddock.test",
            "{}",
            res.text
        );
        assert!(app.find_member("rider@paddock.test").await.is_none());

        let res = app
            .graphql(
                &token,
                "query($t: Long!) { getTrackLapRecords(trackId: $t) { id } }",
                json!({ "t": track_id }),
            )
            .await;
        assert_eq!(res.body["data"]["getTrackLapRecords"], json!([]));
    }
}
