/// Integration tests for account provisioning
use medmig::provision::{create_users, list_users, user_specs};

#[test]
fn test_fixed_accounts_match_deployment_contract() {
    let specs = user_specs("medicaldb");

    assert_eq!(specs.len(), 3);
    assert_eq!(
        specs
            .iter()
            .map(|s| (s.username, s.role, s.role_db.as_str()))
            .collect::<Vec<_>>(),
        vec![
            ("admin_user", "root", "admin"),
            ("app_user", "readWrite", "medicaldb"),
            ("readonly_user", "read", "medicaldb"),
        ]
    );
}

// This test needs a running MongoDB without auth enabled, e.g.
//   docker run --rm -p 27017:27017 mongo
// Run with: cargo test -- --ignored
#[tokio::test]
#[ignore]
async fn test_provision_round_trip_against_live_deployment() {
    use mongodb::bson::doc;

    let database = medmig::db::connect("mongodb://localhost:27017", "medmig_provision_test")
        .await
        .expect("connect to local deployment");

    // Start from a clean slate in case a previous run left accounts behind
    database
        .run_command(doc! { "dropAllUsersFromDatabase": 1 })
        .await
        .ok();

    let specs = user_specs("medmig_provision_test");
    create_users(&database, &specs)
        .await
        .expect("first run should create all three accounts");

    let listed = list_users(&database).await.expect("usersInfo");
    let mut usernames: Vec<&str> = listed.iter().map(|u| u.username.as_str()).collect();
    usernames.sort();
    assert_eq!(usernames, vec!["admin_user", "app_user", "readonly_user"]);

    // Re-running must fail on the duplicate-user condition, not silently succeed
    let rerun = create_users(&database, &specs).await;
    assert!(rerun.is_err(), "second run should hit a duplicate user");

    // Clean up
    database
        .run_command(doc! { "dropAllUsersFromDatabase": 1 })
        .await
        .ok();
}
