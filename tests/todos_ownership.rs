mod common;

use anyhow::{Context, Result};

fn create_todo(
    client: &reqwest::blocking::Client,
    base_url: &str,
    auth: &str,
    title: &str,
) -> Result<i64> {
    let body: serde_json::Value = client
        .post(format!("{}/todos", base_url))
        .header(reqwest::header::AUTHORIZATION, auth)
        .json(&serde_json::json!({"title": title, "isCompleted": false}))
        .send()
        .context("create todo")?
        .error_for_status()
        .context("create todo status")?
        .json()
        .context("parse created todo")?;
    body.get("id").and_then(|v| v.as_i64()).context("id missing")
}

#[test]
fn another_users_task_reads_as_not_found() -> Result<()> {
    let guard = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();

    let alice = common::register_and_login(&client, &guard.base_url, "alice", "Secret123!")?;
    let bob = common::register_and_login(&client, &guard.base_url, "bob", "Secret456!")?;

    let id = create_todo(
        &client,
        &guard.base_url,
        &common::auth_header(&alice),
        "alice's task",
    )?;

    // 404, not 401/403: existence must not leak.
    let resp = client
        .get(format!("{}/todos/{}", guard.base_url, id))
        .header(reqwest::header::AUTHORIZATION, common::auth_header(&bob))
        .send()
        .context("bob reads alice's task")?;
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}

#[test]
fn mutations_authorize_against_the_stored_owner() -> Result<()> {
    let guard = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();

    let alice = common::register_and_login(&client, &guard.base_url, "alice", "Secret123!")?;
    let bob = common::register_and_login(&client, &guard.base_url, "bob", "Secret456!")?;
    let bob_auth = common::auth_header(&bob);

    let id = create_todo(
        &client,
        &guard.base_url,
        &common::auth_header(&alice),
        "alice's task",
    )?;

    // Bob cannot update alice's task even by claiming ownership in the body:
    // authorization compares against the stored owner.
    let update = client
        .put(format!("{}/todos/{}", guard.base_url, id))
        .header(reqwest::header::AUTHORIZATION, &bob_auth)
        .json(&serde_json::json!({
            "id": id,
            "title": "hijacked",
            "isCompleted": true,
            "userId": "bob"
        }))
        .send()
        .context("bob updates alice's task")?;
    assert_eq!(update.status(), reqwest::StatusCode::UNAUTHORIZED);

    let delete = client
        .delete(format!("{}/todos/{}", guard.base_url, id))
        .header(reqwest::header::AUTHORIZATION, &bob_auth)
        .send()
        .context("bob deletes alice's task")?;
    assert_eq!(delete.status(), reqwest::StatusCode::UNAUTHORIZED);

    // Alice still sees her task untouched.
    let fetched: serde_json::Value = client
        .get(format!("{}/todos/{}", guard.base_url, id))
        .header(
            reqwest::header::AUTHORIZATION,
            common::auth_header(&alice),
        )
        .send()
        .context("alice reads her task")?
        .error_for_status()
        .context("alice read status")?
        .json()
        .context("parse task")?;
    assert_eq!(
        fetched.get("title").and_then(|v| v.as_str()),
        Some("alice's task")
    );

    Ok(())
}

#[test]
fn create_forces_owner_to_the_caller() -> Result<()> {
    let guard = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();

    let alice = common::register_and_login(&client, &guard.base_url, "alice", "Secret123!")?;
    let bob = common::register_and_login(&client, &guard.base_url, "bob", "Secret456!")?;

    // Bob supplies a bogus owner field; it is ignored.
    let created: serde_json::Value = client
        .post(format!("{}/todos", guard.base_url))
        .header(reqwest::header::AUTHORIZATION, common::auth_header(&bob))
        .json(&serde_json::json!({
            "title": "bob's task",
            "isCompleted": false,
            "userId": "someone-else"
        }))
        .send()
        .context("create with forged owner")?
        .error_for_status()
        .context("create with forged owner status")?
        .json()
        .context("parse created todo")?;
    let id = created
        .get("id")
        .and_then(|v| v.as_i64())
        .context("id missing")?;

    // Bob owns it; alice cannot see it.
    let bob_read = client
        .get(format!("{}/todos/{}", guard.base_url, id))
        .header(reqwest::header::AUTHORIZATION, common::auth_header(&bob))
        .send()
        .context("bob reads own task")?;
    assert!(bob_read.status().is_success());

    let alice_read = client
        .get(format!("{}/todos/{}", guard.base_url, id))
        .header(
            reqwest::header::AUTHORIZATION,
            common::auth_header(&alice),
        )
        .send()
        .context("alice reads bob's task")?;
    assert_eq!(alice_read.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}

#[test]
fn lists_are_scoped_to_the_caller() -> Result<()> {
    let guard = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();

    let alice = common::register_and_login(&client, &guard.base_url, "alice", "Secret123!")?;
    let bob = common::register_and_login(&client, &guard.base_url, "bob", "Secret456!")?;

    create_todo(&client, &guard.base_url, &common::auth_header(&alice), "a1")?;
    create_todo(&client, &guard.base_url, &common::auth_header(&alice), "a2")?;
    create_todo(&client, &guard.base_url, &common::auth_header(&bob), "b1")?;

    let list: serde_json::Value = client
        .get(format!("{}/todos", guard.base_url))
        .header(reqwest::header::AUTHORIZATION, common::auth_header(&bob))
        .send()
        .context("bob lists todos")?
        .error_for_status()
        .context("bob list status")?
        .json()
        .context("parse list")?;

    let todos = list
        .get("todos")
        .and_then(|v| v.as_array())
        .context("todos missing")?;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].get("title").and_then(|v| v.as_str()), Some("b1"));

    Ok(())
}
