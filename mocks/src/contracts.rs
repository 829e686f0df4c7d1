//! Contract test helpers for validating TodoRepository implementations
//!
//! Every implementation (the in-memory mock and the MySQL store) must pass
//! the same suite. Each check uses a fresh random owner, so the suite can run
//! against a database that already holds rows from earlier runs.

use crate::{create_status_update, create_task_update, generate_user_id};
use todo_core::{NewTodo, TodoFilter, TodoRepository, UpdateTodo, STATUS_ACTIVE, STATUS_DELETED};

/// Run the whole contract suite against one repository
pub async fn test_repository_contract<R: TodoRepository>(repo: &R) {
    test_health_check_contract(repo).await;
    test_create_contract(repo).await;
    test_list_contract(repo).await;
    test_update_contract(repo).await;
    test_soft_delete_contract(repo).await;
    test_round_trip_contract(repo).await;
}

/// Health check passes on a reachable store
pub async fn test_health_check_contract<R: TodoRepository>(repo: &R) {
    repo.health_check()
        .await
        .expect("Health check should pass for healthy repository");
}

/// Creation always yields an active row owned by the caller
pub async fn test_create_contract<R: TodoRepository>(repo: &R) {
    let user_id = generate_user_id();
    let id = repo
        .create(NewTodo::new("contract create", &user_id))
        .await
        .expect("Create should succeed");

    assert!(id > 0, "Created todo should have positive ID");

    let todo = repo
        .get_by_id(id)
        .await
        .expect("Lookup should succeed")
        .expect("Created todo should exist");
    assert_eq!(todo.task, "contract create");
    assert_eq!(todo.user_id, user_id);
    assert_eq!(todo.status, STATUS_ACTIVE, "New todo should start active");

    assert!(
        repo.get_by_id(i64::MAX).await.unwrap().is_none(),
        "Unknown ID should return None"
    );
}

/// Listing is owner-scoped, hides deleted rows, and ANDs the status filter
pub async fn test_list_contract<R: TodoRepository>(repo: &R) {
    let user_id = generate_user_id();
    let other_user = generate_user_id();

    let first = repo.create(NewTodo::new("first", &user_id)).await.unwrap();
    let second = repo.create(NewTodo::new("second", &user_id)).await.unwrap();
    let gone = repo.create(NewTodo::new("gone", &user_id)).await.unwrap();
    repo.create(NewTodo::new("not mine", &other_user))
        .await
        .unwrap();

    repo.update(second, create_status_update("done")).await.unwrap();
    repo.soft_delete(gone).await.unwrap();

    let all = repo.list(TodoFilter::for_user(&user_id)).await.unwrap();
    let mut ids: Vec<i64> = all.iter().map(|todo| todo.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![first, second], "List should hide deleted and foreign rows");

    let done = repo
        .list(TodoFilter::for_user(&user_id).with_status("done"))
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, second);

    let deleted = repo
        .list(TodoFilter::for_user(&user_id).with_status(STATUS_DELETED))
        .await
        .unwrap();
    assert!(
        deleted.is_empty(),
        "Filtering on the deleted status never returns rows"
    );

    let nobody = repo
        .list(TodoFilter::for_user(generate_user_id()))
        .await
        .unwrap();
    assert!(nobody.is_empty());
}

/// Update writes only the supplied columns
pub async fn test_update_contract<R: TodoRepository>(repo: &R) {
    let user_id = generate_user_id();
    let id = repo.create(NewTodo::new("first draft", &user_id)).await.unwrap();

    repo.update(id, create_status_update("done")).await.unwrap();
    let todo = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(todo.status, "done");
    assert_eq!(todo.task, "first draft");

    repo.update(id, create_task_update("renamed")).await.unwrap();
    let todo = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(todo.status, "done");
    assert_eq!(todo.task, "renamed");

    repo.update(
        id,
        UpdateTodo {
            status: Some("blocked".to_string()),
            task: Some("both".to_string()),
        },
    )
    .await
    .unwrap();
    let todo = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(todo.status, "blocked");
    assert_eq!(todo.task, "both");

    repo.update(id, UpdateTodo::default()).await.unwrap();
    let unchanged = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(unchanged, todo, "Empty update should change nothing");
    assert_eq!(unchanged.user_id, user_id, "Owner is never rewritten");

    repo.update(i64::MAX, create_status_update("done"))
        .await
        .expect("Updating an unknown ID is not an error");
}

/// Soft delete keeps the row, and repeating it is harmless
pub async fn test_soft_delete_contract<R: TodoRepository>(repo: &R) {
    let user_id = generate_user_id();
    let id = repo.create(NewTodo::new("to delete", &user_id)).await.unwrap();
    repo.update(id, create_status_update("done")).await.unwrap();

    repo.soft_delete(id).await.unwrap();
    let todo = repo.get_by_id(id).await.unwrap().expect("Row should remain");
    assert_eq!(todo.status, STATUS_DELETED);

    repo.soft_delete(id)
        .await
        .expect("Deleting twice should succeed");
    let again = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(again, todo);

    repo.soft_delete(i64::MAX)
        .await
        .expect("Deleting an unknown ID is not an error");
}

/// create → list → update → filtered list → delete → list
pub async fn test_round_trip_contract<R: TodoRepository>(repo: &R) {
    let user_id = generate_user_id();

    let id = repo.create(NewTodo::new("buy milk", &user_id)).await.unwrap();
    let listed = repo.list(TodoFilter::for_user(&user_id)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].task, "buy milk");
    assert_eq!(listed[0].status, STATUS_ACTIVE);

    repo.update(id, create_status_update("done")).await.unwrap();
    let done = repo
        .list(TodoFilter::for_user(&user_id).with_status("done"))
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, id);

    repo.soft_delete(id).await.unwrap();
    let after = repo.list(TodoFilter::for_user(&user_id)).await.unwrap();
    assert!(after.iter().all(|todo| todo.id != id));
}
