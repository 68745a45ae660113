mod common;

use chrono::{Duration, TimeZone, Utc};
use todolist_api::domain::{
    category::{CategoryId, NewCategory},
    repository::{CategoryRepository, TodoItemRepository},
    todo_item::{NewTodoItem, TodoItem, TodoItemChanges, TodoItemId},
};
use todolist_api::infrastructure::{
    seed,
    sqlite_repo::{SqliteCategoryRepository, SqliteTodoItemRepository},
};

fn new_item(title: &str, category_id: Option<CategoryId>) -> NewTodoItem {
    NewTodoItem {
        title: title.into(),
        description: String::new(),
        is_completed: false,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
        due_date: None,
        category_id,
    }
}

#[tokio::test]
async fn deleting_a_category_nulls_item_references() {
    let pool = common::pool().await;
    let categories = SqliteCategoryRepository::new(pool.clone());
    let items = SqliteTodoItemRepository::new(pool);

    let work = categories.create(NewCategory { name: "Work".into() }).await.unwrap();
    let item = items.create(new_item("Report", Some(work.id))).await.unwrap();
    assert_eq!(item.category_name.as_deref(), Some("Work"));

    assert!(categories.delete(work.id).await.unwrap());
    let item = items.get(item.id).await.unwrap().unwrap();
    assert_eq!(item.category_id, None);
    assert_eq!(item.category_name, None);
}

#[tokio::test]
async fn name_lookup_is_case_sensitive() {
    let pool = common::pool().await;
    let categories = SqliteCategoryRepository::new(pool);
    categories.create(NewCategory { name: "Work".into() }).await.unwrap();

    assert!(categories.get_by_name("Work").await.unwrap().is_some());
    assert!(categories.get_by_name("work").await.unwrap().is_none());
}

#[tokio::test]
async fn items_round_trip_timestamps_and_keep_insertion_order() {
    let pool = common::pool().await;
    let categories = SqliteCategoryRepository::new(pool.clone());
    let items = SqliteTodoItemRepository::new(pool);
    let home = categories.create(NewCategory { name: "Home".into() }).await.unwrap();

    let mut input = new_item("First", Some(home.id));
    input.due_date = Some(Utc.with_ymd_and_hms(2024, 5, 2, 17, 0, 0).unwrap());
    let first = items.create(input.clone()).await.unwrap();
    items.create(new_item("Second", None)).await.unwrap();

    assert_eq!(first.created_at, input.created_at);
    assert_eq!(first.due_date, input.due_date);
    let titles: Vec<String> = items.list().await.unwrap().into_iter().map(|i| i.title).collect();
    assert_eq!(titles, vec!["First", "Second"]);

    let with_items = categories.get_with_items(home.id).await.unwrap().unwrap();
    assert_eq!(with_items.item_count(), 1);
    let all = categories.list_with_items().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].items[0].id, first.id);
}

#[tokio::test]
async fn predicate_queries_filter_in_the_store() {
    let pool = common::pool().await;
    let categories = SqliteCategoryRepository::new(pool.clone());
    let items = SqliteTodoItemRepository::new(pool);
    let work = categories.create(NewCategory { name: "Work".into() }).await.unwrap();
    let home = categories.create(NewCategory { name: "Home".into() }).await.unwrap();
    let cutoff = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    let mut early = new_item("Early", Some(work.id));
    early.due_date = Some(cutoff - Duration::days(3));
    let mut edge = new_item("Edge", Some(home.id));
    edge.due_date = Some(cutoff);
    // same second as the cutoff but later, so a text compare must not truncate
    let mut just_after = new_item("Just after", Some(work.id));
    just_after.due_date = Some(cutoff + Duration::milliseconds(250));
    let undated = new_item("Undated", None);

    let early = items.create(early).await.unwrap();
    let edge = items.create(edge).await.unwrap();
    let just_after = items.create(just_after).await.unwrap();
    let undated = items.create(undated).await.unwrap();
    assert!(items.mark_completed(edge.id).await.unwrap());

    let ids = |list: Vec<TodoItem>| list.into_iter().map(|i| i.id).collect::<Vec<_>>();

    assert_eq!(ids(items.list_completed().await.unwrap()), vec![edge.id]);
    assert_eq!(ids(items.list_pending().await.unwrap()), vec![early.id, just_after.id, undated.id]);

    let in_work = items.list_by_category(work.id).await.unwrap();
    assert!(in_work.iter().all(|i| i.category_name.as_deref() == Some("Work")));
    assert_eq!(ids(in_work), vec![early.id, just_after.id]);
    assert!(items.list_by_category(CategoryId(999)).await.unwrap().is_empty());

    assert_eq!(ids(items.list_due_before(cutoff).await.unwrap()), vec![early.id, edge.id]);
    assert_eq!(ids(items.list_due_before(cutoff + Duration::seconds(1)).await.unwrap()), vec![early.id, edge.id, just_after.id]);
}

#[tokio::test]
async fn update_and_complete_report_missing_rows() {
    let pool = common::pool().await;
    let items = SqliteTodoItemRepository::new(pool);
    let created = items.create(new_item("Run", None)).await.unwrap();

    let changes = TodoItemChanges { title: "Run far".into(), description: "10k".into(), is_completed: true, due_date: None, category_id: None };
    let updated = items.update(created.id, changes.clone()).await.unwrap().unwrap();
    assert_eq!(updated.title, "Run far");
    assert!(updated.is_completed);
    assert_eq!(updated.created_at, created.created_at);

    assert!(items.update(TodoItemId(999), changes).await.unwrap().is_none());
    assert!(items.mark_completed(created.id).await.unwrap());
    assert!(!items.mark_completed(TodoItemId(999)).await.unwrap());
    assert!(items.delete(created.id).await.unwrap());
    assert!(!items.delete(created.id).await.unwrap());
}

#[tokio::test]
async fn seed_runs_only_on_an_empty_store() {
    let pool = common::pool().await;
    let categories = SqliteCategoryRepository::new(pool.clone());
    let items = SqliteTodoItemRepository::new(pool);

    assert!(seed::seed_if_empty(&categories, &items).await.unwrap());
    assert!(!seed::seed_if_empty(&categories, &items).await.unwrap());
    assert_eq!(categories.list_with_items().await.unwrap().len(), 5);
    let all = items.list().await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all.iter().filter(|i| i.is_completed).count(), 1);
}
