//! Integration tests for `LocationRepo` against a real database.

use assert_matches::assert_matches;
use ems_core::filter::{Filter, Where};
use ems_core::location::LocationField;
use ems_db::models::department::CreateDepartment;
use ems_db::models::location::{CreateLocation, ReplaceLocation, UpdateLocation};
use ems_db::repositories::LocationRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_location(name: &str, city: Option<&str>) -> CreateLocation {
    CreateLocation {
        name: name.to_string(),
        address: None,
        city: city.map(str::to_string),
        country: None,
    }
}

fn replacement(name: &str) -> ReplaceLocation {
    ReplaceLocation {
        id: None,
        name: name.to_string(),
        address: None,
        city: None,
        country: None,
    }
}

fn where_clause(raw: &str) -> Where<LocationField> {
    Where::from_query(Some(raw)).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find(pool: PgPool) {
    let created = LocationRepo::create(&pool, &new_location("HQ", Some("Oslo")))
        .await
        .unwrap();
    assert_eq!(created.name, "HQ");
    assert_eq!(created.city.as_deref(), Some("Oslo"));

    let found = LocationRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(LocationRepo::exists(&pool, created.id).await.unwrap());
    assert!(!LocationRepo::exists(&pool, created.id + 1000).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_name_violates_unique_constraint(pool: PgPool) {
    LocationRepo::create(&pool, &new_location("HQ", None)).await.unwrap();
    let err = LocationRepo::create(&pool, &new_location("HQ", None))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(db) if db.constraint() == Some("uq_locations_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_applies_where_order_and_page(pool: PgPool) {
    for (name, city) in [("A", "Oslo"), ("B", "Bergen"), ("C", "Oslo"), ("D", "Oslo")] {
        LocationRepo::create(&pool, &new_location(name, Some(city))).await.unwrap();
    }

    let filter = Filter::<LocationField>::from_query(Some(
        r#"{"where": {"city": "Oslo"}, "order": "name DESC", "limit": 2, "skip": 1}"#,
    ))
    .unwrap();
    let names: Vec<String> = LocationRepo::list(&pool, &filter)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();
    assert_eq!(names, vec!["C", "A"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_with_departments_groups_by_location(pool: PgPool) {
    let oslo = LocationRepo::create(&pool, &new_location("Oslo", None)).await.unwrap();
    let bergen = LocationRepo::create(&pool, &new_location("Bergen", None)).await.unwrap();

    let departments = LocationRepo::departments(&pool, oslo.id);
    departments.create(&CreateDepartment::default()).await.unwrap();
    departments.create(&CreateDepartment::default()).await.unwrap();

    let listed = LocationRepo::list_with_departments(&pool, &Filter::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].location.id, oslo.id);
    assert_eq!(listed[0].departments.len(), 2);
    assert_eq!(listed[1].location.id, bergen.id);
    assert!(listed[1].departments.is_empty());

    let one = LocationRepo::find_by_id_with_departments(&pool, oslo.id)
        .await
        .unwrap()
        .unwrap();
    assert!(one.departments.iter().all(|d| d.location_id == oslo.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_with_where(pool: PgPool) {
    for (name, city) in [("A", "Oslo"), ("B", "Bergen"), ("C", "Oslo")] {
        LocationRepo::create(&pool, &new_location(name, Some(city))).await.unwrap();
    }
    assert_eq!(LocationRepo::count(&pool, &Where::default()).await.unwrap(), 3);
    assert_eq!(
        LocationRepo::count(&pool, &where_clause(r#"{"city": "Oslo"}"#)).await.unwrap(),
        2
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_all_is_idempotent(pool: PgPool) {
    for (name, city) in [("A", "Oslo"), ("B", "Bergen"), ("C", "Oslo")] {
        LocationRepo::create(&pool, &new_location(name, Some(city))).await.unwrap();
    }
    let patch = UpdateLocation {
        city: Some("Trondheim".into()),
        ..Default::default()
    };
    let only_oslo = where_clause(r#"{"city": "Oslo"}"#);

    assert_eq!(LocationRepo::update_all(&pool, &patch, &only_oslo).await.unwrap(), 2);
    assert_eq!(LocationRepo::update_all(&pool, &patch, &only_oslo).await.unwrap(), 0);
    assert_eq!(
        LocationRepo::count(&pool, &where_clause(r#"{"city": "Trondheim"}"#)).await.unwrap(),
        2
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_keeps_unset_fields(pool: PgPool) {
    let created = LocationRepo::create(&pool, &new_location("HQ", Some("Oslo")))
        .await
        .unwrap();
    let patch = UpdateLocation {
        country: Some("Norway".into()),
        ..Default::default()
    };
    assert!(LocationRepo::update(&pool, created.id, &patch).await.unwrap());

    let updated = LocationRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(updated.city.as_deref(), Some("Oslo"));
    assert_eq!(updated.country.as_deref(), Some("Norway"));
    assert!(updated.updated_at >= created.updated_at);

    assert!(!LocationRepo::update(&pool, created.id + 1000, &patch).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_clears_omitted_fields(pool: PgPool) {
    let created = LocationRepo::create(&pool, &new_location("HQ", Some("Oslo")))
        .await
        .unwrap();
    assert!(LocationRepo::replace(&pool, created.id, &replacement("Main"))
        .await
        .unwrap());

    let replaced = LocationRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(replaced.name, "Main");
    assert_eq!(replaced.city, None);

    assert!(!LocationRepo::replace(&pool, created.id + 1000, &replacement("X"))
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_to_departments(pool: PgPool) {
    let created = LocationRepo::create(&pool, &new_location("HQ", None)).await.unwrap();
    LocationRepo::departments(&pool, created.id)
        .create(&CreateDepartment::default())
        .await
        .unwrap();

    assert!(LocationRepo::delete(&pool, created.id).await.unwrap());
    assert!(LocationRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
    assert!(!LocationRepo::delete(&pool, created.id).await.unwrap());

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM departments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
