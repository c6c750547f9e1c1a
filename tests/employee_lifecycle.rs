use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use platform_api::ApiError;
use platform_db::DbPool;
use products_employees::{EmployeeInput, EmployeeService};
use sea_orm::Database;

async fn fresh_service() -> Result<EmployeeService> {
    let pool: DbPool = Database::connect("sqlite::memory:").await?;
    Migrator::up(&pool, None).await?;
    Ok(EmployeeService::new(pool))
}

fn full_input(name: &str, email_address: &str, position: &str) -> EmployeeInput {
    EmployeeInput {
        name: Some(name.to_string()),
        email_address: Some(email_address.to_string()),
        position: Some(position.to_string()),
    }
}

#[tokio::test]
async fn create_then_fetch_round_trips() -> Result<()> {
    let service = fresh_service().await?;
    let created = service
        .create_employee(full_input("John Doe", "john@example.com", "Engineer"))
        .await?;
    assert!(created.id >= 1);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = service.get_employee_by_id(created.id).await?;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn list_starts_empty_and_orders_by_id() -> Result<()> {
    let service = fresh_service().await?;
    assert!(service.get_all_employees().await?.is_empty());

    let first = service
        .create_employee(full_input("John Doe", "john@example.com", "Engineer"))
        .await?;
    let second = service
        .create_employee(full_input("Jane Smith", "jane@example.com", "Designer"))
        .await?;
    assert!(first.id < second.id);

    let all = service.get_all_employees().await?;
    assert_eq!(all, vec![first, second]);
    Ok(())
}

#[tokio::test]
async fn absent_ids_surface_not_found() -> Result<()> {
    let service = fresh_service().await?;

    let err = service.get_employee_by_id(42).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    let err = service
        .update_employee(42, full_input("A", "a@x.com", "P"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    let err = service.delete_employee(42).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    Ok(())
}

#[tokio::test]
async fn update_merges_only_provided_fields() -> Result<()> {
    let service = fresh_service().await?;
    let created = service
        .create_employee(full_input("John Doe", "john@example.com", "Engineer"))
        .await?;

    let patch = EmployeeInput {
        position: Some("Staff Engineer".to_string()),
        ..Default::default()
    };
    let updated = service.update_employee(created.id, patch).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.email_address, created.email_address);
    assert_eq!(updated.position, "Staff Engineer");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let fetched = service.get_employee_by_id(created.id).await?;
    assert_eq!(fetched, updated);
    Ok(())
}

#[tokio::test]
async fn empty_update_only_refreshes_updated_at() -> Result<()> {
    let service = fresh_service().await?;
    let created = service
        .create_employee(full_input("John Doe", "john@example.com", "Engineer"))
        .await?;

    let updated = service
        .update_employee(created.id, EmployeeInput::default())
        .await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.email_address, created.email_address);
    assert_eq!(updated.position, created.position);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    Ok(())
}

#[tokio::test]
async fn delete_removes_exactly_once() -> Result<()> {
    let service = fresh_service().await?;
    let created = service
        .create_employee(full_input("John Doe", "john@example.com", "Engineer"))
        .await?;

    service.delete_employee(created.id).await?;
    let err = service.get_employee_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    for _ in 0..2 {
        let err = service.delete_employee(created.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_email_bubbles_up_unmapped() -> Result<()> {
    let service = fresh_service().await?;
    service
        .create_employee(full_input("John Doe", "john@example.com", "Engineer"))
        .await?;

    let err = service
        .create_employee(full_input("Other Doe", "john@example.com", "Manager"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Internal(_)));
    Ok(())
}

#[tokio::test]
async fn partial_create_is_rejected_by_the_store() -> Result<()> {
    let service = fresh_service().await?;
    let err = service
        .create_employee(EmployeeInput {
            name: Some("John Doe".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Internal(_)));
    Ok(())
}
