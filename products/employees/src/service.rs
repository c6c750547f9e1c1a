use chrono::Utc;
use entity::employees;
use platform_api::{ApiError, ApiResult};
use platform_db::DbPool;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    EntityTrait, QueryOrder,
};
use serde::Deserialize;
use tracing::instrument;

/// Inbound employee fields. Every field is optional so the service can
/// merge whatever subset it is handed; the HTTP layer enforces the full
/// shape before calling in.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmployeeInput {
    pub name: Option<String>,
    pub email_address: Option<String>,
    pub position: Option<String>,
}

/// Owns the employee lifecycle against the persistence store.
#[derive(Clone)]
pub struct EmployeeService {
    pool: DbPool,
}

impl EmployeeService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    #[instrument(name = "employees.list", skip(self))]
    pub async fn get_all_employees(&self) -> ApiResult<Vec<employees::Model>> {
        employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .all(&self.pool)
            .await
            .map_err(|err| ApiError::internal(err.into()))
    }

    #[instrument(name = "employees.get", skip(self))]
    pub async fn get_employee_by_id(&self, id: i32) -> ApiResult<employees::Model> {
        employees::Entity::find_by_id(id)
            .one(&self.pool)
            .await
            .map_err(|err| ApiError::internal(err.into()))?
            .ok_or(ApiError::NotFound)
    }

    #[instrument(name = "employees.create", skip(self))]
    pub async fn create_employee(&self, input: EmployeeInput) -> ApiResult<employees::Model> {
        let now = Utc::now();
        let model = employees::ActiveModel {
            id: NotSet,
            name: input.name.map_or(NotSet, Set),
            email_address: input.email_address.map_or(NotSet, Set),
            position: input.position.map_or(NotSet, Set),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        model
            .insert(&self.pool)
            .await
            .map_err(|err| ApiError::internal(err.into()))
    }

    /// Loads the existing record, overlays the provided fields and bumps
    /// `updated_at`. Fields left out keep their prior value; `id` and
    /// `created_at` never change.
    #[instrument(name = "employees.update", skip(self))]
    pub async fn update_employee(
        &self,
        id: i32,
        input: EmployeeInput,
    ) -> ApiResult<employees::Model> {
        let existing = self.get_employee_by_id(id).await?;
        let mut merged: employees::ActiveModel = existing.into();
        if let Some(name) = input.name {
            merged.name = Set(name);
        }
        if let Some(email_address) = input.email_address {
            merged.email_address = Set(email_address);
        }
        if let Some(position) = input.position {
            merged.position = Set(position);
        }
        merged.updated_at = Set(Utc::now().into());
        merged
            .update(&self.pool)
            .await
            .map_err(|err| ApiError::internal(err.into()))
    }

    #[instrument(name = "employees.delete", skip(self))]
    pub async fn delete_employee(&self, id: i32) -> ApiResult<()> {
        let result = employees::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await
            .map_err(|err| ApiError::internal(err.into()))?;
        if result.rows_affected == 0 {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}
