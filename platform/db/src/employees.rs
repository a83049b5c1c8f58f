//! Employee data access.

use async_trait::async_trait;
use entity::employees;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DbErr, EntityTrait, QueryOrder, Set};
use tracing::instrument;

use crate::{DbError, DbPool, DbResult};

/// An employee record as seen by callers of [`EmployeeRepository`].
///
/// `id` is `None` until the record has been inserted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Employee {
    pub id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mail: Option<String>,
    pub password: Option<String>,
}

impl From<employees::Model> for Employee {
    fn from(model: employees::Model) -> Self {
        Self {
            id: Some(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            mail: model.mail,
            password: model.password,
        }
    }
}

/// A row deleted between the lookup and the update reads as missing.
fn update_error(id: i32, err: DbErr) -> DbError {
    match err {
        DbErr::RecordNotUpdated => DbError::NotFound(id),
        other => DbError::Query(other),
    }
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn get(&self, id: i32) -> DbResult<Option<Employee>>;

    /// Insert when `record.id` is `None`, otherwise overwrite the stored row.
    async fn save(&self, record: Employee) -> DbResult<Employee>;

    /// Returns `true` when a row was removed.
    async fn delete(&self, id: i32) -> DbResult<bool>;

    async fn list_all(&self) -> DbResult<Vec<Employee>>;
}

/// [`EmployeeRepository`] backed by a SeaORM connection.
#[derive(Clone, Debug)]
pub struct SeaEmployeeRepository {
    pool: DbPool,
}

impl SeaEmployeeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for SeaEmployeeRepository {
    #[instrument(name = "employees.get", skip(self))]
    async fn get(&self, id: i32) -> DbResult<Option<Employee>> {
        let found = employees::Entity::find_by_id(id).one(&self.pool).await?;
        Ok(found.map(Employee::from))
    }

    #[instrument(name = "employees.save", skip_all, fields(id = ?record.id))]
    async fn save(&self, record: Employee) -> DbResult<Employee> {
        let Employee {
            id,
            first_name,
            last_name,
            mail,
            password,
        } = record;

        let saved = match id {
            None => {
                employees::ActiveModel {
                    id: NotSet,
                    first_name: Set(first_name),
                    last_name: Set(last_name),
                    mail: Set(mail),
                    password: Set(password),
                }
                .insert(&self.pool)
                .await?
            }
            Some(id) => {
                let existing = employees::Entity::find_by_id(id)
                    .one(&self.pool)
                    .await?
                    .ok_or(DbError::NotFound(id))?;
                let mut active: employees::ActiveModel = existing.into();
                active.first_name = Set(first_name);
                active.last_name = Set(last_name);
                active.mail = Set(mail);
                active.password = Set(password);
                active
                    .update(&self.pool)
                    .await
                    .map_err(|err| update_error(id, err))?
            }
        };
        tracing::debug!(id = saved.id, "employee saved");
        Ok(saved.into())
    }

    #[instrument(name = "employees.delete", skip(self))]
    async fn delete(&self, id: i32) -> DbResult<bool> {
        let result = employees::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(name = "employees.list_all", skip(self))]
    async fn list_all(&self) -> DbResult<Vec<Employee>> {
        let rows = employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }
}
