//! PostgreSQL adapter for PisteRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{NewPiste, Piste, PisteId};
use crate::domain::ports::PisteRepository;
use crate::entity::{pistes, skier_pistes};
use crate::error::DomainError;

/// PostgreSQL implementation of PisteRepository
pub struct PostgresPisteRepository {
    db: DatabaseConnection,
}

impl PostgresPisteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PisteRepository for PostgresPisteRepository {
    async fn find_all(&self) -> Result<Vec<Piste>, DomainError> {
        let results = pistes::Entity::find()
            .order_by_asc(pistes::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(Piste::try_from).collect()
    }

    async fn find_by_id(&self, id: &PisteId) -> Result<Option<Piste>, DomainError> {
        let result = pistes::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Piste::try_from).transpose()
    }

    async fn create(&self, piste: &NewPiste) -> Result<Piste, DomainError> {
        let model = pistes::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(piste.name.clone()),
            color: Set(piste.color.to_string()),
            length: Set(piste.length),
            slope: Set(piste.slope),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.try_into()
    }

    async fn delete_by_id(&self, id: &PisteId) -> Result<bool, DomainError> {
        let txn = self.db.begin().await?;

        skier_pistes::Entity::delete_many()
            .filter(skier_pistes::Column::PisteId.eq(id.0))
            .exec(&txn)
            .await?;

        let result = pistes::Entity::delete_by_id(id.0).exec(&txn).await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<pistes::Model> for Piste {
    type Error = DomainError;

    fn try_from(model: pistes::Model) -> Result<Self, Self::Error> {
        Ok(Piste {
            id: PisteId(model.id),
            name: model.name,
            color: model.color.parse().map_err(DomainError::Database)?,
            length: model.length,
            slope: model.slope,
        })
    }
}
