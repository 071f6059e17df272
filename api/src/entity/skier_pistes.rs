use sea_orm::entity::prelude::*;

/// Join table between skiers and pistes.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "skier_pistes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub skier_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub piste_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::skiers::Entity",
        from = "Column::SkierId",
        to = "super::skiers::Column::Id"
    )]
    Skier,
    #[sea_orm(
        belongs_to = "super::pistes::Entity",
        from = "Column::PisteId",
        to = "super::pistes::Column::Id"
    )]
    Piste,
}

impl Related<super::skiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Skier.def()
    }
}

impl Related<super::pistes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Piste.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
