use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub type_sub: String,
    pub price: f32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::skiers::Entity")]
    Skier,
}

impl Related<super::skiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Skier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
