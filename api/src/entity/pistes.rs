use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pistes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub length: i32,
    pub slope: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::skier_pistes::Entity")]
    SkierPistes,
}

impl Related<super::skier_pistes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SkierPistes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
