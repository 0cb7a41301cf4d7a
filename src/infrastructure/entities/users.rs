use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub name: String,
    pub email: String,
    /// Relative storage path, `NULL` or empty when the user has no custom avatar
    #[sea_orm(nullable)]
    pub avatar: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub signature: String,
    pub trust_level: i32,
    /// 0/1 flag
    pub two_factor_auth_email: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
