use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// Plain-text on purpose: the whole point of this app is to show what
    /// an attacker gets out of an injectable login form.
    pub password: String,

    #[sea_orm(unique)]
    pub email: String,

    /// One of `admin`, `user`, or `moderator`.
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
