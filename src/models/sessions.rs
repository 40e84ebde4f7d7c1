use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Session navigateur côté serveur.
/// Seul le hash SHA-256 du token est stocké; le token brut ne voyage
/// que dans le cookie HttpOnly de l'utilisateur
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub token_hash: String,

    pub email: String,

    pub created_at: DateTimeUtc,

    /// created_at + 24 heures; les lignes expirées sont ignorées au
    /// lookup et purgées paresseusement
    pub expires_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::Email",
        to = "super::accounts::Column::Email"
    )]
    Account,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
