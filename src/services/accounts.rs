use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, SqlErr};

use crate::errors::AuthError;
use crate::models::accounts::{ActiveModel as AccountActiveModel, Entity as Accounts, Model as Account};
use crate::utils::password;

/// Profil soumis par le formulaire d'inscription (hors mot de passe)
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub registration_number: String,
}

pub struct AccountService;

impl AccountService {
    /// Crée un compte: hash le mot de passe puis insère.
    /// L'insert est inconditionnel — un doublon est rejeté par la
    /// contrainte de clé primaire sur l'email, ce qui ferme la course
    /// entre deux inscriptions concurrentes
    pub async fn register(
        db: &DatabaseConnection,
        profile: NewAccount,
        raw_password: &str,
    ) -> Result<Account, AuthError> {
        let password_hash = password::hash_password(raw_password)?;

        let new_account = AccountActiveModel {
            email: Set(profile.email),
            name: Set(profile.name),
            phone_number: Set(profile.phone_number),
            address: Set(profile.address),
            registration_number: Set(profile.registration_number),
            password_hash: Set(password_hash),
        };

        match new_account.insert(db).await {
            Ok(account) => Ok(account),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AuthError::DuplicateAccount),
                _ => Err(AuthError::Database(err)),
            },
        }
    }

    /// Retourne le compte associé à un email, ou NotFound
    pub async fn find(db: &DatabaseConnection, email: &str) -> Result<Account, AuthError> {
        Accounts::find_by_id(email.to_string())
            .one(db)
            .await?
            .ok_or(AuthError::NotFound)
    }

    /// Vérifie un couple email / mot de passe et retourne le compte.
    /// Email inconnu et mot de passe faux produisent la même erreur
    pub async fn authenticate(
        db: &DatabaseConnection,
        email: &str,
        raw_password: &str,
    ) -> Result<Account, AuthError> {
        let account = match Self::find(db, email).await {
            Ok(account) => account,
            Err(AuthError::NotFound) => return Err(AuthError::InvalidCredentials),
            Err(err) => return Err(err),
        };

        if password::verify_password(raw_password, &account.password_hash)? {
            Ok(account)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Remplace le hash stocké (seule mutation d'un compte existant)
    pub async fn update_password(
        db: &DatabaseConnection,
        email: &str,
        raw_password: &str,
    ) -> Result<(), AuthError> {
        let account = Self::find(db, email).await?;
        let new_hash = password::hash_password(raw_password)?;

        let mut active: AccountActiveModel = account.into();
        active.password_hash = Set(new_hash);
        active.update(db).await?;

        Ok(())
    }
}
