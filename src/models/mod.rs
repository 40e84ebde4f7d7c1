// Modèles de données (une table PostgreSQL par module, via SeaORM)
//
//   - accounts : comptes utilisateurs, clé primaire = email
//   - sessions : sessions navigateur côté serveur (token hashé, expire 24h)
//
// Les tokens de reset ne sont PAS persistés: ils sont auto-porteurs
// et signés (voir utils::token)

pub mod accounts;
pub mod sessions;
