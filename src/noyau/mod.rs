//! Noyau de calcul (nombres flottants, arrondi à 2 décimales)
//!
//! Organisation interne :
//! - parentheses.rs : appariement, parenthèses externes, équilibre
//! - arrondi.rs     : arrondi exact demi-pair (BigRational)
//! - operateurs.rs  : table des opérateurs binaires (+ - * / # % ^) par bandes
//! - appel.rs       : reconnaissance de nom(arg, ...)
//! - fonctions.rs   : natives + fonctions utilisateur (copie de table à l’appel)
//! - lambda.rs      : construction depuis "lambda(x,y):corps"
//! - table.rs       : table des symboles + déclarations
//! - eval.rs        : évaluation récursive par découpage en bandes
//! - calculatrice.rs: session (point d’entrée unique)

pub mod appel;
pub mod arrondi;
pub mod calculatrice;
pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod lambda;
pub mod operateurs;
pub mod parentheses;
pub mod table;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use calculatrice::{preparer_entree, Calculatrice};
pub use erreur::{CauseOperation, ErreurCalcul, GenreErreur, Resultat};
pub use eval::{evaluer, evaluer_chaine, Contexte, Expression};
pub use fonctions::Fonction;
pub use table::{Liaison, TableSymboles};
