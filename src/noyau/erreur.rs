// src/noyau/erreur.rs
//
// Taxonomie des échecs du noyau.
// Toutes ces erreurs sont récupérables au niveau de `Calculatrice::executer` :
// la session continue, la table n’est pas modifiée.

use std::fmt;

use thiserror::Error;

/// Cause d’un échec d’opérateur binaire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CauseOperation {
    DivisionParZero,
    OperandeNonEntier,
    Depassement,
    ResultatNonReel,
}

impl CauseOperation {
    /// Étiquette stable (journaux, tests).
    pub fn etiquette(self) -> &'static str {
        match self {
            CauseOperation::DivisionParZero => "division_by_zero",
            CauseOperation::OperandeNonEntier => "non_integer_operand",
            CauseOperation::Depassement => "overflow",
            CauseOperation::ResultatNonReel => "non_real_result",
        }
    }
}

impl fmt::Display for CauseOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let texte = match self {
            CauseOperation::DivisionParZero => "division par zéro",
            CauseOperation::OperandeNonEntier => "opération permise seulement sur des entiers",
            CauseOperation::Depassement => "dépassement de capacité",
            CauseOperation::ResultatNonReel => "résultat non réel",
        };
        f.write_str(texte)
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error("Erreur de syntaxe : {0}")]
    Syntaxe(String),

    #[error("Identifiant invalide : {0}")]
    IdentifiantInvalide(String),

    #[error("Opération impossible : {gauche} {operateur} {droite} - {cause}")]
    Operation {
        gauche: f64,
        operateur: &'static str,
        droite: f64,
        cause: CauseOperation,
    },

    #[error("Nombre d’arguments incorrect pour {fonction} : attendu {attendu}, reçu {recu}")]
    Arite {
        fonction: String,
        attendu: String,
        recu: usize,
    },

    #[error("Profondeur de récursion dépassée (limite {limite})")]
    LimiteRecursion { limite: usize },

    #[error("Échec de {fonction} : {message}")]
    Execution { fonction: String, message: String },

    #[error("Erreur interne : {0}")]
    Interne(String),
}

pub type Resultat<T> = Result<T, ErreurCalcul>;

/// Genre d’échec, tel que rendu par la coquille (“Genre: message”).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreErreur {
    Syntaxe,
    IdentifiantInvalide,
    Operation,
    Arite,
    LimiteRecursion,
    Execution,
    Interne,
}

impl GenreErreur {
    pub fn nom(self) -> &'static str {
        match self {
            GenreErreur::Syntaxe => "SyntaxError",
            GenreErreur::IdentifiantInvalide => "InvalidIdentifierError",
            GenreErreur::Operation => "OperationError",
            GenreErreur::Arite => "FunctionArityError",
            GenreErreur::LimiteRecursion => "RecursionLimitError",
            GenreErreur::Execution => "ExecutionError",
            GenreErreur::Interne => "InternalError",
        }
    }
}

impl fmt::Display for GenreErreur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

impl ErreurCalcul {
    pub fn genre(&self) -> GenreErreur {
        match self {
            ErreurCalcul::Syntaxe(_) => GenreErreur::Syntaxe,
            ErreurCalcul::IdentifiantInvalide(_) => GenreErreur::IdentifiantInvalide,
            ErreurCalcul::Operation { .. } => GenreErreur::Operation,
            ErreurCalcul::Arite { .. } => GenreErreur::Arite,
            ErreurCalcul::LimiteRecursion { .. } => GenreErreur::LimiteRecursion,
            ErreurCalcul::Execution { .. } => GenreErreur::Execution,
            ErreurCalcul::Interne(_) => GenreErreur::Interne,
        }
    }

    /// Raccourci : erreur de syntaxe.
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurCalcul::Syntaxe(msg.into())
    }

    /// Raccourci : identifiant invalide.
    pub fn identifiant(msg: impl Into<String>) -> Self {
        ErreurCalcul::IdentifiantInvalide(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_operation_complet() {
        let e = ErreurCalcul::Operation {
            gauche: 5.0,
            operateur: "//",
            droite: 0.0,
            cause: CauseOperation::DivisionParZero,
        };
        assert_eq!(e.to_string(), "Opération impossible : 5 // 0 - division par zéro");
        assert_eq!(e.genre().nom(), "OperationError");
    }

    #[test]
    fn etiquettes_stables() {
        assert_eq!(CauseOperation::DivisionParZero.etiquette(), "division_by_zero");
        assert_eq!(CauseOperation::OperandeNonEntier.etiquette(), "non_integer_operand");
        assert_eq!(CauseOperation::Depassement.etiquette(), "overflow");
    }

    #[test]
    fn genre_de_chaque_variante() {
        assert_eq!(ErreurCalcul::syntaxe("x").genre(), GenreErreur::Syntaxe);
        assert_eq!(
            ErreurCalcul::identifiant("x").genre(),
            GenreErreur::IdentifiantInvalide
        );
        assert_eq!(
            ErreurCalcul::LimiteRecursion { limite: 3 }.genre().to_string(),
            "RecursionLimitError"
        );
    }
}
