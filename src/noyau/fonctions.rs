// src/noyau/fonctions.rs
//
// Fonctions appelables depuis une expression : natives (max, min, abs, sqrt, pow)
// ou définies par l’utilisateur via lambda.
//
// Contrat commun : un appel ne modifie JAMAIS la table de l’appelant.
// Les fonctions utilisateur travaillent sur une copie locale, étendue des paramètres.

use std::fmt;

use super::erreur::{ErreurCalcul, Resultat};
use super::eval::{evaluer, Contexte, Expression};
use super::table::{Liaison, TableSymboles};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arite {
    Fixe(usize),
    AuMoins(usize),
}

impl Arite {
    pub fn accepte(self, n: usize) -> bool {
        match self {
            Arite::Fixe(k) => n == k,
            Arite::AuMoins(k) => n >= k,
        }
    }
}

impl fmt::Display for Arite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arite::Fixe(k) => write!(f, "{k}"),
            Arite::AuMoins(k) => write!(f, "au moins {k}"),
        }
    }
}

/* ------------------------ Natives ------------------------ */

type CalculNatif = fn(&[f64]) -> Result<f64, String>;

#[derive(Debug)]
pub struct FonctionNative {
    pub nom: &'static str,
    pub arite: Arite,
    calcul: CalculNatif,
}

/// Catalogue des natives, semées dans chaque table neuve.
pub static NATIVES: [FonctionNative; 5] = [
    FonctionNative {
        nom: "max",
        arite: Arite::AuMoins(1),
        calcul: maximum,
    },
    FonctionNative {
        nom: "min",
        arite: Arite::AuMoins(1),
        calcul: minimum,
    },
    FonctionNative {
        nom: "abs",
        arite: Arite::Fixe(1),
        calcul: valeur_absolue,
    },
    FonctionNative {
        nom: "sqrt",
        arite: Arite::Fixe(1),
        calcul: racine,
    },
    FonctionNative {
        nom: "pow",
        arite: Arite::Fixe(2),
        calcul: puissance,
    },
];

fn maximum(args: &[f64]) -> Result<f64, String> {
    Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

fn minimum(args: &[f64]) -> Result<f64, String> {
    Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
}

fn valeur_absolue(args: &[f64]) -> Result<f64, String> {
    Ok(args[0].abs())
}

fn racine(args: &[f64]) -> Result<f64, String> {
    let x = args[0];
    if x < 0.0 {
        return Err(format!("domaine mathématique : racine de {x}"));
    }
    Ok(x.sqrt())
}

fn puissance(args: &[f64]) -> Result<f64, String> {
    let (x, y) = (args[0], args[1]);
    if x == 0.0 && y < 0.0 {
        return Err("division par zéro".into());
    }

    let r = x.powf(y);
    if x.is_finite() && y.is_finite() {
        if r.is_nan() {
            return Err(format!("résultat non réel pour {x} ** {y}"));
        }
        if r.is_infinite() {
            return Err("dépassement de capacité".into());
        }
    }
    Ok(r)
}

/* ------------------------ Utilisateur ------------------------ */

/// Fonction définie par "lambda(p1,p2,...):corps".
/// Le corps est gardé en texte (déjà nettoyé) et réévalué à chaque appel.
#[derive(Clone, Debug, PartialEq)]
pub struct FonctionUtilisateur {
    pub parametres: Vec<String>,
    pub corps: String,
}

impl FonctionUtilisateur {
    /// Appel positionnel strict (pas d’application partielle).
    ///
    /// `table` : table de l’appelant au moment de l’appel ; elle est COPIÉE.
    /// Sans table, on part d’une table vide (sans natives).
    pub fn appeler(
        &self,
        nom: &str,
        args: &[f64],
        table: Option<&TableSymboles>,
        ctx: Contexte,
    ) -> Resultat<f64> {
        if args.len() != self.parametres.len() {
            return Err(ErreurCalcul::Arite {
                fonction: nom.to_string(),
                attendu: self.parametres.len().to_string(),
                recu: args.len(),
            });
        }

        let mut locale = table.cloned().unwrap_or_else(TableSymboles::vide);
        for (parametre, valeur) in self.parametres.iter().zip(args) {
            locale.lier(parametre, Liaison::Nombre(*valeur));
        }

        log::trace!("appel {nom}({}) avec {args:?}", self.parametres.join(","));
        evaluer(&Expression::Texte(&self.corps), &locale, ctx)
    }
}

/* ------------------------ Fonction (somme) ------------------------ */

#[derive(Clone, Debug)]
pub enum Fonction {
    Native(&'static FonctionNative),
    Utilisateur(FonctionUtilisateur),
}

impl Fonction {
    /// Invoque la fonction sous le nom `nom` (utilisé dans les messages).
    pub fn appeler(
        &self,
        nom: &str,
        args: &[f64],
        table: Option<&TableSymboles>,
        ctx: Contexte,
    ) -> Resultat<f64> {
        match self {
            Fonction::Native(native) => {
                if !native.arite.accepte(args.len()) {
                    return Err(ErreurCalcul::Arite {
                        fonction: nom.to_string(),
                        attendu: native.arite.to_string(),
                        recu: args.len(),
                    });
                }
                (native.calcul)(args).map_err(|message| ErreurCalcul::Execution {
                    fonction: nom.to_string(),
                    message,
                })
            }
            Fonction::Utilisateur(u) => u.appeler(nom, args, table, ctx),
        }
    }
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fonction::Native(n) => write!(f, "native, arité {}", n.arite),
            Fonction::Utilisateur(u) => write!(f, "lambda({}):{}", u.parametres.join(","), u.corps),
        }
    }
}
