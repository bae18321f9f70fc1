// src/noyau/operateurs.rs
//
// Table des opérateurs binaires (flyweight) :
// une seule instance statique par symbole, adressée par `depuis_symbole`.
//
// | symbole | bande | assoc. | garde-fous                                   |
// |---------|-------|--------|----------------------------------------------|
// | + -     | 1     | gauche | aucun                                        |
// | * / # % | 2     | gauche | / # % : droite ≠ 0 ; # % : opérandes entiers |
// | ^       | 3     | droite | dépassement, résultat non réel               |
//
// Tout résultat est arrondi à 2 décimales.

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

use super::erreur::{CauseOperation, ErreurCalcul, Resultat};
use super::arrondi::arrondir;

/// Nombre de décimales conservées après chaque opération.
pub const DECIMALES: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bande {
    Additive,
    Multiplicative,
    Puissance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativite {
    Gauche,
    Droite,
}

impl Bande {
    /// Ordre de découpage : la bande la plus faible d’abord.
    pub const ORDRE: [Bande; 3] = [Bande::Additive, Bande::Multiplicative, Bande::Puissance];

    pub fn symboles(self) -> &'static [char] {
        match self {
            Bande::Additive => &['+', '-'],
            Bande::Multiplicative => &['*', '/', '#', '%'],
            Bande::Puissance => &['^'],
        }
    }

    pub fn associativite(self) -> Associativite {
        match self {
            Bande::Puissance => Associativite::Droite,
            _ => Associativite::Gauche,
        }
    }
}

type FonctionBinaire = fn(f64, f64) -> Result<f64, CauseOperation>;

#[derive(Debug)]
pub struct OperateurBinaire {
    pub symbole: char,
    /// Forme affichée (messages d’erreur) : "//" pour '#', "**" pour '^'.
    pub affichage: &'static str,
    pub bande: Bande,
    fonction: FonctionBinaire,
}

impl OperateurBinaire {
    /// Applique l’opérateur puis arrondit.
    pub fn appliquer(&self, gauche: f64, droite: f64) -> Resultat<f64> {
        let brut = (self.fonction)(gauche, droite).map_err(|cause| ErreurCalcul::Operation {
            gauche,
            operateur: self.affichage,
            droite,
            cause,
        })?;
        Ok(arrondir(brut, DECIMALES))
    }

    pub fn associativite(&self) -> Associativite {
        self.bande.associativite()
    }
}

/* ------------------------ Instances (flyweight) ------------------------ */

static ADDITION: OperateurBinaire = OperateurBinaire {
    symbole: '+',
    affichage: "+",
    bande: Bande::Additive,
    fonction: additionner,
};

static SOUSTRACTION: OperateurBinaire = OperateurBinaire {
    symbole: '-',
    affichage: "-",
    bande: Bande::Additive,
    fonction: soustraire,
};

static MULTIPLICATION: OperateurBinaire = OperateurBinaire {
    symbole: '*',
    affichage: "*",
    bande: Bande::Multiplicative,
    fonction: multiplier,
};

static DIVISION: OperateurBinaire = OperateurBinaire {
    symbole: '/',
    affichage: "/",
    bande: Bande::Multiplicative,
    fonction: diviser,
};

static DIVISION_ENTIERE: OperateurBinaire = OperateurBinaire {
    symbole: '#',
    affichage: "//",
    bande: Bande::Multiplicative,
    fonction: diviser_entier,
};

static MODULO: OperateurBinaire = OperateurBinaire {
    symbole: '%',
    affichage: "%",
    bande: Bande::Multiplicative,
    fonction: modulo,
};

static PUISSANCE: OperateurBinaire = OperateurBinaire {
    symbole: '^',
    affichage: "**",
    bande: Bande::Puissance,
    fonction: puissance,
};

/// Opérateur associé à un symbole interne, en O(1).
pub fn depuis_symbole(symbole: char) -> Option<&'static OperateurBinaire> {
    match symbole {
        '+' => Some(&ADDITION),
        '-' => Some(&SOUSTRACTION),
        '*' => Some(&MULTIPLICATION),
        '/' => Some(&DIVISION),
        '#' => Some(&DIVISION_ENTIERE),
        '%' => Some(&MODULO),
        '^' => Some(&PUISSANCE),
        _ => None,
    }
}

pub fn est_symbole_operateur(c: char) -> bool {
    depuis_symbole(c).is_some()
}

/* ------------------------ Fonctions + garde-fous ------------------------ */

fn additionner(a: f64, b: f64) -> Result<f64, CauseOperation> {
    Ok(a + b)
}

fn soustraire(a: f64, b: f64) -> Result<f64, CauseOperation> {
    Ok(a - b)
}

fn multiplier(a: f64, b: f64) -> Result<f64, CauseOperation> {
    Ok(a * b)
}

fn diviser(a: f64, b: f64) -> Result<f64, CauseOperation> {
    if b == 0.0 {
        return Err(CauseOperation::DivisionParZero);
    }
    Ok(a / b)
}

fn diviser_entier(a: f64, b: f64) -> Result<f64, CauseOperation> {
    let (q, _r) = division_plancher(a, b)?;
    q.to_f64().ok_or(CauseOperation::Depassement)
}

fn modulo(a: f64, b: f64) -> Result<f64, CauseOperation> {
    let (_q, r) = division_plancher(a, b)?;
    r.to_f64().ok_or(CauseOperation::Depassement)
}

fn puissance(a: f64, b: f64) -> Result<f64, CauseOperation> {
    if a == 0.0 && b < 0.0 {
        return Err(CauseOperation::DivisionParZero);
    }

    let r = a.powf(b);
    let operandes_finis = a.is_finite() && b.is_finite();

    if r.is_nan() && operandes_finis {
        // base négative, exposant fractionnaire
        return Err(CauseOperation::ResultatNonReel);
    }
    if r.is_infinite() && operandes_finis {
        return Err(CauseOperation::Depassement);
    }
    Ok(r)
}

fn est_entier(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0
}

fn vers_entier(x: f64) -> Result<BigInt, CauseOperation> {
    if !est_entier(x) {
        return Err(CauseOperation::OperandeNonEntier);
    }
    BigInt::from_f64(x).ok_or(CauseOperation::OperandeNonEntier)
}

/// Division “plancher” exacte : quotient arrondi vers −∞,
/// reste du signe du diviseur (7 // -2 = -4, 7 % -2 = -1).
fn division_plancher(a: f64, b: f64) -> Result<(BigInt, BigInt), CauseOperation> {
    if b == 0.0 {
        return Err(CauseOperation::DivisionParZero);
    }

    let a = vers_entier(a)?;
    let b = vers_entier(b)?;

    let mut q = &a / &b;
    let mut r = &a % &b;

    if !r.is_zero() && r.is_negative() != b.is_negative() {
        q -= 1u32;
        r += &b;
    }

    Ok((q, r))
}
