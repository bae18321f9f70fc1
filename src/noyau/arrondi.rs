// src/noyau/arrondi.rs
//
// Arrondi décimal exact d’un f64 à n décimales.
//
// Un f64 est un rationnel dyadique exact. On le convertit en BigRational,
// on arrondit (demi-pair) sur la valeur exacte ×10^n, puis on relit le texte
// décimal obtenu. Ainsi 2.675 (qui vaut 2.67499999…) donne 2.67, et 0.125 donne 0.12.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/* ------------------------ Décimal (entier ×10^n -> texte) ------------------------ */

fn puissance_de_dix(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// Convertit un entier mis à l’échelle (×10^chiffres) en texte décimal.
pub fn echelle_vers_decimal(mut entier: BigInt, chiffres: u32) -> String {
    let negatif = entier.is_negative();
    if negatif {
        entier = -entier;
    }

    let echelle = puissance_de_dix(chiffres);
    let partie_entiere = &entier / &echelle;
    let partie_decimale = &entier % &echelle;

    let signe = if negatif { "-" } else { "" };

    if chiffres == 0 {
        return format!("{signe}{partie_entiere}");
    }

    let decimales = partie_decimale.to_str_radix(10);
    let largeur = chiffres as usize;
    format!("{signe}{partie_entiere}.{decimales:0>largeur$}")
}

/* ------------------------ Arrondi demi-pair ------------------------ */

/// Entier le plus proche de r ; à égalité, l’entier pair.
fn arrondi_demi_pair(r: &BigRational) -> BigInt {
    let plancher = r.floor();
    let reste = r - &plancher;
    let base = plancher.to_integer();
    let demi = BigRational::new(BigInt::one(), BigInt::from(2));

    match reste.cmp(&demi) {
        Ordering::Less => base,
        Ordering::Greater => base + 1u32,
        Ordering::Equal => {
            if (&base % 2u32).is_zero() {
                base
            } else {
                base + 1u32
            }
        }
    }
}

/// Arrondit `x` à `decimales` chiffres après la virgule.
/// Non fini (inf, NaN) : renvoyé tel quel.
pub fn arrondir(x: f64, decimales: u32) -> f64 {
    let Some(exact) = BigRational::from_float(x) else {
        return x;
    };

    let echelle = BigRational::from_integer(puissance_de_dix(decimales));
    let arrondi = arrondi_demi_pair(&(exact * echelle));

    // Le texte décimal est toujours lisible ; repli sur x.
    echelle_vers_decimal(arrondi, decimales)
        .parse::<f64>()
        .unwrap_or(x)
}
