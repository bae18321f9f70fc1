//! Propriétés (proptest) : comportements qui doivent tenir pour toute entrée.
//!
//! - "a op b" évalué = opérateur appliqué directement (valeur OU erreur identique)
//! - retirer_parentheses_externes est idempotente
//! - entourer une expression de parenthèses ne change pas sa valeur
//! - executer ne panique jamais, quelle que soit la saisie

use proptest::prelude::*;

use super::calculatrice::Calculatrice;
use super::eval::evaluer_chaine;
use super::operateurs::depuis_symbole;
use super::parentheses::retirer_parentheses_externes;
use super::table::TableSymboles;

const SYMBOLES: [char; 7] = ['+', '-', '*', '/', '#', '%', '^'];

/// Littéral décimal positif, au plus deux décimales.
fn litteral() -> impl Strategy<Value = String> {
    (0u32..100_000, 0u32..100, any::<bool>()).prop_map(|(ent, dec, avec_dec)| {
        if avec_dec {
            format!("{ent}.{dec:02}")
        } else {
            format!("{ent}")
        }
    })
}

/// Petite expression bien formée (profondeur bornée).
fn expression() -> impl Strategy<Value = String> {
    let feuille = (0u32..50).prop_map(|n| n.to_string());
    feuille.prop_recursive(4, 16, 2, |interne| {
        prop_oneof![
            (interne.clone(), interne.clone()).prop_map(|(a, b)| format!("{a}+{b}")),
            (interne.clone(), interne.clone()).prop_map(|(a, b)| format!("{a}-{b}")),
            (interne.clone(), interne.clone()).prop_map(|(a, b)| format!("({a})*({b})")),
            interne.prop_map(|a| format!("-({a})")),
        ]
    })
}

proptest! {
    #[test]
    fn operation_textuelle_egale_operation_directe(
        a in litteral(),
        b in litteral(),
        idx in 0usize..SYMBOLES.len(),
    ) {
        let symbole = SYMBOLES[idx];
        let Some(op) = depuis_symbole(symbole) else {
            panic!("symbole {symbole:?} absent de la table");
        };

        let x: f64 = a.parse().unwrap();
        let y: f64 = b.parse().unwrap();

        let table = TableSymboles::new();
        let texte = evaluer_chaine(&format!("{a}{symbole}{b}"), &table);

        prop_assert_eq!(texte, op.appliquer(x, y));
    }

    #[test]
    fn retrait_des_parentheses_idempotent(s in "[()0-9+*x]{0,24}") {
        let une_fois = retirer_parentheses_externes(&s);
        prop_assert_eq!(retirer_parentheses_externes(une_fois), une_fois);
    }

    #[test]
    fn parentheses_externes_neutres(e in expression()) {
        let table = TableSymboles::new();
        let nu = evaluer_chaine(&e, &table);
        let entoure = evaluer_chaine(&format!("(({e}))"), &table);
        prop_assert_eq!(nu, entoure);
    }

    #[test]
    fn executer_ne_panique_jamais(entree in "[0-9a-z+\\-*/%^().,=: ]{0,40}") {
        let mut c = Calculatrice::new();
        let _ = c.executer(&entree);
    }
}
