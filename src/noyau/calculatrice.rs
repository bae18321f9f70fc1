// src/noyau/calculatrice.rs
//
// Session de calcul : une table des symboles pour toute la durée de la session,
// et un point d’entrée unique `executer` pour la coquille (UI).
//
// executer : nettoyage -> traduction des alias -> déclaration OU évaluation

use super::erreur::Resultat;
use super::eval::{evaluer, Contexte, Expression, PROFONDEUR_MAX_DEFAUT};
use super::table::TableSymboles;

/// Retire tout blanc et traduit les alias de saisie : "//" -> '#', "**" -> '^'.
pub fn preparer_entree(entree: &str) -> String {
    let sans_blancs: String = entree.chars().filter(|c| !c.is_whitespace()).collect();
    sans_blancs.replace("//", "#").replace("**", "^")
}

#[derive(Clone, Debug)]
pub struct Calculatrice {
    table: TableSymboles,
    profondeur_max: usize,
}

impl Default for Calculatrice {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculatrice {
    pub fn new() -> Self {
        Self::avec_profondeur_max(PROFONDEUR_MAX_DEFAUT)
    }

    pub fn avec_profondeur_max(profondeur_max: usize) -> Self {
        Self {
            table: TableSymboles::new(),
            profondeur_max,
        }
    }

    /// Exécute une saisie.
    /// - Ok(None) : déclaration enregistrée
    /// - Ok(Some(v)) : valeur calculée
    pub fn executer(&mut self, entree: &str) -> Resultat<Option<f64>> {
        let prepare = preparer_entree(entree);
        let ctx = Contexte::racine(self.profondeur_max);

        log::debug!("executer {prepare:?}");

        if TableSymboles::est_declaration(&prepare) {
            self.table.declarer(&prepare, ctx)?;
            return Ok(None);
        }

        evaluer(&Expression::Texte(&prepare), &self.table, ctx).map(Some)
    }

    pub fn table(&self) -> &TableSymboles {
        &self.table
    }

    pub fn profondeur_max(&self) -> usize {
        self.profondeur_max
    }

    /// Nouvelle table (natives seulement) ; les réglages sont conservés.
    pub fn reinitialiser(&mut self) {
        self.table = TableSymboles::new();
    }
}
