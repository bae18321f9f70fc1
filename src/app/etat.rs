//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, session de calcul, historique, erreur)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune analyse ici : tout passe par `Calculatrice::executer`.
//! - Historique borné (réglage `session.historique_max`), plus ancien retiré en premier.
//! - Une erreur n’efface pas l’historique ni la table des symboles.

use std::collections::VecDeque;

use calculatrice_lambda::noyau::{Calculatrice, ErreurCalcul};
use calculatrice_lambda::Reglages;

/// Ce qu’a produit une saisie.
#[derive(Clone, Debug, PartialEq)]
pub enum Sortie {
    Valeur(f64),
    Declaration,
    Erreur(String),
}

impl Sortie {
    pub fn depuis_resultat(r: Result<Option<f64>, ErreurCalcul>) -> Self {
        match r {
            Ok(Some(v)) => Sortie::Valeur(v),
            Ok(None) => Sortie::Declaration,
            Err(e) => Sortie::Erreur(format_erreur(&e)),
        }
    }

    /// Texte affiché : la valeur, "OK", ou "Genre: message".
    pub fn texte(&self) -> String {
        match self {
            Sortie::Valeur(v) => format!("{v}"),
            Sortie::Declaration => "OK".to_string(),
            Sortie::Erreur(msg) => msg.clone(),
        }
    }

    pub fn est_erreur(&self) -> bool {
        matches!(self, Sortie::Erreur(_))
    }
}

/// "SyntaxError: parenthèses non fermées : 5+(1"
pub fn format_erreur(e: &ErreurCalcul) -> String {
    format!("{}: {e}", e.genre())
}

#[derive(Clone, Debug, PartialEq)]
pub struct LigneHistorique {
    pub entree: String,
    pub sortie: Sortie,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- session (table des symboles vivante) ---
    pub session: Calculatrice,

    // --- sorties ---
    pub historique: VecDeque<LigneHistorique>,
    pub erreur: String, // dernière erreur (affichée sous l’entrée)

    // --- paramètres ---
    pub historique_max: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_reglages(&Reglages::default())
    }
}

impl AppCalc {
    pub fn avec_reglages(reglages: &Reglages) -> Self {
        Self {
            entree: String::new(),
            session: Calculatrice::avec_profondeur_max(reglages.noyau.profondeur_max),
            historique: VecDeque::new(),
            erreur: String::new(),
            historique_max: reglages.session.historique_max.max(1),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + historique + table des symboles).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_historique();
        self.session.reinitialiser();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer historique + erreur (la table des symboles reste).
    pub fn clear_historique(&mut self) {
        self.historique.clear();
        self.erreur.clear();
        self.focus_entree = true;
    }

    /// Exécute l’entrée courante et l’inscrit dans l’historique.
    /// Entrée vide (après trim) : rien n’est exécuté.
    pub fn executer_entree(&mut self) {
        let saisie = self.entree.trim().to_string();
        if saisie.is_empty() {
            self.focus_entree = true;
            return;
        }

        let sortie = Sortie::depuis_resultat(self.session.executer(&saisie));
        self.enregistrer(saisie, sortie);

        // Comme un terminal : on garde la saisie fautive pour la corriger.
        if self.erreur.is_empty() {
            self.entree.clear();
        }
        self.focus_entree = true;
    }

    /// Ajoute une ligne ; l’erreur courante suit la dernière sortie.
    pub fn enregistrer(&mut self, entree: String, sortie: Sortie) {
        match &sortie {
            Sortie::Erreur(msg) => self.erreur = msg.clone(),
            _ => self.erreur.clear(),
        }

        self.historique.push_back(LigneHistorique { entree, sortie });
        while self.historique.len() > self.historique_max {
            self.historique.pop_front();
        }
    }
}
