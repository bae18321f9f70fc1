// src/noyau/table.rs
//
// Table des symboles : identifiant -> Liaison (nombre | fonction).
//
// Contrats :
// - les natives sont semées à la construction et jamais retirées
// - une déclaration peut masquer une native ou une déclaration précédente
// - déclaration tout-ou-rien : rien n’est écrit si le membre droit échoue
//
// Pas de synchronisation interne : une table partagée entre threads
// doit être protégée par l’appelant.

use std::collections::HashMap;
use std::sync::Arc;

use super::erreur::{ErreurCalcul, Resultat};
use super::eval::{evaluer, Contexte, Expression};
use super::fonctions::{Fonction, NATIVES};
use super::lambda::{construire_fonction, est_definition_fonction};

#[derive(Clone, Debug)]
pub enum Liaison {
    Nombre(f64),
    Fonction(Arc<Fonction>),
}

#[derive(Clone, Debug, Default)]
pub struct TableSymboles {
    liaisons: HashMap<String, Liaison>,
}

/// Règle des identifiants : non vide, commence par une lettre ASCII,
/// puis lettres, chiffres ou '_'.
pub fn valider_identifiant(nom: &str) -> Resultat<()> {
    let mut chars = nom.chars();

    let Some(premier) = chars.next() else {
        return Err(ErreurCalcul::identifiant("identifiant vide"));
    };

    if !premier.is_ascii_alphabetic() {
        return Err(ErreurCalcul::identifiant(format!(
            "'{nom}' doit commencer par une lettre"
        )));
    }

    if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(ErreurCalcul::identifiant(format!(
            "le symbole '{c}' est interdit dans un identifiant ('{nom}')"
        )));
    }

    Ok(())
}

impl TableSymboles {
    /// Table de session : natives incluses.
    pub fn new() -> Self {
        let mut t = Self::vide();
        for native in NATIVES.iter() {
            t.lier(native.nom, Liaison::Fonction(Arc::new(Fonction::Native(native))));
        }
        t
    }

    /// Table sans aucune liaison.
    pub fn vide() -> Self {
        Self::default()
    }

    /// Signal grossier, vérifié avant toute analyse : la saisie contient '='.
    pub fn est_declaration(entree: &str) -> bool {
        entree.contains('=')
    }

    /// Déclare "id=expr" ou "id=lambda(p,...):corps".
    ///
    /// Le membre droit est évalué sur la table COURANTE (x=2*x+1 lit l’ancien x),
    /// et la liaison n’est remplacée qu’en cas de succès.
    pub fn declarer(&mut self, entree: &str, ctx: Contexte) -> Resultat<()> {
        let mut parties = entree.split('=');
        let (Some(identifiant), Some(valeur), None) = (parties.next(), parties.next(), parties.next())
        else {
            return Err(ErreurCalcul::syntaxe(format!(
                "déclaration attendue sous la forme identifiant=expression : {entree}"
            )));
        };

        valider_identifiant(identifiant)?;

        let liaison = if est_definition_fonction(valeur) {
            Liaison::Fonction(Arc::new(construire_fonction(valeur)?))
        } else {
            Liaison::Nombre(evaluer(&Expression::Texte(valeur), self, ctx)?)
        };

        log::trace!("déclaration {identifiant} = {valeur}");
        self.lier(identifiant, liaison);
        Ok(())
    }

    /// Écrit (ou remplace) une liaison, sans validation.
    pub fn lier(&mut self, nom: impl Into<String>, liaison: Liaison) {
        self.liaisons.insert(nom.into(), liaison);
    }

    pub fn chercher(&self, nom: &str) -> Option<&Liaison> {
        self.liaisons.get(nom)
    }

    /// Valeur d’une variable ; une fonction utilisée nue est une erreur.
    pub fn nombre(&self, nom: &str) -> Resultat<f64> {
        match self.chercher(nom) {
            Some(Liaison::Nombre(v)) => Ok(*v),
            Some(Liaison::Fonction(_)) => Err(ErreurCalcul::identifiant(format!(
                "'{nom}' est une fonction : appel attendu, ex. {nom}(...)"
            ))),
            None => Err(ErreurCalcul::identifiant(format!("'{nom}' n’est pas défini"))),
        }
    }

    /// Fonction liée à `nom` ; appeler une variable est une erreur.
    pub fn fonction(&self, nom: &str) -> Resultat<&Arc<Fonction>> {
        match self.chercher(nom) {
            Some(Liaison::Fonction(f)) => Ok(f),
            Some(Liaison::Nombre(_)) => Err(ErreurCalcul::identifiant(format!(
                "'{nom}' est une variable, pas une fonction"
            ))),
            None => Err(ErreurCalcul::identifiant(format!(
                "fonction '{nom}' inconnue"
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.liaisons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liaisons.is_empty()
    }

    /// Vue triée par nom (affichage).
    pub fn iter_triee(&self) -> Vec<(&str, &Liaison)> {
        let mut v: Vec<(&str, &Liaison)> = self
            .liaisons
            .iter()
            .map(|(k, l)| (k.as_str(), l))
            .collect();
        v.sort_by(|a, b| a.0.cmp(b.0));
        v
    }
}
