// src/reglages.rs
//
// Réglages de la calculatrice (TOML) :
//
//   [noyau]
//   profondeur_max = 200
//
//   [session]
//   historique_max = 100
//
// Ordre d’application : défauts -> fichier -> variables d’environnement -> validation.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::noyau::eval::{PROFONDEUR_MAX_DEFAUT, PROFONDEUR_MAX_PLAFOND};

/// Fichier cherché dans le répertoire courant quand `CALCULATRICE_CONFIG` est absent.
pub const FICHIER_DEFAUT: &str = "calculatrice.toml";

pub const ENV_CONFIG: &str = "CALCULATRICE_CONFIG";
pub const ENV_PROFONDEUR_MAX: &str = "CALCULATRICE_PROFONDEUR_MAX";
pub const ENV_HISTORIQUE_MAX: &str = "CALCULATRICE_HISTORIQUE_MAX";

#[derive(Error, Debug)]
pub enum ErreurReglages {
    #[error("erreur d’entrée/sortie : {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML invalide : {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("écriture TOML impossible : {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("réglage invalide : {0}")]
    Validation(String),
}

pub type ResultatReglages<T> = Result<T, ErreurReglages>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReglagesNoyau {
    /// Profondeur d’évaluation imbriquée au-delà de laquelle on échoue.
    pub profondeur_max: usize,
}

impl Default for ReglagesNoyau {
    fn default() -> Self {
        Self {
            profondeur_max: PROFONDEUR_MAX_DEFAUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReglagesSession {
    /// Nombre de lignes gardées dans l’historique affiché.
    pub historique_max: usize,
}

impl Default for ReglagesSession {
    fn default() -> Self {
        Self {
            historique_max: 100,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub noyau: ReglagesNoyau,
    pub session: ReglagesSession,
}

impl Reglages {
    /// Lit un fichier TOML seul (clés manquantes = défauts), sans environnement ni validation.
    pub fn lire_fichier<P: AsRef<Path>>(chemin: P) -> ResultatReglages<Self> {
        let contenu = fs::read_to_string(chemin.as_ref())?;
        Ok(toml::from_str(&contenu)?)
    }

    /// Fichier, puis variables d’environnement, puis validation.
    pub fn charger_depuis_fichier<P: AsRef<Path>>(chemin: P) -> ResultatReglages<Self> {
        let mut reglages = Self::lire_fichier(chemin)?;
        reglages.appliquer_env();
        reglages.valider()?;
        Ok(reglages)
    }

    /// Chargement au démarrage : ne bloque jamais l’application.
    /// Un fichier illisible ou invalide est signalé (warn) puis ignoré.
    pub fn charger() -> Self {
        let chemin = Self::chemin_fichier();

        if chemin.exists() {
            match Self::charger_depuis_fichier(&chemin) {
                Ok(r) => return r,
                Err(e) => log::warn!("réglages ignorés ({}) : {e}", chemin.display()),
            }
        }

        let mut reglages = Self::default();
        reglages.appliquer_env();
        if let Err(e) = reglages.valider() {
            log::warn!("variables d’environnement ignorées : {e}");
            return Self::default();
        }
        reglages
    }

    pub fn chemin_fichier() -> PathBuf {
        env::var_os(ENV_CONFIG)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(FICHIER_DEFAUT))
    }

    pub fn appliquer_env(&mut self) {
        self.appliquer_variables(|cle| env::var(cle).ok());
    }

    /// Surcharges depuis une source de variables quelconque.
    /// Une valeur non numérique est ignorée.
    pub fn appliquer_variables<F>(&mut self, lire: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(n) = lire(ENV_PROFONDEUR_MAX).and_then(|v| v.trim().parse::<usize>().ok()) {
            self.noyau.profondeur_max = n;
        }
        if let Some(n) = lire(ENV_HISTORIQUE_MAX).and_then(|v| v.trim().parse::<usize>().ok()) {
            self.session.historique_max = n;
        }
    }

    pub fn valider(&self) -> ResultatReglages<()> {
        if !(1..=PROFONDEUR_MAX_PLAFOND).contains(&self.noyau.profondeur_max) {
            return Err(ErreurReglages::Validation(format!(
                "noyau.profondeur_max doit être entre 1 et {PROFONDEUR_MAX_PLAFOND} (reçu {})",
                self.noyau.profondeur_max
            )));
        }
        if self.session.historique_max == 0 {
            return Err(ErreurReglages::Validation(
                "session.historique_max doit être au moins 1".into(),
            ));
        }
        Ok(())
    }

    pub fn vers_toml(&self) -> ResultatReglages<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
