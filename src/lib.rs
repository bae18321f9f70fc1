// src/lib.rs
//
// Calculatrice λ : noyau d’évaluation + réglages.
// La coquille graphique (eframe) vit dans le binaire (main.rs + app/).

pub mod noyau;
pub mod reglages;

pub use noyau::{Calculatrice, ErreurCalcul, GenreErreur};
pub use reglages::{ErreurReglages, Reglages};
