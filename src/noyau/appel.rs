// src/noyau/appel.rs
//
// Lecture d’un appel de fonction : "nom(arg1,arg2,...)" -> (nom, ["arg1", "arg2", ...]).
// Les arguments restent du texte brut : l’évaluateur s’en charge ensuite.

use super::erreur::{ErreurCalcul, Resultat};
use super::parentheses::{position_fermante, retirer_parentheses_externes};

#[derive(Clone, Debug, PartialEq)]
pub struct AppelFonction<'a> {
    pub nom: &'a str,
    pub arguments: Vec<&'a str>,
}

/// Analyse un appel de fonction.
///
/// - pas de '(' : Ok(None), c’est un identifiant nu
/// - la parenthèse qui ferme la première '(' doit être le dernier caractère
/// - "f()" donne un seul argument vide (rejeté plus tard par l’évaluateur)
pub fn analyser_appel(expr: &str) -> Resultat<Option<AppelFonction<'_>>> {
    let Some(ouvrante) = expr.find('(') else {
        return Ok(None);
    };

    let fermante = position_fermante(expr, ouvrante)
        .ok_or_else(|| ErreurCalcul::syntaxe(format!("parenthèse fermante manquante : {expr}")))?;

    if fermante != expr.len() - 1 {
        return Err(ErreurCalcul::syntaxe(format!(
            "caractères inattendus après l’appel : {expr}"
        )));
    }

    let nom = &expr[..ouvrante];
    let contenu = retirer_parentheses_externes(&expr[ouvrante + 1..fermante]);
    let arguments = decouper_arguments(contenu)?;

    Ok(Some(AppelFonction { nom, arguments }))
}

/// Découpe sur les virgules de profondeur 0.
fn decouper_arguments(contenu: &str) -> Resultat<Vec<&str>> {
    if contenu.is_empty() {
        return Ok(vec![""]);
    }

    let mut out = Vec::new();
    let mut profondeur: i64 = 0;
    let mut debut = 0;

    for (i, c) in contenu.char_indices() {
        match c {
            '(' => profondeur += 1,
            ')' => profondeur -= 1,
            _ => {}
        }

        if profondeur < 0 {
            return Err(ErreurCalcul::syntaxe(format!(
                "parenthèses déséquilibrées dans les arguments : {contenu}"
            )));
        }

        if c == ',' && profondeur == 0 {
            out.push(argument_non_vide(&contenu[debut..i], contenu)?);
            debut = i + 1;
        }
    }

    out.push(argument_non_vide(&contenu[debut..], contenu)?);
    Ok(out)
}

fn argument_non_vide<'a>(arg: &'a str, contenu: &str) -> Resultat<&'a str> {
    if arg.is_empty() {
        return Err(ErreurCalcul::syntaxe(format!("argument vide : ({contenu})")));
    }
    Ok(arg)
}
