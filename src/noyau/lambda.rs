// src/noyau/lambda.rs
//
// Construction d’une fonction utilisateur à partir de "lambda(p1,p2,...):corps".
// Le corps n’est PAS évalué ici : il le sera à chaque appel, sur une copie de table.

use super::erreur::{ErreurCalcul, Resultat};
use super::fonctions::{Fonction, FonctionUtilisateur};
use super::parentheses::est_equilibree;
use super::table::valider_identifiant;

const MOT_CLE: &str = "lambda";

pub fn est_definition_fonction(s: &str) -> bool {
    s.starts_with(MOT_CLE)
}

pub fn construire_fonction(s: &str) -> Resultat<Fonction> {
    let Some(reste) = s.strip_prefix(MOT_CLE) else {
        return Err(ErreurCalcul::syntaxe(format!(
            "une définition de fonction commence par '{MOT_CLE}' : {s}"
        )));
    };

    let mut parties = reste.split(':');
    let (Some(signature), Some(corps), None) = (parties.next(), parties.next(), parties.next())
    else {
        return Err(ErreurCalcul::syntaxe(format!(
            "définition attendue sous la forme lambda(x,y):corps : {s}"
        )));
    };

    let Some(liste) = signature
        .strip_prefix('(')
        .and_then(|x| x.strip_suffix(')'))
    else {
        return Err(ErreurCalcul::syntaxe(format!(
            "paramètres attendus entre parenthèses : {signature}"
        )));
    };

    let mut parametres: Vec<String> = Vec::new();
    for p in liste.split(',') {
        if p.is_empty() {
            return Err(ErreurCalcul::identifiant("nom de paramètre vide"));
        }
        valider_identifiant(p)?;
        if parametres.iter().any(|deja| deja == p) {
            return Err(ErreurCalcul::identifiant(format!("paramètre '{p}' répété")));
        }
        parametres.push(p.to_string());
    }

    if corps.is_empty() {
        return Err(ErreurCalcul::syntaxe("corps de fonction vide"));
    }
    if !est_equilibree(corps) {
        return Err(ErreurCalcul::syntaxe(format!(
            "parenthèses déséquilibrées dans le corps : {corps}"
        )));
    }

    Ok(Fonction::Utilisateur(FonctionUtilisateur {
        parametres,
        corps: corps.to_string(),
    }))
}
